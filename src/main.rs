// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::sync::Arc;

use finhealth::advisor::{GeminiClient, TextGenerator};
use finhealth::app::{App, StatePatch, View};
use finhealth::config::Config;
use finhealth::storage::SqliteStore;
use finhealth::{cli, commands, logging};

fn main() -> Result<()> {
    logging::init_logging();
    let cfg = Config::load();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = cfg.resolve_db_path(matches.get_one::<String>("db"))?;
    let store = SqliteStore::open(&path)?;
    let mut app = App::open(store);

    match matches.subcommand() {
        Some(("init", _)) => {
            app.update_state(StatePatch::default());
            println!("Storage initialized at {}", path.display());
        }
        Some(("overview", sub)) => {
            app.navigate(View::Overview);
            commands::overview::handle(app.state(), sub)?;
        }
        Some(("asset", sub)) => {
            app.navigate(View::Assets);
            commands::assets::handle(&mut app, sub)?;
        }
        Some(("liability", sub)) => {
            app.navigate(View::Liabilities);
            commands::liabilities::handle(&mut app, sub)?;
        }
        Some(("tx", sub)) => {
            app.navigate(View::CashFlow);
            commands::transactions::handle(&mut app, sub)?;
        }
        Some(("advisor", sub)) => {
            app.navigate(View::Advisor);
            let generator = GeminiClient::from_config(&cfg)?
                .map(|g| Arc::new(g) as Arc<dyn TextGenerator>);
            commands::advisor::handle(app.state(), generator, sub)?;
        }
        Some(("export", sub)) => commands::exporter::handle(app.state(), sub)?,
        Some(("doctor", _)) => commands::doctor::handle(app.state())?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    tracing::debug!(view = app.view().title(), "Done");
    Ok(())
}
