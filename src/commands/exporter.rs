// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::FinancialState;
use anyhow::{Context, Result, bail};

pub fn handle(state: &FinancialState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("state", sub)) => export_state(state, sub),
        Some(("transactions", sub)) => export_transactions(state, sub),
        _ => Ok(()),
    }
}

/// Same document that is stored, pretty-printed.
fn export_state(state: &FinancialState, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    std::fs::write(out, serde_json::to_string_pretty(state)?)
        .with_context(|| format!("Write {}", out))?;
    println!("Exported state to {}", out);
    Ok(())
}

fn export_transactions(state: &FinancialState, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "description",
                "type",
                "category",
                "amount",
                "recurrence",
                "is_paid",
            ])?;
            for t in &state.transactions {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.r#type.label().to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.recurrence.label().to_string(),
                    t.is_paid.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&state.transactions)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
