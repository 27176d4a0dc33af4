// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::{AdvisorSession, TextGenerator};
use crate::models::FinancialState;
use anyhow::Result;
use std::sync::Arc;

/// Runs one advisor request and returns the text to display.
pub fn ask(
    state: &FinancialState,
    generator: Option<Arc<dyn TextGenerator>>,
    question: Option<&str>,
) -> String {
    let mut session = AdvisorSession::new(generator);
    session.request(state, question);
    session.wait().unwrap_or_default().to_string()
}

pub fn handle(
    state: &FinancialState,
    generator: Option<Arc<dyn TextGenerator>>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let question = sub.get_one::<String>("question").map(String::as_str);
    if generator.is_some() {
        eprintln!("Consultando o assistente...");
    }
    println!("{}", ask(state, generator, question));
    Ok(())
}
