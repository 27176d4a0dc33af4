// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::{BufRead, Write};
use std::time::Duration;

const UA: &str = concat!(
    "finhealth/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/finhealth)"
);

/// No request timeout: callers wait for the transport to resolve or fail.
pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(None::<Duration>)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Entered values stay below this magnitude and carry at most
/// `INPUT_DP` decimals: 15 significant digits, which the JSON number
/// in storage holds exactly.
pub const MAX_INPUT: i64 = 100_000_000_000;
pub const INPUT_DP: u32 = 4;

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))?;
    if d.abs() >= Decimal::from(MAX_INPUT) {
        bail!("Value '{}' out of range (must be below {})", s.trim(), MAX_INPUT);
    }
    Ok(d.round_dp_with_strategy(INPUT_DP, RoundingStrategy::MidpointAwayFromZero))
}

pub fn parse_int(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid integer '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("R$ {:.2}", d.round_dp(2))
}

pub fn fmt_pct(d: &Decimal) -> String {
    format!("{:.2}%", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Asks a yes/no question; anything but s/sim/y/yes is a no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    write!(out, "{} [s/N] ", question)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "s" | "sim" | "y" | "yes"))
}
