// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{App, StatePatch};
use crate::error::FinError;
use crate::metrics::{monthly_installments, total_liabilities};
use crate::models::{Liability, LiabilityFields, LiabilityStatus, LiabilityType};
use crate::records::{self, find};
use crate::storage::KeyValueStore;
use crate::utils::{
    confirm, fmt_money, maybe_print_json, parse_date, parse_decimal, parse_int, pretty_table,
};
use anyhow::Result;
use serde::Serialize;
use std::io::{self, BufRead, Write};

pub fn handle<S: KeyValueStore>(app: &mut App<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => {
            let stdin = io::stdin();
            rm(app, sub, &mut stdin.lock(), &mut io::stdout())?;
        }
        Some(("list", sub)) => list(&app.state().liabilities, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn fields_from_matches(
    base: LiabilityFields,
    sub: &clap::ArgMatches,
) -> Result<LiabilityFields> {
    let mut f = base;
    if let Some(v) = sub.get_one::<String>("name") {
        f.name = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("type") {
        f.r#type = LiabilityType::parse(v)?;
    }
    if let Some(v) = sub.get_one::<String>("total-value") {
        f.total_value = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("installment-value") {
        f.installment_value = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("interest-rate") {
        f.interest_rate = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("installments") {
        f.installments_count = parse_int(v)?;
    }
    if let Some(v) = sub.get_one::<String>("start-date") {
        f.start_date = parse_date(v)?;
    }
    if let Some(v) = sub.get_one::<String>("status") {
        f.status = LiabilityStatus::parse(v)?;
    }
    Ok(f)
}

fn add<S: KeyValueStore>(app: &mut App<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fields = fields_from_matches(LiabilityFields::default(), sub)?;
    let name = fields.name.clone();
    let liabilities = records::create_liability(&app.state().liabilities, fields)?;
    let id = liabilities.last().map(|l| l.id.clone()).unwrap_or_default();
    app.update_state(StatePatch::liabilities(liabilities));
    println!("Added liability '{}' ({})", name, id);
    Ok(())
}

fn edit<S: KeyValueStore>(app: &mut App<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let current = &app.state().liabilities;
    let base = find(current, id)
        .map(Liability::fields)
        .ok_or_else(|| FinError::RecordNotFound {
            kind: "Liability",
            id: id.clone(),
        })?;
    let fields = fields_from_matches(base, sub)?;
    let liabilities = records::update_liability(current, id, fields)?;
    app.update_state(StatePatch::liabilities(liabilities));
    println!("Updated liability {}", id);
    Ok(())
}

pub fn rm<S: KeyValueStore, R: BufRead, W: Write>(
    app: &mut App<S>,
    sub: &clap::ArgMatches,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let id = sub.get_one::<String>("id").unwrap();
    if !sub.get_flag("yes")
        && !confirm(input, out, "Tem certeza que deseja excluir esta dívida?")?
    {
        writeln!(out, "Cancelled")?;
        return Ok(false);
    }
    let before = app.state().liabilities.len();
    let liabilities = records::delete_liability(&app.state().liabilities, id);
    let removed = liabilities.len() != before;
    app.update_state(StatePatch::liabilities(liabilities));
    if removed {
        writeln!(out, "Removed liability {}", id)?;
    } else {
        writeln!(out, "No liability with id {}", id)?;
    }
    Ok(removed)
}

#[derive(Serialize)]
pub struct LiabilityRow {
    pub id: String,
    pub name: String,
    pub r#type: String,
    pub total_value: String,
    pub installment_value: String,
    pub installments_count: i64,
    pub interest_rate_pct: String,
    pub status: String,
}

pub fn rows(liabilities: &[Liability]) -> Vec<LiabilityRow> {
    liabilities
        .iter()
        .map(|l| LiabilityRow {
            id: l.id.clone(),
            name: l.name.clone(),
            r#type: l.r#type.label().to_string(),
            total_value: format!("{:.2}", l.total_value),
            installment_value: format!("{:.2}", l.installment_value),
            installments_count: l.installments_count,
            interest_rate_pct: l.interest_rate.to_string(),
            status: l.status.label().to_string(),
        })
        .collect()
}

fn list(liabilities: &[Liability], sub: &clap::ArgMatches) -> Result<()> {
    let data = rows(liabilities);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if liabilities.is_empty() {
        println!("Nenhuma dívida cadastrada.");
        return Ok(());
    }
    let table_rows = data
        .into_iter()
        .map(|r| {
            vec![
                r.id,
                format!("{}\n{}", r.name, r.r#type),
                format!("R$ {}", r.total_value),
                format!("R$ {} x {}", r.installment_value, r.installments_count),
                format!("{}% a.m.", r.interest_rate_pct),
                r.status,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Nome", "Saldo Devedor", "Parcela", "Juros", "Status"],
            table_rows,
        )
    );
    println!(
        "Total: {} | Parcelas ativas: {} / mês",
        fmt_money(&total_liabilities(liabilities)),
        fmt_money(&monthly_installments(liabilities))
    );
    Ok(())
}
