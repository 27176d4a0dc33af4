// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{App, StatePatch};
use crate::metrics::{monthly_active_income, monthly_expenses, monthly_passive_income};
use crate::models::{
    Asset, FinancialState, Recurrence, Transaction, TransactionFields, TransactionType,
};
use crate::records;
use crate::storage::KeyValueStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};

pub fn handle<S: KeyValueStore>(app: &mut App<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("rm", sub)) => {
            rm(app, sub, &mut io::stdout())?;
        }
        Some(("list", sub)) => list(app.state(), sub)?,
        _ => {}
    }
    Ok(())
}

pub fn fields_from_matches(sub: &clap::ArgMatches) -> Result<TransactionFields> {
    let mut f = TransactionFields::default();
    if let Some(v) = sub.get_one::<String>("description") {
        f.description = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("type") {
        f.r#type = TransactionType::parse(v)?;
    }
    if let Some(v) = sub.get_one::<String>("amount") {
        f.amount = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("category") {
        f.category = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("recurrence") {
        f.recurrence = Recurrence::parse(v)?;
    }
    if let Some(v) = sub.get_one::<String>("date") {
        f.date = parse_date(v)?;
    }
    Ok(f)
}

fn add<S: KeyValueStore>(app: &mut App<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fields = fields_from_matches(sub)?;
    let (kind, amount, description) = (fields.r#type, fields.amount, fields.description.clone());
    let transactions = records::create_transaction(&app.state().transactions, fields)?;
    app.update_state(StatePatch::transactions(transactions));
    println!("Recorded {} {} '{}'", kind, fmt_money(&amount), description);
    Ok(())
}

/// No confirmation step for transactions. Returns whether anything was removed.
pub fn rm<S: KeyValueStore, W: Write>(
    app: &mut App<S>,
    sub: &clap::ArgMatches,
    out: &mut W,
) -> Result<bool> {
    let id = sub.get_one::<String>("id").unwrap();
    let before = app.state().transactions.len();
    let transactions = records::delete_transaction(&app.state().transactions, id);
    let removed = transactions.len() != before;
    app.update_state(StatePatch::transactions(transactions));
    if removed {
        writeln!(out, "Removed transaction {}", id)?;
    } else {
        writeln!(out, "No transaction with id {}", id)?;
    }
    Ok(removed)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowTotals {
    pub active_income: Decimal,
    pub passive_income: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

/// Totals shown alongside the list: passive income comes from asset yields.
pub fn totals(transactions: &[Transaction], assets: &[Asset]) -> CashFlowTotals {
    let active_income = monthly_active_income(transactions);
    let passive_income = monthly_passive_income(assets);
    CashFlowTotals {
        active_income,
        passive_income,
        total_income: active_income.saturating_add(passive_income),
        total_expense: monthly_expenses(transactions),
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    transactions: &'a [Transaction],
    totals: CashFlowTotals,
}

fn list(state: &FinancialState, sub: &clap::ArgMatches) -> Result<()> {
    let t = totals(&state.transactions, &state.assets);
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if jsonl_flag {
        maybe_print_json(false, true, &state.transactions)?;
        return Ok(());
    }
    let listing = Listing {
        transactions: &state.transactions,
        totals: t.clone(),
    };
    if maybe_print_json(json_flag, false, &listing)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Renda Ativa", "Renda Passiva", "Renda Total", "Despesas"],
            vec![vec![
                fmt_money(&t.active_income),
                fmt_money(&t.passive_income),
                fmt_money(&t.total_income),
                fmt_money(&t.total_expense),
            ]],
        )
    );
    if state.transactions.is_empty() {
        println!("Nenhuma transação registrada.");
        return Ok(());
    }
    let rows = state
        .transactions
        .iter()
        .map(|tx| {
            let signed = match tx.r#type {
                TransactionType::Income => format!("+ {}", fmt_money(&tx.amount)),
                TransactionType::Expense => format!("- {}", fmt_money(&tx.amount)),
            };
            vec![
                tx.id.clone(),
                tx.date.to_string(),
                tx.description.clone(),
                tx.category.clone(),
                tx.recurrence.to_string(),
                signed,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Data", "Descrição", "Categoria", "Recorrência", "Valor"],
            rows,
        )
    );
    Ok(())
}
