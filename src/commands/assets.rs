// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{App, StatePatch};
use crate::error::FinError;
use crate::metrics::{asset_monthly_income, roi};
use crate::models::{Asset, AssetFields, AssetType, Liquidity};
use crate::records::{self, find};
use crate::storage::KeyValueStore;
use crate::utils::{
    confirm, fmt_money, fmt_pct, maybe_print_json, parse_date, parse_decimal, pretty_table,
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
        Some(("list", sub)) => list(&app.state().assets, sub)?,
        _ => {}
    }
    Ok(())
}

/// Overlays whatever the user passed on top of `base`.
pub fn fields_from_matches(base: AssetFields, sub: &clap::ArgMatches) -> Result<AssetFields> {
    let mut f = base;
    if let Some(v) = sub.get_one::<String>("name") {
        f.name = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("type") {
        f.r#type = AssetType::parse(v)?;
    }
    if let Some(v) = sub.get_one::<String>("current-value") {
        f.current_value = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("acquisition-value") {
        f.acquisition_value = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("acquisition-date") {
        f.acquisition_date = parse_date(v)?;
    }
    if let Some(v) = sub.get_one::<String>("liquidity") {
        f.liquidity = Liquidity::parse(v)?;
    }
    if let Some(v) = sub.get_one::<String>("yield") {
        f.monthly_yield = Some(parse_decimal(v)?);
    }
    Ok(f)
}

fn add<S: KeyValueStore>(app: &mut App<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fields = fields_from_matches(AssetFields::default(), sub)?;
    let name = fields.name.clone();
    let assets = records::create_asset(&app.state().assets, fields)?;
    let id = assets.last().map(|a| a.id.clone()).unwrap_or_default();
    app.update_state(StatePatch::assets(assets));
    println!("Added asset '{}' ({})", name, id);
    Ok(())
}

fn edit<S: KeyValueStore>(app: &mut App<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let current = &app.state().assets;
    let base = find(current, id)
        .map(Asset::fields)
        .ok_or_else(|| FinError::RecordNotFound {
            kind: "Asset",
            id: id.clone(),
        })?;
    let fields = fields_from_matches(base, sub)?;
    let assets = records::update_asset(current, id, fields)?;
    app.update_state(StatePatch::assets(assets));
    println!("Updated asset {}", id);
    Ok(())
}

/// Deletes after confirmation. Returns whether anything was removed.
pub fn rm<S: KeyValueStore, R: BufRead, W: Write>(
    app: &mut App<S>,
    sub: &clap::ArgMatches,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let id = sub.get_one::<String>("id").unwrap();
    if !sub.get_flag("yes")
        && !confirm(input, out, "Tem certeza que deseja excluir este ativo?")?
    {
        writeln!(out, "Cancelled")?;
        return Ok(false);
    }
    let before = app.state().assets.len();
    let assets = records::delete_asset(&app.state().assets, id);
    let removed = assets.len() != before;
    app.update_state(StatePatch::assets(assets));
    if removed {
        writeln!(out, "Removed asset {}", id)?;
    } else {
        writeln!(out, "No asset with id {}", id)?;
    }
    Ok(removed)
}

#[derive(Serialize)]
pub struct AssetRow {
    pub id: String,
    pub name: String,
    pub r#type: String,
    pub current_value: String,
    pub roi_pct: String,
    pub monthly_income: String,
    pub monthly_yield_pct: String,
    pub liquidity: String,
}

pub fn rows(assets: &[Asset]) -> Vec<AssetRow> {
    assets
        .iter()
        .map(|a| AssetRow {
            id: a.id.clone(),
            name: a.name.clone(),
            r#type: a.r#type.label().to_string(),
            current_value: format!("{:.2}", a.current_value),
            roi_pct: format!("{:.2}", roi(a)),
            monthly_income: format!("{:.2}", asset_monthly_income(a)),
            monthly_yield_pct: a.monthly_yield.unwrap_or_default().to_string(),
            liquidity: a.liquidity.label().to_string(),
        })
        .collect()
}

fn list(assets: &[Asset], sub: &clap::ArgMatches) -> Result<()> {
    let data = rows(assets);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if assets.is_empty() {
        println!("Nenhum ativo cadastrado.");
        return Ok(());
    }
    let table_rows = assets
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                format!("{}\n{}", a.name, a.r#type),
                fmt_money(&a.current_value),
                format!("{} (Total)", fmt_pct(&roi(a))),
                format!(
                    "{} ({}%)",
                    fmt_money(&asset_monthly_income(a)),
                    a.monthly_yield.unwrap_or_default()
                ),
                a.liquidity.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Nome", "Valor Atual", "Rentabilidade", "Renda Passiva", "Liquidez"],
            table_rows,
        )
    );
    Ok(())
}
