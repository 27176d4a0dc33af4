// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FinError;
use crate::models::{
    Asset, AssetType, FinancialState, Liability, LiabilityStatus, LiabilityType, Liquidity,
    Recurrence, Transaction, TransactionType, today,
};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "FinHealth", "finhealth"));

/// Key the whole state document lives under.
pub const STORAGE_KEY: &str = "finhealth_pro_data_v1";

/// A persistent string slot per key. Writes overwrite; last write wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, FinError>;
    fn set(&self, key: &str, value: &str) -> Result<(), FinError>;
}

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("finhealth.sqlite"))
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, FinError> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), FinError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Reads the stored state. Falls back to [`default_state`] when nothing is
/// stored or the stored document cannot be read.
pub fn load(store: &dyn KeyValueStore) -> FinancialState {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default_state(),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load state");
            return default_state();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load state");
            default_state()
        }
    }
}

/// Writes the full state under [`STORAGE_KEY`]. Failures are logged only.
pub fn save(store: &dyn KeyValueStore, state: &FinancialState) {
    let raw = match serde_json::to_string(state) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(error = %err, "Failed to save state");
            return;
        }
    };
    if let Err(err) = store.set(STORAGE_KEY, &raw) {
        tracing::error!(error = %err, "Failed to save state");
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Seed data shown on first run.
pub fn default_state() -> FinancialState {
    FinancialState {
        assets: vec![
            Asset {
                id: "1".into(),
                name: "Reserva de Emergência".into(),
                r#type: AssetType::Cash,
                current_value: Decimal::from(28000),
                acquisition_value: Decimal::from(10000),
                acquisition_date: ymd(2023, 1, 15),
                liquidity: Liquidity::High,
                monthly_yield: Some(Decimal::new(185, 2)),
            },
            Asset {
                id: "2".into(),
                name: "Apartamento Areal".into(),
                r#type: AssetType::RealEstate,
                current_value: Decimal::from(220000),
                acquisition_value: Decimal::from(190000),
                acquisition_date: ymd(2025, 7, 20),
                liquidity: Liquidity::Low,
                monthly_yield: Some(Decimal::new(5, 1)),
            },
        ],
        liabilities: vec![Liability {
            id: "1".into(),
            name: "Financiamento apto".into(),
            r#type: LiabilityType::Financing,
            total_value: Decimal::from(175986),
            interest_rate: Decimal::new(15, 1),
            installments_count: 408,
            installment_value: Decimal::from(1012),
            start_date: ymd(2022, 8, 10),
            status: LiabilityStatus::Active,
        }],
        transactions: vec![Transaction {
            id: "1".into(),
            description: "Salário Mensal".into(),
            r#type: TransactionType::Income,
            category: "Trabalho".into(),
            amount: Decimal::from(4000),
            recurrence: Recurrence::Fixed,
            date: today(),
            is_paid: true,
        }],
    }
}
