// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finhealth::error::FinError;
use finhealth::models::{AssetType, FinancialState, LiabilityStatus, Recurrence};
use finhealth::storage::{self, KeyValueStore, STORAGE_KEY, SqliteStore, default_state};
use finhealth::utils::parse_decimal;
use rust_decimal::Decimal;
use tempfile::tempdir;

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, FinError> {
        Err(FinError::Storage(rusqlite::Error::QueryReturnedNoRows))
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), FinError> {
        Err(FinError::Storage(rusqlite::Error::QueryReturnedNoRows))
    }
}

fn sample_state() -> FinancialState {
    let mut s = default_state();
    s.assets[0].monthly_yield = None;
    s.assets[1].current_value = Decimal::new(22050075, 2);
    s.liabilities[0].status = LiabilityStatus::Late;
    s.transactions[0].recurrence = Recurrence::Eventual;
    s.transactions[0].date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    s
}

#[test]
fn empty_store_yields_seed_state() {
    let store = SqliteStore::open_in_memory().unwrap();
    let s = storage::load(&store);
    assert_eq!(s, default_state());
    assert_eq!(s.assets.len(), 2);
    assert_eq!(s.liabilities.len(), 1);
    assert_eq!(s.transactions.len(), 1);
}

#[test]
fn save_then_load_round_trips() {
    let store = SqliteStore::open_in_memory().unwrap();
    let s = sample_state();
    storage::save(&store, &s);
    assert_eq!(storage::load(&store), s);
    // Saving what was loaded changes nothing.
    storage::save(&store, &storage::load(&store));
    assert_eq!(storage::load(&store), s);
}

#[test]
fn later_save_overwrites_earlier() {
    let store = SqliteStore::open_in_memory().unwrap();
    storage::save(&store, &sample_state());
    storage::save(&store, &FinancialState::default());
    assert_eq!(storage::load(&store), FinancialState::default());
}

#[test]
fn corrupt_document_falls_back_to_seed_state() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set(STORAGE_KEY, "{\"assets\": [ oops").unwrap();
    assert_eq!(storage::load(&store), default_state());

    store
        .set(STORAGE_KEY, r#"{"assets":[{"id":"1","type":"Iate"}],"liabilities":[],"transactions":[]}"#)
        .unwrap();
    assert_eq!(storage::load(&store), default_state());
}

#[test]
fn storage_failures_never_escape() {
    assert_eq!(storage::load(&BrokenStore), default_state());
    storage::save(&BrokenStore, &sample_state());
}

#[test]
fn stored_document_uses_labels_and_camel_case() {
    let store = SqliteStore::open_in_memory().unwrap();
    storage::save(&store, &default_state());
    let raw = store.get(STORAGE_KEY).unwrap().unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["assets"][0]["type"], "Dinheiro");
    assert_eq!(v["assets"][0]["liquidity"], "Alta");
    assert_eq!(v["assets"][0]["currentValue"], serde_json::json!(28000.0));
    assert!(v["assets"][0]["monthlyYield"].is_number());
    assert_eq!(v["liabilities"][0]["status"], "Ativa");
    assert_eq!(v["liabilities"][0]["installmentsCount"], 408);
    assert_eq!(v["transactions"][0]["type"], "Receita");
    assert_eq!(v["transactions"][0]["isPaid"], true);
}

#[test]
fn reads_documents_written_by_the_web_app() {
    let raw = r#"{
      "assets": [
        {"id":"5b8a","name":"Tesouro Selic","type":"Investimento","currentValue":1050.5,
         "acquisitionValue":1000,"acquisitionDate":"2024-02-01","liquidity":"Média"}
      ],
      "liabilities": [
        {"id":"c1","name":"Nubank","type":"Cartão de Crédito","totalValue":2300,
         "interestRate":12.5,"installmentsCount":3,"installmentValue":766.5,
         "startDate":"2025-05-05","status":"Quitada"}
      ],
      "transactions": [
        {"id":"t1","description":"Mercado","type":"Despesa","category":"Casa","amount":812.25,
         "recurrence":"Variável","date":"2025-06-01","isPaid":false}
      ]
    }"#;
    let store = SqliteStore::open_in_memory().unwrap();
    store.set(STORAGE_KEY, raw).unwrap();
    let s = storage::load(&store);
    assert_eq!(s.assets[0].r#type, AssetType::Investment);
    assert_eq!(s.assets[0].monthly_yield, None);
    assert_eq!(s.assets[0].current_value, Decimal::new(10505, 1));
    assert_eq!(s.liabilities[0].status, LiabilityStatus::Paid);
    assert_eq!(s.liabilities[0].installment_value, Decimal::new(7665, 1));
    assert_eq!(s.transactions[0].recurrence, Recurrence::Variable);
    assert!(!s.transactions[0].is_paid);
}

#[test]
fn blank_optional_numbers_load_as_zero() {
    let raw = r#"{
      "assets": [
        {"id":"a1","name":"Poupança","type":"Dinheiro","currentValue":500,
         "acquisitionValue":500,"acquisitionDate":"2024-01-01","liquidity":"Alta",
         "monthlyYield":null}
      ],
      "liabilities": [
        {"id":"c1","name":"Nubank","type":"Cartão de Crédito","totalValue":2300,
         "interestRate":null,"installmentsCount":null,"installmentValue":766.5,
         "startDate":"2025-05-05","status":"Ativa"}
      ],
      "transactions": []
    }"#;
    let store = SqliteStore::open_in_memory().unwrap();
    store.set(STORAGE_KEY, raw).unwrap();

    let s = storage::load(&store);
    assert_eq!(s.assets.len(), 1);
    assert_eq!(s.assets[0].monthly_yield, None);
    assert_eq!(s.liabilities.len(), 1);
    assert_eq!(s.liabilities[0].name, "Nubank");
    assert_eq!(s.liabilities[0].interest_rate, Decimal::ZERO);
    assert_eq!(s.liabilities[0].installments_count, 0);
    assert!(s.transactions.is_empty());

    // Saving writes the zeros back, and they load the same way.
    storage::save(&store, &s);
    assert_eq!(storage::load(&store), s);
}

#[test]
fn entered_values_survive_save_and_load() {
    let long = parse_decimal("1234567.123456789012345").unwrap();
    assert_eq!(long, Decimal::new(12345671235, 4));
    let largest = parse_decimal("99999999999.9999").unwrap();

    let mut s = sample_state();
    s.assets[1].current_value = long;
    s.assets[1].acquisition_value = largest;
    s.liabilities[0].interest_rate = parse_decimal("0.00005").unwrap();
    s.transactions[0].amount = parse_decimal("-0.0001").unwrap();

    let store = SqliteStore::open_in_memory().unwrap();
    storage::save(&store, &s);
    assert_eq!(storage::load(&store), s);
}

#[test]
fn out_of_range_input_is_rejected() {
    assert!(parse_decimal("100000000000").is_err());
    assert!(parse_decimal("-100000000000").is_err());
    assert!(parse_decimal("50000000000000000000000000000").is_err());
    assert!(parse_decimal("abc").is_err());
    assert_eq!(parse_decimal(" 1.85 ").unwrap(), Decimal::new(185, 2));
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("finhealth.sqlite");
    let s = sample_state();
    {
        let store = SqliteStore::open(&path).unwrap();
        storage::save(&store, &s);
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(storage::load(&store), s);
}
