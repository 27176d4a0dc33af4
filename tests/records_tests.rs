// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finhealth::error::FinError;
use finhealth::metrics::roi;
use finhealth::models::{
    AssetFields, AssetType, LiabilityFields, LiabilityStatus, TransactionFields, TransactionType,
};
use finhealth::records;
use finhealth::storage::default_state;
use rust_decimal::Decimal;

fn tesouro() -> AssetFields {
    AssetFields {
        name: "Tesouro Direto".into(),
        r#type: AssetType::Investment,
        current_value: Decimal::from(1000),
        acquisition_value: Decimal::from(800),
        ..Default::default()
    }
}

#[test]
fn create_asset_appends_one_record_with_fresh_id() {
    let before = default_state().assets;
    let after = records::create_asset(&before, tesouro()).unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[..before.len()], &before[..]);

    let created = after.last().unwrap();
    assert_eq!(created.name, "Tesouro Direto");
    assert!(before.iter().all(|a| a.id != created.id));
    assert_eq!(format!("{:.2}", roi(created)), "25.00");
}

#[test]
fn created_ids_are_unique() {
    let mut assets = Vec::new();
    for _ in 0..20 {
        assets = records::create_asset(&assets, tesouro()).unwrap();
    }
    let mut ids: Vec<_> = assets.iter().map(|a| a.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn blank_name_is_rejected() {
    let fields = AssetFields {
        name: "   ".into(),
        ..tesouro()
    };
    let err = records::create_asset(&[], fields).unwrap_err();
    assert!(matches!(err, FinError::MissingField("name")));
}

#[test]
fn negative_values_are_accepted() {
    let fields = AssetFields {
        current_value: Decimal::from(-5),
        monthly_yield: Some(Decimal::from(250)),
        ..tesouro()
    };
    let assets = records::create_asset(&[], fields).unwrap();
    assert_eq!(assets[0].current_value, Decimal::from(-5));
}

#[test]
fn update_asset_replaces_fields_and_keeps_id() {
    let assets = default_state().assets;
    let mut fields = assets[1].fields();
    fields.current_value = Decimal::from(250000);
    let updated = records::update_asset(&assets, "2", fields).unwrap();
    assert_eq!(updated.len(), 2);
    assert_eq!(updated[1].id, "2");
    assert_eq!(updated[1].current_value, Decimal::from(250000));
    assert_eq!(updated[0], assets[0]);
}

#[test]
fn update_unknown_asset_is_an_error() {
    let assets = default_state().assets;
    let err = records::update_asset(&assets, "nope", tesouro()).unwrap_err();
    assert!(matches!(err, FinError::RecordNotFound { kind: "Asset", .. }));
}

#[test]
fn delete_asset_by_id() {
    let assets = default_state().assets;
    let after = records::delete_asset(&assets, "1");
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, "2");
}

#[test]
fn delete_unknown_liability_leaves_collection_unchanged() {
    let liabilities = default_state().liabilities;
    let after = records::delete_liability(&liabilities, "does-not-exist");
    assert_eq!(after, liabilities);
}

#[test]
fn liability_create_and_update() {
    let fields = LiabilityFields {
        name: "Cartão".into(),
        total_value: Decimal::from(1200),
        installment_value: Decimal::from(400),
        installments_count: 3,
        ..Default::default()
    };
    let liabilities = records::create_liability(&[], fields).unwrap();
    assert_eq!(liabilities[0].status, LiabilityStatus::Active);
    let id = liabilities[0].id.clone();

    let mut paid = liabilities[0].fields();
    paid.status = LiabilityStatus::Paid;
    let liabilities = records::update_liability(&liabilities, &id, paid).unwrap();
    assert_eq!(liabilities[0].id, id);
    assert_eq!(liabilities[0].status, LiabilityStatus::Paid);
}

#[test]
fn new_transactions_start_unpaid() {
    let fields = TransactionFields {
        description: "Freela".into(),
        r#type: TransactionType::Income,
        category: "Trabalho".into(),
        amount: Decimal::from(900),
        ..Default::default()
    };
    let transactions = records::create_transaction(&default_state().transactions, fields).unwrap();
    assert_eq!(transactions.len(), 2);
    assert!(!transactions[1].is_paid);
    assert_eq!(transactions[1].r#type, TransactionType::Income);
}

#[test]
fn transaction_requires_description_and_category() {
    let no_category = TransactionFields {
        description: "Padaria".into(),
        ..Default::default()
    };
    let err = records::create_transaction(&[], no_category).unwrap_err();
    assert!(matches!(err, FinError::MissingField("category")));
}

#[test]
fn delete_transaction_by_id() {
    let transactions = default_state().transactions;
    assert!(records::delete_transaction(&transactions, "1").is_empty());
    assert_eq!(records::delete_transaction(&transactions, "2"), transactions);
}
