// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Create/update/delete over the record collections. Every operation
//! returns the complete replacement collection; nothing here persists.

use uuid::Uuid;

use crate::error::FinError;
use crate::models::{
    Asset, AssetFields, Liability, LiabilityFields, Transaction, TransactionFields,
};

pub trait Record: Clone {
    const KIND: &'static str;
    fn id(&self) -> &str;
}

impl Record for Asset {
    const KIND: &'static str = "Asset";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Liability {
    const KIND: &'static str = "Liability";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Transaction {
    const KIND: &'static str = "Transaction";
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn find<'a, T: Record>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|r| r.id() == id)
}

pub fn require_text(field: &'static str, value: &str) -> Result<(), FinError> {
    if value.trim().is_empty() {
        return Err(FinError::MissingField(field));
    }
    Ok(())
}

fn append<T: Record>(items: &[T], record: T) -> Vec<T> {
    let mut out = items.to_vec();
    out.push(record);
    out
}

fn replace<T: Record>(items: &[T], id: &str, record: T) -> Result<Vec<T>, FinError> {
    if find(items, id).is_none() {
        return Err(FinError::RecordNotFound {
            kind: T::KIND,
            id: id.to_string(),
        });
    }
    Ok(items
        .iter()
        .map(|r| if r.id() == id { record.clone() } else { r.clone() })
        .collect())
}

/// Unknown ids leave the collection unchanged.
pub fn remove<T: Record>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|r| r.id() != id).cloned().collect()
}

pub fn create_asset(assets: &[Asset], fields: AssetFields) -> Result<Vec<Asset>, FinError> {
    require_text("name", &fields.name)?;
    Ok(append(assets, Asset::from_fields(new_id(), fields)))
}

pub fn update_asset(
    assets: &[Asset],
    id: &str,
    fields: AssetFields,
) -> Result<Vec<Asset>, FinError> {
    require_text("name", &fields.name)?;
    replace(assets, id, Asset::from_fields(id.to_string(), fields))
}

pub fn delete_asset(assets: &[Asset], id: &str) -> Vec<Asset> {
    remove(assets, id)
}

pub fn create_liability(
    liabilities: &[Liability],
    fields: LiabilityFields,
) -> Result<Vec<Liability>, FinError> {
    require_text("name", &fields.name)?;
    Ok(append(liabilities, Liability::from_fields(new_id(), fields)))
}

pub fn update_liability(
    liabilities: &[Liability],
    id: &str,
    fields: LiabilityFields,
) -> Result<Vec<Liability>, FinError> {
    require_text("name", &fields.name)?;
    replace(liabilities, id, Liability::from_fields(id.to_string(), fields))
}

pub fn delete_liability(liabilities: &[Liability], id: &str) -> Vec<Liability> {
    remove(liabilities, id)
}

/// New transactions always start unpaid.
pub fn create_transaction(
    transactions: &[Transaction],
    fields: TransactionFields,
) -> Result<Vec<Transaction>, FinError> {
    require_text("description", &fields.description)?;
    require_text("category", &fields.category)?;
    let record = Transaction {
        id: new_id(),
        description: fields.description,
        r#type: fields.r#type,
        category: fields.category,
        amount: fields.amount,
        recurrence: fields.recurrence,
        date: fields.date,
        is_paid: false,
    };
    Ok(append(transactions, record))
}

pub fn delete_transaction(transactions: &[Transaction], id: &str) -> Vec<Transaction> {
    remove(transactions, id)
}
