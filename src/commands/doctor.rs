// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FinancialState, LiabilityStatus};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Records are never rejected on input; this only reports what looks off.
pub fn findings(state: &FinancialState) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut issue = |kind: &str, detail: String| rows.push(vec![kind.to_string(), detail]);

    // 1) Duplicate ids per collection
    let mut seen = HashSet::new();
    for a in &state.assets {
        if !seen.insert(a.id.as_str()) {
            issue("duplicate_asset_id", a.id.clone());
        }
    }
    let mut seen = HashSet::new();
    for l in &state.liabilities {
        if !seen.insert(l.id.as_str()) {
            issue("duplicate_liability_id", l.id.clone());
        }
    }
    let mut seen = HashSet::new();
    for t in &state.transactions {
        if !seen.insert(t.id.as_str()) {
            issue("duplicate_transaction_id", t.id.clone());
        }
    }

    // 2) Asset values and yields
    for a in &state.assets {
        if a.current_value < Decimal::ZERO || a.acquisition_value < Decimal::ZERO {
            issue("negative_asset_value", format!("{} ({})", a.name, a.id));
        }
        if let Some(y) = a.monthly_yield {
            if y < Decimal::ZERO || y > Decimal::ONE_HUNDRED {
                issue("yield_out_of_range", format!("{} ({}): {}%", a.name, a.id, y));
            }
        }
    }

    // 3) Liabilities
    for l in &state.liabilities {
        if l.total_value < Decimal::ZERO || l.installment_value < Decimal::ZERO {
            issue("negative_liability_value", format!("{} ({})", l.name, l.id));
        }
        if l.installments_count <= 0 {
            issue(
                "non_positive_installments",
                format!("{} ({}): {}", l.name, l.id, l.installments_count),
            );
        }
        if l.status == LiabilityStatus::Active && l.installment_value.is_zero() {
            issue("active_without_installment", format!("{} ({})", l.name, l.id));
        }
    }

    // 4) Transactions
    for t in &state.transactions {
        if t.amount < Decimal::ZERO {
            issue("negative_amount", format!("{} ({})", t.description, t.id));
        }
    }
    rows
}

pub fn handle(state: &FinancialState) -> Result<()> {
    let rows = findings(state);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
