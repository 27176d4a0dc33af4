// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures. Everything here is recomputed from the records on
//! demand; a zero divisor always yields a zero ratio. Stored documents put
//! no bound on magnitudes, so sums and products saturate at the `Decimal`
//! range instead of overflowing.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{
    Asset, AssetType, FinancialState, Liability, LiabilityStatus, Transaction, TransactionType,
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn total_assets(assets: &[Asset]) -> Decimal {
    saturating_sum(assets.iter().map(|a| a.current_value))
}

/// Sum of remaining balances, not original principal.
pub fn total_liabilities(liabilities: &[Liability]) -> Decimal {
    saturating_sum(liabilities.iter().map(|l| l.total_value))
}

pub fn net_worth(assets: &[Asset], liabilities: &[Liability]) -> Decimal {
    total_assets(assets).saturating_sub(total_liabilities(liabilities))
}

fn sum_by_type(transactions: &[Transaction], ty: TransactionType) -> Decimal {
    saturating_sum(
        transactions
            .iter()
            .filter(|t| t.r#type == ty)
            .map(|t| t.amount),
    )
}

pub fn monthly_active_income(transactions: &[Transaction]) -> Decimal {
    sum_by_type(transactions, TransactionType::Income)
}

pub fn monthly_expenses(transactions: &[Transaction]) -> Decimal {
    sum_by_type(transactions, TransactionType::Expense)
}

pub fn asset_monthly_income(asset: &Asset) -> Decimal {
    let rate = asset.monthly_yield.unwrap_or(Decimal::ZERO) / HUNDRED;
    asset.current_value.saturating_mul(rate)
}

pub fn monthly_passive_income(assets: &[Asset]) -> Decimal {
    saturating_sum(assets.iter().map(asset_monthly_income))
}

pub fn monthly_installments(liabilities: &[Liability]) -> Decimal {
    saturating_sum(
        liabilities
            .iter()
            .filter(|l| l.status == LiabilityStatus::Active)
            .map(|l| l.installment_value),
    )
}

pub fn monthly_balance(state: &FinancialState) -> Decimal {
    let income = monthly_active_income(&state.transactions)
        .saturating_add(monthly_passive_income(&state.assets));
    let outflow = monthly_expenses(&state.transactions)
        .saturating_add(monthly_installments(&state.liabilities));
    income.saturating_sub(outflow)
}

/// `part` as a percentage of `whole`; 0 when `whole` is 0.
pub fn share_pct(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(HUNDRED),
        None if part.is_sign_negative() == whole.is_sign_negative() => Decimal::MAX,
        None => Decimal::MIN,
    }
}

/// Total return since acquisition, in percent.
pub fn roi(asset: &Asset) -> Decimal {
    share_pct(
        asset.current_value.saturating_sub(asset.acquisition_value),
        asset.acquisition_value,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub asset_type: AssetType,
    pub value: Decimal,
}

/// Current value per asset type, in order of first appearance.
pub fn asset_allocation(assets: &[Asset]) -> Vec<AllocationSlice> {
    let mut out: Vec<AllocationSlice> = Vec::new();
    for a in assets {
        match out.iter_mut().find(|s| s.asset_type == a.r#type) {
            Some(slice) => slice.value = slice.value.saturating_add(a.current_value),
            None => out.push(AllocationSlice {
                asset_type: a.r#type,
                value: a.current_value,
            }),
        }
    }
    out
}

/// Share of active and passive income in total income, in percent.
pub fn income_composition(active: Decimal, passive: Decimal) -> (Decimal, Decimal) {
    let total = active.saturating_add(passive);
    (share_pct(active, total), share_pct(passive, total))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
    pub monthly_active_income: Decimal,
    pub monthly_passive_income: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_installments: Decimal,
    pub monthly_outflow: Decimal,
    pub monthly_balance: Decimal,
    pub active_income_pct: Decimal,
    pub passive_income_pct: Decimal,
    pub allocation: Vec<AllocationSlice>,
}

impl Summary {
    pub fn from_state(state: &FinancialState) -> Self {
        let total_assets = total_assets(&state.assets);
        let total_liabilities = total_liabilities(&state.liabilities);
        let active = monthly_active_income(&state.transactions);
        let passive = monthly_passive_income(&state.assets);
        let expenses = monthly_expenses(&state.transactions);
        let installments = monthly_installments(&state.liabilities);
        let (active_pct, passive_pct) = income_composition(active, passive);
        let income = active.saturating_add(passive);
        let outflow = expenses.saturating_add(installments);
        Self {
            total_assets,
            total_liabilities,
            net_worth: total_assets.saturating_sub(total_liabilities),
            monthly_active_income: active,
            monthly_passive_income: passive,
            monthly_income: income,
            monthly_expenses: expenses,
            monthly_installments: installments,
            monthly_outflow: outflow,
            monthly_balance: income.saturating_sub(outflow),
            active_income_pct: active_pct,
            passive_income_pct: passive_pct,
            allocation: asset_allocation(&state.assets),
        }
    }
}
