// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FinError;

/// Enumerations stored on disk by their display label. Each variant also
/// accepts a short English alias on input.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $label:literal | $alias:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn alias(&self) -> &'static str {
                match self {
                    $($name::$variant => $alias,)+
                }
            }

            pub fn parse(s: &str) -> Result<Self, FinError> {
                let needle = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().to_lowercase() == needle || v.alias() == needle)
                    .ok_or_else(|| FinError::InvalidLabel {
                        field: $field,
                        value: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|v| format!("{} ({})", v.label(), v.alias()))
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

labelled_enum! {
    AssetType ("asset type") {
        Cash => "Dinheiro" | "cash",
        RealEstate => "Imóvel" | "real-estate",
        Vehicle => "Veículo" | "vehicle",
        Investment => "Investimento" | "investment",
        Crypto => "Criptomoeda" | "crypto",
        Other => "Outros" | "other",
    }
}

labelled_enum! {
    Liquidity ("liquidity") {
        High => "Alta" | "high",
        Medium => "Média" | "medium",
        Low => "Baixa" | "low",
    }
}

labelled_enum! {
    LiabilityType ("liability type") {
        CreditCard => "Cartão de Crédito" | "credit-card",
        Loan => "Empréstimo" | "loan",
        Financing => "Financiamento" | "financing",
        Installment => "Parcelamento" | "installment",
        Other => "Outros" | "other",
    }
}

labelled_enum! {
    /// Only `Active` liabilities count towards the monthly installment burden.
    LiabilityStatus ("liability status") {
        Active => "Ativa" | "active",
        Paid => "Quitada" | "paid",
        Late => "Atrasada" | "late",
    }
}

labelled_enum! {
    TransactionType ("transaction type") {
        Income => "Receita" | "income",
        Expense => "Despesa" | "expense",
    }
}

labelled_enum! {
    /// Informational only; never used in aggregation.
    Recurrence ("recurrence") {
        Fixed => "Fixa" | "fixed",
        Variable => "Variável" | "variable",
        Eventual => "Eventual" | "eventual",
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// Optional number inputs left blank end up stored as `null`; they read as 0.
fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(rust_decimal::serde::float_option::deserialize(deserializer)?.unwrap_or_default())
}

fn int_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub r#type: AssetType,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub acquisition_value: Decimal,
    pub acquisition_date: NaiveDate,
    pub liquidity: Liquidity,
    /// Percent per month, 0 to 100.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub monthly_yield: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetFields {
    pub name: String,
    pub r#type: AssetType,
    pub current_value: Decimal,
    pub acquisition_value: Decimal,
    pub acquisition_date: NaiveDate,
    pub liquidity: Liquidity,
    pub monthly_yield: Option<Decimal>,
}

impl Default for AssetFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            r#type: AssetType::Investment,
            current_value: Decimal::ZERO,
            acquisition_value: Decimal::ZERO,
            acquisition_date: today(),
            liquidity: Liquidity::Medium,
            monthly_yield: Some(Decimal::ZERO),
        }
    }
}

impl Asset {
    pub fn from_fields(id: String, f: AssetFields) -> Self {
        Self {
            id,
            name: f.name,
            r#type: f.r#type,
            current_value: f.current_value,
            acquisition_value: f.acquisition_value,
            acquisition_date: f.acquisition_date,
            liquidity: f.liquidity,
            monthly_yield: f.monthly_yield,
        }
    }

    /// Editable fields, as an edit form would be pre-filled.
    pub fn fields(&self) -> AssetFields {
        AssetFields {
            name: self.name.clone(),
            r#type: self.r#type,
            current_value: self.current_value,
            acquisition_value: self.acquisition_value,
            acquisition_date: self.acquisition_date,
            liquidity: self.liquidity,
            monthly_yield: Some(self.monthly_yield.unwrap_or(Decimal::ZERO)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: String,
    pub name: String,
    pub r#type: LiabilityType,
    /// Remaining balance owed.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    /// Percent per month.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "decimal_or_zero"
    )]
    pub interest_rate: Decimal,
    #[serde(default, deserialize_with = "int_or_zero")]
    pub installments_count: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub installment_value: Decimal,
    pub start_date: NaiveDate,
    pub status: LiabilityStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiabilityFields {
    pub name: String,
    pub r#type: LiabilityType,
    pub total_value: Decimal,
    pub interest_rate: Decimal,
    pub installments_count: i64,
    pub installment_value: Decimal,
    pub start_date: NaiveDate,
    pub status: LiabilityStatus,
}

impl Default for LiabilityFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            r#type: LiabilityType::CreditCard,
            total_value: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            installments_count: 1,
            installment_value: Decimal::ZERO,
            start_date: today(),
            status: LiabilityStatus::Active,
        }
    }
}

impl Liability {
    pub fn from_fields(id: String, f: LiabilityFields) -> Self {
        Self {
            id,
            name: f.name,
            r#type: f.r#type,
            total_value: f.total_value,
            interest_rate: f.interest_rate,
            installments_count: f.installments_count,
            installment_value: f.installment_value,
            start_date: f.start_date,
            status: f.status,
        }
    }

    pub fn fields(&self) -> LiabilityFields {
        LiabilityFields {
            name: self.name.clone(),
            r#type: self.r#type,
            total_value: self.total_value,
            interest_rate: self.interest_rate,
            installments_count: self.installments_count,
            installment_value: self.installment_value,
            start_date: self.start_date,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub r#type: TransactionType,
    pub category: String,
    /// Always a magnitude; the sign comes from `type`.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub recurrence: Recurrence,
    pub date: NaiveDate,
    pub is_paid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub description: String,
    pub r#type: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub recurrence: Recurrence,
    pub date: NaiveDate,
}

impl Default for TransactionFields {
    fn default() -> Self {
        Self {
            description: String::new(),
            r#type: TransactionType::Expense,
            category: String::new(),
            amount: Decimal::ZERO,
            recurrence: Recurrence::Variable,
            date: today(),
        }
    }
}

/// The whole persisted document and the only app-wide mutable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialState {
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_aliases_parse() {
        assert_eq!(AssetType::parse("Imóvel").unwrap(), AssetType::RealEstate);
        assert_eq!(AssetType::parse("real-estate").unwrap(), AssetType::RealEstate);
        assert_eq!(LiabilityStatus::parse(" ativa ").unwrap(), LiabilityStatus::Active);
        assert_eq!(TransactionType::parse("DESPESA").unwrap(), TransactionType::Expense);
        assert!(Liquidity::parse("extreme").is_err());
    }

    #[test]
    fn enums_serialize_as_labels() {
        assert_eq!(
            serde_json::to_string(&LiabilityType::CreditCard).unwrap(),
            "\"Cartão de Crédito\""
        );
        let r: Recurrence = serde_json::from_str("\"Variável\"").unwrap();
        assert_eq!(r, Recurrence::Variable);
    }

    #[test]
    fn asset_uses_camel_case_and_numbers_on_disk() {
        let a = Asset {
            id: "x".into(),
            name: "Caixa".into(),
            r#type: AssetType::Cash,
            current_value: Decimal::new(150050, 2),
            acquisition_value: Decimal::from(1000),
            acquisition_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            liquidity: Liquidity::High,
            monthly_yield: None,
        };
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["type"], "Dinheiro");
        assert_eq!(v["currentValue"], serde_json::json!(1500.5));
        assert_eq!(v["acquisitionDate"], "2024-03-01");
        assert!(v.get("monthlyYield").is_none());
    }
}
