//! The derived ledger-entry type produced by the derivation engine.
//!
//! A [`FinancialTransaction`] is a recomputed view, never a stored row: the
//! engine regenerates the full list from the raw records on every call.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One normalized ledger entry derived from an appointment, sale, or expense.
///
/// `amount` is always non-negative; direction is carried by `kind` alone.
/// `id` is deterministic (source id + role + index) so repeated derivations
/// of the same snapshot produce identical lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub category: TransactionCategory,
    pub description: String,
    pub amount: f64,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
}

impl FinancialTransaction {
    /// Signed value: revenue counts positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Revenue => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    Revenue,
    Expense,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Settled on or before the reference date.
    Paid,
    /// Expected on a future settlement or appointment date.
    Forecast,
    /// Appointment date has passed without completion.
    Overdue,
    /// Commission earned but not yet due for payout.
    Pending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Origin {
    Service,
    Product,
    Expense,
    Other,
}

/// Closed set of ledger categories. Free-form expense categories ride in
/// `Manual` so a typo can never silently create a new aggregation bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionCategory {
    Service,
    Product,
    Tip,
    ValueAdjustment,
    CardFee,
    Commission,
    Manual(String),
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionCategory::Service => f.write_str("Serviço"),
            TransactionCategory::Product => f.write_str("Produto"),
            TransactionCategory::Tip => f.write_str("Gorjeta"),
            TransactionCategory::ValueAdjustment => f.write_str("Ajuste de Valor"),
            TransactionCategory::CardFee => f.write_str("Taxas de Cartão"),
            TransactionCategory::Commission => f.write_str("Comissão"),
            TransactionCategory::Manual(name) => f.write_str(name),
        }
    }
}

/// Payment-method marker for completed zero-priced visits (comped/VIP).
pub const COURTESY_METHOD: &str = "Courtesy";
