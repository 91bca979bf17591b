//! Domain types for manually entered outflows.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// A manually entered outflow. `recurring_id` groups the installments of a
/// recurring series; each installment is still an independent row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub dre_class: DreClass,
    pub status: ExpenseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<Uuid>,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        dre_class: DreClass,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            amount,
            category: category.into(),
            dre_class,
            status: ExpenseStatus::Pending,
            payment_method: None,
            supplier_id: None,
            recurring_id: None,
        }
    }

    pub fn paid(mut self) -> Self {
        self.status = ExpenseStatus::Paid;
        self
    }

    pub fn with_supplier(mut self, supplier_id: Uuid) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.status, ExpenseStatus::Paid)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({:?})", self.description, self.status)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExpenseStatus {
    Paid,
    Pending,
}

/// Income-statement classification for an expense row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DreClass {
    /// Cost of goods/services sold.
    Costs,
    /// Selling expenses.
    ExpenseSales,
    /// Administrative expenses.
    ExpenseAdm,
    /// Financial expenses.
    ExpenseFin,
    /// Income taxes (IRPJ/CSLL).
    Tax,
    /// Revenue deductions entered by hand.
    Deduction,
}

impl fmt::Display for DreClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DreClass::Costs => "Costs",
            DreClass::ExpenseSales => "Selling Expenses",
            DreClass::ExpenseAdm => "Administrative Expenses",
            DreClass::ExpenseFin => "Financial Expenses",
            DreClass::Tax => "Taxes",
            DreClass::Deduction => "Deductions",
        };
        f.write_str(label)
    }
}
