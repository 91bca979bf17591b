//! Static reference entities: the service menu, customers, providers,
//! suppliers, and expense categories. Read-only to the derivation core.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::expense::DreClass;

/// A service on the salon's menu with its list price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

impl Service {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
        }
    }
}

impl Identifiable for Service {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Service {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: None,
        }
    }
}

impl Identifiable for Customer {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Customer {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A service provider (stylist, barber) and their current commission rate.
///
/// `commission_rate` is a fraction (0.4 means 40%); appointments may carry
/// a historical snapshot that overrides it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub commission_rate: f64,
}

impl Provider {
    pub fn new(name: impl Into<String>, commission_rate: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            commission_rate,
        }
    }
}

impl Identifiable for Provider {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Provider {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Provider {
    fn display_label(&self) -> String {
        format!("{} ({:.0}%)", self.name, self.commission_rate * 100.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl Supplier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            contact: None,
        }
    }
}

impl Identifiable for Supplier {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Supplier {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A user-defined expense category mapped onto an income-statement class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseCategory {
    pub id: Uuid,
    pub name: String,
    pub dre_class: DreClass,
}

impl ExpenseCategory {
    pub fn new(name: impl Into<String>, dre_class: DreClass) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            dre_class,
        }
    }
}

impl Identifiable for ExpenseCategory {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for ExpenseCategory {
    fn name(&self) -> &str {
        &self.name
    }
}
