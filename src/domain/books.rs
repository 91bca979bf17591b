//! The `Books` aggregate: every raw record and setting the derivation
//! engine reads, held in memory as one snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{CommissionSetting, PaymentSetting};
use crate::domain::appointment::Appointment;
use crate::domain::catalog::{Customer, ExpenseCategory, Provider, Service, Supplier};
use crate::domain::expense::Expense;
use crate::domain::sale::Sale;
use crate::errors::SalonError;
use crate::utils::dates::days_in_month;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Inclusive calendar-day range used by the period aggregator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SalonError> {
        if end < start {
            return Err(SalonError::InvalidRef(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Whole calendar month, first through last day.
    pub fn month(year: i32, month: u32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).unwrap());
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .unwrap_or(start);
        Self { start, end }
    }

    /// Whole calendar year, January 1 through December 31.
    pub fn year(year: i32) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Snapshot of the salon's business state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Books {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub providers: Vec<Provider>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub expense_categories: Vec<ExpenseCategory>,
    #[serde(default)]
    pub payment_settings: Vec<PaymentSetting>,
    #[serde(default)]
    pub commission_settings: Vec<CommissionSetting>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Books::schema_version_default")]
    pub schema_version: u8,
}

impl Books {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            appointments: Vec::new(),
            sales: Vec::new(),
            expenses: Vec::new(),
            services: Vec::new(),
            customers: Vec::new(),
            providers: Vec::new(),
            suppliers: Vec::new(),
            expense_categories: Vec::new(),
            payment_settings: Vec::new(),
            commission_settings: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_appointment(&mut self, appointment: Appointment) -> Uuid {
        let id = appointment.id;
        self.appointments.push(appointment);
        self.touch();
        id
    }

    pub fn add_sale(&mut self, sale: Sale) -> Uuid {
        let id = sale.id;
        self.sales.push(sale);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn add_service(&mut self, service: Service) -> Uuid {
        let id = service.id;
        self.services.push(service);
        self.touch();
        id
    }

    pub fn add_customer(&mut self, customer: Customer) -> Uuid {
        let id = customer.id;
        self.customers.push(customer);
        self.touch();
        id
    }

    pub fn add_provider(&mut self, provider: Provider) -> Uuid {
        let id = provider.id;
        self.providers.push(provider);
        self.touch();
        id
    }

    pub fn add_supplier(&mut self, supplier: Supplier) -> Uuid {
        let id = supplier.id;
        self.suppliers.push(supplier);
        self.touch();
        id
    }

    pub fn add_expense_category(&mut self, category: ExpenseCategory) -> Uuid {
        let id = category.id;
        self.expense_categories.push(category);
        self.touch();
        id
    }

    pub fn service(&self, id: Uuid) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn customer(&self, id: Uuid) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn provider(&self, id: Uuid) -> Option<&Provider> {
        self.providers.iter().find(|provider| provider.id == id)
    }

    pub fn supplier(&self, id: Uuid) -> Option<&Supplier> {
        self.suppliers.iter().find(|supplier| supplier.id == id)
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    pub fn expense_category(&self, id: Uuid) -> Option<&ExpenseCategory> {
        self.expense_categories
            .iter()
            .find(|category| category.id == id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        let removed = self.expenses.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_supplier(&mut self, id: Uuid) -> Option<Supplier> {
        let index = self.suppliers.iter().position(|supplier| supplier.id == id)?;
        let removed = self.suppliers.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_expense_category(&mut self, id: Uuid) -> Option<ExpenseCategory> {
        let index = self
            .expense_categories
            .iter()
            .position(|category| category.id == id)?;
        let removed = self.expense_categories.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_rejects_inverted_range() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(DateWindow::new(start, end).is_err());
    }

    #[test]
    fn month_window_covers_leap_february() {
        let window = DateWindow::month(2024, 2);
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(window.contains(window.end));
    }

    #[test]
    fn lookups_resolve_by_id() {
        let mut books = Books::new("Studio");
        let service_id = books.add_service(Service::new("Haircut", 80.0));
        let provider_id = books.add_provider(Provider::new("Ana", 0.4));
        assert_eq!(books.service(service_id).unwrap().name, "Haircut");
        assert_eq!(books.provider(provider_id).unwrap().commission_rate, 0.4);
        assert!(books.service(Uuid::new_v4()).is_none());
    }
}
