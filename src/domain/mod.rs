pub mod appointment;
pub mod books;
pub mod catalog;
pub mod common;
pub mod expense;
pub mod sale;
pub mod transaction;

pub use appointment::{AdditionalService, Appointment, AppointmentStatus};
pub use books::{Books, DateWindow};
pub use catalog::{Customer, ExpenseCategory, Provider, Service, Supplier};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use expense::{DreClass, Expense, ExpenseStatus};
pub use sale::{Sale, SaleItem};
pub use transaction::{
    FinancialTransaction, Origin, TransactionCategory, TransactionStatus, TransactionType,
};
