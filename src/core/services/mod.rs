pub mod category_service;
pub mod expense_service;
pub mod supplier_service;

pub use category_service::CategoryService;
pub use expense_service::ExpenseService;
pub use supplier_service::SupplierService;

use crate::errors::SalonError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Salon(#[from] SalonError),
    #[error("{0}")]
    Invalid(String),
}
