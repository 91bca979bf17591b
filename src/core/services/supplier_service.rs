//! Business logic helpers for managing suppliers.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::books::Books;
use crate::domain::catalog::Supplier;

pub struct SupplierService;

impl SupplierService {
    pub fn add(books: &mut Books, supplier: Supplier) -> ServiceResult<Uuid> {
        if supplier.name.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "supplier name must not be empty".into(),
            ));
        }
        Ok(books.add_supplier(supplier))
    }

    pub fn update<F>(books: &mut Books, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Supplier),
    {
        let supplier = books
            .suppliers
            .iter_mut()
            .find(|supplier| supplier.id == id)
            .ok_or_else(|| ServiceError::Invalid("Supplier not found".into()))?;
        mutator(supplier);
        books.touch();
        Ok(())
    }

    /// Removes the supplier and detaches it from any expenses that
    /// referenced it.
    pub fn remove(books: &mut Books, id: Uuid) -> ServiceResult<Supplier> {
        let removed = books
            .remove_supplier(id)
            .ok_or_else(|| ServiceError::Invalid("Supplier not found".into()))?;
        for expense in books
            .expenses
            .iter_mut()
            .filter(|expense| expense.supplier_id == Some(id))
        {
            expense.supplier_id = None;
        }
        Ok(removed)
    }
}
