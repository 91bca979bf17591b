//! Business logic helpers for managing expense categories.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::books::Books;
use crate::domain::catalog::ExpenseCategory;

pub struct CategoryService;

impl CategoryService {
    pub fn add(books: &mut Books, category: ExpenseCategory) -> ServiceResult<Uuid> {
        if category.name.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "category name must not be empty".into(),
            ));
        }
        if books
            .expense_categories
            .iter()
            .any(|existing| existing.name == category.name)
        {
            return Err(ServiceError::Invalid(format!(
                "category '{}' already exists",
                category.name
            )));
        }
        Ok(books.add_expense_category(category))
    }

    pub fn edit(books: &mut Books, id: Uuid, updated: ExpenseCategory) -> ServiceResult<()> {
        let category = books
            .expense_categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        category.name = updated.name;
        category.dre_class = updated.dre_class;
        books.touch();
        Ok(())
    }

    /// Refuses to remove a category while expense rows still use its name.
    pub fn remove(books: &mut Books, id: Uuid) -> ServiceResult<ExpenseCategory> {
        let name = books
            .expense_category(id)
            .map(|category| category.name.clone())
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        if books.expenses.iter().any(|expense| expense.category == name) {
            return Err(ServiceError::Invalid(format!(
                "category '{name}' is still referenced by expenses"
            )));
        }
        books
            .remove_expense_category(id)
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense::{DreClass, Expense};
    use chrono::NaiveDate;

    #[test]
    fn crud_round_trip() {
        let mut books = Books::new("Studio");
        let category = ExpenseCategory::new("Utilities", DreClass::ExpenseAdm);
        let id = CategoryService::add(&mut books, category.clone()).unwrap();

        let mut updated = category.clone();
        updated.name = "Utilities & Energy".into();
        CategoryService::edit(&mut books, id, updated).unwrap();
        assert_eq!(books.expense_category(id).unwrap().name, "Utilities & Energy");

        CategoryService::remove(&mut books, id).unwrap();
        assert!(books.expense_category(id).is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut books = Books::new("Studio");
        CategoryService::add(&mut books, ExpenseCategory::new("Rent", DreClass::ExpenseAdm))
            .unwrap();
        assert!(CategoryService::add(
            &mut books,
            ExpenseCategory::new("Rent", DreClass::ExpenseAdm)
        )
        .is_err());
    }

    #[test]
    fn removal_refuses_while_referenced() {
        let mut books = Books::new("Studio");
        let id = CategoryService::add(
            &mut books,
            ExpenseCategory::new("Supplies", DreClass::Costs),
        )
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        books.add_expense(Expense::new(date, "Color stock", 200.0, "Supplies", DreClass::Costs));

        let err = CategoryService::remove(&mut books, id)
            .expect_err("referenced category must not be removable");
        assert!(
            matches!(err, ServiceError::Invalid(ref message) if message.contains("referenced")),
            "unexpected error: {err:?}"
        );
    }
}
