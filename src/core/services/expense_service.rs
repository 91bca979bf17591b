//! Business logic helpers for managing expense records, including
//! recurring series.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::books::Books;
use crate::domain::expense::Expense;
use crate::utils::dates::shift_month;

/// Provides validated CRUD helpers for expense rows and recurring series.
pub struct ExpenseService;

impl ExpenseService {
    /// Adds a new expense and returns its identifier.
    pub fn add(books: &mut Books, expense: Expense) -> ServiceResult<Uuid> {
        Self::validate(&expense)?;
        Ok(books.add_expense(expense))
    }

    /// Expands a template into `installments` monthly rows sharing one
    /// fresh series id. Day-of-month clamps in short months.
    pub fn add_recurring(
        books: &mut Books,
        template: Expense,
        installments: u32,
    ) -> ServiceResult<Uuid> {
        Self::validate(&template)?;
        if installments == 0 {
            return Err(ServiceError::Invalid(
                "a recurring series needs at least one installment".into(),
            ));
        }
        let series_id = Uuid::new_v4();
        for index in 0..installments {
            let mut installment = template.clone();
            installment.id = if index == 0 { template.id } else { Uuid::new_v4() };
            installment.date = shift_month(template.date, index as i32);
            installment.recurring_id = Some(series_id);
            installment.description = format!(
                "{} ({}/{})",
                template.description,
                index + 1,
                installments
            );
            books.add_expense(installment);
        }
        Ok(series_id)
    }

    /// Updates the expense identified by `id` via the provided mutator.
    pub fn update<F>(books: &mut Books, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Expense),
    {
        let expense = books
            .expense_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Expense not found".into()))?;
        mutator(expense);
        books.touch();
        Ok(())
    }

    /// Removes the expense identified by `id`, returning the removed row.
    pub fn remove(books: &mut Books, id: Uuid) -> ServiceResult<Expense> {
        books
            .remove_expense(id)
            .ok_or_else(|| ServiceError::Invalid("Expense not found".into()))
    }

    /// Moves every installment of a series by the day delta between the
    /// exemplar row's current date and `new_date`. The delta is applied to
    /// each sibling, never recomputed, so relative spacing is preserved.
    pub fn shift_series(
        books: &mut Books,
        exemplar_id: Uuid,
        new_date: NaiveDate,
    ) -> ServiceResult<usize> {
        let exemplar = books
            .expense(exemplar_id)
            .ok_or_else(|| ServiceError::Invalid("Expense not found".into()))?;
        let series_id = exemplar.recurring_id.ok_or_else(|| {
            ServiceError::Invalid("Expense does not belong to a recurring series".into())
        })?;
        let delta = new_date - exemplar.date;
        let mut shifted = 0;
        for expense in books
            .expenses
            .iter_mut()
            .filter(|expense| expense.recurring_id == Some(series_id))
        {
            expense.date = expense.date + delta;
            shifted += 1;
        }
        books.touch();
        tracing::debug!(%series_id, days = delta.num_days(), shifted, "recurring series shifted");
        Ok(shifted)
    }

    fn validate(expense: &Expense) -> ServiceResult<()> {
        if expense.description.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "expense description must not be empty".into(),
            ));
        }
        if expense.amount < 0.0 {
            return Err(ServiceError::Invalid(
                "expense amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense::DreClass;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rent(day: NaiveDate) -> Expense {
        Expense::new(day, "Rent", 900.0, "Rent", DreClass::ExpenseAdm)
    }

    #[test]
    fn add_rejects_blank_description_and_negative_amount() {
        let mut books = Books::new("Studio");
        let blank = Expense::new(date(2024, 1, 5), "  ", 10.0, "Misc", DreClass::ExpenseAdm);
        assert!(ExpenseService::add(&mut books, blank).is_err());
        let negative = Expense::new(date(2024, 1, 5), "Refund", -10.0, "Misc", DreClass::ExpenseAdm);
        assert!(ExpenseService::add(&mut books, negative).is_err());
    }

    #[test]
    fn recurring_series_spans_months_with_clamping() {
        let mut books = Books::new("Studio");
        let template = rent(date(2024, 1, 31));
        ExpenseService::add_recurring(&mut books, template, 3).unwrap();
        assert_eq!(books.expenses.len(), 3);
        let dates: Vec<NaiveDate> = books.expenses.iter().map(|expense| expense.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31)]
        );
        let series: Vec<_> = books
            .expenses
            .iter()
            .filter_map(|expense| expense.recurring_id)
            .collect();
        assert!(series.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(books.expenses[1].description, "Rent (2/3)");
    }

    #[test]
    fn shift_series_applies_one_delta_to_all_siblings() {
        let mut books = Books::new("Studio");
        ExpenseService::add_recurring(&mut books, rent(date(2024, 1, 10)), 3).unwrap();
        let exemplar_id = books.expenses[1].id;

        // Move the February installment from the 10th to the 15th.
        let shifted =
            ExpenseService::shift_series(&mut books, exemplar_id, date(2024, 2, 15)).unwrap();
        assert_eq!(shifted, 3);
        let dates: Vec<NaiveDate> = books.expenses.iter().map(|expense| expense.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 15), date(2024, 2, 15), date(2024, 3, 15)]
        );
    }

    #[test]
    fn shift_series_requires_a_series_membership() {
        let mut books = Books::new("Studio");
        let id = ExpenseService::add(&mut books, rent(date(2024, 1, 10))).unwrap();
        let err = ExpenseService::shift_series(&mut books, id, date(2024, 1, 12))
            .expect_err("standalone expense must be rejected");
        assert!(
            matches!(err, ServiceError::Invalid(ref message) if message.contains("series")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn update_and_remove_round_trip() {
        let mut books = Books::new("Studio");
        let id = ExpenseService::add(&mut books, rent(date(2024, 1, 10))).unwrap();
        ExpenseService::update(&mut books, id, |expense| expense.amount = 950.0).unwrap();
        assert_eq!(books.expense(id).unwrap().amount, 950.0);
        let removed = ExpenseService::remove(&mut books, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(books.expense(id).is_none());
    }
}
