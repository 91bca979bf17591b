//! Income-statement (DRE) snapshots over a date range.
//!
//! The builder re-derives revenue and commission figures straight from the
//! raw records rather than consuming the derived ledger. Note one inherited
//! divergence from the derivation engine, kept on purpose: commissions here
//! are computed on the raw booked price, not the fee-adjusted base, and
//! `price_paid` is taken whole, tips included.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::resolve_payment_details;
use crate::domain::books::{Books, DateWindow};
use crate::domain::expense::{DreClass, Expense};

/// Name-keyed drill-down bucket (per service or per provider).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NameBucket {
    pub total: f64,
    pub count: usize,
}

/// One expense category inside an operating-expense group, with the rows
/// retained for drill-down display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryGroup {
    pub name: String,
    pub total: f64,
    pub items: Vec<Expense>,
}

/// One of the three operating-expense groups of the statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseGroup {
    pub total: f64,
    pub categories: Vec<CategoryGroup>,
}

impl ExpenseGroup {
    fn from_rows(rows: Vec<&Expense>) -> Self {
        let mut by_category: BTreeMap<String, CategoryGroup> = BTreeMap::new();
        let mut total = 0.0;
        for expense in rows {
            total += expense.amount;
            let group = by_category
                .entry(expense.category.clone())
                .or_insert_with(|| CategoryGroup {
                    name: expense.category.clone(),
                    total: 0.0,
                    items: Vec::new(),
                });
            group.total += expense.amount;
            group.items.push(expense.clone());
        }
        Self {
            total,
            categories: by_category.into_values().collect(),
        }
    }
}

/// A single income-statement snapshot for one date window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DreSnapshot {
    pub window: DateWindow,
    pub gross_revenue: f64,
    /// Card fees inferred from payment settings.
    pub automated_deductions: f64,
    /// Hand-entered revenue deductions.
    pub manual_deductions: f64,
    pub commissions: f64,
    pub deductions: f64,
    pub net_revenue: f64,
    pub total_cogs: f64,
    pub gross_profit: f64,
    pub selling_expenses: ExpenseGroup,
    pub administrative_expenses: ExpenseGroup,
    /// Total includes the automated card-fee deductions.
    pub financial_expenses: ExpenseGroup,
    pub result_before_taxes: f64,
    pub irpj_csll: f64,
    pub net_result: f64,
    pub revenue_by_service: BTreeMap<String, NameBucket>,
    pub commission_by_provider: BTreeMap<String, NameBucket>,
}

impl DreSnapshot {
    /// Share of gross revenue, guarded against a zero denominator.
    pub fn percent_of_gross(&self, value: f64) -> f64 {
        if self.gross_revenue.abs() < f64::EPSILON {
            0.0
        } else {
            value / self.gross_revenue * 100.0
        }
    }
}

/// One month of an annual view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthSnapshot {
    pub index: u32,
    pub name: String,
    pub dre: DreSnapshot,
}

/// Full-year snapshot plus the twelve monthly ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnualDre {
    pub year: DreSnapshot,
    pub months: Vec<MonthSnapshot>,
}

struct LineItem {
    service_name: String,
    provider_id: Option<Uuid>,
    booked: f64,
    rate_snapshot: Option<f64>,
}

/// Builds the income-statement snapshot for the given window.
pub fn build_dre(books: &Books, window: DateWindow) -> DreSnapshot {
    let mut gross_revenue = 0.0;
    let mut automated_deductions = 0.0;
    let mut commissions = 0.0;
    let mut revenue_by_service: BTreeMap<String, NameBucket> = BTreeMap::new();
    let mut commission_by_provider: BTreeMap<String, NameBucket> = BTreeMap::new();

    for appointment in &books.appointments {
        if appointment.is_cancelled() || !window.contains(appointment.date) {
            continue;
        }
        let mut lines = Vec::with_capacity(1 + appointment.additional_services.len());
        lines.push(line_item(
            books,
            appointment.service_id,
            appointment.provider_id,
            appointment.booked_price,
            appointment.commission_rate_snapshot,
        ));
        for extra in &appointment.additional_services {
            lines.push(line_item(
                books,
                extra.service_id,
                extra.provider_id,
                extra.booked_price,
                extra.commission_rate_snapshot,
            ));
        }

        let booked_total: f64 = lines.iter().map(|line| line.booked).sum();
        // price_paid is taken whole here; tips are not carved out.
        let appointment_value = appointment.price_paid.unwrap_or(booked_total);
        gross_revenue += appointment_value;

        let terms = resolve_payment_details(
            appointment.payment_method.as_deref(),
            &books.payment_settings,
        );
        automated_deductions += appointment_value * terms.fee_fraction();

        for line in &lines {
            let bucket = revenue_by_service
                .entry(line.service_name.clone())
                .or_default();
            bucket.total += line.booked;
            bucket.count += 1;

            let Some(provider_id) = line.provider_id else {
                continue;
            };
            let provider = books.provider(provider_id);
            let rate = line
                .rate_snapshot
                .or(provider.map(|provider| provider.commission_rate))
                .unwrap_or(0.0);
            // Raw booked base, deliberately not fee-adjusted.
            let commission = line.booked * rate;
            commissions += commission;
            let name = provider
                .map(|provider| provider.name.clone())
                .unwrap_or_else(|| "Unassigned".to_string());
            let bucket = commission_by_provider.entry(name).or_default();
            bucket.total += commission;
            bucket.count += 1;
        }
    }

    for sale in &books.sales {
        if window.contains(sale.date) {
            gross_revenue += sale.total_amount;
        }
    }

    let in_window: Vec<&Expense> = books
        .expenses
        .iter()
        .filter(|expense| window.contains(expense.date))
        .collect();
    let sum_class = |class: DreClass| -> f64 {
        in_window
            .iter()
            .filter(|expense| expense.dre_class == class)
            .map(|expense| expense.amount)
            .sum()
    };
    let rows_of = |class: DreClass| -> Vec<&Expense> {
        in_window
            .iter()
            .copied()
            .filter(|expense| expense.dre_class == class)
            .collect()
    };

    let manual_deductions = sum_class(DreClass::Deduction);
    let deductions = manual_deductions + commissions;
    let net_revenue = gross_revenue - deductions;
    let total_cogs = sum_class(DreClass::Costs);
    let gross_profit = net_revenue - total_cogs;

    let selling_expenses = ExpenseGroup::from_rows(rows_of(DreClass::ExpenseSales));
    let administrative_expenses = ExpenseGroup::from_rows(rows_of(DreClass::ExpenseAdm));
    let mut financial_expenses = ExpenseGroup::from_rows(rows_of(DreClass::ExpenseFin));
    financial_expenses.total += automated_deductions;

    let result_before_taxes = gross_profit
        - (selling_expenses.total + administrative_expenses.total + financial_expenses.total);
    let irpj_csll = sum_class(DreClass::Tax);
    let net_result = result_before_taxes - irpj_csll;

    DreSnapshot {
        window,
        gross_revenue,
        automated_deductions,
        manual_deductions,
        commissions,
        deductions,
        net_revenue,
        total_cogs,
        gross_profit,
        selling_expenses,
        administrative_expenses,
        financial_expenses,
        result_before_taxes,
        irpj_csll,
        net_result,
        revenue_by_service,
        commission_by_provider,
    }
}

fn line_item(
    books: &Books,
    service_id: Option<Uuid>,
    provider_id: Option<Uuid>,
    booked_override: Option<f64>,
    rate_snapshot: Option<f64>,
) -> LineItem {
    let service = service_id.and_then(|id| books.service(id));
    LineItem {
        service_name: service
            .map(|service| service.name.clone())
            .unwrap_or_else(|| "Unknown Service".to_string()),
        provider_id,
        booked: booked_override.unwrap_or_else(|| service.map(|s| s.price).unwrap_or(0.0)),
        rate_snapshot,
    }
}

/// Builds the full-year snapshot plus one per calendar month.
pub fn build_annual_dre(books: &Books, year: i32) -> AnnualDre {
    let months = (1..=12)
        .map(|month| {
            let window = DateWindow::month(year, month);
            MonthSnapshot {
                index: month,
                name: window.start.format("%b").to_string(),
                dre: build_dre(books, window),
            }
        })
        .collect();
    AnnualDre {
        year: build_dre(books, DateWindow::year(year)),
        months,
    }
}
