//! The transaction derivation engine.
//!
//! [`generate_financial_transactions`] expands a [`Books`] snapshot into the
//! full normalized ledger: one appointment fans out into the main service,
//! each extra service, a value adjustment, a card fee, a tip, and one
//! commission per assigned provider. The function is pure and total: the
//! reference date is an explicit parameter, missing foreign keys degrade to
//! placeholder names, and identical inputs always yield an identical list.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::config::{commission_payout_date, resolve_payment_details, PaymentTerms};
use crate::domain::appointment::Appointment;
use crate::domain::books::Books;
use crate::domain::expense::{Expense, ExpenseStatus};
use crate::domain::sale::Sale;
use crate::domain::transaction::{
    FinancialTransaction, Origin, TransactionCategory, TransactionStatus, TransactionType,
    COURTESY_METHOD,
};

/// Price discrepancies at or below one cent are treated as rounding noise.
const ADJUSTMENT_THRESHOLD: f64 = 0.01;

const UNKNOWN_SERVICE: &str = "Unknown Service";
const WALK_IN_CUSTOMER: &str = "Walk-in Customer";
const UNASSIGNED_PROVIDER: &str = "Unassigned";

/// Derives the full ledger from the current snapshot, sorted by date
/// descending (most recent first, ties keep emission order).
pub fn generate_financial_transactions(
    books: &Books,
    today: NaiveDate,
) -> Vec<FinancialTransaction> {
    let mut entries = Vec::new();
    for appointment in &books.appointments {
        derive_appointment(books, appointment, today, &mut entries);
    }
    for sale in &books.sales {
        derive_sale(books, sale, today, &mut entries);
    }
    for expense in &books.expenses {
        entries.push(derive_expense(expense));
    }
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    tracing::debug!(
        appointments = books.appointments.len(),
        sales = books.sales.len(),
        expenses = books.expenses.len(),
        derived = entries.len(),
        "ledger derivation complete"
    );
    entries
}

/// Settlement-based status: completed visits are Paid once the money has
/// arrived, otherwise Forecast; incomplete visits go Overdue only after
/// their calendar day has passed.
fn classify_settlement(
    completed: bool,
    settlement: NaiveDate,
    appointment_date: NaiveDate,
    today: NaiveDate,
) -> TransactionStatus {
    if completed {
        if settlement <= today {
            TransactionStatus::Paid
        } else {
            TransactionStatus::Forecast
        }
    } else if appointment_date < today {
        TransactionStatus::Overdue
    } else {
        TransactionStatus::Forecast
    }
}

struct ServiceLine {
    name: String,
    provider_id: Option<Uuid>,
    provider_name: Option<String>,
    booked: f64,
    rate_snapshot: Option<f64>,
}

fn resolve_service_line(
    books: &Books,
    service_id: Option<Uuid>,
    provider_id: Option<Uuid>,
    booked_override: Option<f64>,
    rate_snapshot: Option<f64>,
) -> ServiceLine {
    let service = service_id.and_then(|id| books.service(id));
    let name = service
        .map(|service| service.name.clone())
        .unwrap_or_else(|| UNKNOWN_SERVICE.to_string());
    let list_price = service.map(|service| service.price).unwrap_or(0.0);
    let provider_name = provider_id.map(|id| {
        books
            .provider(id)
            .map(|provider| provider.name.clone())
            .unwrap_or_else(|| UNASSIGNED_PROVIDER.to_string())
    });
    ServiceLine {
        name,
        provider_id,
        provider_name,
        booked: booked_override.unwrap_or(list_price),
        rate_snapshot,
    }
}

fn derive_appointment(
    books: &Books,
    appointment: &Appointment,
    today: NaiveDate,
    entries: &mut Vec<FinancialTransaction>,
) {
    if appointment.is_cancelled() {
        return;
    }

    let main = resolve_service_line(
        books,
        appointment.service_id,
        appointment.provider_id,
        appointment.booked_price,
        appointment.commission_rate_snapshot,
    );
    let extras: Vec<ServiceLine> = appointment
        .additional_services
        .iter()
        .map(|extra| {
            resolve_service_line(
                books,
                extra.service_id,
                extra.provider_id,
                extra.booked_price,
                extra.commission_rate_snapshot,
            )
        })
        .collect();
    let total_booked = main.booked + extras.iter().map(|extra| extra.booked).sum::<f64>();

    let customer_name = appointment
        .customer_id
        .and_then(|id| books.customer(id))
        .map(|customer| customer.name.clone())
        .unwrap_or_else(|| WALK_IN_CUSTOMER.to_string());

    let completed = appointment.is_completed();
    let terms = resolve_payment_details(
        appointment.payment_method.as_deref(),
        &books.payment_settings,
    );
    let base_date = if completed {
        appointment.payment_date.unwrap_or(appointment.date)
    } else {
        appointment.date
    };
    let settlement = base_date + Duration::days(terms.days);
    let status = classify_settlement(completed, settlement, appointment.date, today);

    // A completed visit booked at exactly zero is a comped/VIP visit.
    let main_method = if completed && main.booked.abs() < f64::EPSILON {
        Some(COURTESY_METHOD.to_string())
    } else {
        appointment.payment_method.clone()
    };

    entries.push(FinancialTransaction {
        id: format!("app-{}", appointment.id),
        date: settlement,
        kind: TransactionType::Revenue,
        category: TransactionCategory::Service,
        description: main.name.clone(),
        amount: main.booked,
        status,
        payment_method: main_method,
        origin: Origin::Service,
        provider_name: main.provider_name.clone(),
        customer_name: Some(customer_name.clone()),
        service_name: Some(main.name.clone()),
        appointment_date: Some(appointment.date),
    });

    for (index, extra) in extras.iter().enumerate() {
        entries.push(FinancialTransaction {
            id: format!("app-{}-extra-{}", appointment.id, index),
            date: settlement,
            kind: TransactionType::Revenue,
            category: TransactionCategory::Service,
            description: extra.name.clone(),
            amount: extra.booked,
            status,
            payment_method: appointment.payment_method.clone(),
            origin: Origin::Service,
            provider_name: extra.provider_name.clone(),
            customer_name: Some(customer_name.clone()),
            service_name: Some(extra.name.clone()),
            appointment_date: Some(appointment.date),
        });
    }

    // Tip is carved out of the collected total so it is accounted separately.
    let tip = appointment.tip_amount.unwrap_or(0.0);
    let actual_total = if completed && appointment.price_paid.is_some() {
        appointment.price_paid.unwrap_or(0.0) - tip
    } else {
        total_booked
    };

    let discrepancy = actual_total - total_booked;
    if completed && discrepancy.abs() > ADJUSTMENT_THRESHOLD {
        let kind = if discrepancy > 0.0 {
            TransactionType::Revenue
        } else {
            TransactionType::Expense
        };
        entries.push(FinancialTransaction {
            id: format!("app-{}-adj", appointment.id),
            date: settlement,
            kind,
            category: TransactionCategory::ValueAdjustment,
            description: format!("Value adjustment: {}", customer_name),
            amount: discrepancy.abs(),
            status,
            payment_method: appointment.payment_method.clone(),
            origin: Origin::Other,
            provider_name: main.provider_name.clone(),
            customer_name: Some(customer_name.clone()),
            service_name: Some(main.name.clone()),
            appointment_date: Some(appointment.date),
        });
    }

    if terms.fee > 0.0 && actual_total > 0.0 {
        entries.push(FinancialTransaction {
            id: format!("app-{}-fee", appointment.id),
            date: settlement,
            kind: TransactionType::Expense,
            category: TransactionCategory::CardFee,
            description: format!("Card fee: {}", customer_name),
            amount: actual_total * terms.fee_fraction(),
            status,
            payment_method: appointment.payment_method.clone(),
            origin: Origin::Other,
            provider_name: None,
            customer_name: Some(customer_name.clone()),
            service_name: None,
            appointment_date: Some(appointment.date),
        });
    }

    if completed && tip > 0.0 {
        entries.push(FinancialTransaction {
            id: format!("app-{}-tip", appointment.id),
            date: settlement,
            kind: TransactionType::Revenue,
            category: TransactionCategory::Tip,
            description: format!("Tip: {}", customer_name),
            amount: tip,
            status,
            payment_method: appointment.payment_method.clone(),
            origin: Origin::Service,
            provider_name: main.provider_name.clone(),
            customer_name: Some(customer_name.clone()),
            service_name: Some(main.name.clone()),
            appointment_date: Some(appointment.date),
        });
    }

    push_commission(
        books,
        appointment,
        &main,
        format!("app-{}-comm", appointment.id),
        &customer_name,
        terms,
        base_date,
        completed,
        today,
        entries,
    );
    for (index, extra) in extras.iter().enumerate() {
        push_commission(
            books,
            appointment,
            extra,
            format!("app-{}-comm-extra-{}", appointment.id, index),
            &customer_name,
            terms,
            base_date,
            completed,
            today,
            entries,
        );
    }
}

/// Commission base is the booked price net of the payment-processor fee;
/// the payout date follows the configured commission cycle.
#[allow(clippy::too_many_arguments)]
fn push_commission(
    books: &Books,
    appointment: &Appointment,
    line: &ServiceLine,
    id: String,
    customer_name: &str,
    terms: PaymentTerms,
    base_date: NaiveDate,
    completed: bool,
    today: NaiveDate,
    entries: &mut Vec<FinancialTransaction>,
) {
    let Some(provider_id) = line.provider_id else {
        return;
    };
    let configured_rate = books
        .provider(provider_id)
        .map(|provider| provider.commission_rate);
    let rate = line.rate_snapshot.or(configured_rate).unwrap_or(0.0);
    let liquid_base = line.booked * (1.0 - terms.fee_fraction());
    let amount = liquid_base * rate;
    if amount <= 0.0 {
        return;
    }
    let payout = commission_payout_date(base_date, &books.commission_settings);
    let status = if completed {
        if payout <= today {
            TransactionStatus::Paid
        } else {
            TransactionStatus::Pending
        }
    } else {
        TransactionStatus::Forecast
    };
    let provider_name = line
        .provider_name
        .clone()
        .unwrap_or_else(|| UNASSIGNED_PROVIDER.to_string());
    entries.push(FinancialTransaction {
        id,
        date: payout,
        kind: TransactionType::Expense,
        category: TransactionCategory::Commission,
        description: format!("Commission: {} ({})", provider_name, line.name),
        amount,
        status,
        payment_method: appointment.payment_method.clone(),
        origin: Origin::Service,
        provider_name: Some(provider_name),
        customer_name: Some(customer_name.to_string()),
        service_name: Some(line.name.clone()),
        appointment_date: Some(appointment.date),
    });
}

fn derive_sale(
    books: &Books,
    sale: &Sale,
    today: NaiveDate,
    entries: &mut Vec<FinancialTransaction>,
) {
    let terms = resolve_payment_details(sale.payment_method.as_deref(), &books.payment_settings);
    let settlement = sale.date + Duration::days(terms.days);
    let status = if settlement <= today {
        TransactionStatus::Paid
    } else {
        TransactionStatus::Forecast
    };
    entries.push(FinancialTransaction {
        id: format!("sale-{}", sale.id),
        date: settlement,
        kind: TransactionType::Revenue,
        category: TransactionCategory::Product,
        description: format!("Product sale ({} items)", sale.items.len()),
        amount: sale.total_amount,
        status,
        payment_method: sale.payment_method.clone(),
        origin: Origin::Product,
        provider_name: None,
        customer_name: None,
        service_name: None,
        appointment_date: None,
    });
    if terms.fee > 0.0 {
        entries.push(FinancialTransaction {
            id: format!("sale-{}-fee", sale.id),
            date: settlement,
            kind: TransactionType::Expense,
            category: TransactionCategory::CardFee,
            description: "Card fee: product sale".to_string(),
            amount: sale.total_amount * terms.fee_fraction(),
            status,
            payment_method: sale.payment_method.clone(),
            origin: Origin::Other,
            provider_name: None,
            customer_name: None,
            service_name: None,
            appointment_date: None,
        });
    }
}

/// Expenses pass through untouched: own date, own status, no fee or shift.
fn derive_expense(expense: &Expense) -> FinancialTransaction {
    let status = match expense.status {
        ExpenseStatus::Paid => TransactionStatus::Paid,
        ExpenseStatus::Pending => TransactionStatus::Pending,
    };
    FinancialTransaction {
        id: format!("exp-{}", expense.id),
        date: expense.date,
        kind: TransactionType::Expense,
        category: TransactionCategory::Manual(expense.category.clone()),
        description: expense.description.clone(),
        amount: expense.amount,
        status,
        payment_method: expense.payment_method.clone(),
        origin: Origin::Expense,
        provider_name: None,
        customer_name: None,
        service_name: None,
        appointment_date: None,
    }
}
