use chrono::NaiveDate;
use salon_core::{
    config::{CommissionSetting, CycleEnd, PaymentSetting},
    core::generate_financial_transactions,
    domain::{
        AdditionalService, Appointment, Books, Customer, DreClass, Expense, Provider, Sale,
        Service, TransactionCategory, TransactionStatus, TransactionType,
    },
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn studio_books() -> Books {
    let mut books = Books::new("Studio");
    books.payment_settings.push(PaymentSetting::new("Card", 3.0, 2));
    books.payment_settings.push(PaymentSetting::new("Pix", 0.0, 0));
    books
        .commission_settings
        .push(CommissionSetting::new(20, CycleEnd::Last, 5));
    books
        .commission_settings
        .push(CommissionSetting::new(1, CycleEnd::Day(19), 20));
    books
}

#[test]
fn completed_appointment_fans_out_into_all_roles() {
    let mut books = studio_books();
    let haircut = books.add_service(Service::new("Haircut", 80.0));
    let beard = books.add_service(Service::new("Beard Trim", 50.0));
    let marina = books.add_customer(Customer::new("Marina"));
    let ana = books.add_provider(Provider::new("Ana", 0.4));
    let bruno = books.add_provider(Provider::new("Bruno", 0.3));

    let mut appointment = Appointment::new(date(2024, 1, 25))
        .with_service(haircut)
        .with_customer(marina)
        .with_provider(ana);
    appointment
        .additional_services
        .push(AdditionalService::new(beard).with_provider(bruno));
    appointment.payment_method = Some("Card".into());
    appointment.tip_amount = Some(10.0);
    // 80 + 50 booked, paid 145 with tip: 135 net, 5 upcharge.
    appointment.complete(date(2024, 1, 25), 145.0);
    books.add_appointment(appointment);

    let today = date(2024, 2, 10);
    let entries = generate_financial_transactions(&books, today);

    // main + extra + adjustment + fee + tip + two commissions
    assert_eq!(entries.len(), 7);
    assert!(entries.iter().all(|entry| entry.amount >= 0.0));

    let settlement = date(2024, 1, 27);
    let extra = entries.iter().find(|e| e.id.ends_with("-extra-0")).unwrap();
    assert_eq!(extra.date, settlement);
    assert_eq!(extra.status, TransactionStatus::Paid);
    assert_eq!(extra.provider_name.as_deref(), Some("Bruno"));

    let adjustment = entries
        .iter()
        .find(|e| e.category == TransactionCategory::ValueAdjustment)
        .unwrap();
    assert_eq!(adjustment.kind, TransactionType::Revenue);
    assert!((adjustment.amount - 5.0).abs() < 1e-9);

    let fee = entries
        .iter()
        .find(|e| e.category == TransactionCategory::CardFee)
        .unwrap();
    assert!((fee.amount - 135.0 * 0.03).abs() < 1e-9);

    // Earned on the 25th: the 20-to-last cycle pays on the 5th of February.
    let commissions: Vec<_> = entries
        .iter()
        .filter(|e| e.category == TransactionCategory::Commission)
        .collect();
    assert_eq!(commissions.len(), 2);
    for commission in &commissions {
        assert_eq!(commission.date, date(2024, 2, 5));
        assert_eq!(commission.status, TransactionStatus::Paid);
    }
    let ana_commission = commissions
        .iter()
        .find(|e| e.provider_name.as_deref() == Some("Ana"))
        .unwrap();
    assert!((ana_commission.amount - 80.0 * 0.97 * 0.4).abs() < 1e-9);
}

#[test]
fn early_month_commission_stays_in_month() {
    let mut books = studio_books();
    let haircut = books.add_service(Service::new("Haircut", 80.0));
    let ana = books.add_provider(Provider::new("Ana", 0.4));
    let mut appointment = Appointment::new(date(2024, 3, 10))
        .with_service(haircut)
        .with_provider(ana);
    appointment.payment_method = Some("Pix".into());
    appointment.complete(date(2024, 3, 10), 80.0);
    books.add_appointment(appointment);

    let entries = generate_financial_transactions(&books, date(2024, 3, 15));
    let commission = entries
        .iter()
        .find(|e| e.category == TransactionCategory::Commission)
        .unwrap();
    assert_eq!(commission.date, date(2024, 3, 20));
    // Payout still ahead of the reference date: earned, not yet due.
    assert_eq!(commission.status, TransactionStatus::Pending);
}

#[test]
fn sale_settles_after_configured_days_with_exact_fee() {
    let mut books = studio_books();
    books.add_sale(Sale::new(date(2024, 5, 10), 200.0).with_method("Card"));

    let entries = generate_financial_transactions(&books, date(2024, 5, 12));
    assert_eq!(entries.len(), 2);
    let revenue = entries
        .iter()
        .find(|e| e.kind == TransactionType::Revenue)
        .unwrap();
    let fee = entries
        .iter()
        .find(|e| e.kind == TransactionType::Expense)
        .unwrap();
    assert_eq!(revenue.date, date(2024, 5, 12));
    assert_eq!(fee.date, date(2024, 5, 12));
    assert!((revenue.amount - 200.0).abs() < 1e-9);
    assert!((fee.amount - 6.0).abs() < 1e-9);
    assert_eq!(fee.category, TransactionCategory::CardFee);
    assert_eq!(revenue.status, TransactionStatus::Paid);
}

#[test]
fn mixed_snapshot_is_reproducible_and_sorted() {
    let mut books = studio_books();
    let haircut = books.add_service(Service::new("Haircut", 80.0));
    let ana = books.add_provider(Provider::new("Ana", 0.4));
    for day in [5, 12, 19, 26] {
        let mut appointment = Appointment::new(date(2024, 4, day))
            .with_service(haircut)
            .with_provider(ana);
        appointment.payment_method = Some("Card".into());
        if day < 19 {
            appointment.complete(date(2024, 4, day), 80.0);
        }
        books.add_appointment(appointment);
    }
    books.add_sale(Sale::new(date(2024, 4, 8), 60.0).with_method("Pix"));
    books.add_expense(
        Expense::new(date(2024, 4, 1), "Rent", 900.0, "Rent", DreClass::ExpenseAdm).paid(),
    );

    let today = date(2024, 4, 20);
    let first = generate_financial_transactions(&books, today);
    let second = generate_financial_transactions(&books, today);
    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0].date >= pair[1].date));

    // The not-yet-completed visit from the 19th is still expected, the one
    // from the 26th too; nothing before today is silently dropped.
    let forecast = first
        .iter()
        .filter(|e| e.status == TransactionStatus::Forecast)
        .count();
    assert!(forecast >= 2);
}
