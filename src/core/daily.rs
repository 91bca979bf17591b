//! Cash-register closing: reduces one day's ledger slice into category
//! totals and a per-provider drill-down.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::transaction::{
    FinancialTransaction, TransactionCategory, TransactionStatus, TransactionType,
};

/// Category totals for a single day's close.
///
/// Discounts are typed as expenses but still subtract from the daily total,
/// so `total_adjustments` may be negative; every field is the signed net of
/// the entries that fed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySummary {
    pub total_services: f64,
    pub total_products: f64,
    pub total_adjustments: f64,
    pub total_tips: f64,
    pub total_revenue: f64,
    pub services_with_tips: f64,
}

/// Canonical filter for a day's close: entries dated on the target day,
/// settled or expected, that are revenue or a value-adjustment expense.
pub fn is_daily_close_entry(entry: &FinancialTransaction, day: NaiveDate) -> bool {
    entry.date == day
        && matches!(
            entry.status,
            TransactionStatus::Paid | TransactionStatus::Forecast
        )
        && (entry.kind == TransactionType::Revenue
            || entry.category == TransactionCategory::ValueAdjustment)
}

/// Reduces a caller-filtered slice into the day's figures. Revenue entries
/// add, expense entries subtract, bucketed by category.
pub fn calculate_daily_summary(entries: &[&FinancialTransaction]) -> DailySummary {
    let mut summary = DailySummary::default();
    for entry in entries {
        let signed = entry.signed_amount();
        match &entry.category {
            TransactionCategory::Service => summary.total_services += signed,
            TransactionCategory::Product => summary.total_products += signed,
            TransactionCategory::Tip => summary.total_tips += signed,
            TransactionCategory::ValueAdjustment => summary.total_adjustments += signed,
            _ => {}
        }
    }
    summary.total_revenue = summary.total_services
        + summary.total_products
        + summary.total_tips
        + summary.total_adjustments;
    summary.services_with_tips = summary.total_services + summary.total_tips;
    summary
}

/// Per-customer net within a provider's drill-down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerBucket {
    pub amount: f64,
    pub count: usize,
}

/// Per-provider drill-down for the closing view. `amount` is the signed
/// net of the contained entries; tips are tracked separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderBucket {
    pub amount: f64,
    pub count: usize,
    pub tip_total: f64,
    pub customers: BTreeMap<String, CustomerBucket>,
}

/// Groups service-related entries by provider, then by customer. Entries
/// with no provider attribution are skipped.
pub fn provider_breakdown(
    entries: &[&FinancialTransaction],
) -> BTreeMap<String, ProviderBucket> {
    let mut buckets: BTreeMap<String, ProviderBucket> = BTreeMap::new();
    for entry in entries {
        let Some(provider) = entry.provider_name.as_deref() else {
            continue;
        };
        let bucket = buckets.entry(provider.to_string()).or_default();
        let signed = entry.signed_amount();
        bucket.amount += signed;
        bucket.count += 1;
        if entry.category == TransactionCategory::Tip {
            bucket.tip_total += entry.amount;
        }
        if let Some(customer) = entry.customer_name.as_deref() {
            let per_customer = bucket.customers.entry(customer.to_string()).or_default();
            per_customer.amount += signed;
            per_customer.count += 1;
        }
    }
    buckets
}
