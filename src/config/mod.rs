//! Payment-method and commission-cycle configuration plus the lookup
//! routines the derivation engine and aggregators share.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::dates::days_in_month;

/// Fee and settlement terms for one payment method, keyed by exact name.
///
/// `fee` is a percentage (3.0 means 3%); `days` is the settlement offset
/// between charge and cash arrival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSetting {
    pub method: String,
    pub fee: f64,
    pub days: i64,
}

impl PaymentSetting {
    pub fn new(method: impl Into<String>, fee: f64, days: i64) -> Self {
        Self {
            method: method.into(),
            fee,
            days,
        }
    }
}

/// Resolved terms for a payment method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentTerms {
    pub fee: f64,
    pub days: i64,
}

impl PaymentTerms {
    /// Immediate, feeless settlement. The permissive default for methods
    /// with no configured entry (cash, unmatched names, no method at all).
    pub fn immediate() -> Self {
        Self { fee: 0.0, days: 0 }
    }

    /// Fee as a fraction of the charged amount.
    pub fn fee_fraction(&self) -> f64 {
        self.fee / 100.0
    }
}

/// Exact name match against the configured methods; unmatched yields
/// immediate feeless settlement rather than an error.
pub fn resolve_payment_details(
    method: Option<&str>,
    settings: &[PaymentSetting],
) -> PaymentTerms {
    let Some(name) = method else {
        return PaymentTerms::immediate();
    };
    settings
        .iter()
        .find(|setting| setting.method == name)
        .map(|setting| PaymentTerms {
            fee: setting.fee,
            days: setting.days,
        })
        .unwrap_or_else(PaymentTerms::immediate)
}

/// Upper bound of a commission cycle's day-of-month range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CycleEnd {
    Day(u32),
    /// Sentinel for "through the last day of the month": the rule matches
    /// any day >= `start_day`.
    Last,
}

/// Maps a day-of-month range onto the day commissions earned in that range
/// are paid out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommissionSetting {
    pub start_day: u32,
    pub end_day: CycleEnd,
    pub payment_day: u32,
}

impl CommissionSetting {
    pub fn new(start_day: u32, end_day: CycleEnd, payment_day: u32) -> Self {
        Self {
            start_day,
            end_day,
            payment_day,
        }
    }

    fn matches(&self, day: u32) -> bool {
        match self.end_day {
            CycleEnd::Day(end) => day >= self.start_day && day <= end,
            CycleEnd::Last => day >= self.start_day,
        }
    }
}

/// Resolves the payout date for a commission earned on `base`.
///
/// The payout lands on `payment_day` of the base month, rolled to the next
/// month when `payment_day` precedes the cycle's `start_day` (commissions
/// earned late in a month are paid early the next one). December rolls the
/// year. No matching rule leaves the base date unchanged.
pub fn commission_payout_date(base: NaiveDate, settings: &[CommissionSetting]) -> NaiveDate {
    let Some(rule) = settings.iter().find(|rule| rule.matches(base.day())) else {
        return base;
    };
    let mut year = base.year();
    let mut month = base.month();
    if rule.payment_day < rule.start_day {
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }
    let day = rule.payment_day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unmatched_method_settles_immediately() {
        let settings = vec![PaymentSetting::new("Credit", 3.0, 30)];
        let terms = resolve_payment_details(Some("Debit"), &settings);
        assert_eq!(terms, PaymentTerms::immediate());
        assert_eq!(resolve_payment_details(None, &settings), PaymentTerms::immediate());
    }

    #[test]
    fn matched_method_returns_configured_terms() {
        let settings = vec![
            PaymentSetting::new("Credit", 3.0, 30),
            PaymentSetting::new("Debit", 1.5, 1),
        ];
        let terms = resolve_payment_details(Some("Debit"), &settings);
        assert_eq!(terms.fee, 1.5);
        assert_eq!(terms.days, 1);
        assert!((terms.fee_fraction() - 0.015).abs() < 1e-12);
    }

    #[test]
    fn payout_rolls_to_next_month_when_payment_day_precedes_cycle() {
        let settings = vec![CommissionSetting::new(20, CycleEnd::Last, 5)];
        assert_eq!(
            commission_payout_date(date(2024, 1, 25), &settings),
            date(2024, 2, 5)
        );
    }

    #[test]
    fn payout_stays_in_month_when_payment_day_follows_cycle() {
        let settings = vec![CommissionSetting::new(1, CycleEnd::Day(15), 20)];
        assert_eq!(
            commission_payout_date(date(2024, 3, 10), &settings),
            date(2024, 3, 20)
        );
    }

    #[test]
    fn december_rollover_crosses_the_year() {
        let settings = vec![CommissionSetting::new(16, CycleEnd::Last, 1)];
        assert_eq!(
            commission_payout_date(date(2024, 12, 28), &settings),
            date(2025, 1, 1)
        );
    }

    #[test]
    fn unmatched_day_leaves_base_unchanged() {
        let settings = vec![CommissionSetting::new(20, CycleEnd::Last, 5)];
        assert_eq!(
            commission_payout_date(date(2024, 1, 10), &settings),
            date(2024, 1, 10)
        );
    }

    #[test]
    fn payment_day_clamps_to_short_months() {
        let settings = vec![CommissionSetting::new(1, CycleEnd::Day(15), 31)];
        assert_eq!(
            commission_payout_date(date(2024, 2, 10), &settings),
            date(2024, 2, 29)
        );
    }
}
