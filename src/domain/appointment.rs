//! Domain types for billable visits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// One billable visit; may bundle extra services, each with its own
/// provider, price and commission snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: AppointmentStatus,
    pub customer_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    /// Price agreed at booking time; overrides the service list price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_price: Option<f64>,
    /// Total actually collected at checkout, tip included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_paid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Commission rate frozen at completion time, as a fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate_snapshot: Option<f64>,
    #[serde(default)]
    pub additional_services: Vec<AdditionalService>,
}

impl Appointment {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            status: AppointmentStatus::Scheduled,
            customer_id: None,
            provider_id: None,
            service_id: None,
            booked_price: None,
            price_paid: None,
            tip_amount: None,
            payment_method: None,
            payment_date: None,
            commission_rate_snapshot: None,
            additional_services: Vec::new(),
        }
    }

    pub fn with_service(mut self, service_id: Uuid) -> Self {
        self.service_id = Some(service_id);
        self
    }

    pub fn with_customer(mut self, customer_id: Uuid) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_provider(mut self, provider_id: Uuid) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, AppointmentStatus::Cancelled)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, AppointmentStatus::Completed)
    }

    /// Marks the visit completed with the amount collected at checkout.
    pub fn complete(&mut self, payment_date: NaiveDate, price_paid: f64) {
        self.status = AppointmentStatus::Completed;
        self.payment_date = Some(payment_date);
        self.price_paid = Some(price_paid);
    }
}

impl Identifiable for Appointment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Appointment {
    fn display_label(&self) -> String {
        format!("appt:{} [{:?}]", self.id, self.status)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Awaiting,
    Completed,
    Cancelled,
}

/// An extra service performed during the same visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdditionalService {
    pub service_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate_snapshot: Option<f64>,
}

impl AdditionalService {
    pub fn new(service_id: Uuid) -> Self {
        Self {
            service_id: Some(service_id),
            provider_id: None,
            booked_price: None,
            commission_rate_snapshot: None,
        }
    }

    pub fn with_provider(mut self, provider_id: Uuid) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.booked_price = Some(price);
        self
    }
}
