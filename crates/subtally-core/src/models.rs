//! Domain models for subtally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Subscription billing frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = Error;

    /// Unrecognized values fail loudly; a silent default would corrupt
    /// billing math downstream.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(Error::InvalidFrequency(s.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subscription status
///
/// `Trial` is set only at creation; active/trial flip to `Cancelled` via
/// cancel and back to `Active` via reactivate. Deletion is a separate hard
/// removal, not a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Trial,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trial => "trial",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "trial" => Ok(Self::Trial),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(Error::InvalidData(format!("Unknown status: {}", s))),
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked subscription
///
/// `next_billing` is stale by design: it is recomputed only at creation,
/// payment recording, and reactivation, never implicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    /// Category token, validated at the boundary; opaque to the engine
    pub category: String,
    pub amount: f64,
    /// Display symbol only; never converted
    pub currency: String,
    pub frequency: Frequency,
    /// Anchor of the current billing cycle
    pub start_date: NaiveDate,
    /// First recurrence occurrence after "today" as of the last recomputation
    pub next_billing: NaiveDate,
    pub is_trial_period: bool,
    /// Required when `is_trial_period` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_end_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
    pub reminder_enabled: bool,
    #[serde(default)]
    pub payment_history: Vec<PaymentRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Change-tracking timestamps, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_billing_updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactivated_at: Option<DateTime<Utc>>,
}

/// A new subscription to be added to the store (before id assignment)
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub is_trial_period: bool,
    pub trial_end_date: Option<NaiveDate>,
    /// Creation enters active or trial directly
    pub status: SubscriptionStatus,
    pub reminder_enabled: bool,
}

/// Payment record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }
}

/// A recorded payment against a subscription
///
/// Created when the user marks a subscription paid; may be adjusted once
/// while pending, then confirmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: i64,
    pub amount: f64,
    pub currency: String,
    pub payment_date: NaiveDate,
    pub recorded_date: DateTime<Utc>,
    pub status: PaymentStatus,
    pub is_adjusted: bool,
    /// Set only when the record was adjusted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<f64>,
}

/// How many days before a due date an alert becomes visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum AdvanceWindow {
    ThreeDays,
    OneWeek,
    TwoWeeks,
    OneMonth,
}

impl AdvanceWindow {
    pub fn days(&self) -> i64 {
        match self {
            Self::ThreeDays => 3,
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
            Self::OneMonth => 30,
        }
    }
}

impl Default for AdvanceWindow {
    fn default() -> Self {
        Self::OneWeek
    }
}

impl TryFrom<u16> for AdvanceWindow {
    type Error = Error;

    fn try_from(days: u16) -> std::result::Result<Self, Self::Error> {
        match days {
            3 => Ok(Self::ThreeDays),
            7 => Ok(Self::OneWeek),
            14 => Ok(Self::TwoWeeks),
            30 => Ok(Self::OneMonth),
            _ => Err(Error::InvalidData(format!(
                "Unsupported advance window: {} days",
                days
            ))),
        }
    }
}

impl From<AdvanceWindow> for u16 {
    fn from(window: AdvanceWindow) -> Self {
        window.days() as u16
    }
}

impl std::str::FromStr for AdvanceWindow {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let days: u16 = s
            .parse()
            .map_err(|_| Error::InvalidData(format!("Unsupported advance window: {}", s)))?;
        Self::try_from(days)
    }
}

/// User-configured notification policy
///
/// Injected explicitly into every alert evaluation; the engine never reads
/// ambient settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPolicy {
    pub upcoming_payments: bool,
    pub trial_ending: bool,
    pub subscription_expiring: bool,
    pub advance_days: AdvanceWindow,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            upcoming_payments: true,
            trial_ending: true,
            subscription_expiring: true,
            advance_days: AdvanceWindow::OneWeek,
        }
    }
}

/// Types of upcoming-action alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// An active subscription is about to bill
    Renewal,
    /// A trial period is about to end
    TrialEnding,
    /// A cancelled subscription is about to lapse
    Expiring,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Renewal => "renewal",
            Self::TrialEnding => "trial_ending",
            Self::Expiring => "expiring",
        }
    }
}

/// Urgency tier of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// An upcoming-action alert
///
/// Derived and ephemeral: recomputed in full on every evaluation, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub subscription_id: i64,
    pub subscription_name: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub days_remaining: i64,
    pub amount: f64,
    pub currency: String,
    pub urgency: Urgency,
    /// The billing date that follows the trial (trial_ending alerts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_billing_date: Option<NaiveDate>,
}
