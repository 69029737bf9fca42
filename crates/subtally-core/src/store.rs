//! In-memory subscription store
//!
//! Owns the subscription collection and applies engine outputs at the three
//! sanctioned recomputation points: creation, payment recording, and
//! reactivation. Nothing else touches `next_billing`. Durable storage and
//! import/export live with the caller; this store only keeps the records
//! consistent between mutations.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    Alert, NewSubscription, NotificationPolicy, PaymentRecord, PaymentStatus, Subscription,
    SubscriptionStatus,
};
use crate::{alerts, cost, lifecycle, recurrence};

#[derive(Debug)]
pub struct SubscriptionStore {
    subscriptions: Vec<Subscription>,
    next_subscription_id: i64,
    next_payment_id: i64,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_subscription_id: 1,
            next_payment_id: 1,
        }
    }

    /// Add a subscription, seeding `next_billing` from the recurrence
    /// sequence (first occurrence strictly after `today`; a future start
    /// date is used as-is)
    pub fn add_subscription(&mut self, new: NewSubscription, today: NaiveDate) -> Result<i64> {
        if new.amount < 0.0 || !new.amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "Subscription amount must be non-negative, got {}",
                new.amount
            )));
        }
        if new.is_trial_period && new.trial_end_date.is_none() {
            return Err(Error::MissingField(
                "trialEndDate is required for trial subscriptions".to_string(),
            ));
        }
        if new.status == SubscriptionStatus::Cancelled {
            return Err(Error::InvalidData(
                "A subscription cannot be created as cancelled".to_string(),
            ));
        }

        let next_billing =
            recurrence::next_occurrence_on_or_after(new.start_date, new.frequency, today)?;

        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        let now = Utc::now();

        debug!(subscription_id = id, name = %new.name, %next_billing, "adding subscription");

        self.subscriptions.push(Subscription {
            id,
            name: new.name,
            category: new.category,
            amount: new.amount,
            currency: new.currency,
            frequency: new.frequency,
            start_date: new.start_date,
            next_billing,
            is_trial_period: new.is_trial_period,
            trial_end_date: new.trial_end_date,
            status: new.status,
            reminder_enabled: new.reminder_enabled,
            payment_history: vec![],
            created_at: now,
            updated_at: now,
            amount_updated_at: None,
            next_billing_updated_at: None,
            reactivated_at: None,
        });

        Ok(id)
    }

    pub fn get_subscription(&self, id: i64) -> Option<&Subscription> {
        self.subscriptions.iter().find(|sub| sub.id == id)
    }

    pub fn list_subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Cancel a subscription (soft, reversible; dates and history retained)
    pub fn cancel_subscription(&mut self, id: i64) -> Result<()> {
        let sub = self.subscription_mut(id)?;
        if sub.status == SubscriptionStatus::Cancelled {
            return Err(Error::InvalidData(format!(
                "Subscription {} is already cancelled",
                id
            )));
        }

        sub.status = SubscriptionStatus::Cancelled;
        sub.updated_at = Utc::now();
        debug!(subscription_id = id, "cancelled subscription");
        Ok(())
    }

    /// Reactivate a cancelled subscription, restarting the billing cycle if
    /// its paid-up period already lapsed
    pub fn reactivate_subscription(&mut self, id: i64, today: NaiveDate) -> Result<()> {
        let sub = self.subscription_mut(id)?;
        if sub.status != SubscriptionStatus::Cancelled {
            return Err(Error::InvalidData(format!(
                "Subscription {} is not cancelled",
                id
            )));
        }

        let outcome = lifecycle::reactivate(sub, today)?;
        let now = Utc::now();

        if outcome.next_billing != sub.next_billing {
            sub.next_billing_updated_at = Some(now);
        }
        sub.status = outcome.status;
        sub.start_date = outcome.start_date;
        sub.next_billing = outcome.next_billing;
        sub.reactivated_at = Some(now);
        sub.updated_at = now;
        Ok(())
    }

    /// Hard removal, distinct from cancellation; returns the removed record
    pub fn remove_subscription(&mut self, id: i64) -> Result<Subscription> {
        let index = self
            .subscriptions
            .iter()
            .position(|sub| sub.id == id)
            .ok_or_else(|| Error::NotFound(format!("Subscription {}", id)))?;
        Ok(self.subscriptions.remove(index))
    }

    /// Mark a subscription paid: appends a pending payment record carrying
    /// the current amount and advances `next_billing` by exactly one step
    /// from the scheduled date
    pub fn record_payment(&mut self, id: i64, today: NaiveDate) -> Result<i64> {
        let payment_id = self.next_payment_id;
        let sub = self
            .subscriptions
            .iter_mut()
            .find(|sub| sub.id == id)
            .ok_or_else(|| Error::NotFound(format!("Subscription {}", id)))?;

        let advanced = recurrence::advance_one_period(sub.next_billing, sub.frequency)?;
        let now = Utc::now();

        sub.payment_history.push(PaymentRecord {
            id: payment_id,
            amount: sub.amount,
            currency: sub.currency.clone(),
            payment_date: today,
            recorded_date: now,
            status: PaymentStatus::Pending,
            is_adjusted: false,
            original_amount: None,
        });
        sub.next_billing = advanced;
        sub.next_billing_updated_at = Some(now);
        sub.updated_at = now;
        self.next_payment_id += 1;

        debug!(
            subscription_id = id,
            payment_id,
            next_billing = %advanced,
            "recorded payment"
        );
        Ok(payment_id)
    }

    /// Adjust a pending payment once before confirmation
    ///
    /// Stashes the original amount and optionally carries the new amount
    /// forward onto the subscription. Adjusting to the same amount is a
    /// no-op.
    pub fn adjust_payment(
        &mut self,
        subscription_id: i64,
        payment_id: i64,
        new_amount: f64,
        update_subscription_amount: bool,
    ) -> Result<()> {
        if new_amount < 0.0 || !new_amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "Payment amount must be non-negative, got {}",
                new_amount
            )));
        }

        let sub = self.subscription_mut(subscription_id)?;
        let payment = sub
            .payment_history
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or_else(|| Error::NotFound(format!("Payment {}", payment_id)))?;

        if payment.status != PaymentStatus::Pending {
            return Err(Error::InvalidData(format!(
                "Payment {} is already confirmed",
                payment_id
            )));
        }
        if payment.is_adjusted {
            return Err(Error::InvalidData(format!(
                "Payment {} was already adjusted",
                payment_id
            )));
        }
        if payment.amount == new_amount {
            return Ok(());
        }

        payment.original_amount = Some(payment.amount);
        payment.amount = new_amount;
        payment.is_adjusted = true;

        let now = Utc::now();
        if update_subscription_amount {
            sub.amount = new_amount;
            sub.amount_updated_at = Some(now);
        }
        sub.updated_at = now;
        Ok(())
    }

    /// Confirm a pending payment (bookkeeping only, no date math)
    pub fn confirm_payment(&mut self, subscription_id: i64, payment_id: i64) -> Result<()> {
        let sub = self.subscription_mut(subscription_id)?;
        let payment = sub
            .payment_history
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or_else(|| Error::NotFound(format!("Payment {}", payment_id)))?;

        if payment.status == PaymentStatus::Confirmed {
            return Err(Error::InvalidData(format!(
                "Payment {} is already confirmed",
                payment_id
            )));
        }

        payment.status = PaymentStatus::Confirmed;
        sub.updated_at = Utc::now();
        Ok(())
    }

    /// Full alert recomputation over the current snapshot
    pub fn generate_alerts(&self, policy: &NotificationPolicy, today: NaiveDate) -> Vec<Alert> {
        alerts::generate_alerts(&self.subscriptions, policy, today)
    }

    /// Monthly-equivalent spend across non-cancelled subscriptions
    pub fn monthly_total(&self) -> f64 {
        cost::monthly_total(&self.subscriptions)
    }

    /// Annual-equivalent spend across non-cancelled subscriptions
    pub fn annual_total(&self) -> f64 {
        cost::annual_total(&self.subscriptions)
    }

    fn subscription_mut(&mut self, id: i64) -> Result<&mut Subscription> {
        self.subscriptions
            .iter_mut()
            .find(|sub| sub.id == id)
            .ok_or_else(|| Error::NotFound(format!("Subscription {}", id)))
    }
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}
