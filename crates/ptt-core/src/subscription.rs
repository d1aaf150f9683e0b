//! Subscription checkout: choose a plan, pay with a UPI handle, wait for the
//! simulated processor, land on success.

use std::{fmt, time::Duration};

use tracing::{debug, info};

use crate::CoreError;

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "yearly" | "year" | "annual" | "y" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingCycle::Monthly => f.write_str("monthly"),
            BillingCycle::Yearly => f.write_str("yearly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub name: &'static str,
    /// Display price in rupees, already grouped.
    pub price: &'static str,
    pub features: [&'static str; 3],
}

const BASIC_FEATURES: [&str; 3] = ["3 Bank Accounts", "Basic Analytics", "Manual Tracking"];
const PRO_FEATURES: [&str; 3] = ["Unlimited Accounts", "Smart Insights", "Auto Sync"];
const ULTIMATE_FEATURES: [&str; 3] = ["Multi-user", "Tax Reports", "Priority Support"];

const MONTHLY_PLANS: [Plan; 3] = [
    Plan { name: "Basic", price: "199", features: BASIC_FEATURES },
    Plan { name: "Pro", price: "499", features: PRO_FEATURES },
    Plan { name: "Ultimate", price: "999", features: ULTIMATE_FEATURES },
];

const YEARLY_PLANS: [Plan; 3] = [
    Plan { name: "Basic", price: "1,999", features: BASIC_FEATURES },
    Plan { name: "Pro", price: "4,999", features: PRO_FEATURES },
    Plan { name: "Ultimate", price: "9,999", features: ULTIMATE_FEATURES },
];

pub fn plans(cycle: BillingCycle) -> &'static [Plan] {
    match cycle {
        BillingCycle::Monthly => &MONTHLY_PLANS,
        BillingCycle::Yearly => &YEARLY_PLANS,
    }
}

pub fn find_plan(cycle: BillingCycle, name: &str) -> Option<Plan> {
    plans(cycle)
        .iter()
        .find(|plan| plan.name.eq_ignore_ascii_case(name.trim()))
        .copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStep {
    Plans,
    Upi,
    Processing,
    Success,
}

impl fmt::Display for PaymentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStep::Plans => "plans",
            PaymentStep::Upi => "upi",
            PaymentStep::Processing => "processing",
            PaymentStep::Success => "success",
        };
        f.write_str(label)
    }
}

/// Linear checkout state machine. The only backward edge is `Upi -> Plans`.
#[derive(Debug, Clone)]
pub struct SubscriptionFlow {
    step: PaymentStep,
    cycle: BillingCycle,
    selected: Option<Plan>,
    upi_id: Option<String>,
    delay: Duration,
}

impl Default for SubscriptionFlow {
    fn default() -> Self {
        Self::new(DEFAULT_PAYMENT_DELAY)
    }
}

impl SubscriptionFlow {
    pub fn new(delay: Duration) -> Self {
        Self {
            step: PaymentStep::Plans,
            cycle: BillingCycle::default(),
            selected: None,
            upi_id: None,
            delay,
        }
    }

    pub fn step(&self) -> PaymentStep {
        self.step
    }

    pub fn cycle(&self) -> BillingCycle {
        self.cycle
    }

    pub fn selected(&self) -> Option<&Plan> {
        self.selected.as_ref()
    }

    pub fn upi_id(&self) -> Option<&str> {
        self.upi_id.as_deref()
    }

    pub fn set_cycle(&mut self, cycle: BillingCycle) -> Result<(), CoreError> {
        self.expect_step(PaymentStep::Plans, "billing cycle can only change on the plan list")?;
        self.cycle = cycle;
        Ok(())
    }

    pub fn select_plan(&mut self, name: &str) -> Result<Plan, CoreError> {
        self.expect_step(PaymentStep::Plans, "a plan is already selected")?;
        let plan = find_plan(self.cycle, name).ok_or_else(|| {
            CoreError::Validation(format!("unknown plan '{}'", name.trim()))
        })?;
        self.selected = Some(plan);
        self.step = PaymentStep::Upi;
        debug!(plan = plan.name, cycle = %self.cycle, "plan selected");
        Ok(plan)
    }

    pub fn back(&mut self) -> Result<(), CoreError> {
        self.expect_step(PaymentStep::Upi, "cannot go back from this step")?;
        self.step = PaymentStep::Plans;
        self.selected = None;
        Ok(())
    }

    /// Accepts any handle containing `@`; the flow stays on `Upi` otherwise.
    pub fn submit_upi(&mut self, upi_id: &str) -> Result<(), CoreError> {
        self.expect_step(PaymentStep::Upi, "no plan selected")?;
        if !upi_id.contains('@') {
            return Err(CoreError::Validation(
                "Please enter a valid UPI ID".to_string(),
            ));
        }
        self.upi_id = Some(upi_id.trim().to_string());
        self.step = PaymentStep::Processing;
        Ok(())
    }

    /// Waits out the processing delay and moves to `Success`.
    pub async fn process(&mut self) -> Result<Plan, CoreError> {
        self.expect_step(PaymentStep::Processing, "payment was not submitted")?;
        tokio::time::sleep(self.delay).await;
        let plan = self
            .selected
            .ok_or_else(|| CoreError::InvalidOperation("no plan selected".into()))?;
        self.step = PaymentStep::Success;
        info!(plan = plan.name, cycle = %self.cycle, "subscription activated");
        Ok(plan)
    }

    /// Closes the flow and returns to the plan list.
    pub fn reset(&mut self) {
        *self = Self::new(self.delay);
    }

    fn expect_step(&self, expected: PaymentStep, message: &str) -> Result<(), CoreError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CoreError::InvalidOperation(format!(
                "{} (current step: {})",
                message, self.step
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_prices_follow_cycle() {
        let monthly: Vec<&str> = plans(BillingCycle::Monthly).iter().map(|p| p.price).collect();
        let yearly: Vec<&str> = plans(BillingCycle::Yearly).iter().map(|p| p.price).collect();
        assert_eq!(monthly, ["199", "499", "999"]);
        assert_eq!(yearly, ["1,999", "4,999", "9,999"]);
    }

    #[test]
    fn invalid_upi_keeps_flow_on_upi_step() {
        let mut flow = SubscriptionFlow::default();
        flow.select_plan("pro").unwrap();
        assert!(matches!(flow.submit_upi("vivek"), Err(CoreError::Validation(_))));
        assert_eq!(flow.step(), PaymentStep::Upi);
    }

    #[test]
    fn back_is_only_allowed_from_upi() {
        let mut flow = SubscriptionFlow::default();
        assert!(flow.back().is_err());
        flow.select_plan("Basic").unwrap();
        flow.back().unwrap();
        assert_eq!(flow.step(), PaymentStep::Plans);
        assert!(flow.selected().is_none());

        flow.select_plan("Basic").unwrap();
        flow.submit_upi("vivek@okbank").unwrap();
        assert!(flow.back().is_err());
        assert_eq!(flow.step(), PaymentStep::Processing);
    }

    #[test]
    fn cycle_is_locked_after_selection() {
        let mut flow = SubscriptionFlow::default();
        flow.set_cycle(BillingCycle::Yearly).unwrap();
        let plan = flow.select_plan("Ultimate").unwrap();
        assert_eq!(plan.price, "9,999");
        assert!(flow.set_cycle(BillingCycle::Monthly).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn processing_completes_after_delay() {
        let mut flow = SubscriptionFlow::default();
        flow.select_plan("Pro").unwrap();
        flow.submit_upi("vivek@okaxis").unwrap();
        let started = tokio::time::Instant::now();
        let plan = flow.process().await.unwrap();
        assert_eq!(plan.name, "Pro");
        assert_eq!(flow.step(), PaymentStep::Success);
        assert!(started.elapsed() >= DEFAULT_PAYMENT_DELAY);

        flow.reset();
        assert_eq!(flow.step(), PaymentStep::Plans);
        assert!(flow.upi_id().is_none());
    }
}
