//! Category budgets with an accumulating spent total.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A spending limit for a category. `spent` accumulates expense amounts as
/// they are recorded and is never recomputed from the transaction log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub limit: f64,
    pub spent: f64,
    pub mode: Mode,
}

impl Budget {
    pub fn new(
        id: impl Into<String>,
        category_id: impl Into<String>,
        limit: f64,
        spent: f64,
        mode: Mode,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            limit,
            spent,
            mode,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    /// Percentage of the limit consumed; `None` for a zero limit with no spend.
    pub fn utilization(&self) -> Option<f64> {
        if self.limit.abs() > f64::EPSILON {
            Some((self.spent / self.limit) * 100.0)
        } else if self.spent.abs() > f64::EPSILON {
            Some(100.0)
        } else {
            None
        }
    }

    pub fn status(&self) -> BudgetStatus {
        if self.limit.abs() < f64::EPSILON && self.spent.abs() < f64::EPSILON {
            return BudgetStatus::Empty;
        }
        match self.spent.partial_cmp(&self.limit).unwrap_or(Ordering::Equal) {
            Ordering::Greater => BudgetStatus::OverBudget,
            Ordering::Less => BudgetStatus::UnderBudget,
            Ordering::Equal => BudgetStatus::OnTrack,
        }
    }
}

impl Identifiable for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Partitioned for Budget {
    fn mode(&self) -> Mode {
        self.mode
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Describes whether spending is within the configured limit.
pub enum BudgetStatus {
    OnTrack,
    OverBudget,
    UnderBudget,
    Empty,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::Empty => "Empty",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_budget_when_spent_exceeds_limit() {
        let budget = Budget::new("bg2", "p3", 5000.0, 6200.0, Mode::Personal);
        assert_eq!(budget.status(), BudgetStatus::OverBudget);
        assert_eq!(budget.remaining(), -1200.0);
        assert_eq!(budget.utilization(), Some(124.0));
    }

    #[test]
    fn zero_budget_is_empty() {
        let budget = Budget::new("bg", "x", 0.0, 0.0, Mode::Business);
        assert_eq!(budget.status(), BudgetStatus::Empty);
        assert_eq!(budget.utilization(), None);
    }
}
