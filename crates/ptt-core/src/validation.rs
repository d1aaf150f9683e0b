//! Input checks shared by the mutation services.

use crate::CoreError;

/// How mutations treat ids that do not resolve to an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Unknown ids are ignored and the mutation degrades to a partial no-op.
    #[default]
    Lenient,
    /// Unknown ids fail the mutation with a not-found error.
    Strict,
}

impl ReferencePolicy {
    pub fn is_strict(self) -> bool {
        matches!(self, ReferencePolicy::Strict)
    }
}

/// Transaction amounts are positive magnitudes.
pub fn ensure_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::Validation(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount <= 0.0 {
        return Err(CoreError::Validation(format!(
            "amount must be greater than zero, got {amount}"
        )));
    }
    Ok(())
}

pub fn ensure_limit(limit: f64) -> Result<(), CoreError> {
    if !limit.is_finite() || limit < 0.0 {
        return Err(CoreError::Validation(format!(
            "budget limit must be a non-negative number, got {limit}"
        )));
    }
    Ok(())
}

/// Opening balances may be negative (credit cards) but must be finite.
pub fn ensure_balance(balance: f64) -> Result<(), CoreError> {
    if !balance.is_finite() {
        return Err(CoreError::Validation(format!(
            "opening balance must be a finite number, got {balance}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite_amounts() {
        assert!(ensure_amount(0.0).is_err());
        assert!(ensure_amount(-5.0).is_err());
        assert!(ensure_amount(f64::NAN).is_err());
        assert!(ensure_amount(f64::INFINITY).is_err());
        assert!(ensure_amount(0.01).is_ok());
    }

    #[test]
    fn limits_may_be_zero_but_not_negative() {
        assert!(ensure_limit(0.0).is_ok());
        assert!(ensure_limit(-1.0).is_err());
    }

    #[test]
    fn balances_may_be_negative() {
        assert!(ensure_balance(-15000.0).is_ok());
        assert!(ensure_balance(f64::NEG_INFINITY).is_err());
    }
}
