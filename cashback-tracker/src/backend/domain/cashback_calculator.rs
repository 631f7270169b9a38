//! Cashback cap arithmetic.
//!
//! A card pays `cashback_percent` of every purchase back until the payout reaches
//! `cashback_limit`. The calculator turns those two numbers and the amount spent so
//! far into the spending level at which the cap is hit and how much is left before
//! it. Everything here is pure; the only fallible step is building
//! [`CashbackTerms`], which rejects rates the arithmetic cannot divide by.

use crate::backend::domain::models::CardValidationError;

/// Validated cashback limit and percentage of a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashbackTerms {
    cashback_limit: f64,
    cashback_percent: f64,
}

impl CashbackTerms {
    /// Validate a limit and a percentage.
    ///
    /// The limit must be finite and non-negative, the percentage finite and in
    /// `(0, 100]`.
    pub fn new(cashback_limit: f64, cashback_percent: f64) -> Result<Self, CardValidationError> {
        if !cashback_limit.is_finite() {
            return Err(CardValidationError::NonFiniteLimit);
        }
        if cashback_limit < 0.0 {
            return Err(CardValidationError::NegativeLimit);
        }
        if !cashback_percent.is_finite() {
            return Err(CardValidationError::NonFinitePercent);
        }
        if cashback_percent <= 0.0 {
            return Err(CardValidationError::NonPositivePercent);
        }
        if cashback_percent > 100.0 {
            return Err(CardValidationError::PercentOutOfRange);
        }

        Ok(Self {
            cashback_limit,
            cashback_percent,
        })
    }

    pub fn cashback_limit(&self) -> f64 {
        self.cashback_limit
    }

    pub fn cashback_percent(&self) -> f64 {
        self.cashback_percent
    }

    /// Spending level at which the cashback cap is exactly reached
    pub fn max_spendable(&self) -> f64 {
        self.cashback_limit / (self.cashback_percent / 100.0)
    }

    /// Project the terms onto an amount already spent
    pub fn project(&self, spent: f64) -> CashbackProjection {
        let max_spendable = self.max_spendable();
        let earned = spent * self.cashback_percent / 100.0;
        CashbackProjection {
            max_spendable,
            remaining: max_spendable - spent,
            cashback_earned: earned.min(self.cashback_limit),
        }
    }
}

/// Result of applying [`CashbackTerms`] to a spend total, at full precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashbackProjection {
    pub max_spendable: f64,
    /// Negative once spending has gone past the cap
    pub remaining: f64,
    pub cashback_earned: f64,
}

impl CashbackProjection {
    /// True once no further cashback can be earned
    pub fn is_capped(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Same projection rounded to cents for display
    pub fn rounded(&self) -> Self {
        Self {
            max_spendable: round_to_cents(self.max_spendable),
            remaining: round_to_cents(self.remaining),
            cashback_earned: round_to_cents(self.cashback_earned),
        }
    }
}

/// Compute max spendable and remaining for raw inputs.
///
/// Convenience wrapper for callers that have not built [`CashbackTerms`] yet.
pub fn calculate(
    cashback_limit: f64,
    cashback_percent: f64,
    spent: f64,
) -> Result<CashbackProjection, CardValidationError> {
    Ok(CashbackTerms::new(cashback_limit, cashback_percent)?.project(spent))
}

/// Round a currency amount to 2 decimal places
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
