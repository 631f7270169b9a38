//! Spend ledger for cards.
//!
//! Every change to a card's spend total goes through [`record_spend`], which
//! appends a [`SpendEvent`] to the card's history. The total itself is always the
//! sum of the history, so the two can never drift apart. Events are never edited
//! or removed once recorded.

use chrono::{DateTime, Utc};
use log::debug;

use crate::backend::domain::models::{Card, SpendEvent};

/// Reasons a spend amount is refused
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpendValidationError {
    #[error("Spend amount must be a finite number, got {0}")]
    NotFinite(f64),
    #[error("Spend amount must be greater than 0, got {0}")]
    NotPositive(f64),
}

impl SpendValidationError {
    pub fn amount(&self) -> f64 {
        match self {
            SpendValidationError::NotFinite(amount) | SpendValidationError::NotPositive(amount) => *amount,
        }
    }
}

/// Check that an amount can be recorded as a spend
pub fn validate_spend_amount(amount: f64) -> Result<f64, SpendValidationError> {
    if !amount.is_finite() {
        return Err(SpendValidationError::NotFinite(amount));
    }
    if amount <= 0.0 {
        return Err(SpendValidationError::NotPositive(amount));
    }
    Ok(amount)
}

/// Append a spend to the card's history and refresh its total.
///
/// Nothing is changed when the amount is rejected.
pub fn record_spend(
    card: &mut Card,
    amount: f64,
    timestamp: DateTime<Utc>,
) -> Result<SpendEvent, SpendValidationError> {
    let amount = validate_spend_amount(amount)?;

    let event = SpendEvent { amount, timestamp };
    card.append_spend(event.clone());
    debug!(
        "Recorded spend of {:.2} on card {}, total spent is now {:.2}",
        amount,
        card.id(),
        card.spent()
    );

    Ok(event)
}

/// Sum of all spend amounts in a history
pub fn total_spent(history: &[SpendEvent]) -> f64 {
    history.iter().map(|event| event.amount).sum()
}

/// Build the history for a stored card record.
///
/// Records written before the ledger existed carry a `spent` value and no
/// history. Those get a single carried-over event so the derived total matches
/// what the user had entered.
pub fn reconcile_stored_history(
    stored_spent: f64,
    history: Vec<SpendEvent>,
    now: DateTime<Utc>,
) -> Result<Vec<SpendEvent>, SpendValidationError> {
    if !history.is_empty() || stored_spent == 0.0 {
        return Ok(history);
    }

    let amount = validate_spend_amount(stored_spent)?;
    Ok(vec![SpendEvent { amount, timestamp: now }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::cashback_calculator::CashbackTerms;

    fn create_test_card() -> Card {
        let terms = CashbackTerms::new(500.0, 2.0).unwrap();
        Card::new("card::test".to_string(), "Visa", terms).unwrap()
    }

    #[test]
    fn test_record_spend_appends_and_totals() {
        let mut card = create_test_card();
        let now = Utc::now();

        let event = record_spend(&mut card, 1000.0, now).unwrap();
        assert_eq!(event.amount, 1000.0);
        assert_eq!(event.timestamp, now);

        assert_eq!(card.spent(), 1000.0);
        assert_eq!(card.history().len(), 1);
    }

    #[test]
    fn test_spend_total_is_order_independent() {
        let orders = [[10.0, 20.0, 5.0], [5.0, 10.0, 20.0], [20.0, 5.0, 10.0]];

        for amounts in orders {
            let mut card = create_test_card();
            for amount in amounts {
                record_spend(&mut card, amount, Utc::now()).unwrap();
            }
            assert_eq!(card.spent(), 35.0);
            let recorded: Vec<f64> = card.history().iter().map(|e| e.amount).collect();
            assert_eq!(recorded, amounts.to_vec());
        }
    }

    #[test]
    fn test_rejected_amounts_leave_card_untouched() {
        let mut card = create_test_card();
        record_spend(&mut card, 15.0, Utc::now()).unwrap();

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(record_spend(&mut card, amount, Utc::now()).is_err());
        }

        assert_eq!(card.spent(), 15.0);
        assert_eq!(card.history().len(), 1);
    }

    #[test]
    fn test_validation_error_reports_amount() {
        let error = validate_spend_amount(-3.0).unwrap_err();
        assert_eq!(error, SpendValidationError::NotPositive(-3.0));
        assert_eq!(error.amount(), -3.0);
    }

    #[test]
    fn test_reconcile_stored_history() {
        let now = Utc::now();

        let migrated = reconcile_stored_history(120.0, Vec::new(), now).unwrap();
        assert_eq!(migrated, vec![SpendEvent { amount: 120.0, timestamp: now }]);

        assert!(reconcile_stored_history(0.0, Vec::new(), now).unwrap().is_empty());

        let existing = vec![SpendEvent { amount: 5.0, timestamp: now }];
        assert_eq!(reconcile_stored_history(99.0, existing.clone(), now).unwrap(), existing);

        assert!(reconcile_stored_history(-10.0, Vec::new(), now).is_err());
    }
}
