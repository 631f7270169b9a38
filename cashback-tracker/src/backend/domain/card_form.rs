//! Card form handling for the cashback tracker.
//!
//! The presentation layer hands over whatever the user typed. This service turns
//! that text into typed commands or typed validation errors, so no `NaN` or
//! `Infinity` ever reaches the card store or the calculator.

use log::debug;

use crate::backend::domain::commands::cards::{CreateCardCommand, RecordSpendCommand, UpdateCardCommand};
use crate::backend::domain::models::MAX_CARD_NAME_LENGTH;
use shared::{CardFormConfig, CardFormError, CardFormMode, CardFormValidation};

/// Service that parses and validates card and spend form input
#[derive(Clone)]
pub struct CardFormService {
    config: CardFormConfig,
}

impl CardFormService {
    pub fn new() -> Self {
        Self {
            config: CardFormConfig::default(),
        }
    }

    pub fn with_config(config: CardFormConfig) -> Self {
        Self { config }
    }

    /// Validate the add/edit card form input
    pub fn validate_card_form(&self, name: &str, percent_input: &str, limit_input: &str) -> CardFormValidation {
        let mut errors = Vec::new();

        let name_trimmed = name.trim();
        let name_length = name_trimmed.chars().count();
        let cleaned_name = if name_trimmed.is_empty() {
            errors.push(CardFormError::EmptyName);
            None
        } else if name_length > MAX_CARD_NAME_LENGTH {
            errors.push(CardFormError::NameTooLong(name_length));
            None
        } else {
            Some(name_trimmed.to_string())
        };

        let cleaned_percent = if percent_input.trim().is_empty() {
            errors.push(CardFormError::EmptyPercent);
            None
        } else {
            match self.clean_and_parse_amount(percent_input) {
                Ok(percent) if percent <= 0.0 => {
                    errors.push(CardFormError::PercentNotPositive);
                    None
                }
                Ok(percent) if percent > 100.0 => {
                    errors.push(CardFormError::PercentTooLarge);
                    None
                }
                Ok(percent) => Some(percent),
                Err(parse_error) => {
                    errors.push(CardFormError::InvalidPercentFormat(parse_error));
                    None
                }
            }
        };

        let cleaned_limit = if limit_input.trim().is_empty() {
            errors.push(CardFormError::EmptyLimit);
            None
        } else {
            match self.clean_and_parse_amount(limit_input) {
                Ok(limit) if limit < 0.0 => {
                    errors.push(CardFormError::NegativeLimit);
                    None
                }
                Ok(limit) if limit > self.config.max_amount => {
                    errors.push(CardFormError::LimitTooLarge(self.config.max_amount));
                    None
                }
                Ok(limit) => Some(limit),
                Err(parse_error) => {
                    errors.push(CardFormError::InvalidLimitFormat(parse_error));
                    None
                }
            }
        };

        debug!("Card form validated with {} errors", errors.len());

        CardFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_name,
            cleaned_limit,
            cleaned_percent,
        }
    }

    /// Validate the spend input next to a card
    pub fn validate_spend_input(&self, amount_input: &str) -> Result<f64, CardFormError> {
        if amount_input.trim().is_empty() {
            return Err(CardFormError::EmptySpendAmount);
        }

        let amount = self
            .clean_and_parse_amount(amount_input)
            .map_err(CardFormError::InvalidSpendFormat)?;

        if amount <= 0.0 {
            Err(CardFormError::SpendNotPositive)
        } else if amount > self.config.max_amount {
            Err(CardFormError::SpendTooLarge(self.config.max_amount))
        } else {
            Ok(amount)
        }
    }

    /// Clean and parse a numeric input string.
    ///
    /// Currency symbols, thousands separators and spaces are ignored. Only
    /// finite numbers are accepted.
    pub fn clean_and_parse_amount(&self, input: &str) -> Result<f64, String> {
        let cleaned = input
            .trim()
            .replace(&self.config.currency_symbol, "")
            .replace(',', "")
            .replace(' ', "");

        if cleaned.is_empty() {
            return Err("Empty amount after cleaning".to_string());
        }

        let value = cleaned
            .parse::<f64>()
            .map_err(|e| format!("Invalid number format: {}", e))?;

        if !value.is_finite() {
            return Err(format!("'{}' is not a finite number", cleaned));
        }
        Ok(value)
    }

    /// Build a create command from a valid form
    pub fn to_create_command(&self, validation: &CardFormValidation) -> Option<CreateCardCommand> {
        match (&validation.cleaned_name, validation.cleaned_limit, validation.cleaned_percent) {
            (Some(name), Some(cashback_limit), Some(cashback_percent)) if validation.is_valid => {
                Some(CreateCardCommand {
                    name: name.clone(),
                    cashback_limit,
                    cashback_percent,
                })
            }
            _ => None,
        }
    }

    /// Build an update command carrying every field of a valid form
    pub fn to_update_command(&self, card_id: &str, validation: &CardFormValidation) -> Option<UpdateCardCommand> {
        if !validation.is_valid {
            return None;
        }
        Some(UpdateCardCommand {
            card_id: card_id.to_string(),
            name: validation.cleaned_name.clone(),
            cashback_limit: validation.cleaned_limit,
            cashback_percent: validation.cleaned_percent,
        })
    }

    /// Parse spend input into a record-spend command
    pub fn to_record_spend_command(&self, card_id: &str, amount_input: &str) -> Result<RecordSpendCommand, CardFormError> {
        let amount = self.validate_spend_input(amount_input)?;
        Ok(RecordSpendCommand {
            card_id: card_id.to_string(),
            amount,
        })
    }

    /// Format amount for display
    pub fn format_amount(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.config.currency_symbol, amount.abs())
        } else {
            format!("{}{:.2}", self.config.currency_symbol, amount)
        }
    }

    /// Title shown above the card form
    pub fn form_title(&self, mode: CardFormMode) -> &'static str {
        match mode {
            CardFormMode::Create => "Add card",
            CardFormMode::Edit => "Edit card",
        }
    }

    /// Get user-friendly error message for validation error
    pub fn get_error_message(&self, error: &CardFormError) -> String {
        match error {
            CardFormError::EmptyName => "Please enter a card name".to_string(),
            CardFormError::NameTooLong(len) => {
                format!("Card name is too long ({} characters). Maximum is {}.", len, MAX_CARD_NAME_LENGTH)
            }
            CardFormError::EmptyLimit => "Please enter a cashback limit".to_string(),
            CardFormError::InvalidLimitFormat(msg) => format!("Please enter a valid cashback limit: {}", msg),
            CardFormError::NegativeLimit => "Cashback limit cannot be negative".to_string(),
            CardFormError::LimitTooLarge(max) => {
                format!("Cashback limit is too large. Maximum is {}", self.format_amount(*max))
            }
            CardFormError::EmptyPercent => "Please enter a cashback percentage".to_string(),
            CardFormError::InvalidPercentFormat(msg) => format!("Please enter a valid percentage: {}", msg),
            CardFormError::PercentNotPositive => "Cashback percentage must be greater than 0".to_string(),
            CardFormError::PercentTooLarge => "Cashback percentage cannot exceed 100".to_string(),
            CardFormError::EmptySpendAmount => "Please enter an amount".to_string(),
            CardFormError::InvalidSpendFormat(msg) => format!("Please enter a valid amount (like 5 or 5.00): {}", msg),
            CardFormError::SpendNotPositive => "Amount must be greater than 0".to_string(),
            CardFormError::SpendTooLarge(max) => {
                format!("Amount is too large. Maximum is {}", self.format_amount(*max))
            }
        }
    }

    /// Get the first error message (for displaying single error)
    pub fn get_first_error_message(&self, errors: &[CardFormError]) -> Option<String> {
        errors.first().map(|e| self.get_error_message(e))
    }

    pub fn get_config(&self) -> &CardFormConfig {
        &self.config
    }
}

impl Default for CardFormService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::cashback_calculator::CashbackTerms;
    use crate::backend::domain::models::Card;

    fn create_test_service() -> CardFormService {
        CardFormService::new()
    }

    #[test]
    fn test_validate_card_form_success() {
        let service = create_test_service();

        let validation = service.validate_card_form(" Visa ", "2", "$500");

        assert!(validation.is_valid);
        assert!(validation.errors.is_empty());
        assert_eq!(validation.cleaned_name.as_deref(), Some("Visa"));
        assert_eq!(validation.cleaned_percent, Some(2.0));
        assert_eq!(validation.cleaned_limit, Some(500.0));

        let command = service.to_create_command(&validation).unwrap();
        assert_eq!(command.name, "Visa");
        assert_eq!(command.cashback_limit, 500.0);
        assert_eq!(command.cashback_percent, 2.0);
    }

    #[test]
    fn test_validate_card_form_collects_every_error() {
        let service = create_test_service();

        let validation = service.validate_card_form("", "0", "abc");

        assert!(!validation.is_valid);
        assert_eq!(validation.errors.len(), 3);
        assert_eq!(validation.errors[0], CardFormError::EmptyName);
        assert_eq!(validation.errors[1], CardFormError::PercentNotPositive);
        assert!(matches!(validation.errors[2], CardFormError::InvalidLimitFormat(_)));
        assert!(service.to_create_command(&validation).is_none());
        assert!(service.to_update_command("card1", &validation).is_none());
    }

    #[test]
    fn test_validate_card_form_ranges() {
        let service = create_test_service();

        let validation = service.validate_card_form("Visa", "150", "-5");
        assert_eq!(validation.errors, vec![CardFormError::PercentTooLarge, CardFormError::NegativeLimit]);

        let validation = service.validate_card_form("Visa", "", "");
        assert_eq!(validation.errors, vec![CardFormError::EmptyPercent, CardFormError::EmptyLimit]);

        let validation = service.validate_card_form("Visa", "NaN", "inf");
        assert!(matches!(validation.errors[0], CardFormError::InvalidPercentFormat(_)));
        assert!(matches!(validation.errors[1], CardFormError::InvalidLimitFormat(_)));
    }

    #[test]
    fn test_name_limit_matches_card_model() {
        let service = create_test_service();

        let longest = "x".repeat(MAX_CARD_NAME_LENGTH);
        let validation = service.validate_card_form(&longest, "2", "500");
        assert!(validation.is_valid);
        let command = service.to_create_command(&validation).unwrap();
        assert!(Card::new(Card::generate_id(), &command.name, CashbackTerms::new(500.0, 2.0).unwrap()).is_ok());

        let too_long = "x".repeat(MAX_CARD_NAME_LENGTH + 50);
        let validation = service.validate_card_form(&too_long, "2", "500");
        assert_eq!(validation.errors, vec![CardFormError::NameTooLong(MAX_CARD_NAME_LENGTH + 50)]);
    }

    #[test]
    fn test_zero_limit_is_allowed() {
        let validation = create_test_service().validate_card_form("Visa", "1", "0");
        assert!(validation.is_valid);
        assert_eq!(validation.cleaned_limit, Some(0.0));
    }

    #[test]
    fn test_update_command_from_form() {
        let service = create_test_service();
        let validation = service.validate_card_form("Card B", "1.5", "300");

        let command = service.to_update_command("card2", &validation).unwrap();
        assert_eq!(command.card_id, "card2");
        assert_eq!(command.name.as_deref(), Some("Card B"));
        assert_eq!(command.cashback_limit, Some(300.0));
        assert_eq!(command.cashback_percent, Some(1.5));
    }

    #[test]
    fn test_validate_spend_input() {
        let service = create_test_service();

        assert_eq!(service.validate_spend_input("1000"), Ok(1000.0));
        assert_eq!(service.validate_spend_input(" $1,234.50 "), Ok(1234.5));
        assert_eq!(service.validate_spend_input(""), Err(CardFormError::EmptySpendAmount));
        assert_eq!(service.validate_spend_input("-5"), Err(CardFormError::SpendNotPositive));
        assert_eq!(service.validate_spend_input("0"), Err(CardFormError::SpendNotPositive));
        assert!(matches!(service.validate_spend_input("abc"), Err(CardFormError::InvalidSpendFormat(_))));
        assert!(matches!(service.validate_spend_input("NaN"), Err(CardFormError::InvalidSpendFormat(_))));
        assert!(matches!(service.validate_spend_input("inf"), Err(CardFormError::InvalidSpendFormat(_))));
        assert!(matches!(service.validate_spend_input("1e308000"), Err(CardFormError::InvalidSpendFormat(_))));
        assert_eq!(
            service.validate_spend_input("2000000000"),
            Err(CardFormError::SpendTooLarge(1_000_000_000.0))
        );

        let command = service.to_record_spend_command("card1", "25").unwrap();
        assert_eq!(command.card_id, "card1");
        assert_eq!(command.amount, 25.0);
    }

    #[test]
    fn test_custom_currency_symbol() {
        let service = CardFormService::with_config(CardFormConfig {
            currency_symbol: "NT$".to_string(),
            ..CardFormConfig::default()
        });

        assert_eq!(service.clean_and_parse_amount("NT$3,000").unwrap(), 3000.0);
        assert_eq!(service.format_amount(24000.0), "NT$24000.00");
        assert_eq!(service.format_amount(-12.5), "-NT$12.50");
    }

    #[test]
    fn test_error_messages() {
        let service = create_test_service();

        assert_eq!(service.get_error_message(&CardFormError::EmptyName), "Please enter a card name");
        assert!(service.get_error_message(&CardFormError::NameTooLong(300)).contains("too long"));
        assert_eq!(
            service.get_first_error_message(&[CardFormError::PercentNotPositive, CardFormError::EmptyLimit]),
            Some("Cashback percentage must be greater than 0".to_string())
        );
        assert_eq!(service.get_first_error_message(&[]), None);
        assert_eq!(service.form_title(CardFormMode::Edit), "Edit card");
    }
}
