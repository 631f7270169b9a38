use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::warn;

use crate::backend::domain::cashback_calculator::CashbackTerms;
use crate::backend::domain::commands::cards::{CreateCardCommand, RecordSpendCommand, UpdateCardCommand};
use crate::backend::domain::models::{Card as DomainCard, SpendEvent as DomainSpendEvent};
use crate::backend::domain::spend_ledger;
use shared::{
    Card as SharedCard, CardListResponse, CardSummary, CreateCardRequest, RecordSpendRequest,
    SpendEvent as SharedSpendEvent, UpdateCardRequest,
};

/// Stored totals that differ from the history by less than this are not reported
const SPENT_DRIFT_TOLERANCE: f64 = 1e-6;

/// Mapper to convert between shared Card DTOs and domain Card models.
pub struct CardMapper;

impl CardMapper {
    /// Converts a stored Card DTO to a domain Card.
    ///
    /// `now` is used as the timestamp of the carried-over event created for
    /// records that predate the spend history.
    pub fn to_domain(dto: SharedCard, now: DateTime<Utc>) -> Result<DomainCard> {
        let terms = CashbackTerms::new(dto.cashback_limit, dto.cashback_percent)
            .with_context(|| format!("Invalid cashback terms on stored card {}", dto.id))?;

        let history = dto
            .history
            .into_iter()
            .map(Self::spend_event_to_domain)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Invalid spend history on stored card {}", dto.id))?;

        if history.is_empty() && dto.spent != 0.0 {
            warn!(
                "Card {} has a spent total of {:.2} but no history, carrying it over as one spend",
                dto.id, dto.spent
            );
        }
        let history = spend_ledger::reconcile_stored_history(dto.spent, history, now)
            .with_context(|| format!("Invalid spent total on stored card {}", dto.id))?;

        let derived_spent = spend_ledger::total_spent(&history);
        if (derived_spent - dto.spent).abs() > SPENT_DRIFT_TOLERANCE {
            warn!(
                "Card {} stored spent {:.2} disagrees with its history ({:.2}), using the history",
                dto.id, dto.spent, derived_spent
            );
        }

        DomainCard::with_history(dto.id.clone(), &dto.name, terms, history)
            .with_context(|| format!("Invalid name on stored card {}", dto.id))
    }

    /// Converts a domain Card to the shared Card DTO used for storage.
    pub fn to_dto(domain: &DomainCard) -> SharedCard {
        SharedCard {
            id: domain.id().to_string(),
            name: domain.name().to_string(),
            cashback_limit: domain.cashback_limit(),
            cashback_percent: domain.cashback_percent(),
            spent: domain.spent(),
            history: domain.history().iter().map(Self::spend_event_to_dto).collect(),
        }
    }

    /// Converts a domain Card to a display summary with a rounded projection.
    pub fn to_summary(domain: &DomainCard) -> CardSummary {
        let projection = domain.projection().rounded();
        CardSummary {
            id: domain.id().to_string(),
            name: domain.name().to_string(),
            cashback_limit: domain.cashback_limit(),
            cashback_percent: domain.cashback_percent(),
            spent: domain.spent(),
            max_spendable: projection.max_spendable,
            remaining: projection.remaining,
            cashback_earned: projection.cashback_earned,
            is_capped: projection.is_capped(),
            spend_count: domain.history().len(),
        }
    }

    pub fn to_card_list_dto<'a>(cards: impl IntoIterator<Item = &'a DomainCard>) -> CardListResponse {
        CardListResponse {
            cards: cards.into_iter().map(Self::to_summary).collect(),
        }
    }

    pub fn to_create_command(request: CreateCardRequest) -> CreateCardCommand {
        CreateCardCommand {
            name: request.name,
            cashback_limit: request.cashback_limit,
            cashback_percent: request.cashback_percent,
        }
    }

    pub fn to_update_command(request: UpdateCardRequest) -> UpdateCardCommand {
        UpdateCardCommand {
            card_id: request.card_id,
            name: request.name,
            cashback_limit: request.cashback_limit,
            cashback_percent: request.cashback_percent,
        }
    }

    pub fn to_record_spend_command(request: RecordSpendRequest) -> RecordSpendCommand {
        RecordSpendCommand {
            card_id: request.card_id,
            amount: request.amount,
        }
    }

    fn spend_event_to_domain(dto: SharedSpendEvent) -> Result<DomainSpendEvent> {
        let timestamp = DateTime::parse_from_rfc3339(&dto.timestamp)
            .with_context(|| format!("Failed to parse spend timestamp '{}'", dto.timestamp))?
            .with_timezone(&Utc);
        let amount = spend_ledger::validate_spend_amount(dto.amount)?;
        Ok(DomainSpendEvent { amount, timestamp })
    }

    fn spend_event_to_dto(domain: &DomainSpendEvent) -> SharedSpendEvent {
        SharedSpendEvent {
            amount: domain.amount,
            timestamp: domain.timestamp.to_rfc3339(),
        }
    }
}
