//! Card statement records

use crate::core::error::DomainResult;
use crate::core::extractors::FilterParams;
use crate::core::patch::merge;
use crate::core::validation::validators;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One monthly statement of a credit card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardStatement {
    pub id: Uuid,
    pub card_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub close_date: NaiveDate,
    pub due_date: NaiveDate,
    pub previous_balance: Decimal,
    pub current_balance: Decimal,
    pub minimum_payment: Decimal,
    pub is_fully_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /card-statements`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CardStatementCreate {
    pub card_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub close_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub previous_balance: Decimal,
    pub current_balance: Decimal,
    #[serde(default)]
    pub minimum_payment: Decimal,
    #[serde(default)]
    pub is_fully_paid: bool,
}

/// Body of `PATCH /card-statements/{id}`
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CardStatementUpdate {
    pub card_id: Option<Uuid>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub previous_balance: Option<Decimal>,
    pub current_balance: Option<Decimal>,
    pub minimum_payment: Option<Decimal>,
    pub is_fully_paid: Option<bool>,
}

/// Statement as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardStatementPublic {
    pub id: Uuid,
    pub card_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub close_date: NaiveDate,
    pub due_date: NaiveDate,
    pub previous_balance: Decimal,
    pub current_balance: Decimal,
    pub minimum_payment: Decimal,
    pub is_fully_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_public!(CardStatement => CardStatementPublic {
    id,
    card_id,
    period_start,
    period_end,
    close_date,
    due_date,
    previous_balance,
    current_balance,
    minimum_payment,
    is_fully_paid,
    created_at,
    updated_at,
});

/// Typed filters of `GET /card-statements`
///
/// `close_from`/`close_to` bound `close_date` inclusively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardStatementFilters {
    pub card_id: Option<Uuid>,
    pub is_fully_paid: Option<bool>,
    pub close_from: Option<NaiveDate>,
    pub close_to: Option<NaiveDate>,
}

impl FilterParams for CardStatementFilters {
    const KEYS: &'static [&'static str] = &["card_id", "is_fully_paid", "close_from", "close_to"];
}

crate::impl_record!(
    CardStatement,
    "card_statement",
    create: CardStatementCreate,
    update: CardStatementUpdate,
    fields: [
        id,
        card_id,
        period_start,
        period_end,
        close_date,
        due_date,
        previous_balance,
        current_balance,
        minimum_payment,
        is_fully_paid,
        created_at,
        updated_at,
    ],
    {
        fn from_create(payload: CardStatementCreate) -> Self {
            let now = Utc::now();
            Self {
                id: Uuid::new_v4(),
                card_id: payload.card_id,
                period_start: payload.period_start,
                period_end: payload.period_end,
                close_date: payload.close_date,
                due_date: payload.due_date,
                previous_balance: payload.previous_balance,
                current_balance: payload.current_balance,
                minimum_payment: payload.minimum_payment,
                is_fully_paid: payload.is_fully_paid,
                created_at: now,
                updated_at: now,
            }
        }

        fn apply_update(&mut self, patch: CardStatementUpdate) {
            merge(&mut self.card_id, patch.card_id);
            merge(&mut self.period_start, patch.period_start);
            merge(&mut self.period_end, patch.period_end);
            merge(&mut self.close_date, patch.close_date);
            merge(&mut self.due_date, patch.due_date);
            merge(&mut self.previous_balance, patch.previous_balance);
            merge(&mut self.current_balance, patch.current_balance);
            merge(&mut self.minimum_payment, patch.minimum_payment);
            merge(&mut self.is_fully_paid, patch.is_fully_paid);
        }

        fn validate(&self) -> DomainResult<()> {
            validators::ordered(
                "period_start",
                Some(&self.period_start),
                "period_end",
                Some(&self.period_end),
            )
        }

        fn touch(&mut self) {
            self.updated_at = Utc::now();
        }
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;
    use crate::core::field::FieldValue;
    use serde_json::json;

    fn payload() -> CardStatementCreate {
        serde_json::from_value(json!({
            "card_id": Uuid::new_v4(),
            "period_start": "2026-01-01",
            "period_end": "2026-01-31",
            "close_date": "2026-01-31",
            "due_date": "2026-02-10",
            "current_balance": "100.00",
        }))
        .unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let statement = CardStatement::from_create(payload());
        assert_eq!(statement.previous_balance, Decimal::ZERO);
        assert_eq!(statement.minimum_payment, Decimal::ZERO);
        assert!(!statement.is_fully_paid);
        assert_eq!(statement.created_at, statement.updated_at);
    }

    #[test]
    fn test_update_only_touches_present_fields() {
        let mut statement = CardStatement::from_create(payload());
        let before = statement.clone();

        let patch: CardStatementUpdate =
            serde_json::from_value(json!({ "is_fully_paid": true })).unwrap();
        statement.apply_update(patch);

        assert!(statement.is_fully_paid);
        assert_eq!(statement.current_balance, before.current_balance);
        assert_eq!(statement.period_start, before.period_start);
        assert_eq!(statement.id, before.id);
    }

    #[test]
    fn test_period_must_be_ordered() {
        let mut statement = CardStatement::from_create(payload());
        statement.apply_update(CardStatementUpdate {
            period_end: NaiveDate::from_ymd_opt(2025, 12, 1),
            ..Default::default()
        });
        assert!(statement.validate().is_err());
    }

    #[test]
    fn test_field_values() {
        let statement = CardStatement::from_create(payload());
        assert_eq!(
            statement.field_value("current_balance"),
            Some(FieldValue::Decimal(Decimal::new(10000, 2)))
        );
        assert!(CardStatement::has_field("due_date"));
        assert!(!CardStatement::has_field("amount"));
    }
}
