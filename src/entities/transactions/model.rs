//! Transaction records

use crate::core::error::DomainResult;
use crate::core::extractors::FilterParams;
use crate::core::patch::{merge, nullable};
use crate::core::validation::{filters, validators};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single purchase or credit listed on a statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub statement_id: Uuid,
    pub txn_date: NaiveDate,
    pub payee: String,
    pub description: String,
    /// Missing when the statement line carried no parsable amount
    pub amount: Option<Decimal>,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /transactions`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransactionCreate {
    pub statement_id: Uuid,
    pub txn_date: NaiveDate,
    #[validate(length(min = 1, max = 200))]
    pub payee: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    pub amount: Option<Decimal>,
    pub currency: String,
}

/// Body of `PATCH /transactions/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TransactionUpdate {
    pub statement_id: Option<Uuid>,
    pub txn_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 200))]
    pub payee: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub amount: Option<Option<Decimal>>,
    pub currency: Option<String>,
}

/// Transaction as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionPublic {
    pub id: Uuid,
    pub statement_id: Uuid,
    pub txn_date: NaiveDate,
    pub payee: String,
    pub description: String,
    pub amount: Option<Decimal>,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_public!(Transaction => TransactionPublic {
    id, statement_id, txn_date, payee, description, amount, currency, created_at, updated_at
});

/// Typed filters of `GET /transactions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionFilters {
    pub statement_id: Option<Uuid>,
    pub currency: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
}

impl FilterParams for TransactionFilters {
    const KEYS: &'static [&'static str] = &[
        "statement_id",
        "currency",
        "date_from",
        "date_to",
        "amount_min",
        "amount_max",
    ];
}

crate::impl_record!(
    Transaction,
    "transaction",
    create: TransactionCreate,
    update: TransactionUpdate,
    fields: [
        id, statement_id, txn_date, payee, description, amount, currency, created_at, updated_at
    ],
    {
        fn from_create(payload: TransactionCreate) -> Self {
            let now = Utc::now();
            Self {
                id: Uuid::new_v4(),
                statement_id: payload.statement_id,
                txn_date: payload.txn_date,
                payee: filters::trim(payload.payee),
                description: filters::trim(payload.description),
                amount: payload.amount,
                currency: filters::upper(payload.currency),
                created_at: now,
                updated_at: now,
            }
        }

        fn apply_update(&mut self, patch: TransactionUpdate) {
            merge(&mut self.statement_id, patch.statement_id);
            merge(&mut self.txn_date, patch.txn_date);
            merge(&mut self.payee, patch.payee.map(filters::trim));
            merge(&mut self.description, patch.description.map(filters::trim));
            merge(&mut self.amount, patch.amount);
            merge(&mut self.currency, patch.currency.map(filters::upper));
        }

        fn validate(&self) -> DomainResult<()> {
            validators::not_blank("payee", &self.payee)?;
            validators::currency("currency", &self.currency)
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

    fn transaction() -> Transaction {
        Transaction::from_create(
            serde_json::from_value(json!({
                "statement_id": Uuid::new_v4(),
                "txn_date": "2026-03-04",
                "payee": " UBER *EATS ",
                "amount": "12.30",
                "currency": "usd",
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_create_normalizes() {
        let txn = transaction();
        assert_eq!(txn.payee, "UBER *EATS");
        assert_eq!(txn.description, "");
        assert_eq!(txn.currency, "USD");
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_amount_can_be_cleared() {
        let mut txn = transaction();
        let patch: TransactionUpdate = serde_json::from_value(json!({ "amount": null })).unwrap();
        txn.apply_update(patch);
        assert_eq!(txn.amount, None);
        assert_eq!(txn.field_value("amount"), Some(FieldValue::Null));
    }
}
