//! Credit card records

use crate::core::error::DomainResult;
use crate::core::extractors::FilterParams;
use crate::core::field::FieldValue;
use crate::core::patch::{merge, nullable};
use crate::core::validation::{filters, validators};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Card network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Other,
}

impl CardBrand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
            CardBrand::Other => "other",
        }
    }
}

impl From<CardBrand> for FieldValue {
    fn from(brand: CardBrand) -> Self {
        FieldValue::String(brand.as_str().to_string())
    }
}

/// A credit card owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditCard {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bank: String,
    pub brand: CardBrand,
    pub last4: String,
    pub alias: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes of a new card
#[derive(Debug, Clone)]
pub struct CreditCardCreate {
    pub user_id: Uuid,
    pub bank: String,
    pub brand: CardBrand,
    pub last4: String,
    pub alias: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub currency: String,
}

/// Body of `POST /cards`
///
/// `user_id` is honoured for superusers only; everyone else creates cards
/// for themselves.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreditCardCreateIn {
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub bank: String,
    pub brand: CardBrand,
    pub last4: String,
    #[validate(length(max = 100))]
    pub alias: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub currency: String,
}

impl CreditCardCreateIn {
    pub fn into_create(self, user_id: Uuid) -> CreditCardCreate {
        CreditCardCreate {
            user_id,
            bank: self.bank,
            brand: self.brand,
            last4: self.last4,
            alias: self.alias,
            credit_limit: self.credit_limit,
            currency: self.currency,
        }
    }
}

/// Body of `PATCH /cards/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreditCardUpdate {
    #[validate(length(min = 1, max = 100))]
    pub bank: Option<String>,
    pub brand: Option<CardBrand>,
    pub last4: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub alias: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub credit_limit: Option<Option<Decimal>>,
    pub currency: Option<String>,
}

/// Card as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditCardPublic {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bank: String,
    pub brand: CardBrand,
    pub last4: String,
    pub alias: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_public!(CreditCard => CreditCardPublic {
    id, user_id, bank, brand, last4, alias, credit_limit, currency, created_at, updated_at
});

/// Balance overview of one card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardSummary {
    pub card_id: Uuid,
    pub statement_count: usize,
    /// Current balance of the statement with the latest close date
    pub latest_balance: Option<Decimal>,
    pub latest_close_date: Option<chrono::NaiveDate>,
    /// Sum of minimum payments over statements not yet fully paid
    pub unpaid_minimum_total: Decimal,
}

/// Typed filters of `GET /cards`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardFilters {
    pub user_id: Option<Uuid>,
    pub bank: Option<String>,
    pub brand: Option<CardBrand>,
}

impl FilterParams for CardFilters {
    const KEYS: &'static [&'static str] = &["user_id", "bank", "brand"];
}

crate::impl_record!(
    CreditCard,
    "card",
    create: CreditCardCreate,
    update: CreditCardUpdate,
    fields: [
        id, user_id, bank, brand, last4, alias, credit_limit, currency, created_at, updated_at
    ],
    {
        fn from_create(payload: CreditCardCreate) -> Self {
            let now = Utc::now();
            Self {
                id: Uuid::new_v4(),
                user_id: payload.user_id,
                bank: filters::trim(payload.bank),
                brand: payload.brand,
                last4: filters::trim(payload.last4),
                alias: filters::blank_to_none(payload.alias),
                credit_limit: payload.credit_limit,
                currency: filters::upper(payload.currency),
                created_at: now,
                updated_at: now,
            }
        }

        fn apply_update(&mut self, patch: CreditCardUpdate) {
            merge(&mut self.bank, patch.bank.map(filters::trim));
            merge(&mut self.brand, patch.brand);
            merge(&mut self.last4, patch.last4.map(filters::trim));
            merge(&mut self.alias, patch.alias.map(filters::blank_to_none));
            merge(&mut self.credit_limit, patch.credit_limit);
            merge(&mut self.currency, patch.currency.map(filters::upper));
        }

        fn validate(&self) -> DomainResult<()> {
            validators::not_blank("bank", &self.bank)?;
            validators::last4("last4", &self.last4)?;
            validators::currency("currency", &self.currency)?;
            validators::max_chars("alias", self.alias.as_deref(), 100)
        }

        fn touch(&mut self) {
            self.updated_at = Utc::now();
        }
    }
);
