//! Tag rule records

use crate::core::error::{DomainError, DomainResult};
use crate::core::extractors::FilterParams;
use crate::core::patch::{merge, nullable};
use crate::core::validation::{filters, validators};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_PRIORITY: i32 = 100;

fn default_enabled() -> bool {
    true
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// A predicate over transactions that attaches `tag_id` when it matches
///
/// Every condition that is set must hold. Lower `priority` runs first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagRule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tag_id: Uuid,
    pub name: Option<String>,
    pub enabled: bool,
    pub priority: i32,
    pub payee_contains: Option<String>,
    pub description_contains: Option<String>,
    pub payee_regex: Option<String>,
    pub description_regex: Option<String>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TagRule {
    /// Whether at least one match condition is set
    pub fn has_condition(&self) -> bool {
        self.payee_contains.is_some()
            || self.description_contains.is_some()
            || self.payee_regex.is_some()
            || self.description_regex.is_some()
            || self.amount_min.is_some()
            || self.amount_max.is_some()
            || self.currency.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct TagRuleCreate {
    pub user_id: Uuid,
    pub rule: TagRuleCreateIn,
}

/// Body of `POST /tag-rules`; the owner is the caller
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagRuleCreateIn {
    pub tag_id: Uuid,
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[validate(length(max = 200))]
    pub payee_contains: Option<String>,
    #[validate(length(max = 500))]
    pub description_contains: Option<String>,
    #[validate(length(max = 500))]
    pub payee_regex: Option<String>,
    #[validate(length(max = 500))]
    pub description_regex: Option<String>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
    #[validate(length(max = 3))]
    pub currency: Option<String>,
}

impl TagRuleCreateIn {
    pub fn into_create(self, user_id: Uuid) -> TagRuleCreate {
        TagRuleCreate {
            user_id,
            rule: self,
        }
    }
}

/// Body of `PATCH /tag-rules/{id}`
///
/// Conditions are nullable: `null` removes a condition, an absent key
/// keeps it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TagRuleUpdate {
    pub tag_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    pub enabled: Option<bool>,
    pub priority: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub payee_contains: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description_contains: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub payee_regex: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description_regex: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub amount_min: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub amount_max: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub currency: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagRulePublic {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tag_id: Uuid,
    pub name: Option<String>,
    pub enabled: bool,
    pub priority: i32,
    pub payee_contains: Option<String>,
    pub description_contains: Option<String>,
    pub payee_regex: Option<String>,
    pub description_regex: Option<String>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_public!(TagRule => TagRulePublic {
    id,
    user_id,
    tag_id,
    name,
    enabled,
    priority,
    payee_contains,
    description_contains,
    payee_regex,
    description_regex,
    amount_min,
    amount_max,
    currency,
    created_at,
    updated_at,
});

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagRuleFilters {
    pub user_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
    pub enabled: Option<bool>,
}

impl FilterParams for TagRuleFilters {
    const KEYS: &'static [&'static str] = &["user_id", "tag_id", "enabled"];
}

/// Calendar day of a `YYYY-MM-DD` date or an ISO-8601 datetime
fn day_of(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn date_or_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            day_of(&raw).ok_or_else(|| {
                serde::de::Error::custom(format!("'{}' is not a date or datetime", raw))
            })
        })
        .transpose()
}

/// Body of `POST /tag-rules/apply`
///
/// `transaction_id` takes precedence over `statement_id`. Date bounds are
/// inclusive days; a datetime bound is reduced to its day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplyRulesRequest {
    pub transaction_id: Option<Uuid>,
    pub statement_id: Option<Uuid>,
    #[serde(default, deserialize_with = "date_or_datetime")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "date_or_datetime")]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub dry_run: bool,
}

/// One would-be tag application reported by a dry run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppliedTag {
    pub transaction_id: Uuid,
    pub tag_id: Uuid,
    pub rule_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplyRulesResponse {
    /// Transactions considered
    pub evaluated_count: usize,
    /// Tags newly attached (or that would be, in a dry run)
    pub applied_count: usize,
    /// Present for dry runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<AppliedTag>>,
}

crate::impl_record!(
    TagRule,
    "tag_rule",
    create: TagRuleCreate,
    update: TagRuleUpdate,
    fields: [
        id,
        user_id,
        tag_id,
        name,
        enabled,
        priority,
        payee_contains,
        description_contains,
        payee_regex,
        description_regex,
        amount_min,
        amount_max,
        currency,
        created_at,
        updated_at,
    ],
    {
        fn from_create(payload: TagRuleCreate) -> Self {
            let rule = payload.rule;
            let now = Utc::now();
            Self {
                id: Uuid::new_v4(),
                user_id: payload.user_id,
                tag_id: rule.tag_id,
                name: filters::blank_to_none(rule.name),
                enabled: rule.enabled,
                priority: rule.priority,
                payee_contains: filters::blank_to_none(rule.payee_contains),
                description_contains: filters::blank_to_none(rule.description_contains),
                payee_regex: filters::blank_to_none(rule.payee_regex),
                description_regex: filters::blank_to_none(rule.description_regex),
                amount_min: rule.amount_min,
                amount_max: rule.amount_max,
                currency: filters::blank_to_none(rule.currency).map(filters::upper),
                created_at: now,
                updated_at: now,
            }
        }

        fn apply_update(&mut self, patch: TagRuleUpdate) {
            merge(&mut self.tag_id, patch.tag_id);
            merge(&mut self.name, patch.name.map(filters::blank_to_none));
            merge(&mut self.enabled, patch.enabled);
            merge(&mut self.priority, patch.priority);
            merge(&mut self.payee_contains, patch.payee_contains.map(filters::blank_to_none));
            merge(
                &mut self.description_contains,
                patch.description_contains.map(filters::blank_to_none),
            );
            merge(&mut self.payee_regex, patch.payee_regex.map(filters::blank_to_none));
            merge(
                &mut self.description_regex,
                patch.description_regex.map(filters::blank_to_none),
            );
            merge(&mut self.amount_min, patch.amount_min);
            merge(&mut self.amount_max, patch.amount_max);
            merge(
                &mut self.currency,
                patch
                    .currency
                    .map(|c| filters::blank_to_none(c).map(filters::upper)),
            );
        }

        fn validate(&self) -> DomainResult<()> {
            if !self.has_condition() {
                return Err(DomainError::invalid("at least one match condition must be set"));
            }
            validators::max_chars("name", self.name.as_deref(), 200)?;
            validators::max_chars("payee_contains", self.payee_contains.as_deref(), 200)?;
            validators::max_chars("description_contains", self.description_contains.as_deref(), 500)?;
            validators::max_chars("payee_regex", self.payee_regex.as_deref(), 500)?;
            validators::max_chars("description_regex", self.description_regex.as_deref(), 500)?;
            validators::regex("payee_regex", self.payee_regex.as_deref())?;
            validators::regex("description_regex", self.description_regex.as_deref())?;
            if let Some(currency) = &self.currency {
                validators::currency("currency", currency)?;
            }
            validators::ordered(
                "amount_min",
                self.amount_min.as_ref(),
                "amount_max",
                self.amount_max.as_ref(),
            )
        }

        fn touch(&mut self) {
            self.updated_at = Utc::now();
        }
    }
);
