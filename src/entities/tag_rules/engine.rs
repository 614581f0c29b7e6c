//! Tag rule evaluation
//!
//! Pure functions over already-loaded rules and transactions. The service
//! decides which records are loaded and persists the resulting tags.

use super::model::{AppliedTag, TagRule};
use crate::core::error::{DomainError, DomainResult};
use crate::entities::transactions::Transaction;
use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;

/// A rule with its patterns compiled and its needles lowercased
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    pub rule_id: Uuid,
    pub tag_id: Uuid,
    payee_contains: Option<String>,
    description_contains: Option<String>,
    payee_regex: Option<Regex>,
    description_regex: Option<Regex>,
    amount_min: Option<Decimal>,
    amount_max: Option<Decimal>,
    currency: Option<String>,
}

fn compile_pattern(pattern: Option<&str>) -> DomainResult<Option<Regex>> {
    pattern
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| DomainError::invalid(format!("invalid rule pattern '{}': {}", p, e)))
        })
        .transpose()
}

fn contains(haystack: &str, needle: &Option<String>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(needle.as_str()),
        None => true,
    }
}

fn searches(haystack: &str, pattern: &Option<Regex>) -> bool {
    pattern.as_ref().is_none_or(|re| re.is_match(haystack))
}

impl RuleMatcher {
    pub fn compile(rule: &TagRule) -> DomainResult<Self> {
        Ok(Self {
            rule_id: rule.id,
            tag_id: rule.tag_id,
            payee_contains: rule.payee_contains.as_ref().map(|s| s.to_lowercase()),
            description_contains: rule.description_contains.as_ref().map(|s| s.to_lowercase()),
            payee_regex: compile_pattern(rule.payee_regex.as_deref())?,
            description_regex: compile_pattern(rule.description_regex.as_deref())?,
            amount_min: rule.amount_min,
            amount_max: rule.amount_max,
            currency: rule.currency.as_ref().map(|c| c.to_uppercase()),
        })
    }

    fn amount_holds(&self, amount: Option<Decimal>) -> bool {
        if self.amount_min.is_none() && self.amount_max.is_none() {
            return true;
        }
        let Some(amount) = amount else {
            return false;
        };
        self.amount_min.is_none_or(|min| amount >= min)
            && self.amount_max.is_none_or(|max| amount <= max)
    }

    /// Every set condition must hold
    pub fn matches(&self, transaction: &Transaction) -> bool {
        contains(&transaction.payee, &self.payee_contains)
            && contains(&transaction.description, &self.description_contains)
            && searches(&transaction.payee, &self.payee_regex)
            && searches(&transaction.description, &self.description_regex)
            && self.amount_holds(transaction.amount)
            && self
                .currency
                .as_ref()
                .is_none_or(|c| transaction.currency.eq_ignore_ascii_case(c))
    }
}

/// Enabled rules, lowest priority first, ties broken by creation time
pub fn applicable(mut rules: Vec<TagRule>) -> Vec<TagRule> {
    rules.retain(|r| r.enabled);
    rules.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    rules
}

pub fn compile(rules: &[TagRule]) -> DomainResult<Vec<RuleMatcher>> {
    rules.iter().map(RuleMatcher::compile).collect()
}

/// Tag applications the rules produce that are not in `existing`
///
/// `existing` holds `(transaction_id, tag_id)` pairs already tagged. When
/// several rules attach the same tag to a transaction, the first rule in
/// `matchers` order is reported.
pub fn plan(
    matchers: &[RuleMatcher],
    transactions: &[Transaction],
    existing: &HashSet<(Uuid, Uuid)>,
) -> Vec<AppliedTag> {
    let mut seen = HashSet::new();
    let mut planned = Vec::new();

    for transaction in transactions {
        for matcher in matchers.iter().filter(|m| m.matches(transaction)) {
            let pair = (transaction.id, matcher.tag_id);
            if existing.contains(&pair) || !seen.insert(pair) {
                continue;
            }
            planned.push(AppliedTag {
                transaction_id: transaction.id,
                tag_id: matcher.tag_id,
                rule_id: matcher.rule_id,
            });
        }
    }

    planned
}
