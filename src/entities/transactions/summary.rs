//! Spending analytics over statement transactions
//!
//! Amounts are summed per group, one column per currency. Transactions
//! without an amount are left out. Credits carry negative amounts and so
//! reduce the total of their group.

use super::model::Transaction;
use crate::core::error::{DomainError, DomainResult};
use crate::core::validation::validators;
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryGroupBy {
    #[default]
    #[serde(alias = "category")]
    Tag,
    Month,
}

/// Query of `GET /transactions/summary`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpendingQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub group_by: SummaryGroupBy,
    /// Comma-separated currency codes, e.g. `USD,EUR`
    pub currencies: Option<String>,
}

impl SpendingQuery {
    /// Requested currency codes, uppercased and deduplicated in order
    pub fn currency_list(&self) -> DomainResult<Vec<String>> {
        let mut codes: Vec<String> = Vec::new();
        for code in self.currencies.iter().flat_map(|raw| raw.split(',')) {
            let code = code.trim().to_uppercase();
            if code.is_empty() || codes.contains(&code) {
                continue;
            }
            validators::currency("currencies", &code)?;
            codes.push(code);
        }
        Ok(codes)
    }

    pub fn check_range(&self) -> DomainResult<()> {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) if from > to => {
                Err(DomainError::invalid("date_from must not be after date_to"))
            }
            _ => Ok(()),
        }
    }
}

/// What a row is grouped by, flattened into the row as `tag` or `month`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingGroup {
    /// Tag label, `null` for untagged spending
    Tag(Option<String>),
    /// First day of the month, `YYYY-MM-01`
    Month(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingRow {
    #[serde(flatten)]
    pub group: SpendingGroup,
    pub transaction_count: usize,
    /// `amount_<currency>` columns, e.g. `amount_usd`
    #[serde(flatten)]
    pub amounts: IndexMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryPeriod {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub group_by: SummaryGroupBy,
    pub period: SummaryPeriod,
    pub currencies: Vec<String>,
    pub data: Vec<SpendingRow>,
}

pub fn amount_column(currency: &str) -> String {
    format!("amount_{}", currency.to_lowercase())
}

#[derive(Default)]
struct Totals {
    count: usize,
    by_currency: HashMap<String, Decimal>,
}

/// Group keys sort untagged spending after every label
type GroupKey = (bool, String);

fn keys_of(
    transaction: &Transaction,
    group_by: SummaryGroupBy,
    labels: &HashMap<Uuid, Vec<String>>,
) -> Vec<GroupKey> {
    match group_by {
        SummaryGroupBy::Month => vec![(false, transaction.txn_date.format("%Y-%m-01").to_string())],
        SummaryGroupBy::Tag => match labels.get(&transaction.id) {
            Some(labels) if !labels.is_empty() => {
                labels.iter().map(|l| (false, l.clone())).collect()
            }
            _ => vec![(true, String::new())],
        },
    }
}

/// Aggregate `transactions` into rows
///
/// `labels` maps a transaction id to the labels of its tags; a transaction
/// with several tags counts toward each of them. With no `currencies`
/// requested, every currency seen becomes a column. Returns the columns'
/// currencies and the rows.
pub fn summarize(
    transactions: &[Transaction],
    labels: &HashMap<Uuid, Vec<String>>,
    group_by: SummaryGroupBy,
    currencies: &[String],
) -> (Vec<String>, Vec<SpendingRow>) {
    let counted: Vec<(&Transaction, Decimal)> = transactions
        .iter()
        .filter_map(|t| t.amount.map(|amount| (t, amount)))
        .filter(|(t, _)| currencies.is_empty() || currencies.contains(&t.currency))
        .collect();

    let columns: Vec<String> = if currencies.is_empty() {
        counted
            .iter()
            .map(|(t, _)| t.currency.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        currencies.to_vec()
    };

    let mut groups: BTreeMap<GroupKey, Totals> = BTreeMap::new();
    for (transaction, amount) in counted {
        for key in keys_of(transaction, group_by, labels) {
            let totals = groups.entry(key).or_default();
            totals.count += 1;
            *totals
                .by_currency
                .entry(transaction.currency.clone())
                .or_default() += amount;
        }
    }

    let rows = groups
        .into_iter()
        .map(|((untagged, name), totals)| SpendingRow {
            group: match group_by {
                SummaryGroupBy::Month => SpendingGroup::Month(name),
                SummaryGroupBy::Tag => SpendingGroup::Tag((!untagged).then_some(name)),
            },
            transaction_count: totals.count,
            amounts: columns
                .iter()
                .map(|c| {
                    let total = totals.by_currency.get(c).copied().unwrap_or_default();
                    (amount_column(c), total)
                })
                .collect(),
        })
        .collect();

    (columns, rows)
}
