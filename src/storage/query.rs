//! Filtering and sorting of in-memory tables

use crate::core::entity::Record;
use crate::core::error::{DomainError, DomainResult};
use crate::core::field::FieldValue;
use crate::core::options::{FilterClause, Predicate, SearchFilters, SearchOptions, SortKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What to do with filter or sort fields the record type does not have
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Fail with `InvalidData`
    #[default]
    Reject,
    /// Drop the clause or sort key
    Ignore,
}

/// Filters and sort keys checked against one record type
///
/// Built once per repository call; the clauses it keeps all name attributes
/// of `T`.
#[derive(Debug)]
pub struct QueryPlan<'a> {
    clauses: Vec<&'a FilterClause>,
    sort: Vec<&'a SortKey>,
}

impl<'a> QueryPlan<'a> {
    /// Plan for a full list query
    pub fn new<T: Record>(options: &'a SearchOptions, policy: UnknownFieldPolicy) -> DomainResult<Self> {
        let mut plan = Self::for_filters::<T>(options.filters(), policy)?;
        plan.sort = keep_known::<T, _>(options.sorting().keys(), |k| &k.field, policy, "sort")?;
        Ok(plan)
    }

    /// Plan that only filters (count, bulk delete)
    pub fn for_filters<T: Record>(
        filters: &'a SearchFilters,
        policy: UnknownFieldPolicy,
    ) -> DomainResult<Self> {
        Ok(Self {
            clauses: keep_known::<T, _>(filters.clauses(), |c| &c.field, policy, "filter")?,
            sort: Vec::new(),
        })
    }

    /// Whether `record` satisfies every clause
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.clauses.iter().all(|clause| {
            record
                .field_value(&clause.field)
                .is_some_and(|actual| clause_matches(&clause.predicate, &actual))
        })
    }

    /// Stable sort by the planned keys; without keys the order is kept
    pub fn sort<T: Record>(&self, records: &mut [&T]) {
        if self.sort.is_empty() {
            return;
        }

        records.sort_by(|a, b| {
            self.sort
                .iter()
                .map(|key| {
                    let left = a.field_value(&key.field).unwrap_or(FieldValue::Null);
                    let right = b.field_value(&key.field).unwrap_or(FieldValue::Null);
                    key.order
                        .apply(left.compare(&right).unwrap_or(Ordering::Equal))
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }
}

fn keep_known<'a, T: Record, I>(
    items: &'a [I],
    field: impl Fn(&I) -> &String,
    policy: UnknownFieldPolicy,
    usage: &str,
) -> DomainResult<Vec<&'a I>> {
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        let name = field(item);
        if T::has_field(name) {
            kept.push(item);
        } else if policy == UnknownFieldPolicy::Reject {
            return Err(DomainError::InvalidData {
                message: format!("unknown {} field '{}' for {}", usage, name, T::ENTITY),
                details: Some(serde_json::json!({
                    "field": name,
                    "allowed": T::fields(),
                })),
            });
        } else {
            tracing::debug!(entity = T::ENTITY, field = %name, "ignoring unknown {} field", usage);
        }
    }
    Ok(kept)
}

fn clause_matches(predicate: &Predicate, actual: &FieldValue) -> bool {
    let coerce = |expected: &FieldValue| expected.coerce_like(actual);

    match predicate {
        Predicate::Eq(v) => coerce(v).is_some_and(|v| Predicate::Eq(v).matches(actual)),
        Predicate::Gte(v) => coerce(v).is_some_and(|v| Predicate::Gte(v).matches(actual)),
        Predicate::Lte(v) => coerce(v).is_some_and(|v| Predicate::Lte(v).matches(actual)),
        Predicate::In(values) => {
            let values: Vec<FieldValue> = values.iter().filter_map(coerce).collect();
            Predicate::In(values).matches(actual)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::{SearchSorting, SortOrder};
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    #[derive(Clone, Debug)]
    struct Row {
        id: Uuid,
        created_at: DateTime<Utc>,
        rank: i64,
        label: String,
    }

    impl Record for Row {
        type Create = (i64, String);
        type Update = ();
        const ENTITY: &'static str = "row";

        fn id(&self) -> Uuid {
            self.id
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn fields() -> &'static [&'static str] {
            &["rank", "label"]
        }
        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "rank" => Some(self.rank.into()),
                "label" => Some(self.label.clone().into()),
                _ => None,
            }
        }
        fn from_create((rank, label): (i64, String)) -> Self {
            Self {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                rank,
                label,
            }
        }
        fn apply_update(&mut self, _patch: ()) {}
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::from_create((2, "b".into())),
            Row::from_create((1, "c".into())),
            Row::from_create((2, "a".into())),
        ]
    }

    #[test]
    fn test_unknown_filter_rejected_by_default() {
        let filters = SearchFilters::new().equals("color", "red");
        let err = QueryPlan::for_filters::<Row>(&filters, UnknownFieldPolicy::Reject).unwrap_err();
        assert!(matches!(err, DomainError::InvalidData { .. }));
    }

    #[test]
    fn test_unknown_filter_ignored_when_configured() {
        let filters = SearchFilters::new().equals("color", "red");
        let plan = QueryPlan::for_filters::<Row>(&filters, UnknownFieldPolicy::Ignore).unwrap();
        assert!(rows().iter().all(|r| plan.matches(r)));
    }

    #[test]
    fn test_text_filter_is_coerced() {
        let filters = SearchFilters::new().equals("rank", "2");
        let plan = QueryPlan::for_filters::<Row>(&filters, UnknownFieldPolicy::Reject).unwrap();
        assert_eq!(rows().iter().filter(|r| plan.matches(*r)).count(), 2);
    }

    #[test]
    fn test_multi_key_sort_is_stable() {
        let options = SearchOptions::builder()
            .sorting(SearchSorting::by("rank", SortOrder::Desc).then("label", SortOrder::Asc))
            .build();
        let plan = QueryPlan::new::<Row>(&options, UnknownFieldPolicy::Reject).unwrap();

        let data = rows();
        let mut refs: Vec<&Row> = data.iter().collect();
        plan.sort(&mut refs);

        let labels: Vec<&str> = refs.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let options = SearchOptions::builder()
            .sorting(SearchSorting::by("color", SortOrder::Asc))
            .build();
        assert!(QueryPlan::new::<Row>(&options, UnknownFieldPolicy::Reject).is_err());
    }
}
