//! Pure query/filter engine over the visit collection.
//!
//! [`filter_visits`] is a pure function of (collection, free-text query,
//! filter spec): no side effects, fully deterministic, safe to re-run on
//! every state change. The display order the UI shows is always the output
//! of this function, never something persisted.

use crate::{Visit, VisitType};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Sort key for the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    /// Most recently touched first; falls back to the creation timestamp for
    /// never-modified records.
    LastModified,
}

/// What subset of the collection to display, and in what order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub sort_by: SortBy,
    /// `None` means all visit types.
    pub visit_type: Option<VisitType>,
    /// Empty set means no provider restriction.
    pub providers: BTreeSet<String>,
}

/// Derives the displayed subset and order of `visits`.
///
/// A record is retained iff it matches the visit-type filter, its
/// `current_provider` is in the provider set (or the set is empty), and the
/// query — case-insensitive — is a substring of its business name, contact
/// person, or address (or the query is empty). The retained records are then
/// stable-sorted by `spec.sort_by`, so ties keep their original collection
/// order.
pub fn filter_visits<'a>(visits: &'a [Visit], query: &str, spec: &FilterSpec) -> Vec<&'a Visit> {
    let needle = query.to_lowercase();
    let mut matched: Vec<&Visit> = visits
        .iter()
        .filter(|v| spec.visit_type.is_none_or(|t| t == v.visit_type))
        .filter(|v| spec.providers.is_empty() || spec.providers.contains(&v.current_provider))
        .filter(|v| needle.is_empty() || matches_query(v, &needle))
        .collect();

    match spec.sort_by {
        SortBy::Newest => matched.sort_by_key(|v| Reverse(v.timestamp)),
        SortBy::Oldest => matched.sort_by_key(|v| v.timestamp),
        SortBy::LastModified => {
            matched.sort_by_key(|v| Reverse(v.last_modified.unwrap_or(v.timestamp)));
        }
    }
    matched
}

fn matches_query(visit: &Visit, needle: &str) -> bool {
    [&visit.business_name, &visit.contact_person, &visit.address]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}
