//! Import and export of the visit collection as JSON documents.
//!
//! Export serializes the whole collection, in stored order, to a
//! pretty-printed JSON array. Import is a two-step handshake so the core
//! never performs interactive I/O: [`peek_import`] parses and validates a
//! candidate document into an [`ImportPreview`], the caller obtains the
//! user's confirmation (the preview describes what would be replaced), and
//! [`apply_import`] either replaces the collection wholesale or does nothing.

use crate::{Result, Visit, VisitRepository, VisitStore, VisitlogError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A parsed, validated import document awaiting the caller's confirmation.
#[derive(Debug, Clone)]
pub struct ImportPreview {
    visits: Vec<Visit>,
}

impl ImportPreview {
    pub fn incoming_count(&self) -> usize {
        self.visits.len()
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// The confirmation prompt for the caller to surface, contrasting the
    /// existing collection with what the import would install.
    #[must_use]
    pub fn describe(&self, existing_count: usize) -> String {
        format!(
            "Replace {existing_count} existing visit(s) with {} imported visit(s)? This cannot be undone.",
            self.visits.len()
        )
    }
}

/// Outcome of [`apply_import`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportOutcome {
    Replaced { imported: usize },
    Declined,
}

/// Serializes the collection to a pretty-printed JSON array in its natural
/// stored order.
///
/// # Errors
///
/// Returns [`VisitlogError::NothingToExport`] for an empty collection — a
/// policy choice so the user gets a message instead of an empty artifact.
pub fn export_visits(visits: &[Visit]) -> Result<String> {
    if visits.is_empty() {
        return Err(VisitlogError::NothingToExport);
    }
    Ok(serde_json::to_string_pretty(visits)?)
}

/// Suggested filename for an export performed on `date`,
/// e.g. `visitlog-export-2026-08-24.json`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("visitlog-export-{}.json", date.format("%Y-%m-%d"))
}

/// Parses and validates a candidate import document.
///
/// The document must be a JSON array in which every element carries a
/// non-empty `id`, a non-empty `businessName`, and a parseable `timestamp`.
/// Validation is wholesale: one bad element rejects the whole document, and
/// nothing is mutated.
///
/// # Errors
///
/// Returns [`VisitlogError::ImportValidation`] describing the first problem
/// found, including the offending element's index.
pub fn peek_import(text: &str) -> Result<ImportPreview> {
    let document: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| VisitlogError::ImportValidation(format!("not valid JSON: {e}")))?;

    let Some(items) = document.as_array() else {
        return Err(VisitlogError::ImportValidation(
            "expected a JSON array of visits".to_string(),
        ));
    };

    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(VisitlogError::ImportValidation(format!(
                "element {index} is not an object"
            )));
        };
        for key in ["id", "businessName", "timestamp"] {
            let present = object
                .get(key)
                .and_then(|v| v.as_str())
                .is_some_and(|s| !s.trim().is_empty());
            if !present {
                return Err(VisitlogError::ImportValidation(format!(
                    "element {index} is missing '{key}'"
                )));
            }
        }
    }

    // Field-level checks passed; a typed parse now catches everything else
    // (bad visit types, unparseable dates, wrong value types).
    let visits: Vec<Visit> = serde_json::from_value(document)
        .map_err(|e| VisitlogError::ImportValidation(e.to_string()))?;

    Ok(ImportPreview { visits })
}

/// Completes an import after the caller has surfaced
/// [`ImportPreview::describe`] and collected the user's decision.
///
/// Declining is a no-op. Confirming replaces the whole collection via
/// [`VisitRepository::replace_all`], which persists before reporting success.
///
/// # Errors
///
/// Propagates [`VisitRepository::replace_all`] failures; the repository is
/// unchanged in that case.
pub fn apply_import<S: VisitStore>(
    repo: &mut VisitRepository<S>,
    preview: ImportPreview,
    confirmed: bool,
) -> Result<ImportOutcome> {
    if !confirmed {
        return Ok(ImportOutcome::Declined);
    }
    let imported = preview.visits.len();
    repo.replace_all(preview.visits)?;
    Ok(ImportOutcome::Replaced { imported })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, VisitDraft, VisitType};

    fn repo_with(names: &[&str]) -> VisitRepository<MemoryStore> {
        let mut repo = VisitRepository::open(MemoryStore::new()).unwrap();
        for name in names {
            repo.create(VisitDraft {
                business_name: (*name).to_string(),
                visit_type: VisitType::Call,
                ..VisitDraft::default()
            })
            .unwrap();
        }
        repo
    }

    #[test]
    fn test_export_empty_collection_is_refused() {
        let result = export_visits(&[]);
        assert!(matches!(result, Err(VisitlogError::NothingToExport)));
    }

    #[test]
    fn test_export_import_round_trip_preserves_order() {
        let repo = repo_with(&["Acme Corp", "Bravo Ltd", "Cargo House"]);
        let document = export_visits(repo.visits()).unwrap();

        let preview = peek_import(&document).unwrap();
        assert_eq!(preview.incoming_count(), 3);
        // Exact-order preservation, not just set equality.
        assert_eq!(preview.visits(), repo.visits());
    }

    #[test]
    fn test_import_rejects_non_array() {
        assert!(matches!(
            peek_import(r#"{"visits": []}"#),
            Err(VisitlogError::ImportValidation(_))
        ));
        assert!(matches!(
            peek_import("not json at all"),
            Err(VisitlogError::ImportValidation(_))
        ));
    }

    #[test]
    fn test_import_missing_business_name_rejects_whole_document() {
        let repo = repo_with(&["Existing"]);
        let document = r#"[
            {"id": "a", "businessName": "Good One", "timestamp": "2026-08-01T09:00:00Z", "visitType": "Call"},
            {"id": "b", "businessName": "", "timestamp": "2026-08-02T09:00:00Z", "visitType": "Call"}
        ]"#;

        let err = peek_import(document).unwrap_err();
        assert!(matches!(err, VisitlogError::ImportValidation(_)));
        assert!(err.to_string().contains("businessName"));

        // Existing collection untouched.
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.visits()[0].business_name, "Existing");
    }

    #[test]
    fn test_import_rejects_unknown_visit_type() {
        let document = r#"[
            {"id": "a", "businessName": "Acme", "timestamp": "2026-08-01T09:00:00Z", "visitType": "Cold-Call"}
        ]"#;
        assert!(matches!(
            peek_import(document),
            Err(VisitlogError::ImportValidation(_))
        ));
    }

    #[test]
    fn test_declined_import_is_a_no_op() {
        let mut repo = repo_with(&["Existing"]);
        let incoming = repo_with(&["Replacement"]);
        let preview = peek_import(&export_visits(incoming.visits()).unwrap()).unwrap();

        let outcome = apply_import(&mut repo, preview, false).unwrap();
        assert_eq!(outcome, ImportOutcome::Declined);
        assert_eq!(repo.visits()[0].business_name, "Existing");
    }

    #[test]
    fn test_confirmed_import_replaces_wholesale() {
        let mut repo = repo_with(&["Old A", "Old B"]);
        let incoming = repo_with(&["New One"]);
        let preview = peek_import(&export_visits(incoming.visits()).unwrap()).unwrap();
        let prompt = preview.describe(repo.len());
        assert!(prompt.contains("2 existing"));
        assert!(prompt.contains("1 imported"));

        let outcome = apply_import(&mut repo, preview, true).unwrap();
        assert_eq!(outcome, ImportOutcome::Replaced { imported: 1 });
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.visits()[0].business_name, "New One");
    }

    #[test]
    fn test_export_filename_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(export_filename(date), "visitlog-export-2026-08-24.json");
    }
}
