use crate::{Result, VisitlogError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of business visit being recorded.
///
/// Serialized as the exact display strings (`"Follow-Up"`, `"Crawlback"`,
/// `"Call"`) so that exported documents stay readable and re-importable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitType {
    #[serde(rename = "Follow-Up")]
    FollowUp,
    Crawlback,
    Call,
}

impl std::fmt::Display for VisitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::FollowUp => "Follow-Up",
            Self::Crawlback => "Crawlback",
            Self::Call => "Call",
        };
        f.write_str(label)
    }
}

/// A single recorded business visit — the sole persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Opaque unique identifier, assigned at creation and never changed.
    pub id: String,
    pub business_name: String,
    /// Creation instant; immutable for the life of the record.
    pub timestamp: DateTime<Utc>,
    /// Absent only for records that have never been mutated since creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub current_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_phones: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_payment: Option<f64>,
    pub visit_type: VisitType,
    /// When set, revisit-related actions become available for this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revisit_date: Option<DateTime<Utc>>,
    /// Toggle flag; only meaningful while `revisit_date` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_revisit_successful: Option<bool>,
}

/// Form-level visit data: everything the user can type, nothing the
/// repository assigns (`id`, `timestamp`, `last_modified`) and not the
/// revisit-success flag, which is only ever changed by the toggle action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitDraft {
    pub business_name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub current_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_phones: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_payment: Option<f64>,
    pub visit_type: VisitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revisit_date: Option<DateTime<Utc>>,
}

impl Default for VisitDraft {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            contact_person: String::new(),
            owner_name: String::new(),
            address: String::new(),
            notes: String::new(),
            current_provider: String::new(),
            owner_contact: None,
            number_of_phones: None,
            estimated_monthly_payment: None,
            visit_type: VisitType::FollowUp,
            revisit_date: None,
        }
    }
}

impl Visit {
    /// Merges a form draft into this record. Identity fields (`id`,
    /// `timestamp`) and the toggle-owned `is_revisit_successful` flag are
    /// deliberately untouched; the caller sets `last_modified`.
    pub(crate) fn apply_draft(&mut self, draft: VisitDraft) {
        self.business_name = draft.business_name;
        self.contact_person = draft.contact_person;
        self.owner_name = draft.owner_name;
        self.address = draft.address;
        self.notes = draft.notes;
        self.current_provider = draft.current_provider;
        self.owner_contact = draft.owner_contact;
        self.number_of_phones = draft.number_of_phones;
        self.estimated_monthly_payment = draft.estimated_monthly_payment;
        self.visit_type = draft.visit_type;
        self.revisit_date = draft.revisit_date;
    }
}

/// Parses a nullable numeric form field.
///
/// Empty or all-whitespace input means "not provided" (`None`); anything else
/// must be a finite number. This rule is applied once, at the boundary
/// between external input and the [`Visit`] entity — the entity itself never
/// holds string/number unions.
///
/// # Errors
///
/// Returns [`VisitlogError::ValidationFailed`] for non-numeric or non-finite
/// input.
pub fn parse_optional_number(input: &str) -> Result<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(VisitlogError::ValidationFailed(format!(
            "'{trimmed}' is not a number"
        ))),
    }
}
