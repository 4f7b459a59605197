//! Core library for Visitlog — a local-first, single-user field-visit
//! logging application.
//!
//! The primary entry point is [`VisitRepository`], which holds the visit
//! collection and keeps it synchronized with an injected [`VisitStore`]. All
//! mutations go through repository methods. Display concerns are derived on
//! top: [`filter_visits`] computes the visible subset and order, and
//! [`NavController`] tracks which of the list / detail / form views is
//! active.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    error::{Result, VisitlogError},
    navigation::{FormMode, NavController, NavState},
    query::{filter_visits, FilterSpec, SortBy},
    repository::VisitRepository,
    store::{MemoryStore, SqliteStore, VisitStore},
    transfer::{
        apply_import, export_filename, export_visits, peek_import, ImportOutcome, ImportPreview,
    },
    visit::{parse_optional_number, Visit, VisitDraft, VisitType},
};
