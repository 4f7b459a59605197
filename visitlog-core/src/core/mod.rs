//! Internal domain modules for the Visitlog core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod error;
pub mod navigation;
pub mod query;
pub mod repository;
pub mod store;
pub mod transfer;
pub mod visit;

#[doc(inline)]
pub use error::{Result, VisitlogError};
#[doc(inline)]
pub use navigation::{FormMode, NavController, NavState};
#[doc(inline)]
pub use query::{filter_visits, FilterSpec, SortBy};
#[doc(inline)]
pub use repository::VisitRepository;
#[doc(inline)]
pub use store::{MemoryStore, SqliteStore, VisitStore};
#[doc(inline)]
pub use transfer::{
    apply_import, export_filename, export_visits, peek_import, ImportOutcome, ImportPreview,
};
#[doc(inline)]
pub use visit::{parse_optional_number, Visit, VisitDraft, VisitType};
