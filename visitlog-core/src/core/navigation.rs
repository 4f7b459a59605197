//! View-navigation state machine for the list / detail / form screens.
//!
//! Pure state, no I/O: the controller only tracks which view is active and
//! which visit (if any) it points at. Repository mutations happen elsewhere;
//! the controller is told about their outcome (`form_saved`, `deleted`).
//! Transitions that the active view cannot emit are ignored rather than
//! panicking, and [`NavController::reconcile`] falls back to the list when
//! the pointed-at record has vanished out-of-band.

use serde::{Deserialize, Serialize};

/// Whether the form is creating a new visit or editing an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// The active view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavState {
    #[default]
    List,
    Detail(String),
    Form(FormMode),
}

/// Tracks the active view across the application's lifetime. Starts at the
/// list; there is no terminal state.
#[derive(Debug, Default)]
pub struct NavController {
    state: NavState,
}

impl NavController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// List → Detail(id).
    pub fn select(&mut self, id: &str) {
        if self.state == NavState::List {
            self.state = NavState::Detail(id.to_string());
        }
    }

    /// Detail → List.
    pub fn back(&mut self) {
        if matches!(self.state, NavState::Detail(_)) {
            self.state = NavState::List;
        }
    }

    /// List → Form(Create).
    pub fn new_visit(&mut self) {
        if self.state == NavState::List {
            self.state = NavState::Form(FormMode::Create);
        }
    }

    /// Detail(id) → Form(Edit(id)).
    pub fn edit(&mut self) {
        if let NavState::Detail(id) = &self.state {
            self.state = NavState::Form(FormMode::Edit(id.clone()));
        }
    }

    /// List → Form(Edit(id)), for edit actions offered on list rows.
    pub fn edit_from_list(&mut self, id: &str) {
        if self.state == NavState::List {
            self.state = NavState::Form(FormMode::Edit(id.to_string()));
        }
    }

    /// Form(Create) → List; Form(Edit(id)) → Detail(id).
    pub fn cancel(&mut self) {
        match &self.state {
            NavState::Form(FormMode::Create) => self.state = NavState::List,
            NavState::Form(FormMode::Edit(id)) => self.state = NavState::Detail(id.clone()),
            _ => {}
        }
    }

    /// Form(*) → List, after the repository mutation succeeded.
    pub fn form_saved(&mut self) {
        if matches!(self.state, NavState::Form(_)) {
            self.state = NavState::List;
        }
    }

    /// Detail → List, after the repository delete succeeded.
    pub fn deleted(&mut self) {
        if matches!(self.state, NavState::Detail(_)) {
            self.state = NavState::List;
        }
    }

    /// Fail-safe for out-of-band deletions: if the visit backing the current
    /// detail or edit view no longer exists, fall back to the list instead of
    /// rendering a missing record.
    pub fn reconcile(&mut self, exists: impl Fn(&str) -> bool) {
        let backing_id = match &self.state {
            NavState::Detail(id) | NavState::Form(FormMode::Edit(id)) => Some(id),
            _ => None,
        };
        if let Some(id) = backing_id {
            if !exists(id) {
                self.state = NavState::List;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_round_trip() {
        let mut nav = NavController::new();
        assert_eq!(nav.state(), &NavState::List);

        nav.select("v-1");
        assert_eq!(nav.state(), &NavState::Detail("v-1".to_string()));

        nav.back();
        assert_eq!(nav.state(), &NavState::List);
    }

    #[test]
    fn test_create_flow() {
        let mut nav = NavController::new();
        nav.new_visit();
        assert_eq!(nav.state(), &NavState::Form(FormMode::Create));

        nav.cancel();
        assert_eq!(nav.state(), &NavState::List);

        nav.new_visit();
        nav.form_saved();
        assert_eq!(nav.state(), &NavState::List);
    }

    #[test]
    fn test_edit_cancel_returns_to_detail() {
        let mut nav = NavController::new();
        nav.select("v-1");
        nav.edit();
        assert_eq!(
            nav.state(),
            &NavState::Form(FormMode::Edit("v-1".to_string()))
        );

        nav.cancel();
        assert_eq!(nav.state(), &NavState::Detail("v-1".to_string()));
    }

    #[test]
    fn test_edit_from_list_saves_to_list() {
        let mut nav = NavController::new();
        nav.edit_from_list("v-2");
        assert_eq!(
            nav.state(),
            &NavState::Form(FormMode::Edit("v-2".to_string()))
        );

        nav.form_saved();
        assert_eq!(nav.state(), &NavState::List);
    }

    #[test]
    fn test_delete_returns_to_list() {
        let mut nav = NavController::new();
        nav.select("v-1");
        nav.deleted();
        assert_eq!(nav.state(), &NavState::List);
    }

    #[test]
    fn test_impossible_transitions_are_ignored() {
        let mut nav = NavController::new();
        // Nothing a list view cannot emit may move the state.
        nav.back();
        nav.cancel();
        nav.edit();
        nav.form_saved();
        nav.deleted();
        assert_eq!(nav.state(), &NavState::List);

        nav.select("v-1");
        // select/new_visit are list-only.
        nav.select("v-2");
        nav.new_visit();
        assert_eq!(nav.state(), &NavState::Detail("v-1".to_string()));
    }

    #[test]
    fn test_reconcile_falls_back_when_record_vanishes() {
        let mut nav = NavController::new();
        nav.select("v-1");
        nav.reconcile(|id| id == "v-1");
        assert_eq!(nav.state(), &NavState::Detail("v-1".to_string()));

        nav.reconcile(|_| false);
        assert_eq!(nav.state(), &NavState::List);

        nav.edit_from_list("gone");
        nav.reconcile(|_| false);
        assert_eq!(nav.state(), &NavState::List);

        // Create forms have no backing record to lose.
        nav.new_visit();
        nav.reconcile(|_| false);
        assert_eq!(nav.state(), &NavState::Form(FormMode::Create));
    }
}
