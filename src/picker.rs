//! The picker controller: loaded users, filter text, selection and removal marker.
//!
//! All mutations go through the methods here so the interaction logic can be
//! driven without a terminal.
use crate::search::{self, Candidates};
use crate::selection::{RemovalState, SelectionSet};
use crate::source::UserRecord;

/// Key identifier as seen by the filter input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKey {
    Backspace,
    Char(char),
    Other,
}

/// A keystroke on the filter input together with the input value at the time it was pressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterKeyEvent {
    pub key: FilterKey,
    pub value: String,
}

impl FilterKeyEvent {
    pub fn new(key: FilterKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Picker {
    users: Vec<UserRecord>,
    filter: String,
    selection: SelectionSet,
    removal: RemovalState,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// Replace the loaded user list. Records are stored unflagged.
    pub fn load(&mut self, users: Vec<UserRecord>) {
        self.users = users
            .into_iter()
            .map(|u| UserRecord {
                is_selected: false,
                ..u
            })
            .collect();
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn removal(&self) -> &RemovalState {
        &self.removal
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn candidates(&self) -> Candidates<'_> {
        search::candidates(&self.users, &self.filter, &self.selection)
    }

    /// Add `user` to the selection, or remove it if its email is already there.
    pub fn toggle(&mut self, user: &UserRecord) {
        let selected = self.selection.toggle(user);
        if !selected && self.removal.armed_email() == Some(user.email.as_str()) {
            self.removal = RemovalState::Idle;
        }
        tracing::debug!(email = %user.email, selected, total = self.selection.len(), "toggle");
    }

    /// Select the `index`-th current candidate. Returns the picked record.
    pub fn select_candidate(&mut self, index: usize) -> Option<UserRecord> {
        let picked = self.candidates().nth(index)?.selected();
        self.toggle(&picked);
        Some(picked)
    }

    /// Deselect the chip with the given email.
    pub fn dismiss_chip(&mut self, email: &str) {
        if let Some(user) = self.selection.iter().find(|u| u.email == email).cloned() {
            self.toggle(&user);
        }
    }

    /// Mark the last chip for removal. No-op on an empty selection.
    pub fn arm_removal(&mut self) {
        if let Some(last) = self.selection.last() {
            self.removal = RemovalState::Armed(last.email.clone());
        }
    }

    /// Remove the armed chip and go back to idle.
    pub fn confirm_removal(&mut self) {
        if let RemovalState::Armed(email) = std::mem::take(&mut self.removal) {
            if let Some(removed) = self.selection.remove_email(&email) {
                tracing::debug!(email = %removed.email, "chip removed by backspace");
            }
        }
    }

    /// Drive the filter input and the two-step backspace machine.
    ///
    /// `Armed` + Backspace removes the marked chip. `Idle` + Backspace on an
    /// empty value arms the last chip, otherwise deletes one char. Any other key
    /// clears an armed marker before being applied.
    pub fn handle_key(&mut self, ev: &FilterKeyEvent) {
        match ev.key {
            FilterKey::Backspace => {
                if self.removal.is_armed() {
                    self.confirm_removal();
                } else if ev.value.is_empty() {
                    self.arm_removal();
                } else {
                    let mut value = ev.value.clone();
                    value.pop();
                    self.set_filter(value);
                }
            }
            FilterKey::Char(c) => {
                self.removal = RemovalState::Idle;
                let mut value = ev.value.clone();
                value.push(c);
                self.set_filter(value);
            }
            FilterKey::Other => {
                self.removal = RemovalState::Idle;
            }
        }
    }
}
