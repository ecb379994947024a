//! Selected users and the two-step backspace removal marker.
//!
//! Membership is keyed by `email`: a record picked from the candidate list
//! (flagged `is_selected`) and the unflagged original refer to the same user.
use crate::source::UserRecord;

/// Insertion-ordered set of picked users, unique by email.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    items: Vec<UserRecord>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserRecord> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&UserRecord> {
        self.items.last()
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.items.iter().any(|u| u.email == email)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|u| u.name == name)
    }

    /// Remove `user` if a record with its email is present, otherwise append it.
    /// Returns `true` when the user ends up selected.
    pub fn toggle(&mut self, user: &UserRecord) -> bool {
        if let Some(pos) = self.items.iter().position(|u| u.email == user.email) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(user.clone());
            true
        }
    }

    /// Remove by key. Returns the removed record, if any.
    pub fn remove_email(&mut self, email: &str) -> Option<UserRecord> {
        let pos = self.items.iter().position(|u| u.email == email)?;
        Some(self.items.remove(pos))
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a UserRecord;
    type IntoIter = std::slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Backspace removal state: either nothing pending, or the email of the chip
/// the next Backspace will remove.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RemovalState {
    #[default]
    Idle,
    Armed(String),
}

impl RemovalState {
    pub fn is_armed(&self) -> bool {
        matches!(self, RemovalState::Armed(_))
    }

    pub fn armed_email(&self) -> Option<&str> {
        match self {
            RemovalState::Armed(email) => Some(email),
            RemovalState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> UserRecord {
        UserRecord::new(name, email)
    }

    #[test]
    fn toggle_appends_then_removes() {
        let mut set = SelectionSet::new();
        assert!(set.toggle(&user("AnnLee", "a@x.com")));
        assert!(set.toggle(&user("BoKim", "b@x.com")));
        assert_eq!(set.len(), 2);
        assert!(!set.toggle(&user("AnnLee", "a@x.com")));
        let names: Vec<_> = set.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["BoKim"]);
    }

    #[test]
    fn flagged_copy_matches_unflagged_record() {
        let mut set = SelectionSet::new();
        let ann = user("AnnLee", "a@x.com");
        set.toggle(&ann.selected());
        assert!(set.contains_email("a@x.com"));
        set.toggle(&ann);
        assert!(set.is_empty());
    }

    #[test]
    fn remove_email_reports_missing_key() {
        let mut set = SelectionSet::new();
        set.toggle(&user("AnnLee", "a@x.com"));
        assert!(set.remove_email("zz@x.com").is_none());
        assert_eq!(set.remove_email("a@x.com").map(|u| u.name), Some("AnnLee".to_string()));
    }

    #[test]
    fn removal_state_accessors() {
        assert!(!RemovalState::Idle.is_armed());
        let armed = RemovalState::Armed("b@x.com".into());
        assert!(armed.is_armed());
        assert_eq!(armed.armed_email(), Some("b@x.com"));
    }
}
