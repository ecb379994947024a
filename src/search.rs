use crate::selection::SelectionSet;
use crate::source::UserRecord;

/// Lazy view over the loaded users that match the filter and are not already picked.
///
/// Matching is a case-sensitive literal substring test on `name`. Exclusion
/// compares `name` against the selected records. A fresh call to
/// [`candidates`] (or a clone taken before stepping) walks from the start again.
#[derive(Clone)]
pub struct Candidates<'a> {
    users: std::slice::Iter<'a, UserRecord>,
    filter: &'a str,
    selection: &'a SelectionSet,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = &'a UserRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.filter.is_empty() {
            return None;
        }
        let filter = self.filter;
        let selection = self.selection;
        self.users
            .by_ref()
            .find(|u| u.name.contains(filter) && !selection.contains_name(&u.name))
    }
}

/// Build the candidate iterator. An empty filter yields nothing.
pub fn candidates<'a>(
    users: &'a [UserRecord],
    filter: &'a str,
    selection: &'a SelectionSet,
) -> Candidates<'a> {
    Candidates {
        users: users.iter(),
        filter,
        selection,
    }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mk_users() -> Vec<UserRecord> {
		vec![
			UserRecord::new("AnnLee", "a@x.com"),
			UserRecord::new("JoannaSmith", "j@x.com"),
			UserRecord::new("BoKim", "b@x.com"),
		]
	}

	#[test]
	fn empty_filter_yields_nothing() {
		let users = mk_users();
		let sel = SelectionSet::new();
		assert_eq!(candidates(&users, "", &sel).count(), 0);
	}

	#[test]
	fn substring_match_is_case_sensitive() {
		let users = mk_users();
		let sel = SelectionSet::new();
		let names: Vec<_> = candidates(&users, "nn", &sel).map(|u| u.name.as_str()).collect();
		assert_eq!(names, ["AnnLee", "JoannaSmith"]);
		assert_eq!(candidates(&users, "ann", &sel).count(), 1);
		assert_eq!(candidates(&users, "ANN", &sel).count(), 0);
	}

	#[test]
	fn selected_names_are_excluded() {
		let users = mk_users();
		let mut sel = SelectionSet::new();
		sel.toggle(&users[0].selected());
		let names: Vec<_> = candidates(&users, "nn", &sel).map(|u| u.name.as_str()).collect();
		assert_eq!(names, ["JoannaSmith"]);
	}

	#[test]
	fn clone_restarts_iteration() {
		let users = mk_users();
		let sel = SelectionSet::new();
		let it = candidates(&users, "o", &sel);
		assert_eq!(it.clone().count(), it.count());
	}
}
