//! Student search.

use crate::storage::Student;

/// Students whose name contains `query`, ignoring case, in original order.
///
/// An empty query matches everyone.
pub fn filter_students<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let needle = query.to_lowercase();
    students
        .iter()
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
        .collect()
}
