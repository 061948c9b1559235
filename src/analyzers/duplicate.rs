use std::collections::HashSet;

/// Values seen more than once, each reported once, ordered by the position
/// of their second occurrence.
pub fn find_duplicates<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for value in values.iter().map(AsRef::as_ref) {
        if !seen.insert(value) && reported.insert(value) {
            duplicates.push(value.to_string());
        }
    }

    duplicates
}
