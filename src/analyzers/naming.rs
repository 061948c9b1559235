/// Returns the names that break the sku convention: at most one `_`
/// separating base and track, and only `[a-zA-Z0-9-_]` characters.
pub fn find_invalid_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !is_valid_name(name))
        .map(str::to_string)
        .collect()
}

pub fn is_valid_name(name: &str) -> bool {
    if name.split('_').count() > 2 {
        return false;
    }
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
