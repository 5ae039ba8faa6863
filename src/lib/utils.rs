/// Normalize a label for comparison.
#[inline]
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Two labels are the same if they are equal after trimming and lowercasing. A missing
/// label never matches, not even another missing one.
pub fn same_label(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => normalize_label(a) == normalize_label(b),
        _ => false,
    }
}
