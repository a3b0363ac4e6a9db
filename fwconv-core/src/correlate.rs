//! Matching data sources to specifications by name.
//!
//! A specification `X.csv` governs every data source whose name, with its
//! extension removed, reads `X` up to the first underscore
//! (`X_2021-07-06.txt`, `X.txt`).

/// Name without its last extension. Leading dots do not start an extension,
/// so `.profile` stays `.profile`.
pub fn base_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => &name[..idx],
        _ => name,
    }
}

/// The part of a data source name that is compared with a spec base name.
pub fn correlation_key(data_name: &str) -> &str {
    base_name(data_name)
        .split('_')
        .next()
        .unwrap_or_default()
}

pub fn governs(spec_name: &str, data_name: &str) -> bool {
    base_name(spec_name) == correlation_key(data_name)
}

/// Data sources governed by `spec_name`, in the order given.
pub fn matching<'a>(spec_name: &str, data_names: &'a [String]) -> Vec<&'a str> {
    data_names
        .iter()
        .map(String::as_str)
        .filter(|d| governs(spec_name, d))
        .collect()
}
