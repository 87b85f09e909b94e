//! Text normalization shared by the loader and the query engine.
//!
//! Every comparison in the service is made on *folded* text: trimmed of
//! surrounding whitespace and lowercased. Source CSVs mark missing values
//! with an empty cell or the literal `false`; [`normalize_optional`] turns
//! both into `None` at parse time so query code never sees the sentinel.

/// Separators used inside a contraindications field.
pub const TERM_SEPARATORS: [char; 2] = [',', ';'];

/// Trims and lowercases a value for comparison.
pub fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Returns true for the values the source data uses to mean "absent".
pub fn is_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("false")
}

/// Converts a raw cell into an optional trimmed value.
///
/// ```
/// use drug_types::text::normalize_optional;
///
/// assert_eq!(normalize_optional("  Pfizer "), Some("Pfizer".to_string()));
/// assert_eq!(normalize_optional("FALSE"), None);
/// assert_eq!(normalize_optional("   "), None);
/// ```
pub fn normalize_optional(value: &str) -> Option<String> {
    if is_sentinel(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// Splits a contraindications field into trimmed, non-empty pieces.
pub fn split_terms(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(TERM_SEPARATORS)
        .map(str::trim)
        .filter(|term| !term.is_empty())
}

/// Case-insensitive substring test. `folded_needle` must already be folded.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// Case-insensitive equality test. `folded` must already be folded.
pub fn eq_folded(value: &str, folded: &str) -> bool {
    value.trim().to_lowercase() == folded
}

/// Serde adapters for dataset cells.
///
/// Converted CSV files hold strings, but hand-edited or re-exported files
/// may carry JSON booleans, numbers or `null` in the same columns.
#[cfg(feature = "serde")]
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Flag(bool),
        Integer(i64),
        Decimal(f64),
    }

    impl Cell {
        fn into_text(self) -> Option<String> {
            match self {
                Cell::Text(s) => Some(s),
                Cell::Flag(false) => None,
                Cell::Flag(true) => Some("true".to_string()),
                Cell::Integer(n) => Some(n.to_string()),
                Cell::Decimal(n) => Some(n.to_string()),
            }
        }
    }

    /// Required text: trimmed, `null` becomes an empty string.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let cell = Option::<Cell>::deserialize(deserializer)?;
        Ok(cell
            .and_then(Cell::into_text)
            .map(|s| s.trim().to_string())
            .unwrap_or_default())
    }

    /// Required text stored folded.
    pub fn folded<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text(deserializer).map(|s| s.to_lowercase())
    }

    /// Optional text with sentinel values mapped to `None`.
    pub fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let cell = Option::<Cell>::deserialize(deserializer)?;
        Ok(cell
            .and_then(Cell::into_text)
            .and_then(|s| super::normalize_optional(&s)))
    }
}
