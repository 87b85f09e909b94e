//! Drug interaction record.
//!
//! This module provides the `InteractionRecord` struct representing one row
//! of the drug interaction dataset.

use crate::text;

/// A known interaction between two drugs.
///
/// Lookups treat the pair as unordered: `(A, B)` and `(B, A)` describe the
/// same interaction.
///
/// # Examples
///
/// ```
/// use drug_types::InteractionRecord;
///
/// let record = InteractionRecord {
///     drug_a: "Warfarin".to_string(),
///     drug_b: "Aspirin".to_string(),
///     description: "Increased bleeding risk".to_string(),
/// };
///
/// assert!(record.involves_pair("aspirin", "warfarin"));
/// assert!(!record.involves_pair("aspirin", "paracetamol"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionRecord {
    /// First drug of the pair, as written in the source.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "Drug 1",
            alias = "drug1",
            alias = "drug_1",
            default,
            deserialize_with = "crate::text::de::text"
        )
    )]
    pub drug_a: String,
    /// Second drug of the pair, as written in the source.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "Drug 2",
            alias = "drug2",
            alias = "drug_2",
            default,
            deserialize_with = "crate::text::de::text"
        )
    )]
    pub drug_b: String,
    /// Free-text description of the interaction.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "Interaction Description",
            alias = "description",
            alias = "Description",
            default,
            deserialize_with = "crate::text::de::text"
        )
    )]
    pub description: String,
}

impl InteractionRecord {
    /// Returns true if this record describes the unordered pair `{first, second}`.
    ///
    /// Both arguments must already be folded.
    pub fn involves_pair(&self, first: &str, second: &str) -> bool {
        let a = text::fold(&self.drug_a);
        let b = text::fold(&self.drug_b);
        (a == first && b == second) || (a == second && b == first)
    }

    /// Returns both drug names folded, skipping blank ones.
    pub fn folded_names(&self) -> impl Iterator<Item = String> + '_ {
        [&self.drug_a, &self.drug_b]
            .into_iter()
            .map(|name| text::fold(name))
            .filter(|name| !name.is_empty())
    }
}
