//! Drug contraindication record.

use crate::text;

/// Contraindications and labelling information for one drug.
///
/// `contraindications` holds the raw comma/semicolon delimited list; use
/// [`ContraindicationRecord::terms`] to iterate its pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContraindicationRecord {
    /// Drug name, as written in the source.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "Drug Name",
            alias = "Drug_Name",
            alias = "drugName",
            default,
            deserialize_with = "crate::text::de::text"
        )
    )]
    pub drug_name: String,
    /// Delimited list of contraindicated conditions.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "Contraindications",
            default,
            deserialize_with = "crate::text::de::optional"
        )
    )]
    pub contraindications: Option<String>,
    /// Manufacturer.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "Manufacturer",
            default,
            deserialize_with = "crate::text::de::optional"
        )
    )]
    pub manufacturer: Option<String>,
    /// Approved indications.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "Indications",
            default,
            deserialize_with = "crate::text::de::optional"
        )
    )]
    pub indications: Option<String>,
    /// Known side effects.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "Side Effects",
            alias = "Side_Effects",
            alias = "sideEffects",
            default,
            deserialize_with = "crate::text::de::optional"
        )
    )]
    pub side_effects: Option<String>,
    /// Label warnings.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "Warnings",
            default,
            deserialize_with = "crate::text::de::optional"
        )
    )]
    pub warnings: Option<String>,
}

impl ContraindicationRecord {
    /// Returns the individual contraindication terms, trimmed but not folded.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.contraindications
            .as_deref()
            .into_iter()
            .flat_map(text::split_terms)
    }

    /// Returns true if the contraindications text contains `folded_term`.
    pub fn contraindication_contains(&self, folded_term: &str) -> bool {
        self.contraindications
            .as_deref()
            .is_some_and(|field| text::contains_folded(field, folded_term))
    }

    /// Returns true if the drug name equals `folded_name` ignoring case.
    pub fn is_drug(&self, folded_name: &str) -> bool {
        text::eq_folded(&self.drug_name, folded_name)
    }

    /// Returns true if the folded drug name starts with `folded_prefix`.
    pub fn drug_name_starts_with(&self, folded_prefix: &str) -> bool {
        text::fold(&self.drug_name).starts_with(folded_prefix)
    }
}
