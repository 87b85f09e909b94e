//! Drug detail record.

use crate::text;

/// A marketed drug, grouped by its drug type.
///
/// `drug_type` is stored folded. The other fields are `None` when the source
/// cell was empty or held the `false` sentinel.
///
/// # Examples
///
/// ```
/// use drug_types::DrugDetailRecord;
///
/// let record = DrugDetailRecord {
///     drug_type: "analgesic".to_string(),
///     brand_name: Some("Advil".to_string()),
///     generic_name: Some("Ibuprofen".to_string()),
///     manufacturer: None,
/// };
///
/// assert!(record.is_type("analgesic"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrugDetailRecord {
    /// Category label, folded (e.g. `analgesic`).
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "Type",
            alias = "type",
            alias = "Drug-Type",
            alias = "drug_type",
            default,
            deserialize_with = "crate::text::de::folded"
        )
    )]
    pub drug_type: String,
    /// Brand name.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "Brand-Name",
            alias = "brand_name",
            alias = "brandName",
            default,
            deserialize_with = "crate::text::de::optional"
        )
    )]
    pub brand_name: Option<String>,
    /// Generic (non-proprietary) name.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "Generic-Name",
            alias = "generic_name",
            alias = "genericName",
            default,
            deserialize_with = "crate::text::de::optional"
        )
    )]
    pub generic_name: Option<String>,
    /// Manufacturer.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "Manufacturer",
            alias = "manufacturer",
            default,
            deserialize_with = "crate::text::de::optional"
        )
    )]
    pub manufacturer: Option<String>,
}

impl DrugDetailRecord {
    /// Returns true if this record belongs to the given folded drug type.
    pub fn is_type(&self, folded_type: &str) -> bool {
        self.drug_type == folded_type
    }

    /// Brand name, folded.
    pub fn folded_brand_name(&self) -> Option<String> {
        self.brand_name.as_deref().map(text::fold)
    }

    /// Generic name, folded.
    pub fn folded_generic_name(&self) -> Option<String> {
        self.generic_name.as_deref().map(text::fold)
    }

    /// Manufacturer, folded.
    pub fn folded_manufacturer(&self) -> Option<String> {
        self.manufacturer.as_deref().map(text::fold)
    }
}
