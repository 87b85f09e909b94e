//! Derived lookup indexes.
//!
//! Every index here is a pure function of the raw record arrays: the output
//! is folded, sorted and de-duplicated, so identical inputs in any order
//! produce identical indexes.

use std::collections::{BTreeSet, HashMap};

use drug_types::{text, ContraindicationRecord, DrugDetailRecord, InteractionRecord};

/// Shortest contraindication term kept in the term index.
pub const MIN_INDEXED_TERM_LEN: usize = 3;

/// Filter values available for one drug type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilters {
    /// Sorted, folded brand names.
    pub brand_names: Vec<String>,
    /// Sorted, folded generic names.
    pub generic_names: Vec<String>,
    /// Sorted, folded manufacturers.
    pub manufacturers: Vec<String>,
}

impl TypeFilters {
    /// Returns true if no filter values are present.
    pub fn is_empty(&self) -> bool {
        self.brand_names.is_empty() && self.generic_names.is_empty() && self.manufacturers.is_empty()
    }
}

#[derive(Default)]
struct TypeFilterSets {
    brand_names: BTreeSet<String>,
    generic_names: BTreeSet<String>,
    manufacturers: BTreeSet<String>,
}

impl From<TypeFilterSets> for TypeFilters {
    fn from(sets: TypeFilterSets) -> Self {
        Self {
            brand_names: sets.brand_names.into_iter().collect(),
            generic_names: sets.generic_names.into_iter().collect(),
            manufacturers: sets.manufacturers.into_iter().collect(),
        }
    }
}

/// Builds the sorted list of every drug named in the interaction dataset.
pub fn unique_drug_names(interactions: &[InteractionRecord]) -> Vec<String> {
    interactions
        .iter()
        .flat_map(InteractionRecord::folded_names)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Builds the per-type filter index from the drug detail dataset.
pub fn filter_index(details: &[DrugDetailRecord]) -> HashMap<String, TypeFilters> {
    let mut sets: HashMap<String, TypeFilterSets> = HashMap::new();

    for record in details {
        if record.drug_type.is_empty() {
            continue;
        }

        let entry = sets.entry(record.drug_type.clone()).or_default();
        if let Some(brand) = record.folded_brand_name() {
            entry.brand_names.insert(brand);
        }
        if let Some(generic) = record.folded_generic_name() {
            entry.generic_names.insert(generic);
        }
        if let Some(manufacturer) = record.folded_manufacturer() {
            entry.manufacturers.insert(manufacturer);
        }
    }

    sets.into_iter()
        .map(|(drug_type, sets)| (drug_type, sets.into()))
        .collect()
}

/// Builds the sorted list of individual contraindication terms.
///
/// Terms of two characters or fewer and the `false` sentinel are dropped.
pub fn contraindication_terms(records: &[ContraindicationRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(ContraindicationRecord::terms)
        .map(text::fold)
        .filter(|term| term.chars().count() >= MIN_INDEXED_TERM_LEN && !text::is_sentinel(term))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Returns up to `limit` entries of a sorted list that start with `prefix`.
///
/// Uses binary search to find the first candidate, so the cost is
/// logarithmic in the list size plus the number of matches returned.
pub fn prefix_matches(sorted: &[String], prefix: &str, limit: usize) -> Vec<String> {
    let start = sorted.partition_point(|value| value.as_str() < prefix);
    sorted[start..]
        .iter()
        .take_while(|value| value.starts_with(prefix))
        .take(limit)
        .cloned()
        .collect()
}
