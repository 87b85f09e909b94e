//! Read-only queries over a loaded [`DrugStore`].
//!
//! Short or missing search inputs degrade to empty results. Only a missing
//! drug type or fewer than two interaction operands are reported as
//! [`QueryError::InvalidRequest`].

use std::collections::BTreeMap;

use drug_types::{text, ContraindicationRecord, DrugDetailRecord};
use thiserror::Error;

use crate::index::{prefix_matches, TypeFilters};
use crate::store::DrugStore;

/// Maximum entries returned by suggestion and prefix endpoints.
pub const SUGGESTION_LIMIT: usize = 10;
/// Drugs per page in [`DrugStore::drugs_by_type`].
pub const PAGE_SIZE: usize = 20;
/// Shortest contraindication term accepted by [`DrugStore::search_contraindications`].
pub const MIN_CONTRA_TERM_LEN: usize = 3;
/// Shortest drug name accepted by [`DrugStore::search_contraindications`].
pub const MIN_DRUG_NAME_LEN: usize = 2;
/// Shortest input accepted by the suggestion queries.
pub const MIN_SUGGEST_LEN: usize = 2;

/// Errors reported for requests that cannot be answered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A required input is missing or insufficient.
    #[error("{0}")]
    InvalidRequest(String),
}

/// A known interaction for one requested pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionMatch {
    /// The pair as written in the interaction record.
    pub drugs: [String; 2],
    /// Interaction description.
    pub description: String,
}

/// Filters for [`DrugStore::drugs_by_type`].
#[derive(Debug, Clone, Default)]
pub struct DrugQuery {
    /// Required drug type.
    pub drug_type: Option<String>,
    /// Exact brand name filter.
    pub brand_name: Option<String>,
    /// Exact generic name filter.
    pub generic_name: Option<String>,
    /// Exact manufacturer filter.
    pub manufacturer: Option<String>,
    /// 1-based page number; values below 1 are treated as 1.
    pub page: Option<i64>,
}

impl DrugQuery {
    /// Creates a query for the given drug type.
    pub fn for_type(drug_type: impl Into<String>) -> Self {
        Self {
            drug_type: Some(drug_type.into()),
            ..Default::default()
        }
    }

    /// Returns the page clamped to at least 1.
    pub fn page_number(&self) -> usize {
        let page = self.page.unwrap_or(1).max(1);
        usize::try_from(page).unwrap_or(usize::MAX)
    }
}

/// One page of [`DrugStore::drugs_by_type`] results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugPage<'a> {
    /// Records on this page.
    pub drugs: Vec<&'a DrugDetailRecord>,
    /// Total records matching the filters.
    pub total_matches: usize,
    /// The page returned (after clamping).
    pub current_page: usize,
    /// Page size.
    pub page_size: usize,
}

impl DrugPage<'_> {
    /// Number of pages needed to show every match.
    pub fn total_pages(&self) -> usize {
        self.total_matches.div_ceil(self.page_size)
    }
}

/// Folds an optional filter, treating blank input as absent.
fn fold_filter(value: Option<&str>) -> Option<String> {
    value.map(text::fold).filter(|v| !v.is_empty())
}

fn field_matches(value: Option<String>, filter: &Option<String>) -> bool {
    match filter {
        None => true,
        Some(wanted) => value.as_deref() == Some(wanted.as_str()),
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

impl DrugStore {
    /// Returns up to ten known drug names starting with `term`.
    pub fn search_drug_names(&self, term: &str) -> Vec<String> {
        let term = text::fold(term);
        if term.is_empty() {
            return Vec::new();
        }
        prefix_matches(&self.drug_names, &term, SUGGESTION_LIMIT)
    }

    /// Looks up every unordered pair of `drugs` in the interaction dataset.
    ///
    /// Pairs without a known interaction are omitted. For each pair the
    /// first matching record is reported, so the result does not depend on
    /// the order of a two-drug list.
    ///
    /// # Errors
    /// [`QueryError::InvalidRequest`] if fewer than two non-blank names are given.
    pub fn check_interactions<S: AsRef<str>>(
        &self,
        drugs: &[S],
    ) -> Result<Vec<InteractionMatch>, QueryError> {
        let names: Vec<String> = drugs
            .iter()
            .map(|d| text::fold(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();

        if names.len() < 2 {
            return Err(QueryError::InvalidRequest(
                "At least two drugs are required".to_string(),
            ));
        }

        let mut matches = Vec::new();
        for (i, first) in names.iter().enumerate() {
            for second in &names[i + 1..] {
                if let Some(record) = self
                    .interactions
                    .iter()
                    .find(|r| r.involves_pair(first, second))
                {
                    matches.push(InteractionMatch {
                        drugs: [record.drug_a.clone(), record.drug_b.clone()],
                        description: record.description.clone(),
                    });
                }
            }
        }

        tracing::debug!(requested = names.len(), found = matches.len(), "checked interactions");
        Ok(matches)
    }

    /// Returns the filter values for a drug type; unknown types yield empty lists.
    pub fn filters_for_type(&self, drug_type: &str) -> TypeFilters {
        self.filters
            .get(&text::fold(drug_type))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns one page of drugs of a type, narrowed by exact filters.
    ///
    /// # Errors
    /// [`QueryError::InvalidRequest`] if the drug type is missing or blank.
    pub fn drugs_by_type(&self, query: &DrugQuery) -> Result<DrugPage<'_>, QueryError> {
        let drug_type = fold_filter(query.drug_type.as_deref())
            .ok_or_else(|| QueryError::InvalidRequest("Drug type is required".to_string()))?;
        let brand = fold_filter(query.brand_name.as_deref());
        let generic = fold_filter(query.generic_name.as_deref());
        let manufacturer = fold_filter(query.manufacturer.as_deref());

        let matching: Vec<&DrugDetailRecord> = self
            .drug_details
            .iter()
            .filter(|d| d.is_type(&drug_type))
            .filter(|d| field_matches(d.folded_brand_name(), &brand))
            .filter(|d| field_matches(d.folded_generic_name(), &generic))
            .filter(|d| field_matches(d.folded_manufacturer(), &manufacturer))
            .collect();

        let current_page = query.page_number();
        let offset = (current_page - 1).saturating_mul(PAGE_SIZE);
        let total_matches = matching.len();
        let drugs = matching.into_iter().skip(offset).take(PAGE_SIZE).collect();

        Ok(DrugPage {
            drugs,
            total_matches,
            current_page,
            page_size: PAGE_SIZE,
        })
    }

    /// Finds records for `drug_name` whose contraindications mention `term`.
    ///
    /// The term must be at least three characters and the drug name at
    /// least two, otherwise the result is empty.
    pub fn search_contraindications(
        &self,
        term: &str,
        drug_name: &str,
    ) -> Vec<&ContraindicationRecord> {
        let term = text::fold(term);
        let drug_name = text::fold(drug_name);
        if char_len(&term) < MIN_CONTRA_TERM_LEN || char_len(&drug_name) < MIN_DRUG_NAME_LEN {
            return Vec::new();
        }

        self.contraindications
            .iter()
            .filter(|r| r.contraindication_contains(&term) && r.is_drug(&drug_name))
            .collect()
    }

    /// Returns up to ten contraindication terms starting with `prefix`.
    pub fn contraindication_suggestions(&self, prefix: &str) -> Vec<String> {
        let prefix = text::fold(prefix);
        if char_len(&prefix) < MIN_SUGGEST_LEN {
            return Vec::new();
        }
        prefix_matches(&self.contraindication_terms, &prefix, SUGGESTION_LIMIT)
    }

    /// Returns up to ten drug names starting with `prefix` whose
    /// contraindications mention `term`.
    ///
    /// Names are de-duplicated ignoring case and sorted by their folded form;
    /// the first spelling seen is returned.
    pub fn drug_suggestions_by_contraindication(&self, term: &str, prefix: &str) -> Vec<String> {
        let term = text::fold(term);
        let prefix = text::fold(prefix);
        if char_len(&term) < MIN_SUGGEST_LEN || char_len(&prefix) < MIN_SUGGEST_LEN {
            return Vec::new();
        }

        let mut names: BTreeMap<String, &str> = BTreeMap::new();
        for record in &self.contraindications {
            if record.drug_name_starts_with(&prefix) && record.contraindication_contains(&term) {
                names
                    .entry(text::fold(&record.drug_name))
                    .or_insert_with(|| record.drug_name.trim());
            }
        }

        names
            .into_values()
            .take(SUGGESTION_LIMIT)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drug_types::InteractionRecord;

    fn interaction(a: &str, b: &str, description: &str) -> InteractionRecord {
        InteractionRecord {
            drug_a: a.to_string(),
            drug_b: b.to_string(),
            description: description.to_string(),
        }
    }

    fn detail(drug_type: &str, brand: &str, generic: &str, maker: Option<&str>) -> DrugDetailRecord {
        DrugDetailRecord {
            drug_type: drug_type.to_string(),
            brand_name: Some(brand.to_string()),
            generic_name: Some(generic.to_string()),
            manufacturer: maker.map(str::to_string),
        }
    }

    fn contra(name: &str, contraindications: &str) -> ContraindicationRecord {
        ContraindicationRecord {
            drug_name: name.to_string(),
            contraindications: Some(contraindications.to_string()),
            manufacturer: Some("Acme".to_string()),
            ..Default::default()
        }
    }

    fn make_store() -> DrugStore {
        let interactions = vec![
            interaction("Warfarin", "Aspirin", "Increased bleeding risk"),
            interaction("Ibuprofen", "Aspirin", "Reduced cardioprotection"),
            interaction("Aspirin", "Warfarin", "Duplicate reversed row"),
            interaction("Simvastatin", "Amiodarone", "Myopathy"),
        ];

        let mut details: Vec<DrugDetailRecord> = (1..=25)
            .map(|i| detail("analgesic", &format!("Brand{i:02}"), "Ibuprofen", Some("Pfizer")))
            .collect();
        details.push(detail("analgesic", "Tylenol", "Paracetamol", Some("J&J")));
        details.push(detail("antibiotic", "Amoxil", "Amoxicillin", None));

        let contraindications = vec![
            contra("Ibuprofen", "pregnancy, renal failure"),
            contra("ibuprofen ", "Peptic ulcer; pregnancy"),
            contra("Ibuprofen Lysine", "preterm infants"),
            contra("Aspirin", "Children under 16; bleeding disorders"),
        ];

        DrugStore::from_records(interactions, details, contraindications)
    }

    #[test]
    fn test_search_drug_names() {
        let store = make_store();
        assert_eq!(store.search_drug_names("A"), vec!["amiodarone", "aspirin"]);
        assert_eq!(store.search_drug_names("  war "), vec!["warfarin"]);
        assert!(store.search_drug_names("").is_empty());
        assert!(store.search_drug_names("   ").is_empty());
        assert!(store.search_drug_names("zzz").is_empty());
    }

    #[test]
    fn test_search_drug_names_limit() {
        let interactions: Vec<InteractionRecord> = (0..30)
            .map(|i| interaction(&format!("drug{i:02}"), "other", ""))
            .collect();
        let store = DrugStore::from_records(interactions, vec![], vec![]);

        let results = store.search_drug_names("drug");
        assert_eq!(results.len(), SUGGESTION_LIMIT);
        assert!(results.iter().all(|r| r.starts_with("drug")));
        assert!(results.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_check_interactions_scenario() {
        let store = make_store();

        let found = store.check_interactions(&["warfarin", "aspirin"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Increased bleeding risk");
        assert_eq!(found[0].drugs, ["Warfarin".to_string(), "Aspirin".to_string()]);

        let none = store.check_interactions(&["aspirin", "paracetamol"]).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_check_interactions_symmetric() {
        let store = make_store();
        let forward = store.check_interactions(&["Aspirin", "Ibuprofen"]).unwrap();
        let reverse = store.check_interactions(&["Ibuprofen", "Aspirin"]).unwrap();
        assert_eq!(forward, reverse);
        assert_eq!(forward.len(), 1);
    }

    #[test]
    fn test_check_interactions_all_pairs() {
        let store = make_store();
        let found = store
            .check_interactions(&["Warfarin", "Aspirin", "Ibuprofen"])
            .unwrap();
        let descriptions: Vec<&str> = found.iter().map(|m| m.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Increased bleeding risk", "Reduced cardioprotection"]
        );
    }

    #[test]
    fn test_check_interactions_requires_two() {
        let store = make_store();
        assert!(matches!(
            store.check_interactions(&["aspirin"]),
            Err(QueryError::InvalidRequest(_))
        ));
        assert!(store.check_interactions(&["aspirin", "  "]).is_err());
        assert!(store.check_interactions::<&str>(&[]).is_err());
    }

    #[test]
    fn test_filters_for_type() {
        let store = make_store();

        let filters = store.filters_for_type(" Analgesic ");
        assert_eq!(filters.brand_names.len(), 26);
        assert_eq!(filters.generic_names, vec!["ibuprofen", "paracetamol"]);
        assert_eq!(filters.manufacturers, vec!["j&j", "pfizer"]);
        for list in [&filters.brand_names, &filters.generic_names, &filters.manufacturers] {
            assert!(list.windows(2).all(|w| w[0] < w[1]));
        }

        let antibiotic = store.filters_for_type("antibiotic");
        assert!(antibiotic.manufacturers.is_empty());

        assert!(store.filters_for_type("antiviral").is_empty());
    }

    #[test]
    fn test_drugs_by_type_second_page() {
        let interactions = vec![];
        let details: Vec<DrugDetailRecord> = (1..=25)
            .map(|i| detail("analgesic", &format!("Brand{i:02}"), "Ibuprofen", None))
            .collect();
        let store = DrugStore::from_records(interactions, details, vec![]);

        let query = DrugQuery {
            page: Some(2),
            ..DrugQuery::for_type("analgesic")
        };
        let page = store.drugs_by_type(&query).unwrap();
        assert_eq!(page.drugs.len(), 5);
        assert_eq!(page.total_matches, 25);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.drugs[0].brand_name.as_deref(), Some("Brand21"));
        assert_eq!(page.drugs[4].brand_name.as_deref(), Some("Brand25"));
    }

    #[test]
    fn test_drugs_by_type_pages_cover_everything() {
        let store = make_store();
        let base = DrugQuery::for_type("analgesic");
        let first = store.drugs_by_type(&base).unwrap();

        let mut seen = Vec::new();
        for page in 1..=first.total_pages() {
            let query = DrugQuery {
                page: Some(page as i64),
                ..base.clone()
            };
            seen.extend(store.drugs_by_type(&query).unwrap().drugs);
        }

        assert_eq!(seen.len(), first.total_matches);
        let all: Vec<&DrugDetailRecord> = store.drug_details().filter(|d| d.is_type("analgesic")).collect();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_drugs_by_type_filters() {
        let store = make_store();

        let query = DrugQuery {
            generic_name: Some(" PARACETAMOL".to_string()),
            ..DrugQuery::for_type("analgesic")
        };
        let page = store.drugs_by_type(&query).unwrap();
        assert_eq!(page.total_matches, 1);
        assert_eq!(page.drugs[0].brand_name.as_deref(), Some("Tylenol"));

        let query = DrugQuery {
            generic_name: Some("ibuprofen".to_string()),
            manufacturer: Some("J&J".to_string()),
            ..DrugQuery::for_type("analgesic")
        };
        assert_eq!(store.drugs_by_type(&query).unwrap().total_matches, 0);

        let query = DrugQuery {
            brand_name: Some("".to_string()),
            ..DrugQuery::for_type("antibiotic")
        };
        assert_eq!(store.drugs_by_type(&query).unwrap().total_matches, 1);

        let query = DrugQuery {
            manufacturer: Some("pfizer".to_string()),
            ..DrugQuery::for_type("antibiotic")
        };
        assert_eq!(store.drugs_by_type(&query).unwrap().total_matches, 0);
    }

    #[test]
    fn test_drugs_by_type_page_clamped() {
        let store = make_store();
        for page in [0, -3] {
            let query = DrugQuery {
                page: Some(page),
                ..DrugQuery::for_type("analgesic")
            };
            let result = store.drugs_by_type(&query).unwrap();
            assert_eq!(result.current_page, 1);
            assert_eq!(result.drugs.len(), PAGE_SIZE);
        }

        let beyond = DrugQuery {
            page: Some(99),
            ..DrugQuery::for_type("analgesic")
        };
        assert!(store.drugs_by_type(&beyond).unwrap().drugs.is_empty());
    }

    #[test]
    fn test_drugs_by_type_requires_type() {
        let store = make_store();
        assert!(store.drugs_by_type(&DrugQuery::default()).is_err());
        assert!(store.drugs_by_type(&DrugQuery::for_type("  ")).is_err());
        let unknown = store.drugs_by_type(&DrugQuery::for_type("antiviral")).unwrap();
        assert_eq!(unknown.total_matches, 0);
    }

    #[test]
    fn test_search_contraindications() {
        let store = make_store();

        let found = store.search_contraindications("preg", "ibuprofen");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|r| r.is_drug("ibuprofen")));

        assert!(store.search_contraindications("xy", "ibuprofen").is_empty());
        assert!(store.search_contraindications("pregnancy", "i").is_empty());
        assert!(store.search_contraindications("renal", "ibuprofen lys").is_empty());
        assert!(store.search_contraindications("asthma", "ibuprofen").is_empty());
    }

    #[test]
    fn test_contraindication_suggestions() {
        let store = make_store();
        assert_eq!(
            store.contraindication_suggestions("PRE"),
            vec!["pregnancy", "preterm infants"]
        );
        assert!(store.contraindication_suggestions("p").is_empty());
        assert!(store.contraindication_suggestions("zz").is_empty());
    }

    #[test]
    fn test_drug_suggestions_by_contraindication() {
        let store = make_store();
        assert_eq!(
            store.drug_suggestions_by_contraindication("pre", "ibu"),
            vec!["Ibuprofen", "Ibuprofen Lysine"]
        );
        assert_eq!(
            store.drug_suggestions_by_contraindication("bleeding", "as"),
            vec!["Aspirin"]
        );
        assert!(store.drug_suggestions_by_contraindication("p", "ibu").is_empty());
        assert!(store.drug_suggestions_by_contraindication("pre", "i").is_empty());
    }
}
