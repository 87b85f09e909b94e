//! Request parameters and JSON response bodies.

use drug_loader::{DrugPage, InteractionMatch, LoadStats, TypeFilters};
use drug_types::{ContraindicationRecord, DrugDetailRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct TermParams {
    pub term: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InteractionParams {
    pub drugs: Option<String>,
}

impl InteractionParams {
    /// Splits the comma separated `drugs` parameter, dropping blank entries.
    pub fn drug_list(&self) -> Vec<&str> {
        self.drugs
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TypeParams {
    #[serde(rename = "type")]
    pub drug_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugsByTypeParams {
    #[serde(rename = "type")]
    pub drug_type: Option<String>,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub manufacturer: Option<String>,
    pub page: Option<String>,
}

impl DrugsByTypeParams {
    /// Parses `page`, falling back to the first page on garbage.
    pub fn page(&self) -> Option<i64> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContraSearchParams {
    pub contra: Option<String>,
    pub drug: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContraSuggestParams {
    pub contra: Option<String>,
    pub term: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub is_loading: bool,
    pub data_loaded: DataCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCounts {
    pub interactions: usize,
    pub drug_details: usize,
    pub contraindications: usize,
    pub unique_drug_names: usize,
    pub drug_types: usize,
    pub contraindication_terms: usize,
}

impl From<&LoadStats> for DataCounts {
    fn from(stats: &LoadStats) -> Self {
        Self {
            interactions: stats.interactions,
            drug_details: stats.drug_details,
            contraindications: stats.contraindications,
            unique_drug_names: stats.unique_drug_names,
            drug_types: stats.drug_types,
            contraindication_terms: stats.contraindication_terms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub drugs: [String; 2],
    pub description: String,
}

impl From<InteractionMatch> for InteractionResponse {
    fn from(m: InteractionMatch) -> Self {
        Self {
            drugs: m.drugs,
            description: m.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    pub brand_names: Vec<String>,
    pub generic_names: Vec<String>,
    pub manufacturers: Vec<String>,
}

impl From<TypeFilters> for FiltersResponse {
    fn from(filters: TypeFilters) -> Self {
        Self {
            brand_names: filters.brand_names,
            generic_names: filters.generic_names,
            manufacturers: filters.manufacturers,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugResponse {
    #[serde(rename = "type")]
    pub drug_type: String,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub manufacturer: Option<String>,
}

impl From<&DrugDetailRecord> for DrugResponse {
    fn from(record: &DrugDetailRecord) -> Self {
        Self {
            drug_type: record.drug_type.clone(),
            brand_name: record.brand_name.clone(),
            generic_name: record.generic_name.clone(),
            manufacturer: record.manufacturer.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugsByTypeResponse {
    pub drugs: Vec<DrugResponse>,
    pub total_matches: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl From<DrugPage<'_>> for DrugsByTypeResponse {
    fn from(page: DrugPage<'_>) -> Self {
        Self {
            drugs: page.drugs.into_iter().map(DrugResponse::from).collect(),
            total_matches: page.total_matches,
            current_page: page.current_page,
            page_size: page.page_size,
        }
    }
}

/// Public fields of a contraindication record; the contraindication text
/// itself is not echoed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContraindicationResponse {
    pub drug_name: String,
    pub manufacturer: Option<String>,
    pub indications: Option<String>,
    pub side_effects: Option<String>,
    pub warnings: Option<String>,
}

impl From<&ContraindicationRecord> for ContraindicationResponse {
    fn from(record: &ContraindicationRecord) -> Self {
        Self {
            drug_name: record.drug_name.clone(),
            manufacturer: record.manufacturer.clone(),
            indications: record.indications.clone(),
            side_effects: record.side_effects.clone(),
            warnings: record.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drug_list_split() {
        let params = InteractionParams {
            drugs: Some(" Warfarin, aspirin ,,".to_string()),
        };
        assert_eq!(params.drug_list(), vec!["Warfarin", "aspirin"]);
        assert!(InteractionParams::default().drug_list().is_empty());
    }

    #[test]
    fn test_page_parse() {
        let mut params = DrugsByTypeParams {
            page: Some("2".to_string()),
            ..Default::default()
        };
        assert_eq!(params.page(), Some(2));
        params.page = Some("two".to_string());
        assert_eq!(params.page(), None);
    }

    #[test]
    fn test_drug_response_shape() {
        let record = DrugDetailRecord {
            drug_type: "analgesic".to_string(),
            brand_name: Some("Advil".to_string()),
            generic_name: None,
            manufacturer: None,
        };
        let json = serde_json::to_value(DrugResponse::from(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "analgesic",
                "brandName": "Advil",
                "genericName": null,
                "manufacturer": null
            })
        );
    }
}
