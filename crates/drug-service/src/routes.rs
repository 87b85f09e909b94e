//! HTTP handlers.
//!
//! Handlers only translate between query strings, the store, and JSON; all
//! matching rules live in `drug_loader::query`.

use axum::{
    extract::{Query, State},
    Json,
};
use drug_loader::DrugQuery;
use tracing::debug;

use crate::api::{
    ContraSearchParams, ContraSuggestParams, ContraindicationResponse, DataCounts,
    DrugsByTypeParams, DrugsByTypeResponse, FiltersResponse, HealthResponse,
    InteractionParams, InteractionResponse, TermParams, TypeParams,
};
use crate::error::AppError;
use crate::state::AppState;

fn param(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, data_loaded) = match state.store() {
        Some(store) => ("ok", DataCounts::from(store.stats())),
        None if state.load_error().is_some() => ("error", DataCounts::default()),
        None => ("loading", DataCounts::default()),
    };

    Json(HealthResponse {
        status,
        is_loading: state.is_loading(),
        data_loaded,
        error: state.load_error().map(|e| e.to_string()),
    })
}

pub async fn search_drug_handler(
    State(state): State<AppState>,
    Query(params): Query<TermParams>,
) -> Result<Json<Vec<String>>, AppError> {
    let store = state.ready_store()?;
    Ok(Json(store.search_drug_names(param(&params.term))))
}

pub async fn check_interactions_handler(
    State(state): State<AppState>,
    Query(params): Query<InteractionParams>,
) -> Result<Json<Vec<InteractionResponse>>, AppError> {
    let store = state.ready_store()?;
    let drugs = params.drug_list();
    if drugs.len() < 2 {
        return Err(AppError::InvalidRequest(
            "Please provide at least two drugs separated by commas".to_string(),
        ));
    }

    let matches = store.check_interactions(drugs.as_slice())?;
    Ok(Json(matches.into_iter().map(InteractionResponse::from).collect()))
}

pub async fn drug_filters_handler(
    State(state): State<AppState>,
    Query(params): Query<TypeParams>,
) -> Result<Json<FiltersResponse>, AppError> {
    let store = state.ready_store()?;
    Ok(Json(store.filters_for_type(param(&params.drug_type)).into()))
}

pub async fn drugs_by_type_handler(
    State(state): State<AppState>,
    Query(params): Query<DrugsByTypeParams>,
) -> Result<Json<DrugsByTypeResponse>, AppError> {
    let store = state.ready_store()?;
    let query = DrugQuery {
        page: params.page(),
        drug_type: params.drug_type,
        brand_name: params.brand_name,
        generic_name: params.generic_name,
        manufacturer: params.manufacturer,
    };

    let page = store.drugs_by_type(&query)?;
    debug!(
        total = page.total_matches,
        page = page.current_page,
        "drugs by type"
    );
    Ok(Json(page.into()))
}

pub async fn search_contraindications_handler(
    State(state): State<AppState>,
    Query(params): Query<ContraSearchParams>,
) -> Result<Json<Vec<ContraindicationResponse>>, AppError> {
    let store = state.ready_store()?;
    let records = store.search_contraindications(param(&params.contra), param(&params.drug));
    Ok(Json(
        records.into_iter().map(ContraindicationResponse::from).collect(),
    ))
}

pub async fn contraindication_suggestions_handler(
    State(state): State<AppState>,
    Query(params): Query<TermParams>,
) -> Result<Json<Vec<String>>, AppError> {
    let store = state.ready_store()?;
    Ok(Json(store.contraindication_suggestions(param(&params.term))))
}

pub async fn drug_suggestions_by_contra_handler(
    State(state): State<AppState>,
    Query(params): Query<ContraSuggestParams>,
) -> Result<Json<Vec<String>>, AppError> {
    let store = state.ready_store()?;
    Ok(Json(store.drug_suggestions_by_contraindication(
        param(&params.contra),
        param(&params.term),
    )))
}
