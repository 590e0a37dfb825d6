//! Filter API endpoints: focuses, industries, regions.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Focus, Industry, Region, Status};
use crate::store::collections;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FocusListResponse {
    pub focuses: Vec<Focus>,
}

#[derive(Debug, Serialize)]
pub struct IndustryListResponse {
    pub industries: Vec<Industry>,
}

#[derive(Debug, Serialize)]
pub struct RegionListResponse {
    pub regions: Vec<Region>,
}

/// GET /api/v1/filters/focuses - List approved focuses.
pub async fn list_focuses(State(state): State<AppState>) -> Result<Json<FocusListResponse>, AppError> {
    let focuses = state
        .directory
        .list_filters(collections::FOCUSES, Status::Approved, Focus::from_document)
        .await?;
    Ok(Json(FocusListResponse { focuses }))
}

/// GET /api/v1/filters/industries - List approved industries.
pub async fn list_industries(
    State(state): State<AppState>,
) -> Result<Json<IndustryListResponse>, AppError> {
    let industries = state
        .directory
        .list_filters(
            collections::INDUSTRIES,
            Status::Approved,
            Industry::from_document,
        )
        .await?;
    Ok(Json(IndustryListResponse { industries }))
}

/// GET /api/v1/filters/regions - List approved regions.
pub async fn list_regions(
    State(state): State<AppState>,
) -> Result<Json<RegionListResponse>, AppError> {
    let regions = state
        .directory
        .list_filters(collections::REGIONS, Status::Approved, Region::from_document)
        .await?;
    Ok(Json(RegionListResponse { regions }))
}
