use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::CompanyModel, service::CompanyService, types::CompanyInput};
use crate::auth::MessageResponse;
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a company
///
/// POST /companies
/// Returns the stored company with its generated ID
#[instrument(name = "create_company", skip(state, payload))]
pub async fn create_company(
    State(state): State<AppState>,
    payload: Result<Json<CompanyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyModel>), AppError> {
    let Json(input) = payload?;
    info!(name = %input.name, "Creating company");

    let service = CompanyService::new(Arc::clone(&state.company_repository));
    let company = service.create(input).await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// HTTP handler for updating a company
///
/// PATCH /companies/:id
/// Every mutable field is replaced by the body's value
#[instrument(name = "patch_company", skip(state, payload))]
pub async fn patch_company(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    payload: Result<Json<CompanyInput>, JsonRejection>,
) -> Result<Json<CompanyModel>, AppError> {
    let Json(input) = payload?;
    info!(company_id = %company_id, "Patching company");

    let service = CompanyService::new(Arc::clone(&state.company_repository));
    let company = service.patch_by_id(&company_id, input).await?;

    Ok(Json(company))
}

/// HTTP handler for deleting a company
///
/// DELETE /companies/:id
#[instrument(name = "delete_company", skip(state))]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    info!(company_id = %company_id, "Deleting company");

    let service = CompanyService::new(Arc::clone(&state.company_repository));
    service.delete_by_id(&company_id).await?;

    Ok(Json(MessageResponse::new("Company deleted successfully")))
}

/// HTTP handler for fetching a company
///
/// GET /companies/:id
#[instrument(name = "get_company", skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanyModel>, AppError> {
    let service = CompanyService::new(Arc::clone(&state.company_repository));
    let company = service.get_by_id(&company_id).await?;

    Ok(Json(company))
}
