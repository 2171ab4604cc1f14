use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    extract::{AppJson, AppPath},
    models::category::{Category, CategoryPatch, NewCategory},
    services::categories as category_service,
    state::AppState,
    validation::category as category_validation,
};

/// The response payload for a category create or update.
#[derive(Serialize)]
pub struct CategoryResponse {
    pub message: &'static str,
    pub category: Category,
}

/// The response payload for a category deletion.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Lists every category, newest first.
#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<Response> {
    let categories = category_service::list_categories(&state).await?;
    Ok((StatusCode::OK, Json(categories)).into_response())
}

/// Gets a single category by id.
#[axum::debug_handler]
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<Uuid>,
) -> Result<Response> {
    let category = category_service::get_category(&state, category_id)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    Ok((StatusCode::OK, Json(category)).into_response())
}

/// Creates a new category.
#[axum::debug_handler]
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewCategory>,
) -> Result<Response> {
    category_validation::validate_new_category(&payload)?;

    let category = category_service::create_category(&state, payload).await?;

    let response = CategoryResponse {
        message: "Category created",
        category,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Updates the provided fields of a category. Fields left out of the
/// payload keep their stored values.
#[axum::debug_handler]
pub async fn update_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CategoryPatch>,
) -> Result<Response> {
    category_validation::validate_category_patch(&payload)?;

    let category = category_service::update_category(&state, category_id, payload)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    let response = CategoryResponse {
        message: "Category updated",
        category,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Deletes a category. Products keep their stored reference; their
/// embedded category resolves to null from then on.
#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<AppState>,
    AppPath(category_id): AppPath<Uuid>,
) -> Result<Response> {
    let deleted = category_service::delete_category(&state, category_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Category"));
    }

    let response = MessageResponse {
        message: "Category deleted",
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
