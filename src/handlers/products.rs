use std::fmt;
use std::str::FromStr;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    extract::{AppJson, AppPath, AppQuery},
    models::product::{NewProduct, ProductPatch, ProductResponse},
    repositories::product::ProductFilter,
    services::products as product_service,
    state::AppState,
    validation::product as product_validation,
};

/// The query parameters accepted by the product listing. Empty values
/// count as absent, so `?search=&minPrice=` lists everything.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<f64>,
}

impl From<ProductListQuery> for ProductFilter {
    fn from(query: ProductListQuery) -> Self {
        ProductFilter {
            category: query.category,
            search: query.search,
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

/// Maps an empty query value to `None`, otherwise parses it with
/// `FromStr`.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

/// The response payload for a product create or update.
#[derive(Serialize)]
pub struct ProductMutationResponse {
    pub message: &'static str,
    pub product: ProductResponse,
}

/// The response payload for a product deletion.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Lists active products, newest first, narrowed by the given filters.
/// All filters combine conjunctively.
#[axum::debug_handler]
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProductListQuery>,
) -> Result<Response> {
    let filter = ProductFilter::from(query);
    let products = product_service::list_products(&state, &filter).await?;

    Ok((StatusCode::OK, Json(products)).into_response())
}

/// Gets a single product by id with its category embedded. Inactive
/// products are still reachable here.
#[axum::debug_handler]
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<Uuid>,
) -> Result<Response> {
    let product = product_service::get_product(&state, product_id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    Ok((StatusCode::OK, Json(product)).into_response())
}

/// Creates a new product.
#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewProduct>,
) -> Result<Response> {
    product_validation::validate_new_product(&payload)?;

    let product = product_service::create_product(&state, payload).await?;

    let response = ProductMutationResponse {
        message: "Product created",
        product,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Updates the provided fields of a product. Fields left out of the
/// payload keep their stored values; nullable fields sent as `null`
/// are cleared.
#[axum::debug_handler]
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<Uuid>,
    AppJson(payload): AppJson<ProductPatch>,
) -> Result<Response> {
    product_validation::validate_product_patch(&payload)?;

    let product = product_service::update_product(&state, product_id, payload)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    let response = ProductMutationResponse {
        message: "Product updated",
        product,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Deletes a product permanently. Use an `isActive` update for a soft
/// takedown instead.
#[axum::debug_handler]
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<Uuid>,
) -> Result<Response> {
    let deleted = product_service::delete_product(&state, product_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product"));
    }

    let response = MessageResponse {
        message: "Product deleted",
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
