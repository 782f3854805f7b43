use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use common::types::Empty;
use service::pagination::parse_page_no;
use service::restaurant::{NewRestaurant, Restaurant, RestaurantPatch, RESTAURANT_NOT_FOUND};

use super::auth::{Authenticated, ServerState};
use super::extract::{parse_id, ValidJson, ValidQuery};
use crate::errors::JsonApiError;
use crate::metrics::RESTAURANTS_CREATED_TOTAL;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number; missing or invalid values mean page 1
    pub page_no: Option<String>,
    /// Case-insensitive match on name, description or category
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub restaurants: Vec<Restaurant>,
    pub pages: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantBody {
    pub name: String,
    pub image: String,
    pub description: String,
    pub category: String,
}

impl From<CreateRestaurantBody> for NewRestaurant {
    fn from(b: CreateRestaurantBody) -> Self {
        NewRestaurant { name: b.name, image: b.image, description: b.description, category: b.category }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EditRestaurantBody {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<EditRestaurantBody> for RestaurantPatch {
    fn from(b: EditRestaurantBody) -> Self {
        RestaurantPatch { name: b.name, image: b.image, description: b.description, category: b.category }
    }
}

#[utoipa::path(get, path = "/data/restaurants", tag = "restaurants", params(ListQuery),
    responses((status = 200, description = "One page of restaurants", body = crate::openapi::RestaurantListDoc),
              (status = 404, description = "No restaurants to show", body = crate::openapi::ErrorDoc)))]
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(q): ValidQuery<ListQuery>,
) -> Result<Json<ListResponse>, JsonApiError> {
    let page_no = parse_page_no(q.page_no.as_deref());
    let page = state.restaurants.list(q.keyword.as_deref(), page_no).await?;
    Ok(Json(ListResponse { restaurants: page.items, pages: page.total_pages }))
}

#[utoipa::path(get, path = "/data/restaurants/{id}", tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    responses((status = 200, description = "Restaurant", body = crate::openapi::RestaurantDoc),
              (status = 404, description = "Restaurant not found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Restaurant>, JsonApiError> {
    let id = parse_id(&id, RESTAURANT_NOT_FOUND)?;
    Ok(Json(state.restaurants.get(id).await?))
}

#[utoipa::path(post, path = "/data/restaurants", tag = "restaurants", request_body = CreateRestaurantBody,
    security(("bearer" = [])),
    responses((status = 200, description = "Created", body = crate::openapi::RestaurantDoc),
              (status = 400, description = "Invalid input", body = crate::openapi::ErrorDoc),
              (status = 401, description = "Not authorized", body = crate::openapi::ErrorDoc),
              (status = 409, description = "Restaurant name already exists", body = crate::openapi::ErrorDoc)))]
pub async fn create(
    State(state): State<ServerState>,
    Authenticated(user): Authenticated,
    ValidJson(body): ValidJson<CreateRestaurantBody>,
) -> Result<Json<Restaurant>, JsonApiError> {
    let created = state.restaurants.create(user.id, body.into()).await?;
    RESTAURANTS_CREATED_TOTAL.inc();
    Ok(Json(created))
}

#[utoipa::path(put, path = "/data/restaurants/{id}", tag = "restaurants", request_body = EditRestaurantBody,
    params(("id" = String, Path, description = "Restaurant id")),
    security(("bearer" = [])),
    responses((status = 200, description = "Updated", body = crate::openapi::RestaurantDoc),
              (status = 400, description = "Invalid input", body = crate::openapi::ErrorDoc),
              (status = 401, description = "Not authorized", body = crate::openapi::ErrorDoc),
              (status = 404, description = "Restaurant not found", body = crate::openapi::ErrorDoc)))]
pub async fn edit(
    State(state): State<ServerState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<EditRestaurantBody>,
) -> Result<Json<Restaurant>, JsonApiError> {
    let id = parse_id(&id, RESTAURANT_NOT_FOUND)?;
    Ok(Json(state.restaurants.edit(user.id, id, body.into()).await?))
}

#[utoipa::path(delete, path = "/data/restaurants/{id}", tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    security(("bearer" = [])),
    responses((status = 200, description = "Deleted; empty object"),
              (status = 401, description = "Not authorized", body = crate::openapi::ErrorDoc),
              (status = 404, description = "Restaurant not found", body = crate::openapi::ErrorDoc)))]
pub async fn delete(
    State(state): State<ServerState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<Empty>, JsonApiError> {
    let id = parse_id(&id, RESTAURANT_NOT_FOUND)?;
    state.restaurants.delete(user.id, id).await?;
    info!(restaurant_id = %id, "delete restaurant");
    Ok(Json(Empty {}))
}
