use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use service::restaurant::{MenuItemInput, Restaurant, ITEM_NOT_FOUND};

use super::auth::{Authenticated, ServerState};
use super::extract::{parse_id, ValidJson};
use crate::errors::JsonApiError;
use crate::metrics::MENU_ITEM_MUTATIONS_TOTAL;

/// Item values plus the parent restaurant id.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemBody {
    #[serde(rename = "restaurantID", alias = "restaurantId")]
    pub restaurant_id: Uuid,
    pub name: String,
    pub image: String,
    pub description: String,
}

impl ItemBody {
    fn split(self) -> (Uuid, MenuItemInput) {
        (self.restaurant_id, MenuItemInput { name: self.name, image: self.image, description: self.description })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteItemBody {
    #[serde(rename = "restaurantID", alias = "restaurantId")]
    pub restaurant_id: Uuid,
}

#[utoipa::path(post, path = "/data/items", tag = "items", request_body = ItemBody,
    security(("bearer" = [])),
    responses((status = 200, description = "Parent restaurant with the new item", body = crate::openapi::RestaurantDoc),
              (status = 400, description = "Invalid input", body = crate::openapi::ErrorDoc),
              (status = 401, description = "Not authorized", body = crate::openapi::ErrorDoc),
              (status = 404, description = "Restaurant not found", body = crate::openapi::ErrorDoc)))]
pub async fn add(
    State(state): State<ServerState>,
    Authenticated(user): Authenticated,
    ValidJson(body): ValidJson<ItemBody>,
) -> Result<Json<Restaurant>, JsonApiError> {
    let (restaurant_id, input) = body.split();
    let restaurant = state.restaurants.add_item(user.id, restaurant_id, input).await?;
    MENU_ITEM_MUTATIONS_TOTAL.with_label_values(&["add"]).inc();
    Ok(Json(restaurant))
}

#[utoipa::path(put, path = "/data/items/{id}", tag = "items", request_body = ItemBody,
    params(("id" = String, Path, description = "Menu item id")),
    security(("bearer" = [])),
    responses((status = 200, description = "Parent restaurant; the item gets a new id", body = crate::openapi::RestaurantDoc),
              (status = 400, description = "Invalid input", body = crate::openapi::ErrorDoc),
              (status = 401, description = "Not authorized", body = crate::openapi::ErrorDoc),
              (status = 404, description = "Restaurant or item not found", body = crate::openapi::ErrorDoc)))]
pub async fn edit(
    State(state): State<ServerState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ItemBody>,
) -> Result<Json<Restaurant>, JsonApiError> {
    let item_id = parse_id(&id, ITEM_NOT_FOUND)?;
    let (restaurant_id, input) = body.split();
    let restaurant = state.restaurants.edit_item(user.id, item_id, restaurant_id, input).await?;
    MENU_ITEM_MUTATIONS_TOTAL.with_label_values(&["edit"]).inc();
    Ok(Json(restaurant))
}

#[utoipa::path(delete, path = "/data/items/{id}", tag = "items", request_body = DeleteItemBody,
    params(("id" = String, Path, description = "Menu item id")),
    security(("bearer" = [])),
    responses((status = 200, description = "Parent restaurant without the item", body = crate::openapi::RestaurantDoc),
              (status = 400, description = "Missing restaurantID", body = crate::openapi::ErrorDoc),
              (status = 401, description = "Not authorized", body = crate::openapi::ErrorDoc),
              (status = 404, description = "Restaurant or item not found", body = crate::openapi::ErrorDoc)))]
pub async fn delete(
    State(state): State<ServerState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<DeleteItemBody>,
) -> Result<Json<Restaurant>, JsonApiError> {
    let item_id = parse_id(&id, ITEM_NOT_FOUND)?;
    let restaurant = state.restaurants.delete_item(user.id, item_id, body.restaurant_id).await?;
    MENU_ITEM_MUTATIONS_TOTAL.with_label_values(&["delete"]).inc();
    Ok(Json(restaurant))
}
