use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDoc {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub image: String,
    pub description: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDoc {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub menu: Vec<MenuItemDoc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct RestaurantListDoc {
    pub restaurants: Vec<RestaurantDoc>,
    pub pages: u64,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::restaurants::list,
        crate::routes::restaurants::get,
        crate::routes::restaurants::create,
        crate::routes::restaurants::edit,
        crate::routes::restaurants::delete,
        crate::routes::items::add,
        crate::routes::items::edit,
        crate::routes::items::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            MenuItemDoc,
            RestaurantDoc,
            RestaurantListDoc,
            crate::routes::restaurants::CreateRestaurantBody,
            crate::routes::restaurants::EditRestaurantBody,
            crate::routes::items::ItemBody,
            crate::routes::items::DeleteItemBody,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "restaurants"),
        (name = "items")
    )
)]
pub struct ApiDoc;
