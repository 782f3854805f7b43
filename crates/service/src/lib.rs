//! Service layer for the food data API.
//! - Restaurant search/pagination, restaurant CRUD and embedded menu-item management.
//! - Persistence behind the `RestaurantRepository` trait (SeaORM or in-memory).
//! - Bearer token verification for mutating routes.

pub mod errors;
pub mod auth;
pub mod pagination;
pub mod restaurant;
#[cfg(test)]
pub mod test_support;
