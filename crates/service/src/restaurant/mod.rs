//! Restaurants and their embedded menus.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{MenuItem, MenuItemInput, NewRestaurant, Restaurant, RestaurantPage, RestaurantPatch, RestaurantQuery};
pub use repository::RestaurantRepository;
pub use service::RestaurantService;

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";
pub const NO_RESTAURANTS: &str = "No restaurants to show";
pub const ITEM_NOT_FOUND: &str = "Item id does not exist";
pub const NAME_TAKEN: &str = "Restaurant name already exists";
pub const NOT_CREATED: &str = "Restaurant could not be created.";
