use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::restaurant::{validate_category, validate_image, validate_item_name, validate_name};

use crate::errors::ServiceError;

/// One dish on a restaurant's menu. Only addressable through its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub image: String,
    pub description: String,
}

/// Restaurant with its embedded menu (business view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub menu: Vec<MenuItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// Fresh restaurant owned by `owner_id` with an empty menu.
    pub fn new(owner_id: Uuid, input: NewRestaurant) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: input.name,
            image: input.image,
            description: input.description,
            category: input.category,
            menu: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Item matching (restaurant id, owner id, item id).
    pub fn find_item(&self, item_id: Uuid, owner_id: Uuid) -> Option<&MenuItem> {
        self.menu
            .iter()
            .find(|i| i.id == item_id && i.owner_id == owner_id && i.restaurant_id == self.id)
    }

    /// Append a new item with a fresh id and return that id.
    pub fn push_item(&mut self, owner_id: Uuid, input: MenuItemInput) -> Uuid {
        let id = Uuid::new_v4();
        self.menu.push(MenuItem {
            id,
            owner_id,
            restaurant_id: self.id,
            name: input.name,
            image: input.image,
            description: input.description,
        });
        id
    }

    /// Drop the item with `item_id`; returns whether anything was removed.
    pub fn remove_item(&mut self, item_id: Uuid) -> bool {
        let before = self.menu.len();
        self.menu.retain(|i| i.id != item_id);
        self.menu.len() != before
    }
}

/// Fields required to create a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub image: String,
    pub description: String,
    pub category: String,
}

impl NewRestaurant {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_name(&self.name)?;
        validate_image(&self.image)?;
        validate_category(&self.category)?;
        Ok(())
    }
}

/// Partial update: `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl RestaurantPatch {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name { validate_name(name)?; }
        if let Some(image) = &self.image { validate_image(image)?; }
        if let Some(category) = &self.category { validate_category(category)?; }
        Ok(())
    }

    pub fn apply(self, restaurant: &mut Restaurant) {
        if let Some(name) = self.name { restaurant.name = name; }
        if let Some(image) = self.image { restaurant.image = image; }
        if let Some(description) = self.description { restaurant.description = description; }
        if let Some(category) = self.category { restaurant.category = category; }
    }
}

/// Values for a new or replacement menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemInput {
    pub name: String,
    pub image: String,
    pub description: String,
}

impl MenuItemInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_item_name(&self.name)?;
        validate_image(&self.image)?;
        Ok(())
    }
}

/// Keyword filter for listings. An empty keyword is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantQuery {
    keyword: Option<String>,
}

impl RestaurantQuery {
    pub fn new(keyword: Option<&str>) -> Self {
        Self { keyword: keyword.filter(|k| !k.is_empty()).map(str::to_string) }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Case-insensitive substring match on name, description or category.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let Some(kw) = &self.keyword else { return true };
        let kw = kw.to_lowercase();
        [&restaurant.name, &restaurant.description, &restaurant.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&kw))
    }
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantPage {
    pub items: Vec<Restaurant>,
    pub total_pages: u64,
}
