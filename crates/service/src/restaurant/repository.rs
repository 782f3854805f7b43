use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Restaurant, RestaurantQuery};
use crate::errors::ServiceError;

/// Persistence for restaurants. The menu travels with its restaurant: there
/// is no per-item storage, so item changes go through `save`.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ServiceError>;
    /// Exact, case-sensitive name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>, ServiceError>;
    async fn count(&self, query: &RestaurantQuery) -> Result<u64, ServiceError>;
    /// Matching restaurants in creation order.
    async fn find_page(&self, query: &RestaurantQuery, limit: u64, offset: u64) -> Result<Vec<Restaurant>, ServiceError>;
    /// Insert and read back; `None` if the stored record cannot be found afterwards.
    async fn insert(&self, restaurant: Restaurant) -> Result<Option<Restaurant>, ServiceError>;
    /// Overwrite the whole record, menu included. Last write wins.
    async fn save(&self, restaurant: &Restaurant) -> Result<Restaurant, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests, benches and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use tokio::sync::RwLock;

    use crate::restaurant::RESTAURANT_NOT_FOUND;

    #[derive(Default)]
    pub struct InMemoryRestaurantRepository {
        rows: RwLock<Vec<Restaurant>>, // insertion order == creation order
    }

    impl InMemoryRestaurantRepository {
        pub fn new() -> Self { Self::default() }
    }

    #[async_trait]
    impl RestaurantRepository for InMemoryRestaurantRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ServiceError> {
            let rows = self.rows.read().await;
            Ok(rows.iter().find(|r| r.id == id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>, ServiceError> {
            let rows = self.rows.read().await;
            Ok(rows.iter().find(|r| r.name == name).cloned())
        }

        async fn count(&self, query: &RestaurantQuery) -> Result<u64, ServiceError> {
            let rows = self.rows.read().await;
            Ok(rows.iter().filter(|r| query.matches(r)).count() as u64)
        }

        async fn find_page(&self, query: &RestaurantQuery, limit: u64, offset: u64) -> Result<Vec<Restaurant>, ServiceError> {
            let rows = self.rows.read().await;
            let skip = usize::try_from(offset).unwrap_or(usize::MAX);
            let take = usize::try_from(limit).unwrap_or(usize::MAX);
            Ok(rows.iter().filter(|r| query.matches(r)).skip(skip).take(take).cloned().collect())
        }

        async fn insert(&self, restaurant: Restaurant) -> Result<Option<Restaurant>, ServiceError> {
            let mut rows = self.rows.write().await;
            rows.push(restaurant.clone());
            Ok(Some(restaurant))
        }

        async fn save(&self, restaurant: &Restaurant) -> Result<Restaurant, ServiceError> {
            let mut rows = self.rows.write().await;
            let slot = rows
                .iter_mut()
                .find(|r| r.id == restaurant.id)
                .ok_or_else(|| ServiceError::not_found(RESTAURANT_NOT_FOUND))?;
            *slot = Restaurant { updated_at: Utc::now(), ..restaurant.clone() };
            Ok(slot.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = self.rows.write().await;
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() != before)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::restaurant::domain::NewRestaurant;

        fn restaurant(name: &str) -> Restaurant {
            Restaurant::new(
                Uuid::new_v4(),
                NewRestaurant {
                    name: name.into(),
                    image: "http://x.com/a.png".into(),
                    description: "d".into(),
                    category: "food".into(),
                },
            )
        }

        #[tokio::test]
        async fn page_window_respects_limit_and_offset() -> Result<(), ServiceError> {
            let repo = InMemoryRestaurantRepository::new();
            for i in 0..5 {
                repo.insert(restaurant(&format!("Place {i}"))).await?;
            }
            let all = RestaurantQuery::default();
            let page = repo.find_page(&all, 2, 2).await?;
            let names: Vec<_> = page.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, ["Place 2", "Place 3"]);
            assert_eq!(repo.find_page(&all, 2, 4).await?.len(), 1);
            assert!(repo.find_page(&all, 2, 10).await?.is_empty());
            Ok(())
        }

        #[tokio::test]
        async fn save_of_deleted_record_is_not_found() -> Result<(), ServiceError> {
            let repo = InMemoryRestaurantRepository::new();
            let r = repo.insert(restaurant("Tasty Place")).await?.expect("inserted");
            assert!(repo.delete(r.id).await?);
            assert!(!repo.delete(r.id).await?);
            let err = repo.save(&r).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound(_)));
            assert_eq!(repo.count(&RestaurantQuery::default()).await?, 0);
            Ok(())
        }

        #[tokio::test]
        async fn name_lookup_is_case_sensitive() -> Result<(), ServiceError> {
            let repo = InMemoryRestaurantRepository::new();
            repo.insert(restaurant("Tasty Place")).await?;
            assert!(repo.find_by_name("Tasty Place").await?.is_some());
            assert!(repo.find_by_name("tasty place").await?.is_none());
            Ok(())
        }
    }
}
