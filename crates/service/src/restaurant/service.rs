use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{MenuItemInput, NewRestaurant, Restaurant, RestaurantPage, RestaurantPatch, RestaurantQuery};
use super::repository::RestaurantRepository;
use super::{ITEM_NOT_FOUND, NAME_TAKEN, NOT_CREATED, NO_RESTAURANTS, RESTAURANT_NOT_FOUND};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Restaurant and menu-item business rules, independent of the web framework.
///
/// Ownership failures are reported exactly like missing records
/// ("Restaurant not found") so callers cannot discover other owners' ids.
///
/// Existence checks and the writes that follow are separate repository
/// calls: two concurrent creates with the same name can both succeed, and
/// concurrent item changes on one restaurant overwrite each other.
pub struct RestaurantService {
    repo: Arc<dyn RestaurantRepository>,
    page_size: u64,
}

impl RestaurantService {
    pub fn new(repo: Arc<dyn RestaurantRepository>, page_size: u64) -> Self {
        Self { repo, page_size: Pagination::new(1, page_size).per_page }
    }

    /// One page of restaurants matching `keyword`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::restaurant::{RestaurantService, repository::mock::InMemoryRestaurantRepository};
    /// use service::restaurant::domain::NewRestaurant;
    ///
    /// let svc = RestaurantService::new(Arc::new(InMemoryRestaurantRepository::new()), 6);
    /// let owner = uuid::Uuid::new_v4();
    /// let input = NewRestaurant { name: "Tasty Place".into(), image: "http://x.com/a.png".into(), description: "d".into(), category: "food".into() };
    /// tokio_test::block_on(svc.create(owner, input)).unwrap();
    /// let page = tokio_test::block_on(svc.list(Some("tasty"), 1)).unwrap();
    /// assert_eq!(page.items.len(), 1);
    /// assert_eq!(page.total_pages, 1);
    /// ```
    #[instrument(skip(self))]
    pub async fn list(&self, keyword: Option<&str>, page_no: u64) -> Result<RestaurantPage, ServiceError> {
        let query = RestaurantQuery::new(keyword);
        let pagination = Pagination::new(page_no, self.page_size);

        let count = self.repo.count(&query).await?;
        if count == 0 {
            return Err(ServiceError::not_found(NO_RESTAURANTS));
        }
        let total_pages = pagination.total_pages(count);
        if pagination.page > total_pages {
            debug!(page = pagination.page, total_pages, "page out of range");
            return Err(ServiceError::not_found(NO_RESTAURANTS));
        }

        let items = self.repo.find_page(&query, pagination.per_page, pagination.offset()).await?;
        Ok(RestaurantPage { items, total_pages })
    }

    pub async fn get(&self, id: Uuid) -> Result<Restaurant, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found(RESTAURANT_NOT_FOUND))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, owner_id: Uuid, input: NewRestaurant) -> Result<Restaurant, ServiceError> {
        input.validate()?;
        if self.repo.find_by_name(&input.name).await?.is_some() {
            return Err(ServiceError::Conflict(NAME_TAKEN.into()));
        }
        let created = self
            .repo
            .insert(Restaurant::new(owner_id, input))
            .await?
            .ok_or_else(|| ServiceError::Internal(NOT_CREATED.into()))?;
        info!(restaurant_id = %created.id, owner_id = %owner_id, "restaurant_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn edit(&self, owner_id: Uuid, id: Uuid, patch: RestaurantPatch) -> Result<Restaurant, ServiceError> {
        patch.validate()?;
        let mut restaurant = self.owned(owner_id, id).await?;
        patch.apply(&mut restaurant);
        let saved = self.repo.save(&restaurant).await?;
        info!(restaurant_id = %id, "restaurant_updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
        let restaurant = self.owned(owner_id, id).await?;
        if !self.repo.delete(restaurant.id).await? {
            return Err(ServiceError::not_found(RESTAURANT_NOT_FOUND));
        }
        info!(restaurant_id = %id, "restaurant_deleted");
        Ok(())
    }

    /// Append a menu item; returns the updated restaurant.
    #[instrument(skip(self, input))]
    pub async fn add_item(&self, owner_id: Uuid, restaurant_id: Uuid, input: MenuItemInput) -> Result<Restaurant, ServiceError> {
        input.validate()?;
        let mut restaurant = self.owned(owner_id, restaurant_id).await?;
        let item_id = restaurant.push_item(owner_id, input);
        let saved = self.repo.save(&restaurant).await?;
        info!(%restaurant_id, %item_id, "menu_item_added");
        Ok(saved)
    }

    /// Replace a menu item. The replacement gets a new id.
    #[instrument(skip(self, input))]
    pub async fn edit_item(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
        restaurant_id: Uuid,
        input: MenuItemInput,
    ) -> Result<Restaurant, ServiceError> {
        input.validate()?;
        let mut restaurant = self.owned(owner_id, restaurant_id).await?;
        if restaurant.find_item(item_id, owner_id).is_none() {
            return Err(ServiceError::not_found(ITEM_NOT_FOUND));
        }
        restaurant.remove_item(item_id);
        let new_id = restaurant.push_item(owner_id, input);
        let saved = self.repo.save(&restaurant).await?;
        info!(%restaurant_id, old_item_id = %item_id, %new_id, "menu_item_replaced");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, owner_id: Uuid, item_id: Uuid, restaurant_id: Uuid) -> Result<Restaurant, ServiceError> {
        let mut restaurant = self.owned(owner_id, restaurant_id).await?;
        if restaurant.find_item(item_id, owner_id).is_none() {
            return Err(ServiceError::not_found(ITEM_NOT_FOUND));
        }
        restaurant.remove_item(item_id);
        let saved = self.repo.save(&restaurant).await?;
        info!(%restaurant_id, %item_id, "menu_item_deleted");
        Ok(saved)
    }

    async fn owned(&self, owner_id: Uuid, id: Uuid) -> Result<Restaurant, ServiceError> {
        match self.repo.find_by_id(id).await? {
            Some(r) if r.is_owned_by(owner_id) => Ok(r),
            Some(_) => {
                debug!(restaurant_id = %id, requester = %owner_id, "ownership mismatch");
                Err(ServiceError::not_found(RESTAURANT_NOT_FOUND))
            }
            None => Err(ServiceError::not_found(RESTAURANT_NOT_FOUND)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurant::repository::mock::InMemoryRestaurantRepository;
    use async_trait::async_trait;

    fn svc(page_size: u64) -> RestaurantService {
        RestaurantService::new(Arc::new(InMemoryRestaurantRepository::new()), page_size)
    }

    fn input(name: &str) -> NewRestaurant {
        NewRestaurant {
            name: name.into(),
            image: "http://x.com/a.png".into(),
            description: "d".into(),
            category: "food".into(),
        }
    }

    fn dish(name: &str) -> MenuItemInput {
        MenuItemInput { name: name.into(), image: "http://x.com/dish.png".into(), description: "yum".into() }
    }

    async fn seed(svc: &RestaurantService, owner: Uuid, n: usize) -> Result<(), ServiceError> {
        for i in 0..n {
            svc.create(owner, input(&format!("Place number {i}"))).await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn pages_are_full_except_the_last() -> Result<(), ServiceError> {
        let svc = svc(6);
        seed(&svc, Uuid::new_v4(), 14).await?;

        let p1 = svc.list(None, 1).await?;
        let p2 = svc.list(None, 2).await?;
        let p3 = svc.list(None, 3).await?;
        assert_eq!(p1.total_pages, 3);
        assert_eq!((p1.items.len(), p2.items.len(), p3.items.len()), (6, 6, 2));
        assert_eq!(p3.items[1].name, "Place number 13");

        let err = svc.list(None, 4).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == NO_RESTAURANTS));
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_is_not_found() {
        let err = svc(6).list(None, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == NO_RESTAURANTS));
    }

    #[tokio::test]
    async fn keyword_matches_union_of_fields_once_each() -> Result<(), ServiceError> {
        let svc = svc(10);
        let owner = Uuid::new_v4();
        svc.create(owner, NewRestaurant { description: "best PIZZA in town".into(), ..input("Luigi's") }).await?;
        svc.create(owner, NewRestaurant { category: "pizza".into(), ..input("Corner Slice") }).await?;
        svc.create(owner, NewRestaurant { description: "pizza pizza".into(), category: "pizza".into(), ..input("Pizza Palace") }).await?;
        svc.create(owner, input("Sushi Stop")).await?;

        let page = svc.list(Some("Pizza"), 1).await?;
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.iter().all(|r| r.name != "Sushi Stop"));

        let err = svc.list(Some("ramen"), 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let created = svc.create(owner, input("Tasty Place")).await?;
        assert_eq!(created.owner_id, owner);
        assert!(created.menu.is_empty());

        let err = svc.create(Uuid::new_v4(), input("Tasty Place")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == NAME_TAKEN));

        // exact match only
        svc.create(owner, input("tasty place")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_input() {
        let err = svc(6).create(Uuid::new_v4(), NewRestaurant { category: "x".into(), ..input("Tasty Place") }).await.unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("category"));
    }

    struct LostWrites(InMemoryRestaurantRepository);

    #[async_trait]
    impl RestaurantRepository for LostWrites {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ServiceError> { self.0.find_by_id(id).await }
        async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>, ServiceError> { self.0.find_by_name(name).await }
        async fn count(&self, q: &RestaurantQuery) -> Result<u64, ServiceError> { self.0.count(q).await }
        async fn find_page(&self, q: &RestaurantQuery, l: u64, o: u64) -> Result<Vec<Restaurant>, ServiceError> { self.0.find_page(q, l, o).await }
        async fn insert(&self, _r: Restaurant) -> Result<Option<Restaurant>, ServiceError> { Ok(None) }
        async fn save(&self, r: &Restaurant) -> Result<Restaurant, ServiceError> { self.0.save(r).await }
        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> { self.0.delete(id).await }
    }

    #[tokio::test]
    async fn create_without_stored_record_is_internal() {
        let svc = RestaurantService::new(Arc::new(LostWrites(InMemoryRestaurantRepository::new())), 6);
        let err = svc.create(Uuid::new_v4(), input("Tasty Place")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal(ref m) if m == NOT_CREATED));
    }

    #[tokio::test]
    async fn edit_replaces_only_supplied_fields() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let r = svc.create(owner, input("Tasty Place")).await?;
        let patch = RestaurantPatch { name: Some("Tastier Place".into()), ..Default::default() };
        let edited = svc.edit(owner, r.id, patch).await?;
        assert_eq!(edited.name, "Tastier Place");
        assert_eq!(edited.image, r.image);
        assert_eq!(edited.category, r.category);
        assert_eq!(svc.get(r.id).await?.name, "Tastier Place");
        Ok(())
    }

    #[tokio::test]
    async fn non_owner_sees_not_found() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let r = svc.create(owner, input("Tasty Place")).await?;

        let edit = svc.edit(stranger, r.id, RestaurantPatch::default()).await.unwrap_err();
        let delete = svc.delete(stranger, r.id).await.unwrap_err();
        let missing = svc.delete(owner, Uuid::new_v4()).await.unwrap_err();
        for err in [edit, delete, missing] {
            assert!(matches!(err, ServiceError::NotFound(ref m) if m == RESTAURANT_NOT_FOUND));
        }
        // still there
        assert_eq!(svc.get(r.id).await?.id, r.id);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_hard() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let r = svc.create(owner, input("Tasty Place")).await?;
        svc.delete(owner, r.id).await?;
        assert!(matches!(svc.get(r.id).await.unwrap_err(), ServiceError::NotFound(_)));
        // name is free again
        svc.create(owner, input("Tasty Place")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn add_item_appends_one_entry() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let r = svc.create(owner, input("Tasty Place")).await?;

        let after = svc.add_item(owner, r.id, dish("Soup")).await?;
        assert_eq!(after.menu.len(), 1);
        let item = &after.menu[0];
        assert_eq!(item.owner_id, owner);
        assert_eq!(item.restaurant_id, r.id);
        assert_eq!(item.name, "Soup");

        let after = svc.add_item(owner, r.id, dish("Salad")).await?;
        assert_eq!(after.menu.len(), 2);
        assert_ne!(after.menu[0].id, after.menu[1].id);
        Ok(())
    }

    #[tokio::test]
    async fn add_item_requires_ownership() -> Result<(), ServiceError> {
        let svc = svc(6);
        let r = svc.create(Uuid::new_v4(), input("Tasty Place")).await?;
        let err = svc.add_item(Uuid::new_v4(), r.id, dish("Soup")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == RESTAURANT_NOT_FOUND));
        assert!(svc.get(r.id).await?.menu.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn item_changes_by_non_owner_leave_menu_alone() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let r = svc.create(owner, input("Tasty Place")).await?;
        let r = svc.add_item(owner, r.id, dish("Soup")).await?;
        let item_id = r.menu[0].id;

        let edit = svc.edit_item(stranger, item_id, r.id, dish("Stolen Soup")).await.unwrap_err();
        let delete = svc.delete_item(stranger, item_id, r.id).await.unwrap_err();
        for err in [edit, delete] {
            assert!(matches!(err, ServiceError::NotFound(ref m) if m == RESTAURANT_NOT_FOUND));
        }

        let menu = svc.get(r.id).await?.menu;
        assert_eq!(menu, r.menu);
        assert_eq!(menu[0].name, "Soup");
        Ok(())
    }

    #[tokio::test]
    async fn edit_item_swaps_id_and_keeps_new_values() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let r = svc.create(owner, input("Tasty Place")).await?;
        let r = svc.add_item(owner, r.id, dish("Soup")).await?;
        let r = svc.add_item(owner, r.id, dish("Salad")).await?;
        let old_id = r.menu[0].id;
        let kept_id = r.menu[1].id;

        let edited = svc
            .edit_item(owner, old_id, r.id, MenuItemInput { name: "Soup of the day".into(), ..dish("x") })
            .await?;
        assert_eq!(edited.menu.len(), 2);
        assert!(edited.menu.iter().all(|i| i.id != old_id));
        assert_eq!(edited.menu[0].id, kept_id);
        let replaced = &edited.menu[1];
        assert_eq!(replaced.name, "Soup of the day");
        assert_eq!(replaced.restaurant_id, r.id);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_item_is_distinct_not_found() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let r = svc.create(owner, input("Tasty Place")).await?;

        let edit = svc.edit_item(owner, Uuid::new_v4(), r.id, dish("Soup")).await.unwrap_err();
        let delete = svc.delete_item(owner, Uuid::new_v4(), r.id).await.unwrap_err();
        for err in [edit, delete] {
            assert!(matches!(err, ServiceError::NotFound(ref m) if m == ITEM_NOT_FOUND));
            assert_ne!(err.to_string(), RESTAURANT_NOT_FOUND);
        }
        Ok(())
    }

    #[tokio::test]
    async fn delete_item_removes_exactly_one() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let r = svc.create(owner, input("Tasty Place")).await?;
        let r = svc.add_item(owner, r.id, dish("Soup")).await?;
        let r = svc.add_item(owner, r.id, dish("Salad")).await?;
        let gone = r.menu[0].id;

        let after = svc.delete_item(owner, gone, r.id).await?;
        assert_eq!(after.menu.len(), 1);
        assert_eq!(after.menu[0].name, "Salad");

        let again = svc.delete_item(owner, gone, r.id).await.unwrap_err();
        assert!(matches!(again, ServiceError::NotFound(ref m) if m == ITEM_NOT_FOUND));
        Ok(())
    }

    #[tokio::test]
    async fn item_in_other_restaurant_is_not_found() -> Result<(), ServiceError> {
        let svc = svc(6);
        let owner = Uuid::new_v4();
        let a = svc.create(owner, input("First Place")).await?;
        let b = svc.create(owner, input("Second Place")).await?;
        let a = svc.add_item(owner, a.id, dish("Soup")).await?;

        let err = svc.delete_item(owner, a.menu[0].id, b.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == ITEM_NOT_FOUND));
        Ok(())
    }

    #[tokio::test]
    async fn zero_page_size_means_one_per_page() -> Result<(), ServiceError> {
        let svc = svc(0);
        seed(&svc, Uuid::new_v4(), 2).await?;
        let page = svc.list(None, 2).await?;
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        Ok(())
    }
}
