use chrono::{Utc, DateTime};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use models::restaurant::{self, search_condition, Entity as RestaurantEntity};

use crate::errors::ServiceError;
use crate::restaurant::domain::{MenuItem, Restaurant, RestaurantQuery};
use crate::restaurant::repository::RestaurantRepository;
use crate::restaurant::RESTAURANT_NOT_FOUND;

/// SeaORM-backed repository implementation. The menu is stored as a JSONB
/// array on the restaurant row.
pub struct SeaOrmRestaurantRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn filtered(query: &RestaurantQuery) -> Select<RestaurantEntity> {
        let finder = RestaurantEntity::find();
        match search_condition(query.keyword()) {
            Some(cond) => finder.filter(cond),
            None => finder,
        }
    }
}

fn to_domain(m: restaurant::Model) -> Result<Restaurant, ServiceError> {
    let id = m.id;
    let menu: Vec<MenuItem> = serde_json::from_value(m.menu)
        .map_err(|e| ServiceError::Db(format!("corrupt menu on restaurant {id}: {e}")))?;
    Ok(Restaurant {
        id,
        owner_id: m.owner_id,
        name: m.name,
        image: m.image,
        description: m.description,
        category: m.category,
        menu,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

fn menu_json(menu: &[MenuItem]) -> Result<serde_json::Value, ServiceError> {
    serde_json::to_value(menu).map_err(ServiceError::db)
}

fn ts(t: DateTime<Utc>) -> sea_orm::prelude::DateTimeWithTimeZone {
    t.into()
}

#[async_trait::async_trait]
impl RestaurantRepository for SeaOrmRestaurantRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ServiceError> {
        let res = RestaurantEntity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)?;
        res.map(to_domain).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>, ServiceError> {
        let res = RestaurantEntity::find()
            .filter(restaurant::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?;
        res.map(to_domain).transpose()
    }

    async fn count(&self, query: &RestaurantQuery) -> Result<u64, ServiceError> {
        Self::filtered(query).count(&self.db).await.map_err(ServiceError::db)
    }

    async fn find_page(&self, query: &RestaurantQuery, limit: u64, offset: u64) -> Result<Vec<Restaurant>, ServiceError> {
        let rows = Self::filtered(query)
            .order_by_asc(restaurant::Column::CreatedAt)
            .order_by_asc(restaurant::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn insert(&self, r: Restaurant) -> Result<Option<Restaurant>, ServiceError> {
        let am = restaurant::ActiveModel {
            id: Set(r.id),
            owner_id: Set(r.owner_id),
            name: Set(r.name),
            image: Set(r.image),
            description: Set(r.description),
            category: Set(r.category),
            menu: Set(menu_json(&r.menu)?),
            created_at: Set(ts(r.created_at)),
            updated_at: Set(ts(r.updated_at)),
        };
        RestaurantEntity::insert(am).exec(&self.db).await.map_err(ServiceError::db)?;
        self.find_by_id(r.id).await
    }

    async fn save(&self, r: &Restaurant) -> Result<Restaurant, ServiceError> {
        let am = restaurant::ActiveModel {
            id: Unchanged(r.id),
            name: Set(r.name.clone()),
            image: Set(r.image.clone()),
            description: Set(r.description.clone()),
            category: Set(r.category.clone()),
            menu: Set(menu_json(&r.menu)?),
            updated_at: Set(ts(Utc::now())),
            ..Default::default()
        };
        match am.update(&self.db).await {
            Ok(m) => to_domain(m),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found(RESTAURANT_NOT_FOUND)),
            Err(e) => Err(ServiceError::db(e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = RestaurantEntity::delete_by_id(id).exec(&self.db).await.map_err(ServiceError::db)?;
        Ok(res.rows_affected > 0)
    }
}
