use sea_orm::{
    entity::prelude::*,
    sea_query::{BinOper, Expr, Func},
    Condition,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ModelError;

pub const NAME_MIN_LEN: usize = 5;
pub const CATEGORY_MIN_LEN: usize = 4;
pub const CATEGORY_MAX_LEN: usize = 10;

/// A restaurant row. `menu` holds the embedded menu items as a JSON array;
/// the service layer owns its element shape.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub image: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub menu: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.chars().count() < NAME_MIN_LEN {
        return Err(ModelError::Validation(format!("name must be at least {NAME_MIN_LEN} characters")));
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<(), ModelError> {
    let len = category.chars().count();
    if !(CATEGORY_MIN_LEN..=CATEGORY_MAX_LEN).contains(&len) {
        return Err(ModelError::Validation(format!(
            "category must be between {CATEGORY_MIN_LEN} and {CATEGORY_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Images must be absolute http(s) URLs with a host.
pub fn validate_image(image: &str) -> Result<(), ModelError> {
    let parsed = Url::parse(image).map_err(|_| ModelError::Validation("image must be a valid URL".into()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ModelError::Validation("image must be a valid URL".into()));
    }
    Ok(())
}

/// Menu item names may not be blank.
pub fn validate_item_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("item name required".into()));
    }
    Ok(())
}

/// Escape `LIKE` metacharacters so the keyword matches literally.
pub fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len() + 2);
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Case-insensitive substring match on name, description or category.
/// Returns `None` for a missing or empty keyword, which matches every row.
///
/// Both the columns and the pattern go through Postgres `LOWER()` so they are
/// folded by the same rules. Postgres' default `LIKE` escape is `\`.
pub fn search_condition(keyword: Option<&str>) -> Option<Condition> {
    let kw = keyword.filter(|k| !k.is_empty())?;
    let pattern = format!("%{}%", escape_like(kw));
    let contains = |col: Column| {
        Expr::expr(Func::lower(Expr::col((Entity, col))))
            .binary(BinOper::Like, Func::lower(Expr::val(pattern.clone())))
    };
    Some(
        Condition::any()
            .add(contains(Column::Name))
            .add(contains(Column::Description))
            .add(contains(Column::Category)),
    )
}
