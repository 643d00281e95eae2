//! Weekly menu entries: one row per (day, meal) with its list of dishes.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::{EngineError, MealType, Weekday};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub id: Uuid,
    pub day: Weekday,
    pub meal_type: MealType,
    pub items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub day: String,
    pub day_index: i16,
    pub meal_type: String,
    pub meal_index: i16,
    pub items: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Menu {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let items: Vec<String> = serde_json::from_value(model.items)
            .map_err(|err| EngineError::InvalidInput(format!("invalid menu items: {err}")))?;
        Ok(Self {
            id: model.id,
            day: Weekday::try_from(model.day.as_str())?,
            meal_type: MealType::try_from(model.meal_type.as_str())?,
            items,
            created_at: model.created_at,
        })
    }
}
