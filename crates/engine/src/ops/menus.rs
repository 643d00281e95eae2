use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, MealType, Menu, ResultEngine, Weekday, menus, util::normalize_required_text,
};

use super::{Engine, with_tx};

/// Input for [`Engine::add_menu`].
#[derive(Clone, Debug)]
pub struct MenuNew {
    pub day: Weekday,
    pub meal_type: MealType,
    pub items: Vec<String>,
}

/// Partial replacement for [`Engine::update_menu`].
#[derive(Clone, Debug, Default)]
pub struct MenuUpdate {
    pub day: Option<Weekday>,
    pub meal_type: Option<MealType>,
    pub items: Option<Vec<String>>,
}

fn normalize_items(items: &[String]) -> ResultEngine<Json> {
    if items.is_empty() {
        return Err(EngineError::InvalidInput(
            "menu needs at least one item".to_string(),
        ));
    }
    let items = items
        .iter()
        .map(|item| normalize_required_text(item, "menu item"))
        .collect::<ResultEngine<Vec<_>>>()?;
    Ok(Json::from(items))
}

impl Engine {
    /// Add a menu entry for a day and meal.
    pub async fn add_menu(&self, new: MenuNew) -> ResultEngine<Menu> {
        let items = normalize_items(&new.items)?;

        let model = menus::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            day: ActiveValue::Set(new.day.as_str().to_string()),
            day_index: ActiveValue::Set(new.day.index()),
            meal_type: ActiveValue::Set(new.meal_type.as_str().to_string()),
            meal_index: ActiveValue::Set(new.meal_type.index()),
            items: ActiveValue::Set(items),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;

        tracing::debug!(
            id = %model.id,
            day = %model.day,
            meal_type = %model.meal_type,
            "menu added"
        );

        Menu::try_from(model)
    }

    /// All menu entries in calendar order (Monday first, then by meal).
    ///
    /// Days are ordered by their position in the week, not alphabetically by
    /// name, so Monday comes before Friday.
    pub async fn list_menus(&self) -> ResultEngine<Vec<Menu>> {
        menus::Entity::find()
            .order_by_asc(menus::Column::DayIndex)
            .order_by_asc(menus::Column::MealIndex)
            .order_by_asc(menus::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Menu::try_from)
            .collect()
    }

    /// Menu entries for a single day, by meal.
    pub async fn menus_for_day(&self, day: Weekday) -> ResultEngine<Vec<Menu>> {
        menus::Entity::find()
            .filter(menus::Column::DayIndex.eq(day.index()))
            .order_by_asc(menus::Column::MealIndex)
            .order_by_asc(menus::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Menu::try_from)
            .collect()
    }

    /// Replace the provided fields of a menu entry.
    pub async fn update_menu(&self, id: Uuid, update: MenuUpdate) -> ResultEngine<Menu> {
        if update.day.is_none() && update.meal_type.is_none() && update.items.is_none() {
            return Err(EngineError::InvalidInput(
                "provide at least one of day, mealType or items".to_string(),
            ));
        }
        let items = update.items.as_deref().map(normalize_items).transpose()?;

        with_tx!(self, |db_tx| {
            menus::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("menu".to_string()))?;

            let mut active = menus::ActiveModel {
                id: ActiveValue::Unchanged(id),
                ..Default::default()
            };
            if let Some(day) = update.day {
                active.day = ActiveValue::Set(day.as_str().to_string());
                active.day_index = ActiveValue::Set(day.index());
            }
            if let Some(meal_type) = update.meal_type {
                active.meal_type = ActiveValue::Set(meal_type.as_str().to_string());
                active.meal_index = ActiveValue::Set(meal_type.index());
            }
            if let Some(items) = items {
                active.items = ActiveValue::Set(items);
            }

            let model = active.update(&db_tx).await?;
            tracing::debug!(id = %id, "menu updated");
            Menu::try_from(model)
        })
    }

    /// Remove a menu entry.
    pub async fn delete_menu(&self, id: Uuid) -> ResultEngine<()> {
        let result = menus::Entity::delete_by_id(id).exec(&self.database).await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("menu".to_string()));
        }
        tracing::debug!(id = %id, "menu deleted");
        Ok(())
    }
}
