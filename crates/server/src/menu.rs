//! Menu API endpoints

use api_types::{
    envelope::Envelope,
    menu::{MealType, MenuNew, MenuUpdate, MenuView, Weekday},
};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{ApiResult, ServerError, server::ServerState};

pub(crate) fn map_weekday(day: Weekday) -> engine::Weekday {
    match day {
        Weekday::Monday => engine::Weekday::Monday,
        Weekday::Tuesday => engine::Weekday::Tuesday,
        Weekday::Wednesday => engine::Weekday::Wednesday,
        Weekday::Thursday => engine::Weekday::Thursday,
        Weekday::Friday => engine::Weekday::Friday,
        Weekday::Saturday => engine::Weekday::Saturday,
        Weekday::Sunday => engine::Weekday::Sunday,
    }
}

fn view_weekday(day: engine::Weekday) -> Weekday {
    match day {
        engine::Weekday::Monday => Weekday::Monday,
        engine::Weekday::Tuesday => Weekday::Tuesday,
        engine::Weekday::Wednesday => Weekday::Wednesday,
        engine::Weekday::Thursday => Weekday::Thursday,
        engine::Weekday::Friday => Weekday::Friday,
        engine::Weekday::Saturday => Weekday::Saturday,
        engine::Weekday::Sunday => Weekday::Sunday,
    }
}

pub(crate) fn map_meal(meal: MealType) -> engine::MealType {
    match meal {
        MealType::Breakfast => engine::MealType::Breakfast,
        MealType::Lunch => engine::MealType::Lunch,
        MealType::Dinner => engine::MealType::Dinner,
    }
}

pub(crate) fn view_meal(meal: engine::MealType) -> MealType {
    match meal {
        engine::MealType::Breakfast => MealType::Breakfast,
        engine::MealType::Lunch => MealType::Lunch,
        engine::MealType::Dinner => MealType::Dinner,
    }
}

fn view(menu: engine::Menu) -> MenuView {
    MenuView {
        id: menu.id,
        day: view_weekday(menu.day),
        meal_type: view_meal(menu.meal_type),
        items: menu.items,
        date: menu.created_at,
    }
}

pub async fn add(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<MenuNew>, ServerError>,
) -> ApiResult<MenuView> {
    let menu = state
        .engine
        .add_menu(engine::MenuNew {
            day: map_weekday(payload.day),
            meal_type: map_meal(payload.meal_type),
            items: payload.items,
        })
        .await?;

    Ok(Json(Envelope::with_message(
        view(menu),
        "Menu added successfully",
    )))
}

pub async fn all(State(state): State<ServerState>) -> ApiResult<Vec<MenuView>> {
    let menus = state.engine.list_menus().await?;
    Ok(Json(Envelope::data(menus.into_iter().map(view).collect())))
}

/// Entries for one weekday; the day name is matched case-insensitively.
pub async fn by_day(
    State(state): State<ServerState>,
    WithRejection(Path(day), _): WithRejection<Path<String>, ServerError>,
) -> ApiResult<Vec<MenuView>> {
    let day = engine::Weekday::try_from(day.as_str())?;
    let menus = state.engine.menus_for_day(day).await?;
    Ok(Json(Envelope::data(menus.into_iter().map(view).collect())))
}

pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<MenuUpdate>, ServerError>,
) -> ApiResult<MenuView> {
    let menu = state
        .engine
        .update_menu(
            id,
            engine::MenuUpdate {
                day: payload.day.map(map_weekday),
                meal_type: payload.meal_type.map(map_meal),
                items: payload.items,
            },
        )
        .await?;

    Ok(Json(Envelope::with_message(
        view(menu),
        "Menu updated successfully",
    )))
}

pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ServerError>,
) -> ApiResult<()> {
    state.engine.delete_menu(id).await?;
    Ok(Json(Envelope::message("Menu deleted successfully")))
}
