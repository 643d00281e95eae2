use engine::{EngineError, MealType, MenuNew, MenuUpdate, Weekday};

mod common;

use common::engine_with_db;

fn menu(day: Weekday, meal_type: MealType, items: &[&str]) -> MenuNew {
    MenuNew {
        day,
        meal_type,
        items: items.iter().map(|item| item.to_string()).collect(),
    }
}

#[tokio::test]
async fn menus_are_listed_in_calendar_order() {
    let engine = engine_with_db().await;

    engine
        .add_menu(menu(Weekday::Wednesday, MealType::Dinner, &["Dal", "Rice"]))
        .await
        .unwrap();
    engine
        .add_menu(menu(Weekday::Monday, MealType::Lunch, &["Rajma"]))
        .await
        .unwrap();
    engine
        .add_menu(menu(Weekday::Friday, MealType::Breakfast, &["Poha"]))
        .await
        .unwrap();
    engine
        .add_menu(menu(Weekday::Monday, MealType::Breakfast, &["Idli"]))
        .await
        .unwrap();

    let order: Vec<_> = engine
        .list_menus()
        .await
        .unwrap()
        .into_iter()
        .map(|m| (m.day, m.meal_type))
        .collect();
    assert_eq!(
        order,
        [
            (Weekday::Monday, MealType::Breakfast),
            (Weekday::Monday, MealType::Lunch),
            (Weekday::Wednesday, MealType::Dinner),
            (Weekday::Friday, MealType::Breakfast),
        ]
    );

    let monday = engine.menus_for_day(Weekday::Monday).await.unwrap();
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[0].items, ["Idli"]);
    assert!(engine.menus_for_day(Weekday::Sunday).await.unwrap().is_empty());
}

#[tokio::test]
async fn items_are_trimmed_and_required() {
    let engine = engine_with_db().await;

    let created = engine
        .add_menu(menu(Weekday::Tuesday, MealType::Lunch, &[" Paneer ", "Roti"]))
        .await
        .unwrap();
    assert_eq!(created.items, ["Paneer", "Roti"]);

    assert!(matches!(
        engine
            .add_menu(menu(Weekday::Tuesday, MealType::Dinner, &[]))
            .await,
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        engine
            .add_menu(menu(Weekday::Tuesday, MealType::Dinner, &["Khichdi", "  "]))
            .await,
        Err(EngineError::InvalidInput(_))
    ));
    assert_eq!(engine.list_menus().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_replaces_only_given_fields() {
    let engine = engine_with_db().await;

    let created = engine
        .add_menu(menu(Weekday::Thursday, MealType::Dinner, &["Pulao"]))
        .await
        .unwrap();

    let updated = engine
        .update_menu(
            created.id,
            MenuUpdate {
                day: Some(Weekday::Saturday),
                items: Some(vec!["Biryani".to_string(), "Raita".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.day, Weekday::Saturday);
    assert_eq!(updated.meal_type, MealType::Dinner);
    assert_eq!(updated.items, ["Biryani", "Raita"]);

    let saturday = engine.menus_for_day(Weekday::Saturday).await.unwrap();
    assert_eq!(saturday.len(), 1);
    assert!(engine.menus_for_day(Weekday::Thursday).await.unwrap().is_empty());

    assert!(matches!(
        engine.update_menu(created.id, MenuUpdate::default()).await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn unknown_menu_ids_are_not_found() {
    let engine = engine_with_db().await;
    let missing = uuid::Uuid::new_v4();

    let err = engine
        .update_menu(
            missing,
            MenuUpdate {
                meal_type: Some(MealType::Lunch),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("menu".to_string()));
    assert_eq!(
        engine.delete_menu(missing).await.unwrap_err(),
        EngineError::NotFound("menu".to_string())
    );
}

#[tokio::test]
async fn delete_removes_the_entry() {
    let engine = engine_with_db().await;

    let created = engine
        .add_menu(menu(Weekday::Sunday, MealType::Breakfast, &["Puri"]))
        .await
        .unwrap();
    engine.delete_menu(created.id).await.unwrap();
    assert!(engine.list_menus().await.unwrap().is_empty());
}
