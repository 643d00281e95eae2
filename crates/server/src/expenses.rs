//! Expense API endpoints

use api_types::{
    envelope::Envelope,
    expense::{
        AmountInput, CategoryTotalView, ExpenseCategory, ExpenseNew, ExpenseSummaryView,
        ExpenseUpdate, ExpenseView,
    },
};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use engine::Amount;
use uuid::Uuid;

use crate::{ApiResult, ServerError, server::ServerState};

fn map_category(category: ExpenseCategory) -> engine::ExpenseCategory {
    match category {
        ExpenseCategory::Groceries => engine::ExpenseCategory::Groceries,
        ExpenseCategory::Vegetables => engine::ExpenseCategory::Vegetables,
        ExpenseCategory::Fruits => engine::ExpenseCategory::Fruits,
        ExpenseCategory::Dairy => engine::ExpenseCategory::Dairy,
        ExpenseCategory::Cleaning => engine::ExpenseCategory::Cleaning,
        ExpenseCategory::Utensils => engine::ExpenseCategory::Utensils,
        ExpenseCategory::Miscellaneous => engine::ExpenseCategory::Miscellaneous,
    }
}

fn view_category(category: engine::ExpenseCategory) -> ExpenseCategory {
    match category {
        engine::ExpenseCategory::Groceries => ExpenseCategory::Groceries,
        engine::ExpenseCategory::Vegetables => ExpenseCategory::Vegetables,
        engine::ExpenseCategory::Fruits => ExpenseCategory::Fruits,
        engine::ExpenseCategory::Dairy => ExpenseCategory::Dairy,
        engine::ExpenseCategory::Cleaning => ExpenseCategory::Cleaning,
        engine::ExpenseCategory::Utensils => ExpenseCategory::Utensils,
        engine::ExpenseCategory::Miscellaneous => ExpenseCategory::Miscellaneous,
    }
}

fn parse_amount(amount: AmountInput) -> Result<Amount, ServerError> {
    let amount = match amount {
        AmountInput::Number(value) => Amount::from_major(value)?,
        AmountInput::Text(value) => value.parse::<Amount>()?,
    };
    Ok(amount)
}

fn view(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        category: view_category(expense.category),
        amount: expense.amount.to_major(),
        amount_minor: expense.amount.minor(),
        description: expense.description,
        date: expense.date,
        recorded_by: expense.recorded_by,
    }
}

pub async fn add(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<ExpenseNew>, ServerError>,
) -> ApiResult<ExpenseView> {
    let expense = state
        .engine
        .add_expense(engine::ExpenseNew {
            category: map_category(payload.category),
            amount: parse_amount(payload.amount)?,
            description: payload.description,
            recorded_by: payload.recorded_by,
            date: payload.date.map(|dt| dt.with_timezone(&Utc)),
        })
        .await?;

    Ok(Json(Envelope::with_message(
        view(expense),
        "Expense added successfully",
    )))
}

pub async fn all(State(state): State<ServerState>) -> ApiResult<Vec<ExpenseView>> {
    let expenses = state.engine.list_expenses().await?;
    Ok(Json(Envelope::data(
        expenses.into_iter().map(view).collect(),
    )))
}

pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<ExpenseUpdate>, ServerError>,
) -> ApiResult<ExpenseView> {
    let amount = payload.amount.map(parse_amount).transpose()?;
    let expense = state
        .engine
        .update_expense(
            id,
            engine::ExpenseUpdate {
                category: payload.category.map(map_category),
                amount,
                description: payload.description,
                date: payload.date.map(|dt| dt.with_timezone(&Utc)),
            },
        )
        .await?;

    Ok(Json(Envelope::with_message(
        view(expense),
        "Expense updated successfully",
    )))
}

pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ServerError>,
) -> ApiResult<()> {
    state.engine.delete_expense(id).await?;
    Ok(Json(Envelope::message("Expense deleted successfully")))
}

/// Per-category totals and the grand total over all expenses.
pub async fn summary(State(state): State<ServerState>) -> ApiResult<ExpenseSummaryView> {
    let summary = state.engine.expense_summary().await?;

    let by_category = summary
        .by_category
        .into_iter()
        .map(|row| CategoryTotalView {
            category: view_category(row.category),
            total_amount: row.total.to_major(),
            total_amount_minor: row.total.minor(),
        })
        .collect();

    Ok(Json(Envelope::data(ExpenseSummaryView {
        by_category,
        total: summary.total.to_major(),
        total_minor: summary.total.minor(),
    })))
}
