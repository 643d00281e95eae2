use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Amount, EngineError, Expense, ExpenseCategory, ResultEngine, expenses,
    util::normalize_required_text,
};

use super::{Engine, with_tx};

/// Input for [`Engine::add_expense`].
#[derive(Clone, Debug)]
pub struct ExpenseNew {
    pub category: ExpenseCategory,
    pub amount: Amount,
    pub description: String,
    pub recorded_by: String,
    /// Defaults to the creation time.
    pub date: Option<DateTime<Utc>>,
}

/// Partial replacement for [`Engine::update_expense`].
///
/// `recorded_by` is fixed at creation and cannot be updated.
#[derive(Clone, Debug, Default)]
pub struct ExpenseUpdate {
    pub category: Option<ExpenseCategory>,
    pub amount: Option<Amount>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl ExpenseUpdate {
    fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}

impl Engine {
    /// Record a new expense.
    pub async fn add_expense(&self, new: ExpenseNew) -> ResultEngine<Expense> {
        let description = normalize_required_text(&new.description, "description")?;
        let recorded_by = normalize_required_text(&new.recorded_by, "recordedBy")?;

        let model = expenses::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            category: ActiveValue::Set(new.category.as_str().to_string()),
            amount_minor: ActiveValue::Set(new.amount.minor()),
            description: ActiveValue::Set(description),
            date: ActiveValue::Set(new.date.unwrap_or_else(Utc::now)),
            recorded_by: ActiveValue::Set(recorded_by),
        }
        .insert(&self.database)
        .await?;

        tracing::debug!(
            id = %model.id,
            category = %model.category,
            amount_minor = model.amount_minor,
            "expense added"
        );

        Expense::try_from(model)
    }

    /// Return a single expense.
    pub async fn expense(&self, id: Uuid) -> ResultEngine<Expense> {
        let model = expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("expense".to_string()))?;
        Expense::try_from(model)
    }

    /// All expenses, most recent first.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .order_by_desc(expenses::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    /// Replace the provided fields of an expense in place.
    pub async fn update_expense(&self, id: Uuid, update: ExpenseUpdate) -> ResultEngine<Expense> {
        if update.is_empty() {
            return Err(EngineError::InvalidInput(
                "provide at least one of category, amount, description or date".to_string(),
            ));
        }
        let description = update
            .description
            .as_deref()
            .map(|value| normalize_required_text(value, "description"))
            .transpose()?;

        with_tx!(self, |db_tx| {
            expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("expense".to_string()))?;

            let mut active = expenses::ActiveModel {
                id: ActiveValue::Unchanged(id),
                ..Default::default()
            };
            if let Some(category) = update.category {
                active.category = ActiveValue::Set(category.as_str().to_string());
            }
            if let Some(amount) = update.amount {
                active.amount_minor = ActiveValue::Set(amount.minor());
            }
            if let Some(description) = description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(date) = update.date {
                active.date = ActiveValue::Set(date);
            }

            let model = active.update(&db_tx).await?;
            tracing::debug!(id = %id, "expense updated");
            Expense::try_from(model)
        })
    }

    /// Remove an expense.
    pub async fn delete_expense(&self, id: Uuid) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("expense".to_string()));
        }
        tracing::debug!(id = %id, "expense deleted");
        Ok(())
    }
}
