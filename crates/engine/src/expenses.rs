//! Kitchen expenses.
//!
//! An `Expense` records money spent on one of a fixed set of categories.
//! Amounts are stored in minor units (see [`Amount`]).

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, EngineError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Groceries,
    Vegetables,
    Fruits,
    Dairy,
    Cleaning,
    Utensils,
    Miscellaneous,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 7] = [
        Self::Groceries,
        Self::Vegetables,
        Self::Fruits,
        Self::Dairy,
        Self::Cleaning,
        Self::Utensils,
        Self::Miscellaneous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Dairy => "Dairy",
            Self::Cleaning => "Cleaning",
            Self::Utensils => "Utensils",
            Self::Miscellaneous => "Miscellaneous",
        }
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| EngineError::InvalidInput(format!("invalid category: {value}")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub category: ExpenseCategory,
    pub amount: Amount,
    pub description: String,
    pub date: DateTime<Utc>,
    pub recorded_by: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category: String,
    pub amount_minor: i64,
    pub description: String,
    pub date: DateTimeUtc,
    pub recorded_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            category: ExpenseCategory::try_from(model.category.as_str())?,
            amount: Amount::from_minor(model.amount_minor)?,
            description: model.description,
            date: model.date,
            recorded_by: model.recorded_by,
        })
    }
}
