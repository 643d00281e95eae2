//! Attendance marks: whether a student showed up for a given meal.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MealType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

impl TryFrom<&str> for AttendanceStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            other => Err(EngineError::InvalidInput(format!(
                "invalid attendance status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attendance {
    pub id: Uuid,
    pub student_name: String,
    pub class_name: String,
    pub room_number: String,
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub meal_type: MealType,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_name: String,
    /// NFKC + lowercase copy of `student_name`, used for searching.
    pub student_name_norm: String,
    pub class_name: String,
    pub room_number: String,
    pub date: DateTimeUtc,
    pub status: String,
    pub meal_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Attendance {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            student_name: model.student_name,
            class_name: model.class_name,
            room_number: model.room_number,
            date: model.date,
            status: AttendanceStatus::try_from(model.status.as_str())?,
            meal_type: MealType::try_from(model.meal_type.as_str())?,
        })
    }
}
