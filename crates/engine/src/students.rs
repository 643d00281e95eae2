//! Student registry.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    /// Generated `YYYYMMDD` + 4 digit identifier handed to the student.
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub class_name: String,
    pub room_number: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub class_name: String,
    pub room_number: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Student {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id,
            name: model.name,
            email: model.email,
            class_name: model.class_name,
            room_number: model.room_number,
            created_at: model.created_at,
        }
    }
}
