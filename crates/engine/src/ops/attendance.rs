use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder,
    prelude::*,
    sea_query::{Expr, LikeExpr},
};
use uuid::Uuid;

use crate::{
    Attendance, AttendanceStatus, EngineError, MealType, ResultEngine, attendance, day_window,
    util::{LIKE_ESCAPE, contains_pattern, normalize_required_text, search_key},
};

use super::Engine;

/// Input for [`Engine::mark_attendance`]. The date is assigned on insert.
#[derive(Clone, Debug)]
pub struct AttendanceNew {
    pub student_name: String,
    pub class_name: String,
    pub room_number: String,
    pub status: AttendanceStatus,
    pub meal_type: MealType,
}

impl Engine {
    /// Record an attendance mark dated now.
    pub async fn mark_attendance(&self, new: AttendanceNew) -> ResultEngine<Attendance> {
        let student_name = normalize_required_text(&new.student_name, "studentName")?;
        let class_name = normalize_required_text(&new.class_name, "class")?;
        let room_number = normalize_required_text(&new.room_number, "roomNumber")?;

        let model = attendance::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            student_name_norm: ActiveValue::Set(search_key(&student_name)),
            student_name: ActiveValue::Set(student_name),
            class_name: ActiveValue::Set(class_name),
            room_number: ActiveValue::Set(room_number),
            date: ActiveValue::Set(Utc::now()),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            meal_type: ActiveValue::Set(new.meal_type.as_str().to_string()),
        }
        .insert(&self.database)
        .await?;

        tracing::debug!(
            id = %model.id,
            status = %model.status,
            meal_type = %model.meal_type,
            "attendance marked"
        );

        Attendance::try_from(model)
    }

    /// Every attendance mark, most recent first.
    pub async fn list_attendance(&self) -> ResultEngine<Vec<Attendance>> {
        attendance::Entity::find()
            .order_by_desc(attendance::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Attendance::try_from)
            .collect()
    }

    /// Marks dated inside the one-day window starting at `date`.
    ///
    /// See [`day_window`](crate::day_window) for the accepted formats.
    pub async fn attendance_on(&self, date: &str) -> ResultEngine<Vec<Attendance>> {
        let (start, end) = day_window(date)?;
        attendance::Entity::find()
            .filter(attendance::Column::Date.gte(start))
            .filter(attendance::Column::Date.lt(end))
            .order_by_desc(attendance::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Attendance::try_from)
            .collect()
    }

    /// Marks whose student name contains `fragment`, ignoring case.
    ///
    /// The fragment matches literally: `%` and `_` are not wildcards.
    pub async fn attendance_for_student(&self, fragment: &str) -> ResultEngine<Vec<Attendance>> {
        let key = search_key(fragment);
        if key.is_empty() {
            return Err(EngineError::InvalidInput(
                "student name must not be empty".to_string(),
            ));
        }
        let pattern = LikeExpr::new(contains_pattern(&key)).escape(LIKE_ESCAPE);

        attendance::Entity::find()
            .filter(Expr::col(attendance::Column::StudentNameNorm).like(pattern))
            .order_by_desc(attendance::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Attendance::try_from)
            .collect()
    }
}
