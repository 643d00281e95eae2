use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryOrder, SqlErr, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Student, students,
    util::{normalize_required_text, validate_email},
};

use super::Engine;

/// Attempts at drawing a free student id before giving up.
const STUDENT_ID_ATTEMPTS: usize = 5;

/// Input for [`Engine::add_student`]. The student id is generated.
#[derive(Clone, Debug)]
pub struct StudentNew {
    pub name: String,
    pub email: String,
    pub class_name: String,
    pub room_number: String,
}

/// `YYYYMMDD` of `now` followed by a four digit suffix in `1000..=9999`.
fn generate_student_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().as_u128() % 9000 + 1000;
    format!("{}{suffix}", now.format("%Y%m%d"))
}

impl Engine {
    /// Register a student under a freshly generated student id.
    pub async fn add_student(&self, new: StudentNew) -> ResultEngine<Student> {
        let name = normalize_required_text(&new.name, "name")?;
        let email = validate_email(&new.email)?;
        let class_name = normalize_required_text(&new.class_name, "class")?;
        let room_number = normalize_required_text(&new.room_number, "roomNumber")?;

        for attempt in 1..=STUDENT_ID_ATTEMPTS {
            let now = Utc::now();
            let student_id = generate_student_id(now);
            let inserted = students::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                student_id: ActiveValue::Set(student_id.clone()),
                name: ActiveValue::Set(name.clone()),
                email: ActiveValue::Set(email.clone()),
                class_name: ActiveValue::Set(class_name.clone()),
                room_number: ActiveValue::Set(room_number.clone()),
                created_at: ActiveValue::Set(now),
            }
            .insert(&self.database)
            .await;

            match inserted {
                Ok(model) => {
                    tracing::debug!(id = %model.id, student_id = %model.student_id, "student added");
                    return Ok(Student::from(model));
                }
                Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    tracing::warn!(attempt, student_id = %student_id, "student id already taken, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(EngineError::ExistingKey("student id".to_string()))
    }

    /// All students ordered by name.
    pub async fn list_students(&self) -> ResultEngine<Vec<Student>> {
        Ok(students::Entity::find()
            .order_by_asc(students::Column::Name)
            .order_by_asc(students::Column::StudentId)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Student::from)
            .collect())
    }

    /// Remove a student record.
    pub async fn delete_student(&self, id: Uuid) -> ResultEngine<()> {
        let result = students::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("student".to_string()));
        }
        tracing::debug!(id = %id, "student deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn student_id_is_date_plus_four_digits() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        for _ in 0..100 {
            let id = generate_student_id(now);
            assert_eq!(id.len(), 12);
            assert!(id.starts_with("20240309"));
            let suffix: u32 = id[8..].parse().unwrap();
            assert!((1000..=9999).contains(&suffix));
        }
    }
}
