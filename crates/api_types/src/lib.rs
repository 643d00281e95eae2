use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod envelope {
    use super::*;

    /// Machine readable error tag carried in failed responses.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ErrorKind {
        Validation,
        NotFound,
        Conflict,
        Unauthorized,
        StoreUnavailable,
    }

    /// Wrapper around every response body.
    ///
    /// ```json
    /// { "success": true, "data": { ... }, "message": "Menu added successfully" }
    /// { "success": false, "message": "Server error", "error": "store_unavailable" }
    /// ```
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Envelope<T> {
        pub success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub data: Option<T>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub error: Option<ErrorKind>,
    }

    impl<T> Envelope<T> {
        pub fn data(data: T) -> Self {
            Self {
                success: true,
                data: Some(data),
                message: None,
                error: None,
            }
        }

        pub fn with_message(data: T, message: impl Into<String>) -> Self {
            Self {
                success: true,
                data: Some(data),
                message: Some(message.into()),
                error: None,
            }
        }
    }

    impl Envelope<()> {
        pub fn message(message: impl Into<String>) -> Self {
            Self {
                success: true,
                data: None,
                message: Some(message.into()),
                error: None,
            }
        }

        pub fn failure(error: ErrorKind, message: impl Into<String>) -> Self {
            Self {
                success: false,
                data: None,
                message: Some(message.into()),
                error: Some(error),
            }
        }
    }
}

pub mod auth {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        Admin,
        Student,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub username: String,
        pub password: String,
        /// Kept as a string so an unknown role fails the login instead of the
        /// body parsing.
        pub role: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub role: Role,
        pub username: String,
    }
}

pub mod menu {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Weekday {
        Monday,
        Tuesday,
        Wednesday,
        Thursday,
        Friday,
        Saturday,
        Sunday,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum MealType {
        Breakfast,
        Lunch,
        Dinner,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MenuNew {
        pub day: Weekday,
        pub meal_type: MealType,
        pub items: Vec<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MenuUpdate {
        pub day: Option<Weekday>,
        pub meal_type: Option<MealType>,
        pub items: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MenuView {
        pub id: Uuid,
        pub day: Weekday,
        pub meal_type: MealType,
        pub items: Vec<String>,
        /// Creation time.
        pub date: DateTime<Utc>,
    }
}

pub mod attendance {
    use super::*;
    use crate::menu::MealType;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum AttendanceStatus {
        Present,
        Absent,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AttendanceNew {
        pub student_name: String,
        pub class_name: String,
        pub room_number: String,
        pub status: AttendanceStatus,
        pub meal_type: MealType,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AttendanceView {
        pub id: Uuid,
        pub student_name: String,
        pub class_name: String,
        pub room_number: String,
        pub date: DateTime<Utc>,
        pub status: AttendanceStatus,
        pub meal_type: MealType,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ExpenseCategory {
        Groceries,
        Vegetables,
        Fruits,
        Dairy,
        Cleaning,
        Utensils,
        Miscellaneous,
    }

    /// Amount as sent by clients: a JSON number (`12.5`) or a decimal
    /// string (`"12.50"`, `"12,5"`).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountInput {
        Number(f64),
        Text(String),
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub category: ExpenseCategory,
        pub amount: AmountInput,
        pub description: String,
        pub recorded_by: String,
        /// RFC3339 timestamp. If absent, server uses now().
        pub date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpdate {
        pub category: Option<ExpenseCategory>,
        pub amount: Option<AmountInput>,
        pub description: Option<String>,
        pub date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: Uuid,
        pub category: ExpenseCategory,
        /// Decimal rendering of `amount_minor`.
        pub amount: f64,
        pub amount_minor: i64,
        pub description: String,
        pub date: DateTime<Utc>,
        pub recorded_by: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryTotalView {
        pub category: ExpenseCategory,
        pub total_amount: f64,
        pub total_amount_minor: i64,
    }

    /// `total_minor` always equals the sum of every `total_amount_minor`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseSummaryView {
        pub by_category: Vec<CategoryTotalView>,
        pub total: f64,
        pub total_minor: i64,
    }
}

pub mod student {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StudentNew {
        pub name: String,
        pub email: String,
        pub class_name: String,
        pub room_number: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StudentView {
        pub id: Uuid,
        pub student_id: String,
        pub name: String,
        pub email: String,
        pub class_name: String,
        pub room_number: String,
        pub created_at: DateTime<Utc>,
    }
}
