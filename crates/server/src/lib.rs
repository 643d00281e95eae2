use api_types::envelope::{Envelope, ErrorKind};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use auth::{Account, Credentials};
pub use server::{ServerState, app, run_with_listener};

mod attendance;
mod auth;
mod expenses;
mod menu;
mod server;
mod students;

pub mod types {
    pub mod envelope {
        pub use api_types::envelope::{Envelope, ErrorKind};
    }

    pub mod auth {
        pub use api_types::auth::{LoginRequest, LoginResponse, Role};
    }

    pub mod menu {
        pub use api_types::menu::{MealType, MenuNew, MenuUpdate, MenuView, Weekday};
    }

    pub mod attendance {
        pub use api_types::attendance::{AttendanceNew, AttendanceStatus, AttendanceView};
    }

    pub mod expense {
        pub use api_types::expense::{
            AmountInput, CategoryTotalView, ExpenseCategory, ExpenseNew, ExpenseSummaryView,
            ExpenseUpdate, ExpenseView,
        };
    }

    pub mod student {
        pub use api_types::student::{StudentNew, StudentView};
    }
}

/// Result of every handler: an enveloped payload or an enveloped failure.
pub(crate) type ApiResult<T> = Result<Json<Envelope<T>>, ServerError>;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Unauthorized,
    /// Body or path could not be extracted.
    Rejection(String),
}

fn status_for_engine_error(err: &EngineError) -> (StatusCode, ErrorKind) {
    match err {
        EngineError::InvalidInput(_) => (StatusCode::BAD_REQUEST, ErrorKind::Validation),
        EngineError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorKind::NotFound),
        EngineError::ExistingKey(_) => (StatusCode::CONFLICT, ErrorKind::Conflict),
        EngineError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::StoreUnavailable,
        ),
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "Server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, kind, message) = match self {
            ServerError::Engine(err) => {
                let (status, kind) = status_for_engine_error(&err);
                (status, kind, message_for_engine_error(err))
            }
            ServerError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorKind::Unauthorized,
                "Invalid credentials".to_string(),
            ),
            ServerError::Rejection(message) => {
                (StatusCode::BAD_REQUEST, ErrorKind::Validation, message)
            }
        };

        (status, Json(Envelope::failure(kind, message))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejection(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Rejection(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_invalid_input_maps_to_400() {
        let res =
            ServerError::from(EngineError::InvalidInput("bad".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("menu".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn database_error_maps_to_500_and_hides_details() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("disk on fire".to_string()));
        assert_eq!(
            message_for_engine_error(err),
            "Server error".to_string()
        );
        let res = ServerError::from(EngineError::Database(sea_orm::DbErr::Custom(
            "disk on fire".to_string(),
        )))
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn rejection_maps_to_400() {
        let res = ServerError::Rejection("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
