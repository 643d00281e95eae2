//! Student registry API endpoints

use api_types::{
    envelope::Envelope,
    student::{StudentNew, StudentView},
};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{ApiResult, ServerError, server::ServerState};

fn view(student: engine::Student) -> StudentView {
    StudentView {
        id: student.id,
        student_id: student.student_id,
        name: student.name,
        email: student.email,
        class_name: student.class_name,
        room_number: student.room_number,
        created_at: student.created_at,
    }
}

pub async fn add(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<StudentNew>, ServerError>,
) -> ApiResult<StudentView> {
    let student = state
        .engine
        .add_student(engine::StudentNew {
            name: payload.name,
            email: payload.email,
            class_name: payload.class_name,
            room_number: payload.room_number,
        })
        .await?;

    Ok(Json(Envelope::with_message(
        view(student),
        "Student added successfully",
    )))
}

pub async fn all(State(state): State<ServerState>) -> ApiResult<Vec<StudentView>> {
    let students = state.engine.list_students().await?;
    Ok(Json(Envelope::data(
        students.into_iter().map(view).collect(),
    )))
}

pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ServerError>,
) -> ApiResult<()> {
    state.engine.delete_student(id).await?;
    Ok(Json(Envelope::message("Student deleted successfully")))
}
