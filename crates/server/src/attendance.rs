//! Attendance API endpoints

use api_types::{
    attendance::{AttendanceNew, AttendanceStatus, AttendanceView},
    envelope::Envelope,
};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;

use crate::{
    ApiResult, ServerError,
    menu::{map_meal, view_meal},
    server::ServerState,
};

fn map_status(status: AttendanceStatus) -> engine::AttendanceStatus {
    match status {
        AttendanceStatus::Present => engine::AttendanceStatus::Present,
        AttendanceStatus::Absent => engine::AttendanceStatus::Absent,
    }
}

fn view(record: engine::Attendance) -> AttendanceView {
    AttendanceView {
        id: record.id,
        student_name: record.student_name,
        class_name: record.class_name,
        room_number: record.room_number,
        date: record.date,
        status: match record.status {
            engine::AttendanceStatus::Present => AttendanceStatus::Present,
            engine::AttendanceStatus::Absent => AttendanceStatus::Absent,
        },
        meal_type: view_meal(record.meal_type),
    }
}

fn views(records: Vec<engine::Attendance>) -> Vec<AttendanceView> {
    records.into_iter().map(view).collect()
}

pub async fn mark(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<AttendanceNew>, ServerError>,
) -> ApiResult<AttendanceView> {
    let record = state
        .engine
        .mark_attendance(engine::AttendanceNew {
            student_name: payload.student_name,
            class_name: payload.class_name,
            room_number: payload.room_number,
            status: map_status(payload.status),
            meal_type: map_meal(payload.meal_type),
        })
        .await?;

    Ok(Json(Envelope::with_message(
        view(record),
        "Attendance marked successfully",
    )))
}

pub async fn all(State(state): State<ServerState>) -> ApiResult<Vec<AttendanceView>> {
    let records = state.engine.list_attendance().await?;
    Ok(Json(Envelope::data(views(records))))
}

/// Records inside the day starting at `date` (`YYYY-MM-DD` or RFC3339).
pub async fn by_date(
    State(state): State<ServerState>,
    WithRejection(Path(date), _): WithRejection<Path<String>, ServerError>,
) -> ApiResult<Vec<AttendanceView>> {
    let records = state.engine.attendance_on(&date).await?;
    Ok(Json(Envelope::data(views(records))))
}

pub async fn by_student(
    State(state): State<ServerState>,
    WithRejection(Path(name), _): WithRejection<Path<String>, ServerError>,
) -> ApiResult<Vec<AttendanceView>> {
    let records = state.engine.attendance_for_student(&name).await?;
    Ok(Json(Envelope::data(views(records))))
}
