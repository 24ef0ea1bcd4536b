//! # 학생 액션 핸들러
//!
//! 세 액션 모두 성공하면 `{ success: true }`를 반환합니다.
//! 없는 학생을 삭제하거나 수정해도 실패로 처리하지 않습니다.

use super::{success, AppState};
use crate::{db, error::AppError, models::*};
use axum::Json;
use serde_json::Value;

pub async fn add_student(state: &AppState, req: AddStudentRequest) -> Result<Json<Value>, AppError> {
    db::add_student(&state.pool, &req).await?;
    tracing::info!(id = %req.id, section_id = %req.section_id, "Student added");
    Ok(success())
}

pub async fn remove_student(state: &AppState, req: IdRequest) -> Result<Json<Value>, AppError> {
    let removed = db::remove_student(&state.pool, &req.id).await?;
    tracing::info!(id = %req.id, removed, "Student removed");
    Ok(success())
}

/// 진행 중인 출석 체크에서 학생 한 명의 상태를 바꿉니다.
pub async fn update_student_status(
    state: &AppState,
    req: UpdateStudentStatusRequest,
) -> Result<Json<Value>, AppError> {
    let updated = db::update_student_status(&state.pool, &req.id, req.status.as_deref()).await?;
    if updated == 0 {
        tracing::debug!(id = %req.id, "Status update matched no student");
    }
    Ok(success())
}
