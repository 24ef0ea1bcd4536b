//! # 출석 이력 액션 핸들러
//!
//! ## 이력 동기화 흐름
//! ```text
//! 1. 출석 체크 완료 → save_session   (세션 이름으로 이력 저장, 학생 상태 초기화)
//! 2. 이력 정정     → update_history (기록 전체 교체, modCount = 클라이언트 값)
//! 3. 다시 조회     → get_data       (history[sessionName]에 반영됨)
//! ```

use super::{success, AppState};
use crate::{db, error::AppError, models::*};
use axum::Json;
use serde_json::Value;

pub async fn save_session(
    state: &AppState,
    req: SaveSessionRequest,
) -> Result<Json<Value>, AppError> {
    let session_id = db::save_session(&state.pool, &req).await?;
    tracing::info!(
        session_id,
        section_id = %req.section_id,
        session_name = %req.session_name,
        records = req.records.len(),
        "Attendance session saved"
    );
    Ok(success())
}

/// 저장된 세션의 기록을 교체합니다.
///
/// `(sectionId, sessionName)`에 해당하는 세션이 없으면 `"Session not found"`.
pub async fn update_history(
    state: &AppState,
    req: UpdateHistoryRequest,
) -> Result<Json<Value>, AppError> {
    let session_id = db::update_history(&state.pool, &req)
        .await?
        .ok_or(AppError::SessionNotFound)?;
    tracing::info!(session_id, mod_count = req.mod_count, "Attendance history updated");
    Ok(success())
}
