//! # 반(Section) 액션 핸들러
//!
//! | action | 핸들러 | 응답 |
//! |--------|--------|------|
//! | `get_data` | `get_data` | `{ success, sections: [...] }` |
//! | `create_section` | `create_section` | `{ success }` |
//! | `update_section` | `update_section` | `{ success }` |
//! | `delete_section` | `delete_section` | `{ success }` |

use super::{success, AppState};
use crate::{db, error::AppError, models::*};
use axum::Json;
use serde_json::Value;

/// 모든 반을 학생 목록, 출석 이력과 함께 반환합니다.
///
/// 증분 동기화는 없습니다. 클라이언트는 매번 전체 데이터를 받아 로컬 상태를 교체합니다.
pub async fn get_data(state: &AppState) -> Result<Json<DataResponse>, AppError> {
    let sections = db::fetch_all(&state.pool).await?;
    tracing::debug!(count = sections.len(), "Fetched all sections");
    Ok(Json(DataResponse {
        success: true,
        sections,
    }))
}

pub async fn create_section(
    state: &AppState,
    req: CreateSectionRequest,
) -> Result<Json<Value>, AppError> {
    db::create_section(&state.pool, &req).await?;
    tracing::info!(id = %req.id, "Section created");
    Ok(success())
}

/// 반의 잠금 여부와 마지막 저장일을 수정합니다.
///
/// 반이 없어도 실패로 처리하지 않습니다.
pub async fn update_section(
    state: &AppState,
    req: UpdateSectionRequest,
) -> Result<Json<Value>, AppError> {
    db::update_section(&state.pool, &req).await?;
    Ok(success())
}

/// 반을 삭제합니다. 학생, 출석 세션, 출석 기록도 함께 삭제됩니다.
pub async fn delete_section(state: &AppState, req: IdRequest) -> Result<Json<Value>, AppError> {
    let deleted = db::delete_section(&state.pool, &req.id).await?;
    tracing::info!(id = %req.id, deleted, "Section deleted");
    Ok(success())
}
