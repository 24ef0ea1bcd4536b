//! # 에러 처리 모듈
//!
//! 요청 처리 중 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 에러는 두 종류로 나뉩니다:
//! - **도메인 에러**: "Session not found", "Invalid action"처럼 이름이 있는 규칙 위반
//! - **저장소 에러**: SQLite 드라이버가 돌려준 에러 메시지 (제약 조건 위반 등)
//!
//! 두 종류 모두 클라이언트에는 같은 모양으로 전달됩니다:
//! `{ "success": false, "error": "<메시지>" }` — HTTP 상태 코드는 항상 200입니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 `IntoResponse`를 호출하여 JSON 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// `action` 파라미터가 없거나 알 수 없는 값
    #[error("Invalid action")]
    InvalidAction,

    /// `(sectionId, sessionName)`에 해당하는 출석 세션이 없음
    #[error("Session not found")]
    SessionNotFound,

    /// 요청 본문을 JSON으로 파싱할 수 없거나 필수 필드가 빠짐
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// 데이터베이스 오류
    /// #[from]: `?` 연산자로 sqlx::Error를 AppError::Database로 자동 변환합니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// 클라이언트에 전달할 에러 메시지.
    ///
    /// 저장소 에러는 드라이버 메시지를 그대로 전달합니다.
    /// 예: `UNIQUE constraint failed: sections.id`
    pub fn client_message(&self) -> String {
        match self {
            // 제약 조건 위반 등 DB가 돌려준 에러는 접두사 없이 원문 메시지만 사용
            AppError::Database(sqlx::Error::Database(db_err)) => db_err.message().to_string(),
            AppError::Database(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 `{ success: false, error }` JSON 응답으로 변환합니다.
    ///
    /// 에러 종류와 관계없이 상태 코드는 200 OK입니다.
    /// 클라이언트는 `success` 필드로만 성공 여부를 판단합니다.
    fn into_response(self) -> Response {
        let message = self.client_message();

        match self {
            AppError::Database(ref e) => tracing::error!("Database error: {}", e),
            ref other => tracing::warn!("Request failed: {}", other),
        }

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (StatusCode::OK, body).into_response()
    }
}
