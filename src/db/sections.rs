//! # 반(Section) 데이터베이스 쿼리 모듈
//!
//! `sections` 테이블에 대한 생성/수정/삭제 쿼리 함수들입니다.
//! 반을 삭제하면 `ON DELETE CASCADE`로 학생, 출석 세션, 출석 기록이 함께 삭제됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 새 반을 생성합니다.
///
/// ID는 클라이언트가 정합니다. 이미 존재하는 ID면 PRIMARY KEY 제약 위반으로
/// `AppError::Database`가 반환됩니다.
/// `is_locked`는 항상 false(0)로 시작하고, `subject`가 없으면 빈 문자열로 저장합니다.
pub async fn create_section(pool: &SqlitePool, req: &CreateSectionRequest) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO sections (id, name, subject, is_locked, created_at)
        VALUES (?, ?, ?, 0, ?)
        "#,
    )
    .bind(&req.id)
    .bind(&req.name)
    .bind(req.subject.as_deref().unwrap_or(""))
    .bind(req.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// 반 정보를 부분 업데이트합니다.
///
/// 요청에 값이 있는 필드만 각각 별도의 UPDATE 문으로 반영합니다.
/// 예: `isLocked`만 보내면 `last_saved_date`는 그대로 유지됩니다.
///
/// 반이 존재하는지는 확인하지 않습니다. 없는 ID면 아무 행도 바뀌지 않습니다.
pub async fn update_section(pool: &SqlitePool, req: &UpdateSectionRequest) -> Result<(), AppError> {
    if let Some(is_locked) = req.is_locked {
        sqlx::query("UPDATE sections SET is_locked = ? WHERE id = ?")
            .bind(is_locked)
            .bind(&req.id)
            .execute(pool)
            .await?;
    }

    if let Some(last_saved_date) = &req.last_saved_date {
        sqlx::query("UPDATE sections SET last_saved_date = ? WHERE id = ?")
            .bind(last_saved_date)
            .bind(&req.id)
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// ID로 반을 삭제하고 삭제된 행 수를 반환합니다.
///
/// 소속 학생/세션/기록은 외래키 CASCADE로 함께 삭제됩니다.
/// (sqlx의 SQLite 연결은 기본적으로 `PRAGMA foreign_keys = ON` 상태입니다)
pub async fn delete_section(pool: &SqlitePool, id: &str) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM sections WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
