//! # 학생 데이터베이스 쿼리 모듈

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 반에 학생을 추가합니다.
///
/// `status`는 NULL로, `created_at`은 서버의 현재 시각(epoch milliseconds)으로 저장합니다.
/// 존재하지 않는 반 ID면 외래키 제약 위반 에러가 발생합니다.
pub async fn add_student(pool: &SqlitePool, req: &AddStudentRequest) -> Result<(), AppError> {
    let created_at = chrono::Utc::now().timestamp_millis();

    sqlx::query(
        r#"
        INSERT INTO students (id, section_id, name, status, created_at)
        VALUES (?, ?, ?, NULL, ?)
        "#,
    )
    .bind(&req.id)
    .bind(&req.section_id)
    .bind(&req.name)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// ID로 학생을 삭제하고 삭제된 행 수를 반환합니다.
///
/// 과거 출석 기록(`attendance_records`)은 삭제하지 않습니다.
pub async fn remove_student(pool: &SqlitePool, id: &str) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// 학생의 진행 중인 출석 상태를 변경합니다. `None`이면 NULL로 지웁니다.
pub async fn update_student_status(
    pool: &SqlitePool,
    id: &str,
    status: Option<&str>,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE students SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
