//! # 출석 이력 데이터베이스 쿼리 모듈
//!
//! 출석 세션 저장과 저장된 이력 수정을 담당합니다.
//! 두 작업 모두 여러 SQL 문으로 이루어지므로 하나의 트랜잭션으로 묶습니다.
//! 중간에 실패하면 트랜잭션이 drop되면서 자동으로 롤백됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{SqliteConnection, SqlitePool};

/// 출석 세션을 저장하고 새 세션 ID를 반환합니다.
///
/// ## 처리 흐름
/// 1. `attendance_sessions`에 새 행 삽입 (`mod_count = 0`)
/// 2. `records`의 학생별 상태를 요청 순서대로 `attendance_records`에 삽입 (null 상태 포함)
/// 3. 해당 반의 모든 학생 `status`를 NULL로 초기화
///
/// 1단계가 실패하면(예: 같은 반에 같은 세션 이름이 이미 있음) 2, 3단계는 실행되지 않습니다.
pub async fn save_session(pool: &SqlitePool, req: &SaveSessionRequest) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;

    let session_id = sqlx::query(
        r#"
        INSERT INTO attendance_sessions (section_id, session_name, timestamp, mod_count)
        VALUES (?, ?, ?, 0)
        "#,
    )
    .bind(&req.section_id)
    .bind(&req.session_name)
    .bind(req.timestamp)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let entries = req
        .records
        .iter()
        .map(|(student_id, status)| (student_id.as_str(), status.as_deref()));
    insert_records(&mut tx, session_id, entries).await?;

    sqlx::query("UPDATE students SET status = NULL WHERE section_id = ?")
        .bind(&req.section_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(session_id)
}

/// 저장된 출석 세션의 기록을 통째로 교체합니다.
///
/// 기존 기록을 모두 지운 뒤 `records` 중 상태가 null이 아닌 항목만 다시 삽입하고,
/// `mod_count`를 클라이언트가 보낸 값으로 설정합니다 (서버에서 증가시키지 않음).
///
/// ## 반환값
/// - `Ok(Some(session_id))`: 수정 성공
/// - `Ok(None)`: `(section_id, session_name)`에 해당하는 세션이 없음 (아무것도 변경하지 않음)
pub async fn update_history(
    pool: &SqlitePool,
    req: &UpdateHistoryRequest,
) -> Result<Option<i64>, AppError> {
    let mut tx = pool.begin().await?;

    let session_id: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM attendance_sessions WHERE section_id = ? AND session_name = ?",
    )
    .bind(&req.section_id)
    .bind(&req.session_name)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(session_id) = session_id else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM attendance_records WHERE session_id = ?")
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

    // null 상태는 "체크 해제"이므로 행을 만들지 않음
    let entries = req.records.iter().filter_map(|(student_id, status)| {
        status
            .as_deref()
            .map(|status| (student_id.as_str(), Some(status)))
    });
    insert_records(&mut tx, session_id, entries).await?;

    sqlx::query("UPDATE attendance_sessions SET mod_count = ? WHERE id = ?")
        .bind(req.mod_count)
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(session_id))
}

/// 세션 하나에 `(학생 ID, 상태)` 기록을 순서대로 삽입하고, 삽입한 행 수를 반환합니다.
async fn insert_records<'a>(
    conn: &mut SqliteConnection,
    session_id: i64,
    entries: impl Iterator<Item = (&'a str, Option<&'a str>)>,
) -> Result<u64, AppError> {
    let mut inserted = 0;

    for (student_id, status) in entries {
        sqlx::query(
            "INSERT INTO attendance_records (session_id, student_id, status) VALUES (?, ?, ?)",
        )
        .bind(session_id)
        .bind(student_id)
        .bind(status)
        .execute(&mut *conn)
        .await?;

        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        add_student, create_section, delete_section, fetch_all, test_pool, update_student_status,
    };

    fn records(entries: &[(&str, Option<&str>)]) -> StatusMap {
        entries
            .iter()
            .map(|(id, status)| (id.to_string(), status.map(str::to_string)))
            .collect()
    }

    fn data(entries: &[(&str, &str)]) -> StatusMap {
        entries
            .iter()
            .map(|(id, status)| (id.to_string(), Some(status.to_string())))
            .collect()
    }

    /// 반 하나와 학생 두 명(s1, s2)이 있는 DB
    async fn seeded_pool() -> SqlitePool {
        let pool = test_pool().await;
        create_section(
            &pool,
            &CreateSectionRequest {
                id: "sec-1".to_string(),
                name: "Biology".to_string(),
                subject: None,
                created_at: 10,
            },
        )
        .await
        .unwrap();

        for (id, name) in [("s1", "Ann"), ("s2", "Ben")] {
            add_student(
                &pool,
                &AddStudentRequest {
                    id: id.to_string(),
                    section_id: "sec-1".to_string(),
                    name: name.to_string(),
                },
            )
            .await
            .unwrap();
        }
        pool
    }

    fn save_request(name: &str, timestamp: i64) -> SaveSessionRequest {
        SaveSessionRequest {
            section_id: "sec-1".to_string(),
            session_name: name.to_string(),
            timestamp,
            records: records(&[("s1", Some("present")), ("s2", Some("absent"))]),
        }
    }

    #[tokio::test]
    async fn saving_a_session_records_history_and_resets_statuses() {
        let pool = seeded_pool().await;
        update_student_status(&pool, "s1", Some("present")).await.unwrap();
        update_student_status(&pool, "s2", Some("absent")).await.unwrap();

        save_session(&pool, &save_request("Day 1", 1_700_000_000_000))
            .await
            .unwrap();

        let sections = fetch_all(&pool).await.unwrap();
        let entry = &sections[0].history["Day 1"];
        assert_eq!(entry.data, data(&[("s1", "present"), ("s2", "absent")]));
        assert_eq!(entry.mod_count, 0);
        assert_eq!(entry.timestamp, 1_700_000_000_000);
        assert!(sections[0].students.iter().all(|s| s.status.is_none()));
    }

    #[tokio::test]
    async fn duplicate_session_name_fails_without_side_effects() {
        let pool = seeded_pool().await;
        save_session(&pool, &save_request("Day 1", 1)).await.unwrap();
        update_student_status(&pool, "s1", Some("late")).await.unwrap();

        let err = save_session(&pool, &save_request("Day 1", 2)).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let sections = fetch_all(&pool).await.unwrap();
        assert_eq!(sections[0].history.len(), 1);
        assert_eq!(sections[0].history["Day 1"].timestamp, 1);
        assert_eq!(sections[0].students[0].status.as_deref(), Some("late"));
    }

    #[tokio::test]
    async fn update_history_replaces_records_and_sets_mod_count() {
        let pool = seeded_pool().await;
        save_session(&pool, &save_request("Day 1", 5)).await.unwrap();

        let updated = update_history(
            &pool,
            &UpdateHistoryRequest {
                section_id: "sec-1".to_string(),
                session_name: "Day 1".to_string(),
                records: records(&[("s1", Some("late")), ("s2", None)]),
                mod_count: 1,
            },
        )
        .await
        .unwrap();
        assert!(updated.is_some());

        let sections = fetch_all(&pool).await.unwrap();
        let entry = &sections[0].history["Day 1"];
        assert_eq!(entry.data, data(&[("s1", "late")]));
        assert_eq!(entry.mod_count, 1);
        assert_eq!(entry.timestamp, 5);
    }

    #[tokio::test]
    async fn update_history_uses_client_mod_count_verbatim() {
        let pool = seeded_pool().await;
        save_session(&pool, &save_request("Day 1", 5)).await.unwrap();

        let req = UpdateHistoryRequest {
            section_id: "sec-1".to_string(),
            session_name: "Day 1".to_string(),
            records: records(&[("s1", Some("present"))]),
            mod_count: 7,
        };
        update_history(&pool, &req).await.unwrap();

        let sections = fetch_all(&pool).await.unwrap();
        assert_eq!(sections[0].history["Day 1"].mod_count, 7);
    }

    #[tokio::test]
    async fn update_history_for_unknown_session_changes_nothing() {
        let pool = seeded_pool().await;
        save_session(&pool, &save_request("Day 1", 5)).await.unwrap();

        let result = update_history(
            &pool,
            &UpdateHistoryRequest {
                section_id: "sec-1".to_string(),
                session_name: "Day 2".to_string(),
                records: StatusMap::new(),
                mod_count: 3,
            },
        )
        .await
        .unwrap();
        assert!(result.is_none());

        let sections = fetch_all(&pool).await.unwrap();
        let entry = &sections[0].history["Day 1"];
        assert_eq!(entry.data.len(), 2);
        assert_eq!(entry.mod_count, 0);
    }

    #[tokio::test]
    async fn session_names_are_scoped_to_their_section() {
        let pool = seeded_pool().await;
        save_session(&pool, &save_request("Day 1", 5)).await.unwrap();

        let result = update_history(
            &pool,
            &UpdateHistoryRequest {
                section_id: "other".to_string(),
                session_name: "Day 1".to_string(),
                records: StatusMap::new(),
                mod_count: 1,
            },
        )
        .await
        .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn save_session_keeps_null_statuses() {
        let pool = seeded_pool().await;
        let req = SaveSessionRequest {
            section_id: "sec-1".to_string(),
            session_name: "Day 1".to_string(),
            timestamp: 5,
            records: records(&[("s1", None), ("s2", Some("present"))]),
        };
        save_session(&pool, &req).await.unwrap();

        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_records")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, 2);

        let sections = fetch_all(&pool).await.unwrap();
        let entry = &sections[0].history["Day 1"];
        assert_eq!(entry.data, records(&[("s1", None), ("s2", Some("present"))]));
    }

    #[tokio::test]
    async fn history_is_ordered_by_timestamp_descending() {
        let pool = seeded_pool().await;
        for (name, timestamp) in [("Zeta", 100), ("Alpha", 300), ("Mid", 200), ("Nulls", 50)] {
            save_session(&pool, &save_request(name, timestamp)).await.unwrap();
        }

        let sections = fetch_all(&pool).await.unwrap();
        let names: Vec<&str> = sections[0].history.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta", "Nulls"]);
    }

    #[tokio::test]
    async fn record_order_follows_the_request() {
        let pool = seeded_pool().await;
        let req = SaveSessionRequest {
            section_id: "sec-1".to_string(),
            session_name: "Day 1".to_string(),
            timestamp: 5,
            records: records(&[("s2", Some("absent")), ("s1", Some("present"))]),
        };
        save_session(&pool, &req).await.unwrap();

        let sections = fetch_all(&pool).await.unwrap();
        let ids: Vec<&str> = sections[0].history["Day 1"]
            .data
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(ids, vec!["s2", "s1"]);
    }

    #[tokio::test]
    async fn deleting_a_section_cascades_to_everything_it_owns() {
        let pool = seeded_pool().await;
        save_session(&pool, &save_request("Day 1", 5)).await.unwrap();

        assert_eq!(delete_section(&pool, "sec-1").await.unwrap(), 1);
        assert!(fetch_all(&pool).await.unwrap().is_empty());

        for table in ["students", "attendance_sessions", "attendance_records"] {
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(count, 0, "{table} should be empty");
        }
    }
}
