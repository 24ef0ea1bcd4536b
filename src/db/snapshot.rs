//! # 전체 데이터 스냅샷 조회
//!
//! `get_data` 액션이 반환하는 전체 데이터(반 + 학생 + 출석 이력)를 만듭니다.
//!
//! 반마다 학생/세션/기록을 따로 조회하면(N+1 쿼리) 왕복 횟수가 데이터 크기에 비례해
//! 늘어나므로, 테이블마다 한 번씩 총 4번 조회한 뒤 메모리에서 묶습니다.
//!
//! ```text
//! sections ──┬── students            (section_id)
//!            └── attendance_sessions (section_id) ── attendance_records (session_id)
//! ```

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;
use std::collections::HashMap;

/// 모든 반을 학생 목록, 출석 이력과 함께 조회합니다.
///
/// ## 정렬 규칙
/// - 반: `created_at` 내림차순 (최신 반이 먼저)
/// - 학생: 반 안에서 이름 오름차순
/// - 이력: 세션 이름을 키로 하는 맵, 세션 `timestamp` 내림차순
/// - 세션 안의 기록: 저장된 순서 (`attendance_records.id`)
///
/// 네 번의 조회는 풀에서 빌린 연결 하나로 실행하며,
/// 함수가 끝나면 연결은 자동으로 풀에 반환됩니다.
pub async fn fetch_all(pool: &SqlitePool) -> Result<Vec<SectionSnapshot>, AppError> {
    let mut conn = pool.acquire().await?;

    let sections = sqlx::query_as::<_, Section>(
        r#"
        SELECT id, name, subject, is_locked, last_saved_date, created_at
        FROM sections
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, section_id, name, status
        FROM students
        ORDER BY name ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let sessions = sqlx::query_as::<_, AttendanceSession>(
        r#"
        SELECT id, section_id, session_name, timestamp, mod_count
        FROM attendance_sessions
        ORDER BY timestamp DESC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT session_id, student_id, status FROM attendance_records ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(assemble(sections, students, sessions, records))
}

/// 테이블별 조회 결과를 반 단위 스냅샷으로 묶습니다.
///
/// 입력 순서(반/학생 정렬)는 그대로 유지됩니다.
/// 소속 반이나 세션을 찾을 수 없는 행은 건너뜁니다.
fn assemble(
    sections: Vec<Section>,
    students: Vec<Student>,
    sessions: Vec<AttendanceSession>,
    records: Vec<AttendanceRecord>,
) -> Vec<SectionSnapshot> {
    let index: HashMap<String, usize> = sections
        .iter()
        .enumerate()
        .map(|(i, section)| (section.id.clone(), i))
        .collect();

    let mut snapshots: Vec<SectionSnapshot> =
        sections.into_iter().map(SectionSnapshot::from_section).collect();

    for student in students {
        if let Some(&i) = index.get(&student.section_id) {
            snapshots[i].students.push(student.into());
        }
    }

    // session id → (반 위치, 세션 이름)
    let mut session_owner: HashMap<i64, (usize, String)> = HashMap::new();
    for session in &sessions {
        let Some(&i) = index.get(&session.section_id) else {
            continue;
        };
        snapshots[i]
            .history
            .entry(session.session_name.clone())
            .or_insert_with(|| HistoryEntry::from(session));
        session_owner.insert(session.id, (i, session.session_name.clone()));
    }

    for record in records {
        let Some((i, name)) = session_owner.get(&record.session_id) else {
            continue;
        };
        if let Some(entry) = snapshots[*i].history.get_mut(name) {
            entry.data.insert(record.student_id, record.status);
        }
    }

    snapshots
}
