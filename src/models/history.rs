//! # 출석 이력 모델 정의
//!
//! 출석 세션(한 번의 출석 체크)과 세션별 학생 출석 기록을 표현합니다.
//!
//! ## 이력 흐름
//! ```text
//! save_session   → 세션 생성 (mod_count = 0) + 기록 저장 + 학생 상태 초기화
//! update_history → 기록 전체 교체 + mod_count를 클라이언트 값으로 설정
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 출석 세션 엔티티 — DB의 `attendance_sessions` 테이블 한 행
///
/// `(section_id, session_name)` 조합은 UNIQUE 제약으로 유일성이 보장됩니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceSession {
    /// DB가 생성하는 정수 ID (AUTOINCREMENT)
    pub id: i64,
    pub section_id: String,
    pub session_name: String,
    /// 출석을 체크한 시각 (epoch milliseconds, 클라이언트 값)
    pub timestamp: i64,
    /// 저장 이후 수정된 횟수
    pub mod_count: i64,
}

/// 출석 기록 — DB의 `attendance_records` 테이블 한 행
///
/// `save_session`은 클라이언트가 보낸 null 상태도 그대로 저장하므로 `status`는 NULL일 수 있습니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub session_id: i64,
    pub student_id: String,
    pub status: Option<String>,
}

/// 학생 ID → 출석 상태. 키 순서는 저장된(요청에 들어온) 순서를 따릅니다.
pub type StatusMap = IndexMap<String, Option<String>>;

/// `get_data` 응답의 `history[sessionName]` 값
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// 학생 ID → 출석 상태
    pub data: StatusMap,
    pub mod_count: i64,
    pub timestamp: i64,
}

impl From<&AttendanceSession> for HistoryEntry {
    fn from(session: &AttendanceSession) -> Self {
        Self {
            data: StatusMap::new(),
            mod_count: session.mod_count,
            timestamp: session.timestamp,
        }
    }
}

/// 세션 저장 요청 — `action=save_session`
///
/// `records`의 항목은 값이 null이어도 모두 기록됩니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSessionRequest {
    pub section_id: String,
    pub session_name: String,
    pub timestamp: i64,
    #[serde(default)]
    pub records: StatusMap,
}

/// 이력 수정 요청 — `action=update_history`
///
/// 기록은 병합되지 않고 통째로 교체됩니다. 값이 null인 항목("체크 해제")은 저장하지 않습니다.
/// `modCount`는 클라이언트가 계산한 새 값이며 서버는 그대로 저장합니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistoryRequest {
    pub section_id: String,
    pub session_name: String,
    #[serde(default)]
    pub records: StatusMap,
    pub mod_count: i64,
}
