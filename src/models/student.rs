//! # 학생 모델 정의

use serde::{Deserialize, Serialize};

/// 학생 엔티티 — DB의 `students` 테이블 한 행에 대응합니다.
///
/// `created_at`(서버가 기록한 추가 시각)은 응답에 쓰이지 않으므로 조회하지 않습니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Student {
    pub id: String,
    /// 소속 반 ID (외래키)
    pub section_id: String,
    pub name: String,
    /// 진행 중인 출석 체크 상태 (예: "present").
    /// 세션을 저장하면 NULL로 초기화됩니다.
    pub status: Option<String>,
}

/// `get_data` 응답에 들어가는 학생 정보
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentEntry {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
}

impl From<Student> for StudentEntry {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            status: student.status,
        }
    }
}

/// 학생 추가 요청 — `action=add_student`
///
/// `createdAt`은 받지 않습니다. 서버가 현재 시각으로 채웁니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStudentRequest {
    pub id: String,
    pub section_id: String,
    pub name: String,
}

/// 학생 출석 상태 변경 요청 — `action=update_student_status`
///
/// `status`가 null이면 상태를 지웁니다.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentStatusRequest {
    pub id: String,
    pub status: Option<String>,
}
