//! # 반(Section) 모델 정의
//!
//! 출석을 관리하는 단위인 반(class)과 관련된 구조체들입니다.
//!
//! ## 구조체 역할
//! - `Section`: DB의 `sections` 테이블 한 행
//! - `SectionSnapshot`: `get_data` 응답에 들어가는 반 하나 (학생 목록 + 출석 이력 포함)
//! - `DataResponse`: `get_data` 응답 본문
//! - `CreateSectionRequest` / `UpdateSectionRequest` / `IdRequest`: 요청 본문

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::{HistoryEntry, StudentEntry};

/// 반 엔티티 — DB의 `sections` 테이블 한 행(row)에 대응합니다.
///
/// `is_locked`는 SQLite에서 INTEGER(0/1)로 저장되지만,
/// sqlx가 `bool`로 자동 변환해 줍니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Section {
    /// 클라이언트가 생성한 식별자
    pub id: String,
    pub name: String,
    pub subject: Option<String>,
    pub is_locked: bool,
    /// 마지막으로 출석을 저장한 날짜 (클라이언트가 정한 문자열 형식)
    pub last_saved_date: Option<String>,
    /// 생성 시각 (epoch milliseconds)
    pub created_at: i64,
}

/// `get_data` 응답의 반 하나.
///
/// 클라이언트가 camelCase 키를 기대하므로 `rename_all = "camelCase"`를 사용합니다.
/// 예: `is_locked` → `"isLocked"`, `last_saved_date` → `"lastSavedDate"`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSnapshot {
    pub id: String,
    pub name: String,
    pub subject: Option<String>,
    /// 이름 오름차순으로 정렬된 학생 목록
    pub students: Vec<StudentEntry>,
    /// 세션 이름 → 세션 기록 (세션 시각 내림차순)
    pub history: IndexMap<String, HistoryEntry>,
    pub is_locked: bool,
    pub last_saved_date: Option<String>,
    pub created_at: i64,
}

impl SectionSnapshot {
    /// 학생/이력이 비어 있는 스냅샷을 만듭니다. 학생과 이력은 나중에 채워집니다.
    pub fn from_section(section: Section) -> Self {
        Self {
            id: section.id,
            name: section.name,
            subject: section.subject,
            students: Vec::new(),
            history: IndexMap::new(),
            is_locked: section.is_locked,
            last_saved_date: section.last_saved_date,
            created_at: section.created_at,
        }
    }
}

/// 반 생성 요청 — `action=create_section`의 요청 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    pub id: String,
    pub name: String,
    /// 생략하면 빈 문자열로 저장됩니다.
    pub subject: Option<String>,
    pub created_at: i64,
}

/// 반 수정 요청 — `action=update_section`의 요청 본문
///
/// 두 필드 모두 선택 항목입니다. 값이 있는(non-null) 필드만 각각 별도의
/// UPDATE 문으로 반영되고, 빠진 필드는 그대로 유지됩니다.
/// `isLocked`는 `true`/`false`와 `1`/`0` 모두 받습니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    pub id: String,
    #[serde(default, deserialize_with = "bool_or_int")]
    pub is_locked: Option<bool>,
    pub last_saved_date: Option<String>,
}

/// JSON bool 또는 정수(0이 아니면 true)를 `Option<bool>`로 읽습니다.
fn bool_or_int<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    }))
}

/// `get_data` 응답 본문 `{ success: true, sections: [...] }`
///
/// `serde_json::Value`를 거치면 맵 키가 정렬되므로 구조체로 직접 직렬화해
/// 이력의 세션 순서를 유지합니다.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub sections: Vec<SectionSnapshot>,
}

/// `id` 하나만 담은 요청 본문 (`delete_section`, `remove_student`)
#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub id: String,
}
