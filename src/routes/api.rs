//! # 액션 분기(dispatch) 핸들러
//!
//! 클라이언트는 항상 같은 엔드포인트를 호출하고, `action` 값으로 작업을 고릅니다.
//!
//! ## 액션 목록
//! | action | 요청 본문 | 핸들러 |
//! |--------|-----------|--------|
//! | `get_data` | 없음 | `sections::get_data` |
//! | `create_section` | `{ id, name, subject?, createdAt }` | `sections::create_section` |
//! | `update_section` | `{ id, isLocked?, lastSavedDate? }` | `sections::update_section` |
//! | `delete_section` | `{ id }` | `sections::delete_section` |
//! | `add_student` | `{ id, sectionId, name }` | `students::add_student` |
//! | `remove_student` | `{ id }` | `students::remove_student` |
//! | `update_student_status` | `{ id, status }` | `students::update_student_status` |
//! | `save_session` | `{ sectionId, sessionName, timestamp, records }` | `history::save_session` |
//! | `update_history` | `{ sectionId, sessionName, records, modCount }` | `history::update_history` |
//!
//! `action`은 쿼리 스트링(`/api?action=get_data`)에서 먼저 찾고,
//! 없으면 form 본문(urlencoded 또는 multipart)의 `action` 필드에서 찾습니다.

use super::{history, sections, students, AppState};
use crate::error::AppError;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Multipart, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, Uri},
    response::{IntoResponse, Response},
    Form,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::str::FromStr;

/// 지원하는 액션 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetData,
    CreateSection,
    UpdateSection,
    DeleteSection,
    AddStudent,
    RemoveStudent,
    UpdateStudentStatus,
    SaveSession,
    UpdateHistory,
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get_data" => Ok(Self::GetData),
            "create_section" => Ok(Self::CreateSection),
            "update_section" => Ok(Self::UpdateSection),
            "delete_section" => Ok(Self::DeleteSection),
            "add_student" => Ok(Self::AddStudent),
            "remove_student" => Ok(Self::RemoveStudent),
            "update_student_status" => Ok(Self::UpdateStudentStatus),
            "save_session" => Ok(Self::SaveSession),
            "update_history" => Ok(Self::UpdateHistory),
            _ => Err(AppError::InvalidAction),
        }
    }
}

/// 쿼리 스트링 또는 form 본문의 `action` 필드
#[derive(Debug, Deserialize)]
pub struct ActionParams {
    pub action: Option<String>,
}

/// `/api` — 모든 요청의 진입점.
///
/// HTTP 메서드와 관계없이 `action`만 보고 분기합니다.
/// 알 수 없는 액션이면 `{ success: false, error: "Invalid action" }`을 반환합니다.
pub async fn dispatch(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let action = match action_from_query(&uri) {
        Some(action) => Some(action),
        None => action_from_form(&headers, &body).await,
    };

    let action: Action = action.as_deref().unwrap_or_default().parse()?;
    tracing::debug!(?action, "Dispatching request");

    let response = match action {
        Action::GetData => sections::get_data(&state).await?.into_response(),
        Action::CreateSection => sections::create_section(&state, parse_body(&body)?)
            .await?
            .into_response(),
        Action::UpdateSection => sections::update_section(&state, parse_body(&body)?)
            .await?
            .into_response(),
        Action::DeleteSection => sections::delete_section(&state, parse_body(&body)?)
            .await?
            .into_response(),
        Action::AddStudent => students::add_student(&state, parse_body(&body)?)
            .await?
            .into_response(),
        Action::RemoveStudent => students::remove_student(&state, parse_body(&body)?)
            .await?
            .into_response(),
        Action::UpdateStudentStatus => students::update_student_status(&state, parse_body(&body)?)
            .await?
            .into_response(),
        Action::SaveSession => history::save_session(&state, parse_body(&body)?)
            .await?
            .into_response(),
        Action::UpdateHistory => history::update_history(&state, parse_body(&body)?)
            .await?
            .into_response(),
    };

    Ok(response)
}

fn action_from_query(uri: &Uri) -> Option<String> {
    Query::<ActionParams>::try_from_uri(uri)
        .ok()
        .and_then(|Query(params)| params.action)
}

/// form 본문에서 `action`을 찾습니다.
///
/// `application/x-www-form-urlencoded`와 `multipart/form-data`만 읽고,
/// 다른 형식이거나 필드가 없으면 `None`을 반환합니다.
async fn action_from_form(headers: &HeaderMap, body: &Bytes) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let urlencoded = content_type.starts_with("application/x-www-form-urlencoded");
    let multipart = content_type.starts_with("multipart/form-data");
    if !urlencoded && !multipart {
        return None;
    }

    // Form 추출기는 POST 요청의 본문만 읽으므로 메서드를 POST로 고정해 다시 만듭니다.
    let request = Request::builder()
        .method(Method::POST)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.clone()))
        .ok()?;

    if urlencoded {
        return Form::<ActionParams>::from_request(request, &())
            .await
            .ok()
            .and_then(|Form(params)| params.action);
    }

    let mut multipart = Multipart::from_request(request, &()).await.ok()?;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("action") {
            return field.text().await.ok();
        }
    }
    None
}

/// 요청 본문(JSON)을 액션별 요청 구조체로 파싱합니다.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}
