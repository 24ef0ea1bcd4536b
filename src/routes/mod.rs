//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 모든 출석 관리 기능은 하나의 엔드포인트(`/api`)로 들어오고,
//! `action` 파라미터 값에 따라 알맞은 핸들러로 분기됩니다.
//!
//! 각 하위 모듈:
//! - `api`: `action` 파싱과 분기(dispatch)
//! - `sections`: 반 관련 액션 + 전체 데이터 조회
//! - `students`: 학생 관련 액션
//! - `history`: 출석 세션 저장과 이력 수정
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod api;
pub mod health;
pub mod history;
pub mod sections;
pub mod students;

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
        HeaderValue, Method,
    },
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// 모든 핸들러가 공유하는 애플리케이션 상태
///
/// `SqlitePool`은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
/// 요청마다 풀에서 연결을 빌려 쓰고, 요청이 끝나면 반환합니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// 성공 응답 `{ "success": true }`
pub fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// 전체 애플리케이션 라우터를 구성합니다.
///
/// - `/api`, `/api.php`: 모든 HTTP 메서드를 받아 `action`으로 분기
/// - `/health`: 헬스체크
/// - `frontend_dir`가 존재하면 나머지 경로는 정적 파일로 서빙 (없는 경로는 index.html)
///
/// 모든 응답(preflight가 아닌 요청, `Origin` 헤더가 없는 요청 포함)에
/// `Access-Control-Allow-Origin: *`, `Access-Control-Allow-Methods`,
/// `Access-Control-Allow-Headers` 헤더가 붙습니다.
pub fn build_app(state: AppState, frontend_dir: Option<&str>) -> Router {
    let api_routes = Router::new()
        .route("/api", any(api::dispatch))
        .route("/api.php", any(api::dispatch))
        .route("/health", get(health::health_check))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let app = match frontend_dir {
        Some(dir) if Path::new(dir).exists() => {
            tracing::info!("Serving frontend static files from {}", dir);

            let index = Path::new(dir).join("index.html");
            let serve_dir = ServeDir::new(dir).not_found_service(ServeFile::new(index));
            api_routes.fallback_service(serve_dir)
        }
        _ => {
            tracing::warn!("Frontend directory not found, serving API only");
            api_routes
        }
    };

    // CorsLayer는 preflight에만 methods/headers를 붙이므로 일반 응답에도 고정으로 추가
    app.layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
}
