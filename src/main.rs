//! # 출석 관리 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 + 마이그레이션 실행
//! 4. 라우터 구성 (단일 API 엔드포인트, 헬스체크, 정적 파일)
//! 5. HTTP 서버 시작

mod config;
mod db;
mod error;
mod models;
mod routes;

use anyhow::Result;
use config::Config;
use routes::{build_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 attendance, tower_http, axum 모듈을 debug 레벨로 출력
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendance=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting attendance server on {}:{}", config.host, config.port);

    // DB에 연결할 수 없으면 라우팅을 시작하기 전에 종료합니다.
    let pool = db::connect(&config.database_url, config.max_connections).await?;

    let state = AppState { pool };
    let app = build_app(state, Some(config.frontend_dir.as_str()));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
