//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `sections`: 반 생성/수정/삭제
//! - `students`: 학생 추가/삭제, 출석 상태 변경
//! - `history`: 출석 세션 저장, 저장된 이력 수정
//! - `snapshot`: 전체 데이터 조회 (`get_data`)

pub mod history;
pub mod sections;
pub mod snapshot;
pub mod students;

pub use history::*;
pub use sections::*;
pub use snapshot::*;
pub use students::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// 연결 풀을 만들고 마이그레이션을 적용합니다.
///
/// DB 파일(과 상위 디렉토리)이 없으면 새로 만듭니다.
/// 연결에 실패하면 서버는 시작되지 않습니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // 예: sqlite:data/attendance.db → data/ 디렉토리가 없으면 생성
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            tracing::info!("Created database directory: {}", parent.display());
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// 테스트용 인메모리 DB.
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 1개로 제한합니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    connect("sqlite::memory:", 1)
        .await
        .expect("in-memory database should open")
}
