//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `section`: 반(Section)과 `get_data` 응답의 반 스냅샷
//! - `student`: 학생
//! - `history`: 출석 세션과 출석 기록
//!
//! 요청 본문 구조체는 클라이언트 형식에 맞춰 camelCase 키를 사용합니다.

pub mod history;
pub mod section;
pub mod student;

pub use history::*;
pub use section::*;
pub use student::*;
