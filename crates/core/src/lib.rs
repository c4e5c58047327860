//! logwarden 공통 크레이트
//!
//! 테스트 실행 중 수집된 콘솔 로그를 검증하는 데 필요한
//! 공통 타입, 에러, 설정, 스키마 검증을 제공합니다.
//!
//! # 모듈 구성
//!
//! - [`types`]: 검증 규칙 / 예외 규칙 데이터 타입
//! - [`config`]: 설정 탐색, 병합, 파싱, 환경변수 오버라이드
//! - [`schema`]: 병합된 설정 값의 스키마 검증
//! - [`error`]: 도메인 에러 타입
//! - [`metrics`]: 메트릭 이름 상수

pub mod config;
pub mod error;
pub mod metrics;
pub mod schema;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, LogwardenError};

// 설정
pub use config::{ConfigLoader, ValidatorConfig};

// 스키마
pub use schema::SchemaReport;

// 도메인 타입
pub use types::{ExemptLog, LogValidation, PatternSet};
