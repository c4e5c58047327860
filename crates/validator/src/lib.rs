//! logwarden 검증기 크레이트
//!
//! 테스트 실행 중 캡처된 콘솔 메시지를 선언된 규칙과 대조하여
//! 한도 초과, 오래된 규칙, 알 수 없는 메시지를 찾아냅니다.
//!
//! # 모듈 구성
//!
//! - [`matcher`]: 부분 문자열 AND 매칭
//! - [`engine`]: 카운트 벡터와 3단계 검증 (한도 초과 / 오래된 규칙 / 알 수 없는 메시지)
//! - [`verdict`]: 검증 판정과 실패 사유
//! - [`report`]: 진단 출력 싱크
//! - [`collector`]: 테스트 결과에서 콘솔 메시지 수집
//! - [`reporter`]: 테스트 러너 수명주기에 검증 연결
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! TestResult -> LogCollector -> Validator -> Verdict
//!                                  |
//!                    ConfigLoader  +-> ReportSink (진단)
//! ```

pub mod collector;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod report;
pub mod reporter;
pub mod verdict;

// --- 주요 타입 re-export ---

// 엔진
pub use engine::count::CountVector;
pub use engine::phase::{ExceededRule, OutdatedRule};
pub use engine::{PhasePolicy, ValidationOutcome, Validator, validate};

// 판정
pub use verdict::{FailureReason, Verdict};

// 에러
pub use error::ValidatorError;

// 진단 출력
pub use report::{RecordingSink, ReportEvent, ReportSink, TracingSink};

// 수집
pub use collector::{ConsoleEntry, LogCollector, TestResult};
pub use reporter::ReporterSession;
