//! 메트릭 상수
//!
//! 모든 메트릭의 이름과 레이블 키를 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 레코더가 설치되지 않으면 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logwarden_`
//! - 모듈명: `validator_`, `collector_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(logwarden_core::metrics::VALIDATOR_RUNS_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 검증 단계 레이블 키 (limit_exceeded, outdated, unknown_messages)
pub const LABEL_PHASE: &str = "phase";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

// ─── Validator 메트릭 ──────────────────────────────────────────────

/// Validator: 검증 실행 수 (counter, label: result)
pub const VALIDATOR_RUNS_TOTAL: &str = "logwarden_validator_runs_total";

/// Validator: 검증한 메시지 수 (counter)
pub const VALIDATOR_MESSAGES_TOTAL: &str = "logwarden_validator_messages_total";

/// Validator: 규칙 매칭 수 (counter)
pub const VALIDATOR_RULE_MATCHES_TOTAL: &str = "logwarden_validator_rule_matches_total";

/// Validator: 실패한 검증 단계 수 (counter, label: phase)
pub const VALIDATOR_PHASE_FAILURES_TOTAL: &str = "logwarden_validator_phase_failures_total";

/// Validator: 검증 소요 시간 (histogram, 초)
pub const VALIDATOR_DURATION_SECONDS: &str = "logwarden_validator_duration_seconds";

// ─── Collector 메트릭 ──────────────────────────────────────────────

/// Collector: 수집된 콘솔 메시지 수 (counter)
pub const COLLECTOR_MESSAGES_TOTAL: &str = "logwarden_collector_messages_total";

/// Collector: 처리한 테스트 결과 수 (counter)
pub const COLLECTOR_TEST_RESULTS_TOTAL: &str = "logwarden_collector_test_results_total";
