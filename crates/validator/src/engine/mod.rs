//! 3단계 검증 엔진
//!
//! 수집된 메시지와 설정을 받아 다음 단계를 순서대로 실행합니다.
//!
//! 1. 한도 초과 검사 (항상 실행)
//! 2. 오래된 규칙 검사 (`failIfLogValidationsOutdated`가 켜진 경우)
//! 3. 알 수 없는 메시지 검사 (`failIfUnknownLogsFound`가 켜진 경우)
//!
//! 실패한 단계마다 [`ReportSink`]로 진단을 출력하고,
//! 전체 결과를 하나의 [`Verdict`]로 돌려줍니다.
//!
//! # 사용 예시
//!
//! ```ignore
//! let mut sink = RecordingSink::new();
//! let outcome = Validator::new().run(&config, &messages, &mut sink);
//! outcome.verdict.into_result()?;
//! ```

pub mod count;
pub mod phase;

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use logwarden_core::config::ValidatorConfig;
use logwarden_core::metrics as m;

use crate::report::ReportSink;
use crate::verdict::{FailureReason, Verdict};

use count::CountVector;
use phase::{ExceededRule, OutdatedRule};

/// 실패한 단계를 만났을 때의 진행 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhasePolicy {
    /// 활성화된 모든 단계를 실행하고 실패 사유를 모읍니다.
    #[default]
    Aggregate,
    /// 첫 번째로 실패한 단계에서 멈춥니다.
    StopAtFirstFailure,
}

/// 한 번의 검증 호출이 만든 전체 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// 최종 판정
    pub verdict: Verdict,
    /// 규칙별 매칭 횟수
    pub counts: CountVector,
    /// 한도를 넘은 규칙 (첫 초과 순서)
    pub exceeded: Vec<ExceededRule>,
    /// 최대값을 낮춰야 하는 규칙 (단계가 실행되지 않았으면 비어 있음)
    pub outdated: Vec<OutdatedRule>,
    /// 선언되지 않은 메시지 (단계가 실행되지 않았으면 비어 있음)
    pub unknown: Vec<String>,
}

/// 검증 엔진
///
/// 상태를 갖지 않으므로 같은 입력에 대해 항상 같은 결과와 진단을 만듭니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: PhasePolicy,
}

impl Validator {
    /// 기본 정책([`PhasePolicy::Aggregate`])으로 엔진을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 단계 진행 정책을 설정합니다.
    pub fn with_phase_policy(mut self, policy: PhasePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 현재 단계 진행 정책
    pub fn phase_policy(&self) -> PhasePolicy {
        self.policy
    }

    /// 검증을 실행합니다.
    ///
    /// 메시지 순서는 한도 초과 진단의 출력 순서와 알 수 없는 메시지의
    /// 출력 순서에만 영향을 주며, 판정에는 영향을 주지 않습니다.
    pub fn run<S: AsRef<str>>(
        &self,
        config: &ValidatorConfig,
        messages: &[S],
        sink: &mut dyn ReportSink,
    ) -> ValidationOutcome {
        let started = Instant::now();
        let rules = &config.log_validations;

        let counts = CountVector::tally(rules, messages);
        debug!(
            rules = rules.len(),
            messages = messages.len(),
            matches = counts.total_matches(),
            "counted rule matches"
        );

        let mut reasons = Vec::new();
        let mut outdated = Vec::new();
        let mut unknown = Vec::new();

        let exceeded = phase::limit_exceeded(rules, &counts);
        if !exceeded.is_empty() {
            phase::report_exceeded(&exceeded, sink);
            reasons.push(FailureReason::LimitExceeded);
        }

        if config.fail_if_log_validations_outdated && self.should_continue(&reasons) {
            outdated = phase::outdated(rules, &counts);
            if !outdated.is_empty() {
                phase::report_outdated(&outdated, sink);
                reasons.push(FailureReason::Outdated);
            }
        }

        if config.fail_if_unknown_logs_found && self.should_continue(&reasons) {
            unknown = phase::unknown_messages(rules, &config.exempt_logs, messages);
            if !unknown.is_empty() {
                phase::report_unknown(&unknown, sink);
                reasons.push(FailureReason::UnknownMessages);
            }
        }

        let verdict = Verdict::from_reasons(reasons);
        record_metrics(&verdict, messages.len(), &counts, started);

        match &verdict {
            Verdict::Success => info!(messages = messages.len(), "log validation passed"),
            Verdict::Failure(reasons) => {
                let labels: Vec<&str> = reasons.iter().map(|r| r.as_label()).collect();
                warn!(reasons = ?labels, "log validation failed");
            }
        }

        ValidationOutcome {
            verdict,
            counts,
            exceeded,
            outdated,
            unknown,
        }
    }

    fn should_continue(&self, reasons: &[FailureReason]) -> bool {
        match self.policy {
            PhasePolicy::Aggregate => true,
            PhasePolicy::StopAtFirstFailure => reasons.is_empty(),
        }
    }
}

/// 기본 정책으로 검증을 실행하고 판정만 반환합니다.
pub fn validate<S: AsRef<str>>(
    config: &ValidatorConfig,
    messages: &[S],
    sink: &mut dyn ReportSink,
) -> Verdict {
    Validator::new().run(config, messages, sink).verdict
}

fn record_metrics(verdict: &Verdict, messages: usize, counts: &CountVector, started: Instant) {
    let result = if verdict.is_success() {
        "success"
    } else {
        "failure"
    };
    metrics::counter!(m::VALIDATOR_RUNS_TOTAL, m::LABEL_RESULT => result).increment(1);
    metrics::counter!(m::VALIDATOR_MESSAGES_TOTAL).increment(messages as u64);
    metrics::counter!(m::VALIDATOR_RULE_MATCHES_TOTAL).increment(counts.total_matches());
    for reason in verdict.reasons() {
        metrics::counter!(m::VALIDATOR_PHASE_FAILURES_TOTAL, m::LABEL_PHASE => reason.as_label())
            .increment(1);
    }
    metrics::histogram!(m::VALIDATOR_DURATION_SECONDS).record(started.elapsed().as_secs_f64());
}
