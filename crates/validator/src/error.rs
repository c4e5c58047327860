//! 검증기 에러 타입
//!
//! [`ValidatorError`]는 로그 수집과 검증 세션에서 발생하는 에러를 표현합니다.
//! 검증 엔진 자체는 에러를 반환하지 않으며, 검증 실패는
//! [`Verdict`](crate::verdict::Verdict) 값으로 표현됩니다.
//! `From<ValidatorError> for LogwardenError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use logwarden_core::error::LogwardenError;

use crate::verdict::FailureReason;

/// 검증기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// 검증 실패 (진단은 이미 출력됨)
    #[error("errors found while running validations: {}", format_reasons(reasons))]
    ValidationFailed {
        /// 실패한 단계의 사유
        reasons: Vec<FailureReason>,
    },

    /// 로그 수집 실패 (파일 읽기, 결과 파싱 등)
    #[error("collector error: {source_type}: {reason}")]
    Collector {
        /// 수집 소스 유형 (lines, results 등)
        source_type: String,
        /// 에러 사유
        reason: String,
    },

    /// 설정 로딩 실패
    #[error("config error: {0}")]
    Config(#[from] LogwardenError),
}

fn format_reasons(reasons: &[FailureReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ValidatorError> for LogwardenError {
    fn from(err: ValidatorError) -> Self {
        match err {
            ValidatorError::Config(inner) => inner,
            other => LogwardenError::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_lists_reasons() {
        let err = ValidatorError::ValidationFailed {
            reasons: vec![FailureReason::LimitExceeded, FailureReason::UnknownMessages],
        };
        let msg = err.to_string();
        assert!(msg.contains("exceeded declared limits"));
        assert!(msg.contains("unknown log messages found"));
    }

    #[test]
    fn collector_error_display() {
        let err = ValidatorError::Collector {
            source_type: "results".to_owned(),
            reason: "expected an array".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("results"));
        assert!(msg.contains("expected an array"));
    }

    #[test]
    fn validation_failure_converts_to_top_level() {
        let err: LogwardenError = ValidatorError::ValidationFailed {
            reasons: vec![FailureReason::Outdated],
        }
        .into();
        assert!(matches!(err, LogwardenError::Validation(_)));
    }

    #[test]
    fn collector_failure_converts_to_validation() {
        let err: LogwardenError = ValidatorError::Collector {
            source_type: "lines".to_owned(),
            reason: "run.log: permission denied".to_owned(),
        }
        .into();
        match err {
            LogwardenError::Validation(msg) => assert!(msg.contains("run.log")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn config_error_unwraps_into_top_level() {
        use logwarden_core::error::ConfigError;

        let inner = LogwardenError::Config(ConfigError::FileNotFound {
            path: "x.json".to_owned(),
        });
        let err: LogwardenError = ValidatorError::Config(inner).into();
        assert!(matches!(
            err,
            LogwardenError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
