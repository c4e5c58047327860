//! 검증 판정 타입

use std::fmt;

use serde::Serialize;

use crate::error::ValidatorError;

/// 검증 단계별 실패 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// 하나 이상의 규칙이 선언된 최대값보다 많이 매칭됨
    LimitExceeded,
    /// 하나 이상의 규칙이 실제 관측값보다 큰 최대값을 선언함
    Outdated,
    /// 어떤 규칙이나 예외 규칙에도 매칭되지 않는 메시지가 있음
    UnknownMessages,
}

impl FailureReason {
    /// 메트릭 레이블 값
    pub fn as_label(self) -> &'static str {
        match self {
            Self::LimitExceeded => "limit_exceeded",
            Self::Outdated => "outdated",
            Self::UnknownMessages => "unknown_messages",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::LimitExceeded => "log validations exceeded declared limits",
            Self::Outdated => "log validations outdated",
            Self::UnknownMessages => "unknown log messages found",
        };
        f.write_str(text)
    }
}

/// 한 번의 검증 호출 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reasons", rename_all = "snake_case")]
pub enum Verdict {
    /// 모든 단계 통과
    Success,
    /// 실패한 단계의 사유 (단계 실행 순서)
    Failure(Vec<FailureReason>),
}

impl Verdict {
    /// 사유 목록으로 판정을 만듭니다. 사유가 없으면 성공입니다.
    pub fn from_reasons(reasons: Vec<FailureReason>) -> Self {
        if reasons.is_empty() {
            Self::Success
        } else {
            Self::Failure(reasons)
        }
    }

    /// 성공 여부
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// 실패 사유 목록 (성공이면 빈 슬라이스)
    pub fn reasons(&self) -> &[FailureReason] {
        match self {
            Self::Success => &[],
            Self::Failure(reasons) => reasons,
        }
    }

    /// 실패를 [`ValidatorError::ValidationFailed`]로 변환합니다.
    pub fn into_result(self) -> Result<(), ValidatorError> {
        match self {
            Self::Success => Ok(()),
            Self::Failure(reasons) => Err(ValidatorError::ValidationFailed { reasons }),
        }
    }
}
