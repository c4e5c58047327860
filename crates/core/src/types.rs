//! 도메인 타입 -- 로그 검증 규칙 정의
//!
//! 설정 파일에서 역직렬화되는 규칙 구조체들입니다.
//! 두 규칙 모두 패턴 목록을 AND 조건으로 사용합니다.

use serde::{Deserialize, Serialize};

/// 패턴 목록을 가진 규칙의 공통 인터페이스
///
/// 매처는 이 trait만 보고 규칙 적용 여부를 판단합니다.
pub trait PatternSet {
    /// 매칭에 사용할 패턴 목록 (모두 포함되어야 매칭)
    fn patterns(&self) -> &[String];

    /// 진단 출력용 패턴 표현 (`"a", "b"`)
    fn display_patterns(&self) -> String {
        self.patterns()
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 로그 검증 규칙 -- 한 번의 실행에서 허용되는 매칭 메시지 최대 개수
///
/// # JSON 스키마
/// ```json
/// {
///   "patterns": ["Each child in a list should have a unique"],
///   "max": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogValidation {
    /// 매칭 패턴 (AND 결합, 최소 1개)
    pub patterns: Vec<String>,
    /// 허용되는 최대 매칭 횟수 (포함)
    pub max: u64,
}

impl LogValidation {
    /// 새 검증 규칙을 생성합니다.
    pub fn new<I, S>(patterns: I, max: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            max,
        }
    }
}

impl PatternSet for LogValidation {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// 예외 규칙 -- 알 수 없는 메시지 판정에서만 제외되며 개수 제한이 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptLog {
    /// 매칭 패턴 (AND 결합, 최소 1개)
    pub patterns: Vec<String>,
}

impl ExemptLog {
    /// 새 예외 규칙을 생성합니다.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

impl PatternSet for ExemptLog {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_validation_from_json() {
        let json = r#"{"patterns": ["`wait` has been deprecated"], "max": 1}"#;
        let rule: LogValidation = serde_json::from_str(json).unwrap();
        assert_eq!(rule.patterns, vec!["`wait` has been deprecated"]);
        assert_eq!(rule.max, 1);
    }

    #[test]
    fn negative_max_is_rejected_by_deserializer() {
        let json = r#"{"patterns": ["x"], "max": -1}"#;
        assert!(serde_json::from_str::<LogValidation>(json).is_err());
    }

    #[test]
    fn display_patterns_quotes_each_pattern() {
        let rule = LogValidation::new(["Warning:", "unique \"key\""], 0);
        assert_eq!(rule.display_patterns(), r#""Warning:", "unique "key"""#);
    }

    #[test]
    fn exempt_log_exposes_patterns() {
        let exempt = ExemptLog::new(["Error: Uncaught"]);
        assert_eq!(exempt.patterns(), ["Error: Uncaught".to_owned()]);
    }
}
