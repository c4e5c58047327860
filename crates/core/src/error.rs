//! 에러 타입 -- 도메인별 에러 정의

/// logwarden 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogwardenError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 검증 세션 에러
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config from {source_name}: {reason}")]
    ParseFailed { source_name: String, reason: String },

    /// 스키마 검증 실패 (모든 위반 사항을 담습니다)
    #[error("config does not match schema: {}", errors.join("; "))]
    Schema { errors: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_violation() {
        let err = ConfigError::Schema {
            errors: vec![
                "logValidations[0].patterns is required".to_owned(),
                "logValidations[1].max is required".to_owned(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("logValidations[0].patterns"));
        assert!(msg.contains("logValidations[1].max"));
    }

    #[test]
    fn parse_failed_names_source() {
        let err = ConfigError::ParseFailed {
            source_name: "package.json".to_owned(),
            reason: "expected value at line 1".to_owned(),
        };
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn config_error_converts_to_top_level() {
        let err: LogwardenError = ConfigError::FileNotFound {
            path: "logwarden.json".to_owned(),
        }
        .into();
        assert!(matches!(err, LogwardenError::Config(_)));
        assert!(err.to_string().contains("logwarden.json"));
    }

    #[test]
    fn io_error_converts_to_top_level() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LogwardenError = io_err.into();
        assert!(matches!(err, LogwardenError::Io(_)));
    }
}
