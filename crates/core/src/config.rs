//! 설정 관리 -- 검증 규칙 설정 탐색, 병합, 파싱
//!
//! [`ValidatorConfig`]는 검증 엔진이 읽는 유일한 설정 값입니다.
//! 엔진은 이 값을 인자로 주입받으며, 파일 시스템을 직접 읽지 않습니다.
//!
//! # 설정 병합 우선순위 (뒤쪽이 우선)
//! 1. 기본값 (`Default` 구현)
//! 2. 가장 가까운 `package.json`의 `"jest-reporter-log-validator"` 키
//! 3. 테스트 러너 리포터 옵션
//! 4. 프로젝트 루트의 `.jest-reporter-log-validator-config.json`
//! 5. 환경변수 (`LOGWARDEN_FAIL_IF_UNKNOWN_LOGS_FOUND=true` 형식)
//!
//! 병합은 최상위 키 단위로 덮어씁니다 (배열은 합쳐지지 않습니다).
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logwarden_core::error::LogwardenError> {
//! use logwarden_core::config::{ConfigLoader, ValidatorConfig};
//!
//! // 프로젝트 루트에서 탐색 + 병합
//! let config = ConfigLoader::new("/path/to/project").load().await?;
//!
//! // 명시적 파일에서 로드
//! let config = ValidatorConfig::load("logwarden.toml").await?;
//!
//! // JSON 문자열에서 직접 파싱
//! let config = ValidatorConfig::parse_json(r#"{"logValidations": []}"#, "inline")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ConfigError, LogwardenError};
use crate::schema;
use crate::types::{ExemptLog, LogValidation};

/// `package.json` 안에서 설정을 담는 키
pub const PACKAGE_JSON_CONFIG_KEY: &str = "jest-reporter-log-validator";

/// 프로젝트 루트의 설정 파일 이름
pub const CONFIG_FILE_NAME: &str = ".jest-reporter-log-validator-config.json";

/// 매니페스트 파일 이름
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// 환경변수: 오래된 규칙 실패 여부
pub const ENV_FAIL_IF_OUTDATED: &str = "LOGWARDEN_FAIL_IF_LOG_VALIDATIONS_OUTDATED";

/// 환경변수: 알 수 없는 로그 실패 여부
pub const ENV_FAIL_IF_UNKNOWN: &str = "LOGWARDEN_FAIL_IF_UNKNOWN_LOGS_FOUND";

/// 로그 검증 설정
///
/// 와이어 형식의 키는 camelCase입니다 (`logValidations`, `exemptLogs` 등).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidatorConfig {
    /// 검증 규칙 목록 (순서는 보고 순서에만 영향)
    pub log_validations: Vec<LogValidation>,
    /// 선언된 최대값이 실제 관측값보다 크면 실패
    pub fail_if_log_validations_outdated: bool,
    /// 어떤 규칙에도 매칭되지 않는 메시지가 있으면 실패
    pub fail_if_unknown_logs_found: bool,
    /// 알 수 없는 메시지 판정에서 제외할 규칙
    pub exempt_logs: Vec<ExemptLog>,
}

impl ValidatorConfig {
    /// 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    ///
    /// 확장자가 `.toml`이면 TOML로, 그 외에는 JSON으로 파싱합니다.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        let path = path.as_ref();
        let content = read_config_file(path).await?;
        let source_name = path.display().to_string();

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        if is_toml {
            Self::parse_toml(&content, &source_name)
        } else {
            Self::parse_json(&content, &source_name)
        }
    }

    /// JSON 문자열에서 설정을 파싱합니다.
    pub fn parse_json(content: &str, source_name: &str) -> Result<Self, LogwardenError> {
        let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::ParseFailed {
            source_name: source_name.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_value(value, source_name)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse_toml(content: &str, source_name: &str) -> Result<Self, LogwardenError> {
        let value: Value = toml::from_str(content).map_err(|e| ConfigError::ParseFailed {
            source_name: source_name.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_value(value, source_name)
    }

    /// 스키마 검증 후 JSON 값을 타입이 있는 설정으로 변환합니다.
    pub fn from_value(value: Value, source_name: &str) -> Result<Self, LogwardenError> {
        let report = schema::check(&value);
        if !report.valid {
            return Err(ConfigError::Schema {
                errors: report.errors,
            }
            .into());
        }

        serde_json::from_value(value).map_err(|e| {
            ConfigError::ParseFailed {
                source_name: source_name.to_owned(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    pub fn apply_env_overrides(&mut self) {
        override_bool(
            &mut self.fail_if_log_validations_outdated,
            ENV_FAIL_IF_OUTDATED,
        );
        override_bool(&mut self.fail_if_unknown_logs_found, ENV_FAIL_IF_UNKNOWN);
    }

    /// 기본값을 JSON 객체로 반환합니다 (병합의 첫 번째 레이어).
    pub fn defaults_object() -> Map<String, Value> {
        match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// 설정 탐색기 -- 프로젝트 루트를 기준으로 설정 레이어를 찾아 병합합니다.
///
/// 프로젝트 루트는 항상 명시적으로 전달받습니다.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// 탐색 기준 디렉토리
    root: PathBuf,
    /// 리포터 옵션 레이어
    reporter_options: Map<String, Value>,
    /// 환경변수 오버라이드 적용 여부
    apply_env: bool,
}

impl ConfigLoader {
    /// 새 탐색기를 생성합니다.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            reporter_options: Map::new(),
            apply_env: true,
        }
    }

    /// 리포터 옵션 레이어를 설정합니다.
    pub fn with_reporter_options(mut self, options: Map<String, Value>) -> Self {
        self.reporter_options = options;
        self
    }

    /// 환경변수 오버라이드를 비활성화합니다.
    pub fn without_env_overrides(mut self) -> Self {
        self.apply_env = false;
        self
    }

    /// 탐색 기준 디렉토리를 반환합니다.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 모든 레이어를 병합한 JSON 값을 반환합니다 (스키마 검증 전).
    pub async fn merged_value(&self) -> Result<Value, LogwardenError> {
        let mut merged = ValidatorConfig::defaults_object();

        let manifest = self.manifest_layer().await?;
        let config_file = self.config_file_layer().await?;

        for layer in [manifest, self.reporter_options.clone(), config_file] {
            merged.extend(layer);
        }

        Ok(Value::Object(merged))
    }

    /// 레이어를 병합하고, 스키마를 검증하고, 환경변수를 적용합니다.
    pub async fn load(&self) -> Result<ValidatorConfig, LogwardenError> {
        let merged = self.merged_value().await?;
        let mut config = ValidatorConfig::from_value(merged, &self.root.display().to_string())?;
        if self.apply_env {
            config.apply_env_overrides();
        }

        debug!(
            root = %self.root.display(),
            rules = config.log_validations.len(),
            exempt = config.exempt_logs.len(),
            fail_if_outdated = config.fail_if_log_validations_outdated,
            fail_if_unknown = config.fail_if_unknown_logs_found,
            "loaded validator config"
        );

        Ok(config)
    }

    /// 루트에서 파일 시스템 루트까지 올라가며 가장 가까운 `package.json`을 찾습니다.
    ///
    /// 설정 키의 값이 객체가 아니면 빈 레이어로 취급합니다.
    async fn manifest_layer(&self) -> Result<Map<String, Value>, LogwardenError> {
        // 상대 경로 (`.`)의 parent()는 빈 경로에서 끝나므로 절대 경로로 바꿔서 올라갑니다.
        let root = absolute_root(&self.root).await;
        let mut dir = Some(root.as_path());

        while let Some(current) = dir {
            let manifest_path = current.join(MANIFEST_FILE_NAME);
            if path_exists(&manifest_path).await {
                let content = read_config_file(&manifest_path).await?;
                let manifest: Value =
                    serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                        source_name: manifest_path.display().to_string(),
                        reason: e.to_string(),
                    })?;

                debug!(path = %manifest_path.display(), "found manifest");

                return Ok(match manifest.get(PACKAGE_JSON_CONFIG_KEY) {
                    Some(Value::Object(options)) => options.clone(),
                    Some(other) => {
                        warn!(
                            path = %manifest_path.display(),
                            value = %other,
                            "manifest config key is not an object, ignoring"
                        );
                        Map::new()
                    }
                    None => Map::new(),
                });
            }
            dir = current.parent();
        }

        Ok(Map::new())
    }

    /// 프로젝트 루트의 설정 파일 레이어를 읽습니다. 빈 파일은 빈 레이어입니다.
    async fn config_file_layer(&self) -> Result<Map<String, Value>, LogwardenError> {
        let path = self.root.join(CONFIG_FILE_NAME);
        if !path_exists(&path).await {
            return Ok(Map::new());
        }

        let content = read_config_file(&path).await?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let source_name = path.display().to_string();
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => {
                debug!(path = %source_name, keys = map.len(), "found config file");
                Ok(map)
            }
            Ok(_) => Err(ConfigError::ParseFailed {
                source_name,
                reason: "config file must contain a JSON object".to_owned(),
            }
            .into()),
            Err(e) => Err(ConfigError::ParseFailed {
                source_name,
                reason: e.to_string(),
            }
            .into()),
        }
    }
}

async fn absolute_root(root: &Path) -> PathBuf {
    match tokio::fs::canonicalize(root).await {
        Ok(path) => path,
        Err(e) => {
            debug!(root = %root.display(), error = %e, "cannot canonicalize root, using as given");
            std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf())
        }
    }
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn read_config_file(path: &Path) -> Result<String, LogwardenError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LogwardenError::Config(ConfigError::FileNotFound {
                path: path.display().to_string(),
            })
        } else {
            LogwardenError::Io(e)
        }
    })
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = ValidatorConfig::default();
        assert!(config.log_validations.is_empty());
        assert!(!config.fail_if_log_validations_outdated);
        assert!(!config.fail_if_unknown_logs_found);
        assert!(config.exempt_logs.is_empty());
    }

    #[test]
    fn defaults_object_uses_camel_case_keys() {
        let defaults = ValidatorConfig::defaults_object();
        assert_eq!(defaults.len(), 4);
        assert_eq!(defaults["logValidations"], Value::Array(vec![]));
        assert_eq!(defaults["failIfLogValidationsOutdated"], Value::Bool(false));
        assert_eq!(defaults["failIfUnknownLogsFound"], Value::Bool(false));
        assert_eq!(defaults["exemptLogs"], Value::Array(vec![]));
    }

    #[test]
    fn parse_json_partial_config_merges_with_defaults() {
        let json = r#"{
            "logValidations": [
                { "patterns": ["Each child in a list should have a unique"], "max": 2 }
            ],
            "failIfUnknownLogsFound": true
        }"#;
        let config = ValidatorConfig::parse_json(json, "inline").unwrap();
        assert_eq!(config.log_validations.len(), 1);
        assert_eq!(config.log_validations[0].max, 2);
        assert!(config.fail_if_unknown_logs_found);
        assert!(!config.fail_if_log_validations_outdated);
    }

    #[test]
    fn parse_json_invalid_syntax_returns_parse_error() {
        let err = ValidatorConfig::parse_json("{ not json", "inline").unwrap_err();
        assert!(matches!(
            err,
            LogwardenError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn parse_json_schema_violation_returns_schema_error() {
        let json = r#"{ "logsWithValidations": [{ "patterns": ["x"] }] }"#;
        let err = ValidatorConfig::parse_json(json, "inline").unwrap_err();
        match err {
            LogwardenError::Config(ConfigError::Schema { errors }) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("logsWithValidations"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn parse_toml_config() {
        let toml = r#"
failIfLogValidationsOutdated = true

[[logValidations]]
patterns = ["`wait` has been deprecated"]
max = 1

[[exemptLogs]]
patterns = ["Error: Uncaught"]
"#;
        let config = ValidatorConfig::parse_toml(toml, "logwarden.toml").unwrap();
        assert!(config.fail_if_log_validations_outdated);
        assert_eq!(config.log_validations[0].patterns, vec!["`wait` has been deprecated"]);
        assert_eq!(config.exempt_logs.len(), 1);
    }

    #[test]
    fn parse_toml_invalid_syntax_returns_parse_error() {
        let err = ValidatorConfig::parse_toml("invalid = [[[toml", "bad.toml").unwrap_err();
        assert!(matches!(
            err,
            LogwardenError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn serialization_roundtrip_keeps_wire_keys() {
        let config = ValidatorConfig {
            log_validations: vec![LogValidation::new(["unique"], 2)],
            fail_if_log_validations_outdated: true,
            fail_if_unknown_logs_found: false,
            exempt_logs: vec![ExemptLog::new(["Error"])],
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"logValidations\""));
        assert!(json.contains("\"failIfLogValidationsOutdated\""));
        let parsed = ValidatorConfig::parse_json(&json, "roundtrip").unwrap();
        assert_eq!(parsed, config);
    }

    #[tokio::test]
    async fn from_file_missing_returns_file_not_found() {
        let err = ValidatorConfig::from_file("/nonexistent/logwarden.json")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LogwardenError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
