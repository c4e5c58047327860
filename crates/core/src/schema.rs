//! 설정 스키마 검증
//!
//! 병합된 설정 JSON 값이 [`ValidatorConfig`](crate::config::ValidatorConfig)의
//! 형태를 만족하는지 검사합니다. 첫 번째 위반에서 멈추지 않고
//! 모든 위반 사항을 JSON 경로와 함께 수집합니다.
//!
//! # 규칙
//! - 최상위는 객체여야 하며 알 수 없는 키는 거부합니다.
//! - `logValidations[*]`: `patterns` (비어있지 않은 문자열 배열, 필수), `max` (0 이상 정수, 필수)
//! - `exemptLogs[*]`: `patterns` (필수)
//! - `failIfLogValidationsOutdated`, `failIfUnknownLogsFound`: bool

use serde::Serialize;
use serde_json::{Map, Value};

/// 최상위 설정 키: 검증 규칙 목록
pub const KEY_LOG_VALIDATIONS: &str = "logValidations";
/// 최상위 설정 키: 오래된 규칙 실패 여부
pub const KEY_FAIL_IF_OUTDATED: &str = "failIfLogValidationsOutdated";
/// 최상위 설정 키: 알 수 없는 로그 실패 여부
pub const KEY_FAIL_IF_UNKNOWN: &str = "failIfUnknownLogsFound";
/// 최상위 설정 키: 예외 규칙 목록
pub const KEY_EXEMPT_LOGS: &str = "exemptLogs";

const KNOWN_KEYS: &[&str] = &[
    KEY_LOG_VALIDATIONS,
    KEY_FAIL_IF_OUTDATED,
    KEY_FAIL_IF_UNKNOWN,
    KEY_EXEMPT_LOGS,
];

/// 스키마 검증 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    /// 위반 사항이 없으면 true
    pub valid: bool,
    /// 위반 사항 목록 (발견 순서)
    pub errors: Vec<String>,
}

/// 설정 값을 스키마에 대해 검사합니다.
pub fn check(value: &Value) -> SchemaReport {
    let mut errors = Vec::new();

    match value.as_object() {
        Some(object) => check_object(object, &mut errors),
        None => errors.push(format!(
            "config must be an object, found {}",
            type_name(value)
        )),
    }

    SchemaReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn check_object(object: &Map<String, Value>, errors: &mut Vec<String>) {
    for key in object.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            errors.push(format!("{key} is not a known config key"));
        }
    }

    if let Some(rules) = object.get(KEY_LOG_VALIDATIONS) {
        check_rule_array(rules, KEY_LOG_VALIDATIONS, true, errors);
    }
    if let Some(exempt) = object.get(KEY_EXEMPT_LOGS) {
        check_rule_array(exempt, KEY_EXEMPT_LOGS, false, errors);
    }

    for key in [KEY_FAIL_IF_OUTDATED, KEY_FAIL_IF_UNKNOWN] {
        if let Some(flag) = object.get(key) {
            if !flag.is_boolean() {
                errors.push(format!("{key} must be a boolean, found {}", type_name(flag)));
            }
        }
    }
}

fn check_rule_array(value: &Value, key: &str, requires_max: bool, errors: &mut Vec<String>) {
    let Some(items) = value.as_array() else {
        errors.push(format!("{key} must be an array, found {}", type_name(value)));
        return;
    };

    for (idx, item) in items.iter().enumerate() {
        let path = format!("{key}[{idx}]");
        let Some(rule) = item.as_object() else {
            errors.push(format!("{path} must be an object, found {}", type_name(item)));
            continue;
        };

        check_patterns(rule.get("patterns"), &path, errors);

        if requires_max {
            match rule.get("max") {
                None => errors.push(format!("{path}.max is required")),
                Some(max) if max.as_u64().is_none() => errors.push(format!(
                    "{path}.max must be a non-negative integer, found {max}"
                )),
                Some(_) => {}
            }
        }
    }
}

fn check_patterns(value: Option<&Value>, path: &str, errors: &mut Vec<String>) {
    let Some(value) = value else {
        errors.push(format!("{path}.patterns is required"));
        return;
    };
    let Some(patterns) = value.as_array() else {
        errors.push(format!(
            "{path}.patterns must be an array, found {}",
            type_name(value)
        ));
        return;
    };

    if patterns.is_empty() {
        errors.push(format!("{path}.patterns must contain at least one pattern"));
    }

    for (idx, pattern) in patterns.iter().enumerate() {
        match pattern.as_str() {
            Some("") => errors.push(format!("{path}.patterns[{idx}] must not be empty")),
            Some(_) => {}
            None => errors.push(format!(
                "{path}.patterns[{idx}] must be a string, found {}",
                type_name(pattern)
            )),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
