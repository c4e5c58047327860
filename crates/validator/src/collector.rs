//! 로그 수집 -- 테스트 실행 중 캡처된 콘솔 메시지를 모읍니다.
//!
//! # 수집 소스
//! - 테스트 결과 콜백: [`LogCollector::on_test_result`]
//! - 줄 단위 텍스트 파일: [`LogCollector::load_lines`]
//! - 테스트 결과 JSON 배열 파일: [`LogCollector::load_results`]
//!
//! 수집 순서는 테스트 결과가 도착한 순서이며, 한 결과 안에서는 캡처 순서입니다.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use logwarden_core::metrics as m;

use crate::error::ValidatorError;

/// 캡처된 콘솔 호출 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    /// 출력된 메시지 본문
    pub message: String,
    /// 콘솔 호출 종류 (log, warn, error 등)
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl ConsoleEntry {
    pub fn new(message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: kind.into(),
        }
    }
}

/// 테스트 파일 하나의 실행 결과
///
/// 콘솔 출력이 캡처되지 않은 결과는 `console`이 `None`입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// 테스트 파일 경로
    #[serde(default)]
    pub test_path: String,
    /// 캡처된 콘솔 출력
    #[serde(default)]
    pub console: Option<Vec<ConsoleEntry>>,
}

/// 콘솔 메시지 수집기
#[derive(Debug, Clone, Default)]
pub struct LogCollector {
    messages: Vec<String>,
}

impl LogCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 테스트 결과의 콘솔 메시지를 순서대로 추가합니다.
    pub fn on_test_result(&mut self, result: &TestResult) {
        metrics::counter!(m::COLLECTOR_TEST_RESULTS_TOTAL).increment(1);

        let Some(console) = &result.console else {
            return;
        };
        self.messages
            .extend(console.iter().map(|entry| entry.message.clone()));
        metrics::counter!(m::COLLECTOR_MESSAGES_TOTAL).increment(console.len() as u64);

        debug!(
            test_path = %result.test_path,
            captured = console.len(),
            total = self.messages.len(),
            "collected console messages"
        );
    }

    /// 메시지 하나를 직접 추가합니다.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        metrics::counter!(m::COLLECTOR_MESSAGES_TOTAL).increment(1);
    }

    /// 수집된 메시지 목록
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 수집된 메시지를 꺼냅니다.
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// 텍스트 파일에서 한 줄을 메시지 하나로 읽어 추가합니다. 빈 줄은 건너뜁니다.
    ///
    /// 추가된 메시지 수를 반환합니다.
    pub async fn load_lines(&mut self, path: impl AsRef<Path>) -> Result<usize, ValidatorError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ValidatorError::Collector {
                source_type: "lines".to_owned(),
                reason: format!("{}: {e}", path.display()),
            })?;

        let before = self.messages.len();
        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            self.push(line);
        }
        let added = self.messages.len() - before;

        debug!(path = %path.display(), added, "loaded log lines");
        Ok(added)
    }

    /// 테스트 결과 JSON 배열 파일을 읽어 각 결과를 [`on_test_result`](Self::on_test_result)로 처리합니다.
    ///
    /// 처리한 테스트 결과 수를 반환합니다.
    pub async fn load_results(&mut self, path: impl AsRef<Path>) -> Result<usize, ValidatorError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ValidatorError::Collector {
                source_type: "results".to_owned(),
                reason: format!("{}: {e}", path.display()),
            })?;

        let results: Vec<TestResult> =
            serde_json::from_str(&content).map_err(|e| ValidatorError::Collector {
                source_type: "results".to_owned(),
                reason: format!("{}: {e}", path.display()),
            })?;

        for result in &results {
            self.on_test_result(result);
        }

        debug!(path = %path.display(), results = results.len(), "loaded test results");
        Ok(results.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn result(messages: &[&str]) -> TestResult {
        TestResult {
            test_path: "src/app.test.js".to_owned(),
            console: Some(
                messages
                    .iter()
                    .map(|m| ConsoleEntry::new(*m, "warn"))
                    .collect(),
            ),
        }
    }

    #[test]
    fn collects_messages_in_arrival_order() {
        let mut collector = LogCollector::new();
        collector.on_test_result(&result(&["a", "b"]));
        collector.on_test_result(&result(&["c"]));
        assert_eq!(collector.messages(), &["a", "b", "c"]);
        assert_eq!(collector.len(), 3);
    }

    #[test]
    fn result_without_console_adds_nothing() {
        let mut collector = LogCollector::new();
        collector.on_test_result(&TestResult::default());
        assert!(collector.is_empty());
    }

    #[test]
    fn duplicate_messages_are_kept() {
        let mut collector = LogCollector::new();
        collector.on_test_result(&result(&["same", "same"]));
        assert_eq!(collector.into_messages(), vec!["same", "same"]);
    }

    #[test]
    fn test_result_deserializes_camel_case() {
        let json = r#"{"testPath":"a.test.js","console":[{"message":"hi","type":"log"}]}"#;
        let parsed: TestResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.test_path, "a.test.js");
        assert_eq!(parsed.console.unwrap()[0], ConsoleEntry::new("hi", "log"));
    }

    #[test]
    fn test_result_with_null_console() {
        let parsed: TestResult = serde_json::from_str(r#"{"testPath":"a","console":null}"#).unwrap();
        assert!(parsed.console.is_none());
    }

    #[tokio::test]
    async fn load_lines_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first\n\n  \nsecond").unwrap();

        let mut collector = LogCollector::new();
        let added = collector.load_lines(file.path()).await.unwrap();
        assert_eq!(added, 2);
        assert_eq!(collector.messages(), &["first", "second"]);
    }

    #[tokio::test]
    async fn load_lines_missing_file_is_collector_error() {
        let mut collector = LogCollector::new();
        let err = collector
            .load_lines("/nonexistent/logwarden/messages.log")
            .await
            .unwrap_err();
        assert!(matches!(err, ValidatorError::Collector { ref source_type, .. } if source_type == "lines"));
    }

    #[tokio::test]
    async fn load_results_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"testPath":"a","console":[{{"message":"x","type":"warn"}}]}},{{"testPath":"b"}}]"#
        )
        .unwrap();

        let mut collector = LogCollector::new();
        let processed = collector.load_results(file.path()).await.unwrap();
        assert_eq!(processed, 2);
        assert_eq!(collector.messages(), &["x"]);
    }

    #[tokio::test]
    async fn load_results_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"testPath":"a"}}"#).unwrap();

        let mut collector = LogCollector::new();
        let err = collector.load_results(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("results"));
    }
}
