//! 리포터 세션 -- 테스트 러너 수명주기에 검증을 연결합니다.
//!
//! 러너는 테스트 파일마다 [`ReporterSession::on_test_result`]를 호출하고,
//! 실행이 끝나면 [`ReporterSession::last_error`]로 실패 여부를 묻습니다.
//! 러너가 verbose 모드이면 콘솔 출력이 캡처되지 않으므로 세션은 아무것도
//! 검증하지 않고 실패를 보고하지 않습니다.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use logwarden_core::config::ConfigLoader;

use crate::collector::{LogCollector, TestResult};
use crate::engine::{PhasePolicy, Validator};
use crate::error::ValidatorError;
use crate::report::ReportSink;

/// 한 번의 테스트 실행에 대응하는 리포터 세션
#[derive(Debug, Clone, Default)]
pub struct ReporterSession {
    /// verbose 모드로 로그를 사용할 수 없는지 여부
    logs_unavailable: bool,
    /// 리포터 옵션 (설정 레이어로 병합됨)
    options: Map<String, Value>,
    collector: LogCollector,
    policy: PhasePolicy,
}

impl ReporterSession {
    /// 새 세션을 생성합니다.
    pub fn new(verbose: bool, options: Map<String, Value>) -> Self {
        if verbose {
            info!("runner is in verbose mode, console output is unavailable; log validation disabled");
        }
        Self {
            logs_unavailable: verbose,
            options,
            collector: LogCollector::new(),
            policy: PhasePolicy::default(),
        }
    }

    /// 단계 진행 정책을 설정합니다.
    pub fn with_phase_policy(mut self, policy: PhasePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 로그를 사용할 수 없는 세션인지 반환합니다.
    pub fn logs_unavailable(&self) -> bool {
        self.logs_unavailable
    }

    /// 테스트 결과 하나를 수집합니다.
    pub fn on_test_result(&mut self, result: &TestResult) {
        if self.logs_unavailable {
            return;
        }
        self.collector.on_test_result(result);
    }

    /// 지금까지 수집된 메시지
    pub fn collector(&self) -> &LogCollector {
        &self.collector
    }

    /// 설정을 로드하고 검증을 실행하여 실패를 반환합니다.
    ///
    /// - 로그를 사용할 수 없으면 `None`
    /// - 설정 로딩 실패 시 `Some(ValidatorError::Config)`
    /// - 검증 실패 시 `Some(ValidatorError::ValidationFailed)`
    pub async fn last_error(
        &self,
        root: impl AsRef<Path>,
        sink: &mut dyn ReportSink,
    ) -> Option<ValidatorError> {
        if self.logs_unavailable {
            return None;
        }

        let loader =
            ConfigLoader::new(root.as_ref()).with_reporter_options(self.options.clone());
        let config = match loader.load().await {
            Ok(config) => config,
            Err(e) => return Some(e.into()),
        };

        debug!(messages = self.collector.len(), "running log validation");
        Validator::new()
            .with_phase_policy(self.policy)
            .run(&config, self.collector.messages(), sink)
            .verdict
            .into_result()
            .err()
    }
}
