#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use logwarden_core::config::ValidatorConfig;
use logwarden_core::types::{ExemptLog, LogValidation};
use logwarden_validator::{RecordingSink, Validator, matcher};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 검증 규칙 (최대 8개로 제한)
    rules: Vec<FuzzRule>,
    /// 예외 규칙 패턴
    exempt: Vec<Vec<String>>,
    /// 캡처된 메시지 (최대 64개로 제한)
    messages: Vec<String>,
    fail_if_outdated: bool,
    fail_if_unknown: bool,
}

#[derive(Arbitrary, Debug)]
struct FuzzRule {
    patterns: Vec<String>,
    max: u8,
}

fuzz_target!(|input: FuzzInput| {
    let config = ValidatorConfig {
        log_validations: input
            .rules
            .into_iter()
            .take(8)
            .map(|r| LogValidation::new(r.patterns, u64::from(r.max)))
            .collect(),
        fail_if_log_validations_outdated: input.fail_if_outdated,
        fail_if_unknown_logs_found: input.fail_if_unknown,
        exempt_logs: input.exempt.into_iter().take(8).map(ExemptLog::new).collect(),
    };
    let messages: Vec<String> = input.messages.into_iter().take(64).collect();

    let mut sink = RecordingSink::new();
    let outcome = Validator::new().run(&config, &messages, &mut sink);

    // 카운트는 규칙별 매칭 메시지 수와 같아야 함
    for (idx, rule) in config.log_validations.iter().enumerate() {
        let expected = messages
            .iter()
            .filter(|m| matcher::matches(m, rule))
            .count() as u64;
        assert_eq!(outcome.counts.get(idx), expected);
    }

    // 성공이면 진단이 없어야 함
    assert_eq!(outcome.verdict.is_success(), sink.events().is_empty());
});
