#![no_main]

use libfuzzer_sys::fuzz_target;
use logwarden_core::config::ValidatorConfig;
use logwarden_core::schema;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // 파싱 실패는 에러로 반환되어야 하며 크래시는 안 됨
    let parsed = ValidatorConfig::parse_json(text, "fuzz-input.json");

    // 스키마를 통과한 값은 항상 타입 변환에도 성공해야 함
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        if schema::check(&value).valid {
            assert!(parsed.is_ok(), "schema-valid config failed to parse: {parsed:?}");
        }
    }
});
