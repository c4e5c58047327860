//! 패턴 매칭 로직 -- 부분 문자열 AND 결합
//!
//! 메시지가 규칙의 모든 패턴을 리터럴 부분 문자열로 포함할 때만 매칭됩니다.
//! 대소문자를 구분하며 와일드카드나 정규식은 지원하지 않습니다.

use logwarden_core::types::PatternSet;

/// 메시지가 모든 패턴을 포함하는지 평가합니다.
///
/// 패턴이 비어있으면 false를 반환합니다 (빈 규칙은 어떤 메시지에도 매칭되지 않음).
pub fn matches_patterns<S: AsRef<str>>(message: &str, patterns: &[S]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    // AND 로직: 하나라도 없으면 즉시 실패
    patterns.iter().all(|pattern| message.contains(pattern.as_ref()))
}

/// 메시지가 규칙에 매칭되는지 평가합니다.
pub fn matches<R: PatternSet + ?Sized>(message: &str, rule: &R) -> bool {
    matches_patterns(message, rule.patterns())
}

/// 메시지가 규칙 목록 중 하나라도 매칭되는지 평가합니다.
pub fn matches_any<R: PatternSet>(message: &str, rules: &[R]) -> bool {
    rules.iter().any(|rule| matches(message, rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logwarden_core::types::{ExemptLog, LogValidation};

    const KEY_WARNING: &str = r#"Warning: Each child in a list should have a unique "key" prop"#;

    #[test]
    fn single_pattern_substring_matches() {
        assert!(matches_patterns(KEY_WARNING, &["Each child in a list"]));
    }

    #[test]
    fn all_patterns_must_match() {
        assert!(matches_patterns(KEY_WARNING, &["Warning:", "\"key\" prop"]));
    }

    #[test]
    fn partial_pattern_match_fails() {
        assert!(!matches_patterns(
            KEY_WARNING,
            &["Warning: Each child in a list should have a unique", "\"name\" prop"]
        ));
    }

    #[test]
    fn empty_patterns_never_match() {
        let empty: [&str; 0] = [];
        assert!(!matches_patterns(KEY_WARNING, &empty));
        assert!(!matches_patterns("", &empty));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!matches_patterns(KEY_WARNING, &["warning:"]));
    }

    #[test]
    fn patterns_are_literal_not_regex() {
        assert!(!matches_patterns(KEY_WARNING, &["Warning: .*"]));
        assert!(matches_patterns("call foo.*bar()", &["foo.*bar"]));
    }

    #[test]
    fn rule_and_exempt_rule_share_semantics() {
        let rule = LogValidation::new(["unique", "key"], 0);
        let exempt = ExemptLog::new(["unique", "key"]);
        assert!(matches(KEY_WARNING, &rule));
        assert!(matches(KEY_WARNING, &exempt));
    }

    #[test]
    fn matches_any_over_rules() {
        let rules = vec![
            LogValidation::new(["waitFor"], 1),
            LogValidation::new(["unique"], 1),
        ];
        assert!(matches_any(KEY_WARNING, &rules));
        assert!(!matches_any("unrelated", &rules));
        assert!(!matches_any::<LogValidation>(KEY_WARNING, &[]));
    }

    // Property-based tests using proptest
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn conjunction_property(
                message in ".{0,64}",
                patterns in prop::collection::vec("[a-c]{1,3}", 1..4),
            ) {
                let expected = patterns.iter().all(|p| message.contains(p.as_str()));
                prop_assert_eq!(matches_patterns(&message, &patterns), expected);
            }

            #[test]
            fn vacuous_rule_never_matches(message in ".{0,128}") {
                let empty: Vec<String> = Vec::new();
                prop_assert!(!matches_patterns(&message, &empty));
            }

            #[test]
            fn every_substring_of_message_matches(
                message in "[a-z ]{1,64}",
                start in 0usize..64,
                len in 1usize..16,
            ) {
                let start = start % message.len();
                let end = (start + len).min(message.len());
                let pattern = message[start..end].to_owned();
                prop_assert!(matches_patterns(&message, &[pattern]));
            }

            #[test]
            fn pattern_order_does_not_matter(
                message in "[a-c]{0,32}",
                mut patterns in prop::collection::vec("[a-c]{1,2}", 1..5),
            ) {
                let forward = matches_patterns(&message, &patterns);
                patterns.reverse();
                prop_assert_eq!(forward, matches_patterns(&message, &patterns));
            }
        }
    }
}
