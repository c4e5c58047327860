//! 검증 단계 평가기
//!
//! 각 단계는 카운트 벡터와 메시지만 읽는 순수 함수입니다.
//! 진단 출력은 평가 결과를 받아 별도로 수행합니다.

use std::collections::HashSet;

use serde::Serialize;

use logwarden_core::types::{ExemptLog, LogValidation, PatternSet};

use super::count::CountVector;
use crate::matcher;
use crate::report::ReportSink;

/// 한도 초과 진단 제목
pub const EXCEEDED_TITLE: &str = "The following log validations exceeded their declared limits:";

/// 오래된 규칙 진단 제목
pub const OUTDATED_TITLE: &str = "You have fewer log messages than declared in your configuration. \
     Please adjust it according to this:";

/// 알 수 없는 메시지 진단 제목
pub const UNKNOWN_TITLE: &str = "The following log messages are not declared in your configuration:";

/// 한도를 초과한 규칙
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceededRule {
    /// 규칙 인덱스 (선언 순서)
    pub index: usize,
    /// 규칙 패턴
    pub patterns: Vec<String>,
    /// 선언된 최대값
    pub max: u64,
    /// 관측된 매칭 수
    pub count: u64,
}

/// 선언된 최대값이 관측값보다 큰 규칙
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedRule {
    /// 규칙 인덱스 (선언 순서)
    pub index: usize,
    /// 규칙 패턴
    pub patterns: Vec<String>,
    /// 현재 선언된 최대값
    pub max: u64,
    /// 낮춰야 할 값 (관측된 매칭 수)
    pub suggested_max: u64,
}

impl PatternSet for ExceededRule {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl PatternSet for OutdatedRule {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// 한도 초과 규칙을 찾습니다.
///
/// 카운트 순회 중 한도를 처음 넘은 순서대로 반환합니다.
/// 같은 메시지에서 넘은 규칙끼리는 인덱스 순서입니다.
pub fn limit_exceeded(rules: &[LogValidation], counts: &CountVector) -> Vec<ExceededRule> {
    let mut exceeded: Vec<(usize, ExceededRule)> = rules
        .iter()
        .enumerate()
        .filter(|(idx, rule)| counts.get(*idx) > rule.max)
        .map(|(idx, rule)| {
            let position = counts.exceeded_at(idx).unwrap_or(usize::MAX);
            (
                position,
                ExceededRule {
                    index: idx,
                    patterns: rule.patterns.clone(),
                    max: rule.max,
                    count: counts.get(idx),
                },
            )
        })
        .collect();

    exceeded.sort_by_key(|(position, rule)| (*position, rule.index));
    exceeded.into_iter().map(|(_, rule)| rule).collect()
}

/// 선언된 최대값이 관측값보다 큰 규칙을 선언 순서대로 찾습니다.
///
/// `count > max`와 `max > count`는 배타적이므로 한도 초과 규칙과 겹치지 않습니다.
pub fn outdated(rules: &[LogValidation], counts: &CountVector) -> Vec<OutdatedRule> {
    rules
        .iter()
        .enumerate()
        .filter(|(idx, rule)| rule.max > counts.get(*idx))
        .map(|(idx, rule)| OutdatedRule {
            index: idx,
            patterns: rule.patterns.clone(),
            max: rule.max,
            suggested_max: counts.get(idx),
        })
        .collect()
}

/// 어떤 규칙에도, 어떤 예외 규칙에도 매칭되지 않는 메시지를 찾습니다.
///
/// 중복 메시지는 처음 나타난 위치에서 한 번만 반환합니다.
pub fn unknown_messages<S: AsRef<str>>(
    rules: &[LogValidation],
    exempt: &[ExemptLog],
    messages: &[S],
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unknown = Vec::new();

    for message in messages {
        let message = message.as_ref();
        if matcher::matches_any(message, rules) || matcher::matches_any(message, exempt) {
            continue;
        }
        if seen.insert(message) {
            unknown.push(message.to_owned());
        }
    }

    unknown
}

/// 한도 초과 진단을 출력합니다.
pub fn report_exceeded(rules: &[ExceededRule], sink: &mut dyn ReportSink) {
    sink.title(EXCEEDED_TITLE);
    let mut rows = vec![header(&["Patterns", "Max allowed", "Found"])];
    rows.extend(rules.iter().map(|rule| {
        vec![
            rule.display_patterns(),
            rule.max.to_string(),
            rule.count.to_string(),
        ]
    }));
    sink.table(&rows);
}

/// 오래된 규칙 진단을 출력합니다.
pub fn report_outdated(rules: &[OutdatedRule], sink: &mut dyn ReportSink) {
    sink.title(OUTDATED_TITLE);
    let mut rows = vec![header(&["Patterns", "Current max", "Should be"])];
    rows.extend(rules.iter().map(|rule| {
        vec![
            rule.display_patterns(),
            rule.max.to_string(),
            rule.suggested_max.to_string(),
        ]
    }));
    sink.table(&rows);
}

/// 알 수 없는 메시지 진단을 출력합니다.
pub fn report_unknown(messages: &[String], sink: &mut dyn ReportSink) {
    sink.title(UNKNOWN_TITLE);
    for (idx, message) in messages.iter().enumerate() {
        sink.ordered_item(idx + 1, message);
    }
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| (*c).to_owned()).collect()
}
