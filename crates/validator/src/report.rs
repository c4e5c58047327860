//! 진단 출력 -- 검증 단계가 사람이 읽을 진단을 내보내는 싱크
//!
//! 엔진은 [`ReportSink`]만 호출하며 렌더링 방식에는 의존하지 않습니다.
//!
//! - [`RecordingSink`]: 이벤트를 메모리에 기록 (테스트, JSON 출력)
//! - [`TracingSink`]: `tracing` 이벤트로 출력
//!
//! 터미널 컬러 렌더링은 `logwarden-cli`의 `ConsoleSink`가 담당합니다.

use serde::Serialize;

/// 진단 출력 싱크
///
/// 한 번의 진단은 제목 한 줄과, 선택적으로 번호 목록이나 표로 구성됩니다.
pub trait ReportSink {
    /// 진단 제목을 출력합니다.
    fn title(&mut self, text: &str);

    /// 번호가 붙은 목록 항목을 출력합니다 (`position`은 1부터 시작).
    fn ordered_item(&mut self, position: usize, text: &str);

    /// 표를 출력합니다. 첫 번째 행은 헤더입니다.
    fn table(&mut self, rows: &[Vec<String>]);
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn title(&mut self, text: &str) {
        (**self).title(text);
    }

    fn ordered_item(&mut self, position: usize, text: &str) {
        (**self).ordered_item(position, text);
    }

    fn table(&mut self, rows: &[Vec<String>]) {
        (**self).table(rows);
    }
}

/// 기록된 진단 이벤트
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportEvent {
    /// 제목
    Title { text: String },
    /// 번호 목록 항목
    OrderedItem { position: usize, text: String },
    /// 표 (첫 행은 헤더)
    Table { rows: Vec<Vec<String>> },
}

/// 진단 이벤트를 순서대로 기록하는 싱크
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<ReportEvent>,
}

impl RecordingSink {
    /// 빈 싱크를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기록된 이벤트 목록
    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// 기록된 이벤트를 꺼냅니다.
    pub fn into_events(self) -> Vec<ReportEvent> {
        self.events
    }

    /// 기록된 제목 목록
    pub fn titles(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Title { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 진단을 평문으로 직렬화합니다 (스냅샷 비교용).
    pub fn to_plain_text(&self) -> String {
        let mut lines = Vec::new();
        for event in &self.events {
            match event {
                ReportEvent::Title { text } => lines.push(text.clone()),
                ReportEvent::OrderedItem { position, text } => {
                    lines.push(format!("{position}) {text}"));
                }
                ReportEvent::Table { rows } => {
                    lines.extend(rows.iter().map(|row| row.join(" | ")));
                }
            }
        }
        lines.join("\n")
    }
}

impl ReportSink for RecordingSink {
    fn title(&mut self, text: &str) {
        self.events.push(ReportEvent::Title {
            text: text.to_owned(),
        });
    }

    fn ordered_item(&mut self, position: usize, text: &str) {
        self.events.push(ReportEvent::OrderedItem {
            position,
            text: text.to_owned(),
        });
    }

    fn table(&mut self, rows: &[Vec<String>]) {
        self.events.push(ReportEvent::Table {
            rows: rows.to_vec(),
        });
    }
}

/// 진단을 `tracing` 이벤트로 내보내는 싱크
///
/// 제목은 `warn`, 항목과 표의 각 행은 `info` 레벨로 출력합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn title(&mut self, text: &str) {
        tracing::warn!(title = text, "log validation report");
    }

    fn ordered_item(&mut self, position: usize, text: &str) {
        tracing::info!(position, message = text, "log validation report item");
    }

    fn table(&mut self, rows: &[Vec<String>]) {
        let Some((header, body)) = rows.split_first() else {
            return;
        };
        for row in body {
            let fields = header
                .iter()
                .zip(row)
                .map(|(column, cell)| format!("{column}={cell}"))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::info!(row = %fields, "log validation report row");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_event_order() {
        let mut sink = RecordingSink::new();
        sink.title("The following log messages are not declared:");
        sink.ordered_item(1, "first");
        sink.ordered_item(2, "second");

        assert_eq!(sink.events().len(), 3);
        assert_eq!(sink.titles(), vec!["The following log messages are not declared:"]);
        assert_eq!(
            sink.to_plain_text(),
            "The following log messages are not declared:\n1) first\n2) second"
        );
    }

    #[test]
    fn recording_sink_renders_tables_as_rows() {
        let mut sink = RecordingSink::new();
        sink.table(&[
            vec!["Patterns".to_owned(), "Max".to_owned()],
            vec!["\"unique\"".to_owned(), "2".to_owned()],
        ]);
        assert_eq!(sink.to_plain_text(), "Patterns | Max\n\"unique\" | 2");
    }

    #[test]
    fn sink_through_mutable_reference() {
        fn emit(mut sink: impl ReportSink) {
            sink.title("title");
        }
        let mut sink = RecordingSink::new();
        emit(&mut sink);
        assert_eq!(sink.titles(), vec!["title"]);
    }

    #[test]
    fn tracing_sink_accepts_empty_table() {
        let mut sink = TracingSink;
        sink.table(&[]);
        sink.title("title");
        sink.ordered_item(1, "item");
    }

    #[test]
    fn report_event_serializes_with_kind_tag() {
        let json = serde_json::to_value(ReportEvent::OrderedItem {
            position: 1,
            text: "msg".to_owned(),
        })
        .unwrap();
        assert_eq!(json["kind"], "ordered_item");
        assert_eq!(json["position"], 1);
    }
}
