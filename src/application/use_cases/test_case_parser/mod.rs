//! Turns free-form model output into [`TestCaseRecord`]s.
//!
//! Text is split into blank-line separated groups ([`blocks`]), every line is
//! classified against a fixed key table ([`fields`]) and the assembler below
//! closes a record at each group end and at each ID marker.

pub mod blocks;
pub(crate) mod fields;


use tracing::debug;

use crate::domain::test_case::{
    ParseReport, ParseWarning, TestCaseField, TestCaseRecord, UnrecognizedLine,
    UnrecognizedPolicy,
};
use blocks::line_groups;
use fields::{classify_line, LineKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct TestCaseParser {
    policy: UnrecognizedPolicy,
}

impl TestCaseParser {
    pub fn new(policy: UnrecognizedPolicy) -> Self {
        Self { policy }
    }

    pub fn parse(&self, text: &str) -> ParseReport {
        let mut assembler = RecordAssembler::new(self.policy);
        let mut groups = 0usize;

        for group in line_groups(text) {
            groups += 1;
            for line in group {
                assembler.push_line(line);
            }
            assembler.close();
        }

        let records = assembler.finish();
        let mut warnings = Vec::new();
        if records.is_empty() {
            warnings.push(ParseWarning::EmptyInput);
        }

        debug!(
            groups,
            records = records.len(),
            policy = ?self.policy,
            "Parsed generated test cases"
        );

        ParseReport { records, warnings }
    }
}

/// Parses with the default policy, dropping unrecognized lines.
pub fn parse_test_cases(text: &str) -> Vec<TestCaseRecord> {
    TestCaseParser::default().parse(text).records
}

struct RecordAssembler {
    policy: UnrecognizedPolicy,
    current: TestCaseRecord,
    records: Vec<TestCaseRecord>,
}

impl RecordAssembler {
    fn new(policy: UnrecognizedPolicy) -> Self {
        Self {
            policy,
            current: TestCaseRecord::new(),
            records: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        match classify_line(line) {
            LineKind::IdMarker(id) => {
                // An ID line always opens a new record, even mid-group.
                self.close();
                self.current.set(TestCaseField::TestCaseId, id);
            }
            LineKind::Field(field, value) => self.current.set(field, value),
            LineKind::UnknownKey { key, value } => self.unrecognized(Some(key), value),
            LineKind::Plain(text) => self.unrecognized(None, text),
        }
    }

    fn unrecognized(&mut self, key: Option<&str>, value: &str) {
        if self.policy == UnrecognizedPolicy::Collect {
            self.current.unrecognized.push(UnrecognizedLine {
                key: key.map(str::to_string),
                value: value.to_string(),
            });
        }
    }

    fn close(&mut self) {
        let record = std::mem::take(&mut self.current);
        if !record.is_empty() {
            self.records.push(record);
        }
    }

    fn finish(mut self) -> Vec<TestCaseRecord> {
        self.close();
        self.records
    }
}
