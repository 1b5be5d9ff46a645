use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// The closed set of columns a generated test case can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestCaseField {
    #[serde(rename = "Test Case ID")]
    TestCaseId,
    #[serde(rename = "Description")]
    Description,
    #[serde(rename = "Pre-conditions")]
    PreConditions,
    #[serde(rename = "Steps")]
    Steps,
    #[serde(rename = "Expected Results")]
    ExpectedResults,
    #[serde(rename = "Post-conditions")]
    PostConditions,
    #[serde(rename = "Tags")]
    Tags,
}

impl TestCaseField {
    pub const ALL: [TestCaseField; 7] = [
        TestCaseField::TestCaseId,
        TestCaseField::Description,
        TestCaseField::PreConditions,
        TestCaseField::Steps,
        TestCaseField::ExpectedResults,
        TestCaseField::PostConditions,
        TestCaseField::Tags,
    ];

    /// Column header used in exports and JSON output.
    pub fn label(self) -> &'static str {
        match self {
            TestCaseField::TestCaseId => "Test Case ID",
            TestCaseField::Description => "Description",
            TestCaseField::PreConditions => "Pre-conditions",
            TestCaseField::Steps => "Steps",
            TestCaseField::ExpectedResults => "Expected Results",
            TestCaseField::PostConditions => "Post-conditions",
            TestCaseField::Tags => "Tags",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|field| field.label() == label)
    }
}

impl fmt::Display for TestCaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A line the extractor could not map onto a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedLine {
    pub key: Option<String>,
    pub value: String,
}

/// One test case. Every slot is optional; `order` remembers which slots were
/// filled and in what order so exports stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCaseRecord {
    pub test_case_id: Option<String>,
    pub description: Option<String>,
    pub pre_conditions: Option<String>,
    pub steps: Option<String>,
    pub expected_results: Option<String>,
    pub post_conditions: Option<String>,
    pub tags: Option<String>,
    pub unrecognized: Vec<UnrecognizedLine>,
    order: Vec<TestCaseField>,
}

impl TestCaseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, field: TestCaseField) -> &mut Option<String> {
        match field {
            TestCaseField::TestCaseId => &mut self.test_case_id,
            TestCaseField::Description => &mut self.description,
            TestCaseField::PreConditions => &mut self.pre_conditions,
            TestCaseField::Steps => &mut self.steps,
            TestCaseField::ExpectedResults => &mut self.expected_results,
            TestCaseField::PostConditions => &mut self.post_conditions,
            TestCaseField::Tags => &mut self.tags,
        }
    }

    pub fn get(&self, field: TestCaseField) -> Option<&str> {
        let slot = match field {
            TestCaseField::TestCaseId => &self.test_case_id,
            TestCaseField::Description => &self.description,
            TestCaseField::PreConditions => &self.pre_conditions,
            TestCaseField::Steps => &self.steps,
            TestCaseField::ExpectedResults => &self.expected_results,
            TestCaseField::PostConditions => &self.post_conditions,
            TestCaseField::Tags => &self.tags,
        };
        slot.as_deref()
    }

    /// Sets a slot. A repeated field keeps its original position and takes the
    /// new value.
    pub fn set(&mut self, field: TestCaseField, value: impl Into<String>) {
        if !self.order.contains(&field) {
            self.order.push(field);
        }
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn with(mut self, field: TestCaseField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Populated fields in first-seen order.
    pub fn fields(&self) -> &[TestCaseField] {
        &self.order
    }

    pub fn entries(&self) -> impl Iterator<Item = (TestCaseField, &str)> + '_ {
        self.order
            .iter()
            .filter_map(move |field| self.get(*field).map(|value| (*field, value)))
    }

    /// True when no field was extracted. Unrecognized lines alone do not make
    /// a record.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Serialize for TestCaseRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let extra = usize::from(!self.unrecognized.is_empty());
        let mut map = serializer.serialize_map(Some(self.order.len() + extra))?;
        for (field, value) in self.entries() {
            map.serialize_entry(field.label(), value)?;
        }
        if !self.unrecognized.is_empty() {
            map.serialize_entry("Unrecognized", &self.unrecognized)?;
        }
        map.end()
    }
}

/// Ordered union of the fields used across `records`, first-seen order.
pub fn column_union(records: &[TestCaseRecord]) -> Vec<TestCaseField> {
    let mut columns: Vec<TestCaseField> = Vec::new();
    for record in records {
        for field in record.fields() {
            if !columns.contains(field) {
                columns.push(*field);
            }
        }
    }
    columns
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseWarning {
    /// The text contained no parseable test case.
    EmptyInput,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::EmptyInput => write!(f, "No test cases found in the generated text"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub records: Vec<TestCaseRecord>,
    pub warnings: Vec<ParseWarning>,
}

impl ParseReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// What the extractor does with lines it cannot map to a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrecognizedPolicy {
    #[default]
    Ignore,
    Collect,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioType {
    #[default]
    #[serde(rename = "All Scenarios")]
    All,
    #[serde(rename = "Positive Scenarios")]
    Positive,
    #[serde(rename = "Negative Scenarios")]
    Negative,
}

impl ScenarioType {
    pub fn label(self) -> &'static str {
        match self {
            ScenarioType::All => "All Scenarios",
            ScenarioType::Positive => "Positive Scenarios",
            ScenarioType::Negative => "Negative Scenarios",
        }
    }
}

/// Output format requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCaseTemplate {
    #[default]
    Detailed,
    Basic,
}

impl TestCaseTemplate {
    pub fn fields(self) -> &'static [TestCaseField] {
        match self {
            TestCaseTemplate::Detailed => &TestCaseField::ALL,
            TestCaseTemplate::Basic => &[
                TestCaseField::TestCaseId,
                TestCaseField::Description,
                TestCaseField::Steps,
                TestCaseField::ExpectedResults,
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TestCaseRequest {
    #[validate(length(min = 1, max = 200))]
    pub module: String,
    #[validate(length(min = 1, max = 8000))]
    pub acceptance_criteria: String,
    #[serde(default)]
    pub scenario_type: ScenarioType,
    #[serde(default)]
    pub template: TestCaseTemplate,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTestCases {
    pub module: String,
    pub raw_text: String,
    pub records: Vec<TestCaseRecord>,
    pub warnings: Vec<ParseWarning>,
}
