use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Web,
    Android,
    #[serde(rename = "iOS")]
    Ios,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Web => "Web",
            Platform::Android => "Android",
            Platform::Ios => "iOS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Blocker,
    Major,
    Minor,
    Trivial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefectStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Fixed,
    Closed,
}

/// One row of the defect log. Keys match the on-disk `defect_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DefectEntry {
    #[serde(rename = "Release")]
    #[validate(length(min = 1, max = 64))]
    pub release: String,
    #[serde(rename = "Platform")]
    pub platform: Platform,
    #[serde(rename = "Component", default)]
    #[validate(length(max = 128))]
    pub component: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Priority")]
    pub priority: Priority,
    #[serde(rename = "Severity")]
    pub severity: Severity,
    #[serde(rename = "Count")]
    pub count: u32,
    #[serde(rename = "Status")]
    pub status: DefectStatus,
    #[serde(rename = "AssignedTo", default)]
    #[validate(length(max = 128))]
    pub assigned_to: String,
    #[serde(rename = "Description", default)]
    #[validate(length(max = 4000))]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountByPlatform {
    pub platform: Platform,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountByPriority {
    pub priority: Priority,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseTrendPoint {
    pub release: String,
    pub platform: Platform,
    pub count: u64,
}

/// Data behind the dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefectSummary {
    pub total_entries: usize,
    pub total_defects: u64,
    pub by_platform: Vec<CountByPlatform>,
    pub by_priority: Vec<CountByPriority>,
    pub trend: Vec<ReleaseTrendPoint>,
}
