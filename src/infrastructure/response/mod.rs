use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static REASONING_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reasoning>[\s\S]*?</reasoning>").unwrap());

static CODE_FENCE_LINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*```[A-Za-z0-9_-]*[ \t]*$").unwrap());

static BOLD_MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());

static MULTIPLE_NEWLINES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strips model artifacts from a reply so it can be shown or parsed as plain
/// text: reasoning blocks, code fence lines, markdown bold markers, `\r` and
/// runs of blank lines.
pub fn clean_llm_response(response: &str) -> String {
    let mut cleaned = response.replace("\r\n", "\n");

    cleaned = THINK_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned = REASONING_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned = CODE_FENCE_LINE_PATTERN.replace_all(&cleaned, "").to_string();

    // "**Test Case ID:** TC-001" must start with the marker to be recognized.
    cleaned = BOLD_MARKER_PATTERN.replace_all(&cleaned, "$1").to_string();

    cleaned = cleaned.trim().to_string();

    MULTIPLE_NEWLINES_PATTERN
        .replace_all(&cleaned, "\n\n")
        .to_string()
}
