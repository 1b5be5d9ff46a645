use crate::domain::test_case::TestCaseField;

/// Line prefixes that open a new test case.
pub(crate) const ID_MARKERS: [&str; 3] = ["Test Case ID:", "TC-", "#"];

/// Key fragments matched against the lowercased key, checked in order.
pub(crate) const FIELD_KEYS: [(&str, TestCaseField); 6] = [
    ("description", TestCaseField::Description),
    ("pre-condition", TestCaseField::PreConditions),
    ("step", TestCaseField::Steps),
    ("expected", TestCaseField::ExpectedResults),
    ("post-condition", TestCaseField::PostConditions),
    ("tag", TestCaseField::Tags),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Starts a new record; carries the ID value.
    IdMarker(&'a str),
    Field(TestCaseField, &'a str),
    UnknownKey { key: &'a str, value: &'a str },
    Plain(&'a str),
}

/// Classifies one trimmed line.
pub(crate) fn classify_line(line: &str) -> LineKind<'_> {
    if ID_MARKERS.iter().any(|marker| line.starts_with(marker)) {
        let value = match line.split_once(':') {
            Some((_, rest)) => rest.trim(),
            None => line.trim(),
        };
        return LineKind::IdMarker(value);
    }

    let Some((key, value)) = line.split_once(':') else {
        return LineKind::Plain(line);
    };
    let key = key.trim();
    let value = value.trim();

    match match_field_key(key) {
        Some(field) => LineKind::Field(field, value),
        None => LineKind::UnknownKey { key, value },
    }
}

pub(crate) fn match_field_key(key: &str) -> Option<TestCaseField> {
    let lowered = key.to_lowercase();
    FIELD_KEYS
        .iter()
        .find(|(fragment, _)| lowered.contains(fragment))
        .map(|(_, field)| *field)
}
