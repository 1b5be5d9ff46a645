use crate::domain::test_case::{TestCaseField, TestCaseRequest, TestCaseTemplate};
use crate::domain::travel_guide::TravelGuideRequest;

fn field_placeholder(field: TestCaseField) -> &'static str {
    match field {
        TestCaseField::TestCaseId => "TC-XXX",
        TestCaseField::Description => "[Test case description]",
        TestCaseField::PreConditions => "[List pre-conditions]",
        TestCaseField::Steps => "[Numbered steps to execute]",
        TestCaseField::ExpectedResults => "[Expected outcome]",
        TestCaseField::PostConditions => "[List post-conditions]",
        TestCaseField::Tags => "[Relevant tags]",
    }
}

fn output_format(template: TestCaseTemplate) -> String {
    template
        .fields()
        .iter()
        .map(|field| format!("{}: {}\n", field.label(), field_placeholder(*field)))
        .collect()
}

pub(crate) fn build_test_case_prompt(request: &TestCaseRequest) -> String {
    let mut body = String::new();
    body.push_str("Generate detailed test cases based on the following:\n");
    body.push_str(&format!("Module: {}\n", request.module.trim()));
    body.push_str(&format!(
        "Acceptance Criteria: {}\n",
        request.acceptance_criteria.trim()
    ));
    body.push_str(&format!(
        "Scenario Type: {}\n\n",
        request.scenario_type.label()
    ));
    body.push_str("Output each test case in this exact format:\n");
    body.push_str(&output_format(request.template));
    body.push_str("\nGenerate multiple test cases, with each separated by a blank line.");
    body
}

pub(crate) fn build_travel_guide_prompt(request: &TravelGuideRequest) -> String {
    format!(
        "Welcome to the {city} travel guide!\n\
         If you're visiting in {month}, here is what you can do:\n\
         1. Must-Visit attractions\n\
         2. Local Cuisine you must try.\n\
         3. Useful phrases in {language}\n\
         4. Tips for traveling on a {budget} budget\n\n\
         Enjoy your trip!!",
        city = request.city.trim(),
        month = request.month.trim(),
        language = request.language.trim(),
        budget = request.budget.label(),
    )
}
