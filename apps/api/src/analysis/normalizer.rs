//! Response Normalizer: turns noisy model output into an `AnalysisResult`.
//!
//! Pipeline:
//! 1. strip a leading/trailing code fence
//! 2. parse the greedy `{ ... }` span (first `{` to last `}`)
//! 3. else parse the whole cleaned text
//! 4. else fall back to the canned default
//!
//! A truthy `not_a_resume` member short-circuits to a rejection. Missing or
//! mistyped fields degrade to the canned default; only an uncoercible
//! `score` is treated as a hard failure.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::analysis::{AnalysisResult, ExperienceLevel, SkillGap};

pub const REQUIRED_FIELDS: [&str; 7] = [
    "score",
    "role",
    "description",
    "skillGap",
    "experienceLevel",
    "strengths",
    "improvements",
];

const SENTINEL_FIELD: &str = "not_a_resume";

/// Outcome of normalizing one model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The model declared the document not to be a resume.
    NotAResume,
    Analysis(AnalysisResult),
    /// Output could not be validated; callers serve `AnalysisResult::default()`.
    Degraded(DegradeReason),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegradeReason {
    #[error("no JSON object found in model output")]
    Unparseable,

    #[error("model output is missing field '{0}'")]
    MissingField(&'static str),

    #[error("model output has an invalid '{0}' field")]
    InvalidField(&'static str),
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("score is not coercible to an integer: {0}")]
    Score(Value),
}

pub fn normalize(raw: &str) -> Result<Verdict, NormalizeError> {
    let cleaned = strip_code_fence(raw);

    let Some(object) = extract_object(cleaned) else {
        return Ok(Verdict::Degraded(DegradeReason::Unparseable));
    };

    if object.get(SENTINEL_FIELD).is_some_and(is_truthy) {
        return Ok(Verdict::NotAResume);
    }

    if let Some(field) = REQUIRED_FIELDS.into_iter().find(|f| !object.contains_key(*f)) {
        return Ok(Verdict::Degraded(DegradeReason::MissingField(field)));
    }

    build_result(&object)
}

/// Removes a leading ```` ``` ```` / ```` ```json ```` marker and a trailing ```` ``` ````.
fn strip_code_fence(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// Span from the first `{` to the last `}`. Greedy on purpose: with several
/// objects in a chatty response the span covers all of them.
fn greedy_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn extract_object(text: &str) -> Option<Map<String, Value>> {
    greedy_object_span(text)
        .and_then(parse_object)
        .or_else(|| parse_object(text))
}

/// JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn build_result(object: &Map<String, Value>) -> Result<Verdict, NormalizeError> {
    let score = coerce_score(&object["score"])?;

    Ok(match typed_fields(object, score) {
        Ok(result) => Verdict::Analysis(result),
        Err(reason) => Verdict::Degraded(reason),
    })
}

fn typed_fields(object: &Map<String, Value>, score: i64) -> Result<AnalysisResult, DegradeReason> {
    let text = |field: &'static str| {
        scalar_text(&object[field]).ok_or(DegradeReason::InvalidField(field))
    };
    let list = |field: &'static str| {
        text_list(&object[field]).ok_or(DegradeReason::InvalidField(field))
    };

    Ok(AnalysisResult {
        score,
        role: text("role")?,
        description: text("description")?,
        skill_gap: SkillGap::from_label(&text("skillGap")?),
        experience_level: ExperienceLevel::from_label(&text("experienceLevel")?),
        strengths: list("strengths")?,
        improvements: list("improvements")?,
    })
}

/// Integers pass, floats truncate, numeric strings parse, booleans are 0/1.
/// The result is clamped into 0..=100.
fn coerce_score(value: &Value) -> Result<i64, NormalizeError> {
    let score = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };
    score
        .map(|s| s.clamp(0, 100))
        .ok_or_else(|| NormalizeError::Score(value.clone()))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Sequences keep their order; a lone scalar becomes a one-element sequence.
fn text_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| scalar_text(item).unwrap_or_else(|| item.to_string()))
                .collect(),
        ),
        other => scalar_text(other).map(|s| vec![s]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FULL: &str = r#"{
        "score": 82,
        "role": "Backend Engineer",
        "description": "Strong systems background.",
        "skillGap": "Minor Gaps",
        "experienceLevel": "Mid Level",
        "strengths": ["Rust", "SQL", "APIs", "Testing", "Ownership"],
        "improvements": ["Metrics", "Cloud", "Leadership", "Docs", "Design"]
    }"#;

    fn analysis(raw: &str) -> AnalysisResult {
        match normalize(raw).unwrap() {
            Verdict::Analysis(result) => result,
            other => panic!("expected analysis, got {other:?}"),
        }
    }

    #[test]
    fn test_well_formed_response_passes_through() {
        let result = analysis(FULL);
        assert_eq!(result.score, 82);
        assert_eq!(result.role, "Backend Engineer");
        assert_eq!(result.skill_gap, SkillGap::MinorGaps);
        assert_eq!(result.experience_level, ExperienceLevel::Mid);
        assert_eq!(result.strengths.len(), 5);
        assert_eq!(result.improvements[0], "Metrics");
    }

    #[test]
    fn test_code_fenced_response_is_unwrapped() {
        let raw = format!("```json\n{FULL}\n```");
        assert_eq!(analysis(&raw).score, 82);
        let raw = format!("```\n{FULL}\n```");
        assert_eq!(analysis(&raw).score, 82);
    }

    #[test]
    fn test_prose_around_object_is_ignored() {
        let raw = format!("Here is the analysis you asked for:\n{FULL}\nLet me know if you need more.");
        assert_eq!(analysis(&raw).role, "Backend Engineer");
    }

    #[test]
    fn test_unparseable_output_degrades() {
        assert_eq!(
            normalize("I cannot help with that.").unwrap(),
            Verdict::Degraded(DegradeReason::Unparseable)
        );
        assert_eq!(
            normalize("{ not json }").unwrap(),
            Verdict::Degraded(DegradeReason::Unparseable)
        );
    }

    #[test]
    fn test_non_object_json_degrades() {
        assert_eq!(
            normalize("[1, 2, 3]").unwrap(),
            Verdict::Degraded(DegradeReason::Unparseable)
        );
    }

    #[test]
    fn test_greedy_span_swallows_two_objects() {
        // First `{` to last `}` spans both objects, which is not valid JSON.
        let raw = r#"{"a": 1} and also {"b": 2}"#;
        assert_eq!(
            normalize(raw).unwrap(),
            Verdict::Degraded(DegradeReason::Unparseable)
        );
    }

    #[test]
    fn test_missing_field_degrades_to_default() {
        let mut value: Value = serde_json::from_str(FULL).unwrap();
        value.as_object_mut().unwrap().remove("experienceLevel");
        assert_eq!(
            normalize(&value.to_string()).unwrap(),
            Verdict::Degraded(DegradeReason::MissingField("experienceLevel"))
        );
    }

    #[test]
    fn test_sentinel_is_a_rejection() {
        assert_eq!(normalize(r#"{"not_a_resume": true}"#).unwrap(), Verdict::NotAResume);
        assert_eq!(
            normalize("```json\n{\"not_a_resume\": true}\n```").unwrap(),
            Verdict::NotAResume
        );
        assert_eq!(
            normalize("This is a recipe, so: {\"not_a_resume\": true}").unwrap(),
            Verdict::NotAResume
        );
    }

    #[test]
    fn test_falsy_sentinel_is_ignored() {
        let mut value: Value = serde_json::from_str(FULL).unwrap();
        value["not_a_resume"] = json!(false);
        assert_eq!(analysis(&value.to_string()).score, 82);

        assert_eq!(
            normalize(r#"{"not_a_resume": 0}"#).unwrap(),
            Verdict::Degraded(DegradeReason::MissingField("score"))
        );
    }

    #[test]
    fn test_score_coercion() {
        assert_eq!(coerce_score(&json!(77)).unwrap(), 77);
        assert_eq!(coerce_score(&json!(77.9)).unwrap(), 77);
        assert_eq!(coerce_score(&json!(" 64 ")).unwrap(), 64);
        assert_eq!(coerce_score(&json!(true)).unwrap(), 1);
        assert_eq!(coerce_score(&json!(140)).unwrap(), 100);
        assert_eq!(coerce_score(&json!(-5)).unwrap(), 0);
        assert!(coerce_score(&json!("85%")).is_err());
        assert!(coerce_score(&json!(null)).is_err());
    }

    #[test]
    fn test_uncoercible_score_is_an_error() {
        let mut value: Value = serde_json::from_str(FULL).unwrap();
        value["score"] = json!("high");
        assert!(matches!(
            normalize(&value.to_string()),
            Err(NormalizeError::Score(_))
        ));
    }

    #[test]
    fn test_scalar_lists_are_wrapped() {
        let mut value: Value = serde_json::from_str(FULL).unwrap();
        value["strengths"] = json!("Clear formatting");
        value["improvements"] = json!(3);
        let result = analysis(&value.to_string());
        assert_eq!(result.strengths, vec!["Clear formatting"]);
        assert_eq!(result.improvements, vec!["3"]);
    }

    #[test]
    fn test_null_list_degrades() {
        let mut value: Value = serde_json::from_str(FULL).unwrap();
        value["improvements"] = Value::Null;
        assert_eq!(
            normalize(&value.to_string()).unwrap(),
            Verdict::Degraded(DegradeReason::InvalidField("improvements"))
        );
    }

    #[test]
    fn test_object_in_string_field_degrades() {
        let mut value: Value = serde_json::from_str(FULL).unwrap();
        value["role"] = json!({"title": "Engineer"});
        assert_eq!(
            normalize(&value.to_string()).unwrap(),
            Verdict::Degraded(DegradeReason::InvalidField("role"))
        );
    }

    #[test]
    fn test_unknown_labels_fall_back_per_field() {
        let mut value: Value = serde_json::from_str(FULL).unwrap();
        value["skillGap"] = json!("Some Gaps");
        value["experienceLevel"] = json!("senior level");
        let result = analysis(&value.to_string());
        assert_eq!(result.skill_gap, SkillGap::Unknown);
        assert_eq!(result.experience_level, ExperienceLevel::Senior);
        assert_eq!(result.role, "Backend Engineer");
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```json {}"), "{}");
    }
}
