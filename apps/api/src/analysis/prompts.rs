// LLM prompt for resume analysis.
// The document text and job description are embedded verbatim: no
// truncation, escaping or delimiting beyond what extraction produced.

use crate::models::analysis::{ExperienceLevel, SkillGap};

/// Used in place of a job description when the caller did not supply one.
pub const GENERIC_ANALYSIS_PLACEHOLDER: &str = "General employability analysis";

/// Sentinel the model returns for documents that are not resumes.
pub const NOT_A_RESUME_SENTINEL: &str = r#"{"not_a_resume": true}"#;

/// Number of items required in `strengths` and in `improvements`.
pub const LIST_ITEMS: usize = 5;

const GATE_INSTRUCTION: &str = "First determine whether the following text is a professional resume.";

const ROLE_INSTRUCTION: &str = "You are an expert ATS (Applicant Tracking System) Resume Analyzer.";

/// Builds the single instruction block sent to the model.
pub fn build_analysis_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let job_description = job_description.unwrap_or(GENERIC_ANALYSIS_PLACEHOLDER);

    format!(
        r#"
{GATE_INSTRUCTION}

If it is NOT a resume, respond ONLY with:
{NOT_A_RESUME_SENTINEL}

If it IS a resume, then analyze it as instructed.

{ROLE_INSTRUCTION}

Respond ONLY with a valid JSON object in this exact format:

{schema}

JOB DESCRIPTION:
{job_description}

RESUME CONTENT:
{resume_text}
"#,
        schema = response_schema(),
    )
}

fn response_schema() -> String {
    let skill_gaps = SkillGap::LABELS.map(SkillGap::label).join(" | ");
    let levels = ExperienceLevel::LABELS.map(ExperienceLevel::label).join(" | ");

    format!(
        r#"{{
    "score": <number from 0-100>,
    "role": "<best matching job role>",
    "description": "<2-3 sentence explanation>",
    "skillGap": "<{skill_gaps}>",
    "experienceLevel": "<{levels}>",
    "strengths": [
{strengths}
    ],
    "improvements": [
{improvements}
    ]
}}"#,
        strengths = placeholder_items("strength"),
        improvements = placeholder_items("improvement"),
    )
}

fn placeholder_items(name: &str) -> String {
    (1..=LIST_ITEMS)
        .map(|i| format!("        \"<{name} {i}>\""))
        .collect::<Vec<_>>()
        .join(",\n")
}
