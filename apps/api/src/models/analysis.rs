use serde::{Deserialize, Serialize};

/// How far the resume is from the target role. Labels are the exact strings
/// the model is asked to choose from; `Unknown` is reserved for fallbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillGap {
    #[serde(rename = "Excellent Match")]
    ExcellentMatch,
    #[serde(rename = "Minor Gaps")]
    MinorGaps,
    #[serde(rename = "Moderate Gaps")]
    ModerateGaps,
    #[serde(rename = "Significant Gaps")]
    SignificantGaps,
    #[default]
    Unknown,
}

impl SkillGap {
    /// Labels offered to the model, in prompt order.
    pub const LABELS: [SkillGap; 4] = [
        SkillGap::ExcellentMatch,
        SkillGap::MinorGaps,
        SkillGap::ModerateGaps,
        SkillGap::SignificantGaps,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillGap::ExcellentMatch => "Excellent Match",
            SkillGap::MinorGaps => "Minor Gaps",
            SkillGap::ModerateGaps => "Moderate Gaps",
            SkillGap::SignificantGaps => "Significant Gaps",
            SkillGap::Unknown => "Unknown",
        }
    }

    /// Case-insensitive lookup. Unrecognised labels map to `Unknown`.
    pub fn from_label(raw: &str) -> Self {
        let raw = raw.trim();
        Self::LABELS
            .into_iter()
            .find(|gap| gap.label().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    Entry,
    #[serde(rename = "Junior Level")]
    Junior,
    #[serde(rename = "Mid Level")]
    Mid,
    #[serde(rename = "Senior Level")]
    Senior,
    #[serde(rename = "Executive Level")]
    Executive,
    #[default]
    #[serde(rename = "Not Determined")]
    NotDetermined,
}

impl ExperienceLevel {
    pub const LABELS: [ExperienceLevel; 5] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Junior,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Executive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Junior => "Junior Level",
            ExperienceLevel::Mid => "Mid Level",
            ExperienceLevel::Senior => "Senior Level",
            ExperienceLevel::Executive => "Executive Level",
            ExperienceLevel::NotDetermined => "Not Determined",
        }
    }

    pub fn from_label(raw: &str) -> Self {
        let raw = raw.trim();
        Self::LABELS
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }
}

/// The verdict returned by `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: i64, // 0 – 100
    pub role: String,
    pub description: String,
    pub skill_gap: SkillGap,
    pub experience_level: ExperienceLevel,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl Default for AnalysisResult {
    /// The canned result served when the model output cannot be validated.
    fn default() -> Self {
        Self {
            score: 50,
            role: "Professional".to_string(),
            description: "Unable to analyze the resume properly.".to_string(),
            skill_gap: SkillGap::Unknown,
            experience_level: ExperienceLevel::NotDetermined,
            strengths: vec!["Resume uploaded successfully".to_string()],
            improvements: vec!["Please upload a clearer and more detailed resume".to_string()],
        }
    }
}
