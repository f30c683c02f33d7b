//! Analysis data model and the shape check applied to parsed model output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The fixed-schema result returned to the caller.
///
/// Deserializing into this type IS the shape check: every field must be present
/// with the right type, nested objects included. There are no serde defaults on
/// schema fields, so partial objects are rejected wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub skills_match: SkillsMatch,
    pub keyword_analysis: KeywordAnalysis,
    pub recommendations: Vec<String>,
    pub ats_score: f64,
    pub competitiveness: Competitiveness,
    pub experience_analysis: ExperienceAnalysis,
    /// Set only on the fallback result: the model that was attempted.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAnalysis {
    pub relevant_years: f64,
    pub industry_match: bool,
    pub career_progression: CareerProgression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competitiveness {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerProgression {
    Excellent,
    Good,
    NeedsImprovement,
}

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("schema mismatch: {0}")]
    Schema(#[from] serde_json::Error),
}

impl AnalysisResult {
    /// Accepts a parsed candidate only if it satisfies the full schema.
    pub fn from_value(value: Value) -> Result<Self, ShapeError> {
        if !value.is_object() {
            return Err(ShapeError::NotAnObject(json_kind(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Language the caller wants the feedback written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Indonesia,
    English,
}

#[derive(Debug, Error)]
#[error("unsupported language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "indonesia" => Ok(Language::Indonesia),
            "english" => Ok(Language::English),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Indonesia => f.write_str("indonesia"),
            Language::English => f.write_str("english"),
        }
    }
}

/// Everything one analysis needs. Lives for a single request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub job_title: String,
    pub job_level: String,
    pub job_requirements: String,
    pub job_description: String,
    pub language: Language,
    pub resume_text: String,
    pub model: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::valid_result_json;
    use super::*;
    use serde_json::json;

    const REQUIRED_PATHS: &[&[&str]] = &[
        &["score"],
        &["summary"],
        &["strengths"],
        &["weaknesses"],
        &["skillsMatch"],
        &["skillsMatch", "matched"],
        &["skillsMatch", "missing"],
        &["skillsMatch", "percentage"],
        &["keywordAnalysis"],
        &["keywordAnalysis", "found"],
        &["keywordAnalysis", "missing"],
        &["keywordAnalysis", "density"],
        &["recommendations"],
        &["atsScore"],
        &["competitiveness"],
        &["experienceAnalysis"],
        &["experienceAnalysis", "relevantYears"],
        &["experienceAnalysis", "industryMatch"],
        &["experienceAnalysis", "careerProgression"],
    ];

    fn remove_path(value: &mut Value, path: &[&str]) {
        let (last, parents) = path.split_last().unwrap();
        let mut cursor = value;
        for key in parents {
            cursor = cursor.get_mut(*key).unwrap();
        }
        cursor.as_object_mut().unwrap().remove(*last).unwrap();
    }

    #[test]
    fn test_valid_result_passes_shape_check() {
        let result = AnalysisResult::from_value(valid_result_json()).unwrap();
        assert!((result.score - 78.0).abs() < f64::EPSILON);
        assert_eq!(result.competitiveness, Competitiveness::High);
        assert_eq!(
            result.experience_analysis.career_progression,
            CareerProgression::Good
        );
        assert_eq!(result.skills_match.missing, vec!["Kubernetes"]);
        assert!(result.model.is_none());
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        for path in REQUIRED_PATHS {
            let mut value = valid_result_json();
            remove_path(&mut value, path);
            assert!(
                AnalysisResult::from_value(value).is_err(),
                "missing {path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_wrong_primitive_type_is_rejected() {
        let mut value = valid_result_json();
        value["score"] = json!("78");
        assert!(AnalysisResult::from_value(value).is_err());

        let mut value = valid_result_json();
        value["strengths"] = json!("Rust");
        assert!(AnalysisResult::from_value(value).is_err());

        let mut value = valid_result_json();
        value["experienceAnalysis"]["industryMatch"] = json!("yes");
        assert!(AnalysisResult::from_value(value).is_err());

        let mut value = valid_result_json();
        value["summary"] = Value::Null;
        assert!(AnalysisResult::from_value(value).is_err());
    }

    #[test]
    fn test_unknown_enum_values_are_rejected() {
        let mut value = valid_result_json();
        value["competitiveness"] = json!("very high");
        assert!(AnalysisResult::from_value(value).is_err());

        let mut value = valid_result_json();
        value["experienceAnalysis"]["careerProgression"] = json!("poor");
        assert!(AnalysisResult::from_value(value).is_err());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(
            AnalysisResult::from_value(json!([1, 2, 3])),
            Err(ShapeError::NotAnObject("an array"))
        ));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut value = valid_result_json();
        value["confidence"] = json!(0.9);
        value["model"] = json!("injected");
        let result = AnalysisResult::from_value(value).unwrap();
        assert!(result.model.is_none());
    }

    #[test]
    fn test_needs_improvement_serializes_snake_case() {
        let json = serde_json::to_value(CareerProgression::NeedsImprovement).unwrap();
        assert_eq!(json, json!("needs_improvement"));
    }

    #[test]
    fn test_model_field_only_serialized_when_set() {
        let mut result = AnalysisResult::from_value(valid_result_json()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("model").is_none());

        result.model = Some("qwen/qwen3-235b-a22b:free".to_string());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["model"], "qwen/qwen3-235b-a22b:free");
        assert_eq!(json["skillsMatch"]["percentage"], 74.0);
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("indonesia".parse::<Language>().unwrap(), Language::Indonesia);
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert!("french".parse::<Language>().is_err());
        assert!("English".parse::<Language>().is_err());
        assert_eq!(Language::Indonesia.to_string(), "indonesia");
    }
}
