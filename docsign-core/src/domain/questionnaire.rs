//! Parsing of AI-generated questionnaire responses.
//!
//! Hosted models answer either with a bare JSON array of questions or with the array nested
//! under one of a few well-known keys. Each shape is an explicit variant of [`QuestionEnvelope`].

use crate::foundation::SignatureError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    #[serde(alias = "text", alias = "open")]
    FreeText,
    #[serde(alias = "single", alias = "radio")]
    SingleChoice,
    #[serde(alias = "multiple", alias = "checkbox")]
    MultipleChoice,
    #[serde(alias = "scale")]
    Rating,
    #[serde(alias = "boolean")]
    YesNo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    #[serde(alias = "question", alias = "label")]
    pub text: String,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, alias = "answer")]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuestionEnvelope {
    Bare(Vec<GeneratedQuestion>),
    Questions { questions: Vec<GeneratedQuestion> },
    Items { items: Vec<GeneratedQuestion> },
    Data { data: Vec<GeneratedQuestion> },
}

impl QuestionEnvelope {
    pub fn into_questions(self) -> Vec<GeneratedQuestion> {
        match self {
            QuestionEnvelope::Bare(questions)
            | QuestionEnvelope::Questions { questions }
            | QuestionEnvelope::Items { items: questions }
            | QuestionEnvelope::Data { data: questions } => questions,
        }
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    // Drop the language tag line (```json).
    match body.split_once('\n') {
        Some((tag, rest)) if !tag.trim_start().starts_with(['[', '{']) => rest.trim(),
        _ => body.trim(),
    }
}

pub fn parse_generated_questions(raw: &str) -> Result<Vec<GeneratedQuestion>, SignatureError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(SignatureError::UnrecognizedResponseShape { details: "empty response".to_string() });
    }
    let envelope: QuestionEnvelope = serde_json::from_str(body)
        .map_err(|err| SignatureError::UnrecognizedResponseShape { details: err.to_string() })?;
    let questions: Vec<GeneratedQuestion> =
        envelope.into_questions().into_iter().filter(|question| !question.text.trim().is_empty()).collect();
    if questions.is_empty() {
        return Err(SignatureError::UnrecognizedResponseShape { details: "no questions in response".to_string() });
    }
    Ok(questions)
}
