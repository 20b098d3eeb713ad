//! Plagiarism and grammar analysis reports.
//!
//! The server and older clients disagree on field spelling, so every field
//! accepts the snake_case name, the camelCase name and the backend's own
//! name where it differs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::wire;

/// Result of a plagiarism check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismReport {
    #[serde(deserialize_with = "wire::id::deserialize")]
    pub id: String,
    #[serde(
        alias = "homeworkId",
        alias = "assignment_id",
        deserialize_with = "wire::id::deserialize"
    )]
    pub homework_id: String,
    #[serde(
        default,
        alias = "similarityPercentage",
        alias = "similarity_score",
        deserialize_with = "wire::null_as_default"
    )]
    pub similarity_percentage: f32,
    #[serde(
        default,
        alias = "flaggedSections",
        deserialize_with = "wire::null_as_default"
    )]
    pub flagged_sections: Vec<FlaggedSection>,
    #[serde(alias = "createdAt", alias = "generated_at", with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A span of the submission that matched another source.
///
/// Offsets are `None` when the backend could not locate the chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedSection {
    #[serde(
        default,
        alias = "startIndex",
        alias = "start_pos",
        deserialize_with = "wire::offset"
    )]
    pub start_index: Option<usize>,
    #[serde(
        default,
        alias = "endIndex",
        alias = "end_pos",
        deserialize_with = "wire::offset"
    )]
    pub end_index: Option<usize>,
    #[serde(default, alias = "text", deserialize_with = "wire::null_as_default")]
    pub content: String,
    #[serde(
        default,
        alias = "similarityPercentage",
        alias = "similarity_score",
        alias = "similarity",
        deserialize_with = "wire::null_as_default"
    )]
    pub similarity_percentage: f32,
    #[serde(default, alias = "possibleSource", alias = "source")]
    pub possible_source: Option<String>,
}

/// Result of a grammar and style analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarReport {
    #[serde(deserialize_with = "wire::id::deserialize")]
    pub id: String,
    #[serde(
        alias = "homeworkId",
        alias = "assignment_id",
        deserialize_with = "wire::id::deserialize"
    )]
    pub homework_id: String,
    #[serde(
        default,
        alias = "grammarIssues",
        deserialize_with = "wire::null_as_default"
    )]
    pub grammar_issues: Vec<GrammarIssue>,
    #[serde(
        default,
        alias = "clarityScore",
        deserialize_with = "wire::null_as_default"
    )]
    pub clarity_score: f32,
    #[serde(
        default,
        alias = "structureScore",
        deserialize_with = "wire::null_as_default"
    )]
    pub structure_score: f32,
    #[serde(
        default,
        alias = "readabilityScore",
        deserialize_with = "wire::null_as_default"
    )]
    pub readability_score: f32,
    #[serde(
        default,
        alias = "improvementSuggestions",
        deserialize_with = "wire::null_as_default"
    )]
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
    /// Free-text remarks on the document's structure.
    #[serde(default, alias = "structureFeedback")]
    pub structure_feedback: Option<String>,
    #[serde(
        default,
        alias = "rewriteSuggestions",
        deserialize_with = "wire::null_as_default"
    )]
    pub rewrite_suggestions: Vec<RewriteSuggestion>,
    #[serde(alias = "createdAt", with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// `{start, end}` as the analyzer nests it under `position`.
#[derive(Debug, Default, Deserialize)]
struct Position {
    #[serde(default, deserialize_with = "wire::offset")]
    start: Option<usize>,
    #[serde(default, deserialize_with = "wire::offset")]
    end: Option<usize>,
}

/// One problem found in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGrammarIssue")]
pub struct GrammarIssue {
    pub start_index: Option<usize>,
    pub end_index: Option<usize>,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: GrammarIssueType,
    pub suggestion: String,
}

/// Accepts both flat offsets and the analyzer's nested `position`.
#[derive(Deserialize)]
struct RawGrammarIssue {
    #[serde(default, alias = "startIndex", deserialize_with = "wire::offset")]
    start_index: Option<usize>,
    #[serde(default, alias = "endIndex", deserialize_with = "wire::offset")]
    end_index: Option<usize>,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default, alias = "text", deserialize_with = "wire::null_as_default")]
    content: String,
    #[serde(rename = "type", default)]
    kind: GrammarIssueType,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    suggestion: String,
}

impl From<RawGrammarIssue> for GrammarIssue {
    fn from(raw: RawGrammarIssue) -> Self {
        let position = raw.position.unwrap_or_default();
        Self {
            start_index: raw.start_index.or(position.start),
            end_index: raw.end_index.or(position.end),
            content: raw.content,
            kind: raw.kind,
            suggestion: raw.suggestion,
        }
    }
}

/// Kind of grammar issue.
///
/// The analyzer's own kinds are folded in: `long-sentence` is `Style`,
/// `repeated-word` and anything unrecognised is `Grammar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrammarIssueType {
    Spelling,
    #[default]
    Grammar,
    Punctuation,
    Style,
}

impl GrammarIssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrammarIssueType::Spelling => "SPELLING",
            GrammarIssueType::Grammar => "GRAMMAR",
            GrammarIssueType::Punctuation => "PUNCTUATION",
            GrammarIssueType::Style => "STYLE",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "SPELLING" => GrammarIssueType::Spelling,
            "PUNCTUATION" => GrammarIssueType::Punctuation,
            "STYLE" | "LONG-SENTENCE" => GrammarIssueType::Style,
            _ => GrammarIssueType::Grammar,
        }
    }
}

impl Serialize for GrammarIssueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GrammarIssueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_wire).unwrap_or_default())
    }
}

/// A content suggestion for part of the text.
///
/// The analyzer sends `{type, text, position, suggestion}`: `text` is the
/// passage and `suggestion` the advice. It has no rewritten text, so
/// `improved_text` stays empty for those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSuggestion")]
pub struct ImprovementSuggestion {
    /// Analyzer category such as `passive-voice`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub original_text: String,
    pub improved_text: String,
    pub explanation: String,
    pub start_index: Option<usize>,
    pub end_index: Option<usize>,
}

#[derive(Deserialize)]
struct RawSuggestion {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(
        default,
        alias = "originalText",
        alias = "original",
        alias = "text",
        deserialize_with = "wire::null_as_default"
    )]
    original_text: String,
    #[serde(
        default,
        alias = "improvedText",
        alias = "improved",
        deserialize_with = "wire::null_as_default"
    )]
    improved_text: String,
    #[serde(
        default,
        alias = "suggestion",
        deserialize_with = "wire::null_as_default"
    )]
    explanation: String,
    #[serde(default, alias = "startIndex", deserialize_with = "wire::offset")]
    start_index: Option<usize>,
    #[serde(default, alias = "endIndex", deserialize_with = "wire::offset")]
    end_index: Option<usize>,
    #[serde(default)]
    position: Option<Position>,
}

impl From<RawSuggestion> for ImprovementSuggestion {
    fn from(raw: RawSuggestion) -> Self {
        let position = raw.position.unwrap_or_default();
        Self {
            kind: raw.kind,
            original_text: raw.original_text,
            improved_text: raw.improved_text,
            explanation: raw.explanation,
            start_index: raw.start_index.or(position.start),
            end_index: raw.end_index.or(position.end),
        }
    }
}

/// A proposed replacement for a hard-to-read sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteSuggestion {
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub original: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub suggestion: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plagiarism_report_from_detector_output() {
        let report: PlagiarismReport = serde_json::from_value(json!({
            "id": 5,
            "similarity_score": 42.5,
            "flagged_sections": [
                {"chunk_index": 0, "text": "copied text", "source": "essay_12.txt",
                 "similarity": 91.0, "start_pos": 10, "end_pos": 21},
                {"chunk_index": 3, "text": "lost chunk", "source": "essay_12.txt",
                 "similarity": 80.0, "start_pos": -1, "end_pos": -1}
            ],
            "sources": ["essay_12.txt"],
            "generated_at": "2025-04-03T11:00:00.654321",
            "updated_at": "2025-04-03T11:00:00.654321",
            "assignment_id": 12
        }))
        .unwrap();

        assert_eq!(report.id, "5");
        assert_eq!(report.homework_id, "12");
        assert_eq!(report.similarity_percentage, 42.5);

        let found = &report.flagged_sections[0];
        assert_eq!(found.content, "copied text");
        assert_eq!(found.similarity_percentage, 91.0);
        assert_eq!((found.start_index, found.end_index), (Some(10), Some(21)));
        assert_eq!(found.possible_source.as_deref(), Some("essay_12.txt"));

        let lost = &report.flagged_sections[1];
        assert_eq!(lost.content, "lost chunk");
        assert_eq!((lost.start_index, lost.end_index), (None, None));
    }

    #[test]
    fn test_plagiarism_report_camel_case() {
        let report: PlagiarismReport = serde_json::from_value(json!({
            "id": "r1",
            "homeworkId": "h1",
            "similarityPercentage": 3.0,
            "flaggedSections": [
                {"startIndex": 1, "endIndex": 4, "content": "abc", "similarityPercentage": 50.0}
            ],
            "createdAt": "2025-04-03T11:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(report.homework_id, "h1");
        assert_eq!(report.flagged_sections[0].start_index, Some(1));
        assert_eq!(report.flagged_sections[0].content, "abc");
    }

    #[test]
    fn test_grammar_report_from_analyzer_output() {
        let report: GrammarReport = serde_json::from_value(json!({
            "id": 9,
            "grammar_issues": [
                {"type": "repeated-word", "position": {"start": 4, "end": 11},
                 "text": "the the", "suggestion": "Repeated word: 'the'"},
                {"type": "long-sentence", "position": {"start": 20, "end": 180},
                 "text": "A very long sentence", "suggestion": "Consider breaking this long sentence into smaller ones"}
            ],
            "clarity_score": 7.5,
            "structure_feedback": "Consider adding headings.",
            "readability_score": 61.2,
            "improvement_suggestions": [
                {"type": "passive-voice", "text": "The essay was written by me.",
                 "position": {"start": 0, "end": 28},
                 "suggestion": "Consider using active voice for more direct expression"},
                {"type": "excessive-adverbs", "text": null, "position": null,
                 "suggestion": "Your writing contains many adverbs."}
            ],
            "rewrite_suggestions": [
                {"original": "Long and winding.", "suggestion": "Short.",
                 "reason": "Sentence is too long and may be difficult to follow"}
            ],
            "instructor_comments": null,
            "instructor_feedback_date": null,
            "grade": null,
            "created_at": "2025-04-03T11:00:00.123456",
            "updated_at": "2025-04-03T11:00:00.123456",
            "assignment_id": 12
        }))
        .unwrap();

        assert_eq!(report.homework_id, "12");
        let repeated = &report.grammar_issues[0];
        assert_eq!(repeated.content, "the the");
        assert_eq!((repeated.start_index, repeated.end_index), (Some(4), Some(11)));
        assert_eq!(repeated.kind, GrammarIssueType::Grammar);
        assert_eq!(report.grammar_issues[1].kind, GrammarIssueType::Style);

        let passive = &report.improvement_suggestions[0];
        assert_eq!(passive.kind.as_deref(), Some("passive-voice"));
        assert_eq!(passive.original_text, "The essay was written by me.");
        assert!(passive.explanation.starts_with("Consider using active voice"));
        assert_eq!(passive.start_index, Some(0));

        let adverbs = &report.improvement_suggestions[1];
        assert!(adverbs.original_text.is_empty());
        assert!(adverbs.start_index.is_none());

        assert_eq!(
            report.structure_feedback.as_deref(),
            Some("Consider adding headings.")
        );
        assert_eq!(report.rewrite_suggestions[0].suggestion, "Short.");
        assert_eq!(report.structure_score, 0.0);
    }

    #[test]
    fn test_grammar_report_flat_offsets_and_nulls() {
        let report: GrammarReport = serde_json::from_value(json!({
            "id": 9,
            "homework_id": 12,
            "grammar_issues": [
                {"start_index": 0, "end_index": 4, "content": "teh", "type": "spelling", "suggestion": "the"},
                {"start_index": 5, "end_index": 9, "content": "x", "type": "tone", "suggestion": "y"}
            ],
            "clarity_score": 7.5,
            "readability_score": null,
            "improvement_suggestions": null,
            "rewrite_suggestions": null,
            "created_at": "2025-04-03T11:00:00"
        }))
        .unwrap();

        assert_eq!(report.grammar_issues[0].kind, GrammarIssueType::Spelling);
        assert_eq!(report.grammar_issues[0].start_index, Some(0));
        assert_eq!(report.grammar_issues[1].kind, GrammarIssueType::Grammar);
        assert_eq!(report.readability_score, 0.0);
        assert!(report.improvement_suggestions.is_empty());
        assert!(report.rewrite_suggestions.is_empty());
        assert!(report.structure_feedback.is_none());
    }

    #[test]
    fn test_issue_kind_serializes_upper_case() {
        assert_eq!(
            serde_json::to_value(GrammarIssueType::Punctuation).unwrap(),
            json!("PUNCTUATION")
        );
    }
}
