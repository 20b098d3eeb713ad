//! Plain-text rendering of API results for the terminal.

use std::fmt::Write;

use crate::error::ApiError;
use crate::models::{GrammarReport, Homework, PlagiarismReport, User};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One-line notification for a failed operation.
pub fn error_line(err: &ApiError) -> String {
    let message = err.to_string();
    format!("error: {}", message.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Table of assignments, one row each, in the given order.
pub fn homework_list(items: &[Homework]) -> String {
    if items.is_empty() {
        return "No homework found.".to_string();
    }

    let id_width = items.iter().map(|h| h.id.len()).max().unwrap_or(2).max(2);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<id_width$}  {:<9}  {:<16}  TITLE",
        "ID",
        "STATUS",
        "DEADLINE",
        id_width = id_width
    );
    for hw in items {
        let deadline = hw
            .deadline
            .map(|d| d.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<9}  {:<16}  {}",
            hw.id,
            hw.status.as_str(),
            deadline,
            hw.title,
            id_width = id_width
        );
    }
    out.trim_end().to_string()
}

/// Full description of one assignment.
pub fn homework_details(hw: &Homework) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", hw.title, hw.id);
    let _ = writeln!(out, "  status:    {}", hw.status);
    if let Some(deadline) = hw.deadline {
        let _ = writeln!(out, "  deadline:  {}", deadline.format(TIME_FORMAT));
    }
    if !hw.description.is_empty() {
        let _ = writeln!(out, "  about:     {}", hw.description);
    }
    if let Some(name) = hw.file_name.as_deref().or(hw.file_url.as_deref()) {
        let kind = hw.file_type.as_deref().unwrap_or("?");
        let _ = writeln!(out, "  file:      {} ({})", name, kind);
    }
    if let Some(submitted) = hw.submitted_at {
        let _ = writeln!(out, "  submitted: {}", submitted.format(TIME_FORMAT));
    }
    let _ = writeln!(out, "  created:   {}", hw.created_at.format(TIME_FORMAT));
    let _ = writeln!(out, "  updated:   {}", hw.updated_at.format(TIME_FORMAT));
    if let Some(report) = &hw.plagiarism_report {
        let _ = writeln!(out, "  similarity: {:.1}%", report.similarity_percentage);
    }
    if let Some(report) = &hw.grammar_report {
        let _ = writeln!(out, "  grammar issues: {}", report.grammar_issues.len());
    }
    if let Some(feedback) = &hw.instructor_feedback {
        let _ = writeln!(out, "  instructor: {}", feedback);
    }
    out.trim_end().to_string()
}

pub fn user(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} <{}> (#{})", user.full_name, user.email, user.id);
    if let Some(roles) = &user.roles {
        let _ = writeln!(out, "  roles:      {}", roles.join(", "));
    }
    if let Some(active) = user.is_active {
        let _ = writeln!(out, "  active:     {}", active);
    }
    if let Some(last_login) = user.last_login {
        let _ = writeln!(out, "  last login: {}", last_login.format(TIME_FORMAT));
    }
    if let Some(created) = user.created_at {
        let _ = writeln!(out, "  joined:     {}", created.format(TIME_FORMAT));
    }
    if let Some(settings) = &user.settings {
        let _ = writeln!(
            out,
            "  settings:   {}",
            serde_json::Value::Object(settings.clone())
        );
    }
    out.trim_end().to_string()
}

pub fn plagiarism(report: &PlagiarismReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Plagiarism report #{} for homework #{}: {:.1}% similar",
        report.id, report.homework_id, report.similarity_percentage
    );
    for section in &report.flagged_sections {
        let _ = write!(
            out,
            "  {} {:.1}% \"{}\"",
            span(section.start_index, section.end_index),
            section.similarity_percentage,
            section.content
        );
        if let Some(source) = &section.possible_source {
            let _ = write!(out, " <- {}", source);
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

pub fn grammar(report: &GrammarReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Feedback #{} for homework #{}: clarity {:.1}, structure {:.1}, readability {:.1}",
        report.id,
        report.homework_id,
        report.clarity_score,
        report.structure_score,
        report.readability_score
    );
    for issue in &report.grammar_issues {
        let _ = writeln!(
            out,
            "  {:<11} {} \"{}\": {}",
            issue.kind.as_str(),
            span(issue.start_index, issue.end_index),
            issue.content,
            issue.suggestion
        );
    }
    if let Some(structure) = report.structure_feedback.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "  structure: {}", structure);
    }
    for suggestion in &report.improvement_suggestions {
        let _ = write!(out, "  suggest: {}", suggestion.explanation);
        if !suggestion.original_text.is_empty() {
            let _ = write!(out, " \"{}\"", suggestion.original_text);
        }
        if !suggestion.improved_text.is_empty() {
            let _ = write!(out, " -> \"{}\"", suggestion.improved_text);
        }
        out.push('\n');
    }
    for rewrite in &report.rewrite_suggestions {
        let _ = writeln!(
            out,
            "  rewrite: \"{}\" -> \"{}\" ({})",
            rewrite.original, rewrite.suggestion, rewrite.reason
        );
    }
    out.trim_end().to_string()
}

/// `[start..end]`, or `[?]` when the backend could not place the text.
fn span(start: Option<usize>, end: Option<usize>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("[{}..{}]", start, end),
        (Some(start), None) => format!("[{}..]", start),
        _ => "[?]".to_string(),
    }
}
