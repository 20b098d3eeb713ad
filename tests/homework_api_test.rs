//! Homework and analysis endpoints over the reqwest transport.

mod common;

use common::{api_for, homework_json, ok};
use futures::StreamExt;
use hwassist::adapters::InMemoryCredentials;
use hwassist::models::{
    DeadlineFilter, GrammarIssueType, HomeworkFilter, HomeworkStatus, HomeworkUpdate,
    UploadRequest,
};
use hwassist::repository::{AnalysisRepository, HomeworkRepository};
use hwassist::resource::Resource;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn terminal<T>(stream: hwassist::resource::ResourceStream<T>) -> Resource<T> {
    let mut items: Vec<_> = stream.collect().await;
    assert_eq!(items.len(), 2, "expected Loading and one terminal state");
    assert!(items[0].is_loading());
    items.remove(1)
}

fn repos(server: &MockServer) -> (HomeworkRepository, AnalysisRepository) {
    let api = api_for(server, &InMemoryCredentials::with_token("tok"));
    (HomeworkRepository::new(api.clone()), AnalysisRepository::new(api))
}

#[tokio::test]
async fn test_list_sends_filters_and_keeps_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assignments"))
        .and(query_param("status", "DRAFT"))
        .and(query_param("search", "essay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": [
                homework_json(2, "Second essay", "draft"),
                homework_json(1, "First essay", "DRAFT")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    let filter = HomeworkFilter::new().with_status("DRAFT").with_search("essay");
    let items = terminal(homework.list(filter)).await.into_data().unwrap();

    let ids: Vec<_> = items.iter().map(|hw| hw.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert!(items.iter().all(|hw| hw.status == HomeworkStatus::Draft));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query_pairs().all(|(k, _)| k != "deadline"));
}

#[tokio::test]
async fn test_list_accepts_success_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assignments"))
        .and(query_param("deadline", "today"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Success",
            "data": []
        })))
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    let filter = HomeworkFilter::new().with_deadline(DeadlineFilter::Today);
    let result = terminal(homework.list(filter)).await;
    assert_eq!(result.data().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_upload_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/assignments"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Lab report"))
        .and(body_string_contains("name=\"deadline\""))
        .and(body_string_contains("2025-05-01T12:00:00"))
        .and(body_string_contains("name=\"file\"; filename=\"lab.txt\""))
        .and(body_string_contains("measured values"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(ok(homework_json(11, "Lab report", "draft"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    let request = UploadRequest::new(
        "Lab report",
        "Week 3",
        "2025-05-01T12:00:00",
        "lab.txt",
        b"measured values".to_vec(),
    )
    .with_mime("text/plain");

    let created = terminal(homework.upload(request)).await.into_data().unwrap();
    assert_eq!(created.id, "11");
    assert_eq!(created.title, "Lab report");
}

#[tokio::test]
async fn test_update_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/assignments/5"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(homework_json(5, "Renamed", "draft"))))
        .expect(1)
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    let update = HomeworkUpdate {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = terminal(homework.update("5", update)).await.into_data().unwrap();
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn test_submit_changes_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/assignments/5/submit"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok(homework_json(5, "Essay", "submitted"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    let submitted = terminal(homework.submit("5")).await.into_data().unwrap();
    assert_eq!(submitted.status, HomeworkStatus::Submitted);
}

#[tokio::test]
async fn test_delete_succeeds_without_payload() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/assignments/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Assignment deleted successfully",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    assert_eq!(terminal(homework.delete("5")).await.into_data(), Some(true));
}

#[tokio::test]
async fn test_delete_failure_reports_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/assignments/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "error", "error": "Not found"})),
        )
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    let result = terminal(homework.delete("5")).await;
    assert_eq!(result.message().as_deref(), Some("Not found"));
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assignments/5/file"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x25, 0x50, 0x44, 0x46, 0x00]))
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    let bytes = terminal(homework.download("5")).await.into_data().unwrap();
    assert_eq!(bytes.as_ref(), &[0x25, 0x50, 0x44, 0x46, 0x00]);
}

#[tokio::test]
async fn test_ids_are_path_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assignments/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(homework_json(1, "Odd", "draft"))))
        .expect(1)
        .mount(&server)
        .await;

    let (homework, _) = repos(&server);
    assert!(terminal(homework.get("a/b")).await.is_success());
}

#[tokio::test]
async fn test_plagiarism_check_and_report() {
    let server = MockServer::start().await;
    let report = json!({
        "id": 3,
        "similarity_score": 41.7,
        "flagged_sections": [
            {
                "chunk_index": 0,
                "text": "To be or not to be, that is the question.",
                "source": "Hamlet",
                "similarity": 0.92,
                "start_pos": 0,
                "end_pos": 41
            },
            {
                "chunk_index": 3,
                "text": "whether tis nobler in the mind to suffer",
                "source": "Hamlet",
                "similarity": 0.81,
                "start_pos": -1,
                "end_pos": -1
            }
        ],
        "sources": ["Hamlet"],
        "generated_at": "2025-04-03T10:00:00.123456",
        "updated_at": "2025-04-03T10:00:00.123456",
        "assignment_id": 5
    });
    Mock::given(method("POST"))
        .and(path("/api/plagiarism/check/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Plagiarism check completed",
            "data": report.clone()
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/plagiarism/report/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(report)))
        .expect(1)
        .mount(&server)
        .await;

    let (_, analysis) = repos(&server);
    let checked = terminal(analysis.check_plagiarism("5")).await.into_data().unwrap();
    assert_eq!(checked.id, "3");
    assert_eq!(checked.homework_id, "5");
    assert!((checked.similarity_percentage - 41.7).abs() < 1e-4);
    assert_eq!(checked.flagged_sections.len(), 2);

    let located = &checked.flagged_sections[0];
    assert_eq!(located.content, "To be or not to be, that is the question.");
    assert_eq!((located.start_index, located.end_index), (Some(0), Some(41)));
    assert!(located.similarity_percentage > 0.9);
    assert_eq!(located.possible_source.as_deref(), Some("Hamlet"));

    let unplaced = &checked.flagged_sections[1];
    assert!(!unplaced.content.is_empty());
    assert_eq!((unplaced.start_index, unplaced.end_index), (None, None));

    let fetched = terminal(analysis.plagiarism_report("5")).await.into_data().unwrap();
    assert_eq!(fetched, checked);
}

#[tokio::test]
async fn test_analyze_and_feedback() {
    let server = MockServer::start().await;
    let report = json!({
        "id": 8,
        "grammar_issues": [
            {
                "type": "repeated-word",
                "position": {"start": 4, "end": 11},
                "text": "the the",
                "suggestion": "Repeated word: 'the'"
            },
            {
                "type": "long-sentence",
                "position": {"start": 20, "end": 240},
                "text": "This sentence keeps going and going",
                "suggestion": "Consider breaking this sentence into smaller ones"
            }
        ],
        "clarity_score": 72.5,
        "structure_feedback": "Consider adding a clear conclusion.",
        "readability_score": 58.1,
        "improvement_suggestions": [
            {
                "type": "passive-voice",
                "text": "The essay was written by me.",
                "position": {"start": 250, "end": 278},
                "suggestion": "Consider using active voice for clearer writing"
            },
            {
                "type": "excessive-adverbs",
                "text": null,
                "position": null,
                "suggestion": "Consider reducing the number of adverbs"
            }
        ],
        "rewrite_suggestions": [
            {
                "original": "This sentence keeps going and going",
                "suggestion": "This sentence keeps going.",
                "reason": "Simplified long sentence"
            }
        ],
        "instructor_comments": null,
        "instructor_feedback_date": null,
        "grade": null,
        "created_at": "2025-04-03T11:00:00.654321",
        "updated_at": "2025-04-03T11:00:00.654321",
        "assignment_id": 5
    });
    Mock::given(method("POST"))
        .and(path("/api/feedback/analyze/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(report.clone())))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/feedback/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(report)))
        .expect(1)
        .mount(&server)
        .await;

    let (_, analysis) = repos(&server);
    let analyzed = terminal(analysis.analyze("5")).await.into_data().unwrap();
    assert_eq!(analyzed.homework_id, "5");
    assert_eq!(analyzed.grammar_issues.len(), 2);

    let repeated = &analyzed.grammar_issues[0];
    assert_eq!(repeated.content, "the the");
    assert_eq!((repeated.start_index, repeated.end_index), (Some(4), Some(11)));
    assert_eq!(repeated.kind, GrammarIssueType::Grammar);
    assert_eq!(repeated.suggestion, "Repeated word: 'the'");
    assert_eq!(analyzed.grammar_issues[1].kind, GrammarIssueType::Style);

    let passive = &analyzed.improvement_suggestions[0];
    assert_eq!(passive.kind.as_deref(), Some("passive-voice"));
    assert_eq!(passive.original_text, "The essay was written by me.");
    assert_eq!(passive.explanation, "Consider using active voice for clearer writing");
    assert_eq!((passive.start_index, passive.end_index), (Some(250), Some(278)));
    let adverbs = &analyzed.improvement_suggestions[1];
    assert!(adverbs.original_text.is_empty());
    assert_eq!(adverbs.start_index, None);
    assert!(!adverbs.explanation.is_empty());

    assert_eq!(
        analyzed.structure_feedback.as_deref(),
        Some("Consider adding a clear conclusion.")
    );
    assert_eq!(analyzed.rewrite_suggestions.len(), 1);
    assert_eq!(analyzed.rewrite_suggestions[0].reason, "Simplified long sentence");

    let feedback = terminal(analysis.feedback("5")).await.into_data().unwrap();
    assert_eq!(feedback.clarity_score, 72.5);
    assert_eq!(feedback, analyzed);
}
