use actix_web::test;
use serde_json::json;

use crate::common::{TestApp, TestDataGenerator};

#[actix_rt::test]
async fn test_upload_transcript() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", Some("Ada"));
    let app = init_test_service!(test_app);

    let req = test::TestRequest::post()
        .uri("/api/transcripts")
        .cookie(cookie)
        .set_json(json!({
            "title": "  Weekly sync ",
            "content": "Ada: release on Friday.\nGrace: sounds good."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Transcript uploaded successfully");
    assert_eq!(body["transcript"]["title"], "Weekly sync");
    assert!(body["transcript"]["id"].as_str().is_some());
    assert!(body["transcript"]["createdAt"].as_i64().is_some());

    let stored = test_app.db().list_transcripts(&user.id).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Weekly sync");
}

#[actix_rt::test]
async fn test_upload_requires_title_and_content() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let app = init_test_service!(test_app);

    for payload in [
        json!({ "title": "Only a title" }),
        json!({ "title": "   ", "content": "text" }),
        json!({ "title": "Title", "content": "" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/transcripts")
            .cookie(cookie.clone())
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "Title and content are required");
    }

    assert_eq!(test_app.db().count_transcripts(&user.id).unwrap(), 0);
}

#[actix_rt::test]
async fn test_oversized_transcript_is_rejected_without_a_row() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let app = init_test_service!(test_app);

    let req = test::TestRequest::post()
        .uri("/api/transcripts")
        .cookie(cookie)
        .set_json(json!({ "title": "Huge", "content": "x".repeat(50_001) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Content is too long (max 50,000 characters)");
    assert_eq!(test_app.db().count_transcripts(&user.id).unwrap(), 0);
}

#[actix_rt::test]
async fn test_astral_characters_count_double_toward_limit() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let app = init_test_service!(test_app);

    let req = test::TestRequest::post()
        .uri("/api/transcripts")
        .cookie(cookie)
        .set_json(json!({ "title": "Emoji", "content": "😀".repeat(25_001) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(test_app.db().count_transcripts(&user.id).unwrap(), 0);
}

#[actix_rt::test]
async fn test_malformed_json_is_a_bad_request() {
    let test_app = TestApp::new();
    let (_, cookie) = test_app.signed_in_user("ada@example.com", None);
    let app = init_test_service!(test_app);

    let req = test::TestRequest::post()
        .uri("/api/transcripts")
        .cookie(cookie)
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_rt::test]
async fn test_list_is_newest_first_with_summary_counts() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);

    let older = TestDataGenerator::create_transcript(&user.id, "Older");
    let newer = TestDataGenerator::create_transcript(&user.id, "Newer");
    test_app.db().create_transcript(&older).unwrap();
    test_app.db().create_transcript(&newer).unwrap();
    for title in ["One", "Two"] {
        let summary = TestDataGenerator::create_summary(&user.id, &older.id, title);
        test_app.db().create_summary(&summary).unwrap();
    }

    let app = init_test_service!(test_app);
    let req = test::TestRequest::get()
        .uri("/api/transcripts")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let transcripts = body["transcripts"].as_array().unwrap();
    assert_eq!(transcripts.len(), 2);
    assert_eq!(transcripts[0]["title"], "Newer");
    assert_eq!(transcripts[0]["summaryCount"], 0);
    assert_eq!(transcripts[1]["title"], "Older");
    assert_eq!(transcripts[1]["summaryCount"], 2);
    assert!(transcripts[0].get("content").is_none());
}

#[actix_rt::test]
async fn test_get_transcript_includes_summaries() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);

    let transcript = TestDataGenerator::create_transcript(&user.id, "Planning");
    test_app.db().create_transcript(&transcript).unwrap();
    let summary = TestDataGenerator::create_summary(&user.id, &transcript.id, "Decisions");
    test_app.db().create_summary(&summary).unwrap();

    let app = init_test_service!(test_app);
    let req = test::TestRequest::get()
        .uri(&format!("/api/transcripts/{}", transcript.id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let detail = &body["transcript"];
    assert_eq!(detail["id"], transcript.id.as_str());
    assert_eq!(detail["content"], transcript.content.as_str());
    assert_eq!(detail["summaries"].as_array().unwrap().len(), 1);
    assert_eq!(detail["summaries"][0]["title"], "Decisions");
    assert_eq!(detail["summaries"][0]["prompt"], "List the decisions");
}

#[actix_rt::test]
async fn test_other_users_transcript_is_not_found() {
    let test_app = TestApp::new();
    let (owner, _) = test_app.signed_in_user("owner@example.com", None);
    let (_, intruder_cookie) = test_app.signed_in_user("intruder@example.com", None);

    let transcript = TestDataGenerator::create_transcript(&owner.id, "Private");
    test_app.db().create_transcript(&transcript).unwrap();

    let app = init_test_service!(test_app);
    let uri = format!("/api/transcripts/{}", transcript.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .cookie(intruder_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Transcript not found");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .cookie(intruder_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get()
        .uri("/api/transcripts")
        .cookie(intruder_cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["transcripts"].as_array().unwrap().is_empty());

    // Still there for its owner
    assert!(test_app.db().get_transcript(&transcript.id, &owner.id).is_ok());
}

#[actix_rt::test]
async fn test_delete_removes_summaries_and_shares() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);

    let transcript = TestDataGenerator::create_transcript(&user.id, "Doomed");
    test_app.db().create_transcript(&transcript).unwrap();
    let summary = TestDataGenerator::create_summary(&user.id, &transcript.id, "Doomed summary");
    test_app.db().create_summary(&summary).unwrap();
    let share = TestDataGenerator::create_share(&user.id, &summary.id, &["a@b.com"]);
    test_app.db().create_email_share(&share).unwrap();

    let app = init_test_service!(test_app);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/transcripts/{}", transcript.id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Transcript deleted successfully");

    assert_eq!(test_app.db().count_transcripts(&user.id).unwrap(), 0);
    assert_eq!(test_app.db().count_summaries(&user.id).unwrap(), 0);
    assert_eq!(test_app.db().count_email_shares(&user.id).unwrap(), 0);
}

#[actix_rt::test]
async fn test_session_for_deleted_user_is_unauthorized() {
    let test_app = TestApp::new();
    // Never stored, so the token outlives its user
    let ghost = TestDataGenerator::create_user("ghost@example.com", None);
    let cookie = test_app.session_cookie(&ghost);
    let app = init_test_service!(test_app);

    let req = test::TestRequest::get()
        .uri("/api/transcripts")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}
