use actix_web::test;
use serde_json::json;

use recap_server::models::{Summary, User};

use crate::common::{TestApp, TestDataGenerator};

/// A user owning one transcript with one summary
fn seed_summary(test_app: &TestApp, user: &User) -> Summary {
    let transcript = TestDataGenerator::create_transcript(&user.id, "Launch review");
    test_app.db().create_transcript(&transcript).unwrap();
    let summary = TestDataGenerator::create_summary(&user.id, &transcript.id, "Launch decisions");
    test_app.db().create_summary(&summary).unwrap();
    summary
}

#[actix_rt::test]
async fn test_share_with_two_recipients() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", Some("Ada"));
    let summary = seed_summary(&test_app, &user);

    let app = init_test_service!(test_app);
    let req = test::TestRequest::post()
        .uri(&format!("/api/summaries/{}/share", summary.id))
        .cookie(cookie)
        .set_json(json!({ "recipients": ["a@b.com", "c@d.com"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Summary shared successfully with 2 recipients");
    assert_eq!(body["recipientCount"], 2);

    let mut sent = test_app.mailer.sent();
    sent.sort_by(|a, b| a.to.cmp(&b.to));
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "a@b.com");
    assert_eq!(sent[1].to, "c@d.com");
    assert_eq!(sent[0].subject, "Shared Summary: Launch decisions");
    assert!(sent[0].html_body.contains("Shared by Ada via Recap"));
    assert!(sent[0].text_body.contains(&summary.content));

    let shares = test_app.db().list_email_shares(&user.id, None).unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].share.recipients, vec!["a@b.com", "c@d.com"]);
    assert!(shares[0].share.message.is_none());
}

#[actix_rt::test]
async fn test_share_with_custom_subject_and_message() {
    let test_app = TestApp::new();
    // No name: the email address signs the message
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let summary = seed_summary(&test_app, &user);

    let app = init_test_service!(test_app);
    let req = test::TestRequest::post()
        .uri(&format!("/api/summaries/{}/share", summary.id))
        .cookie(cookie)
        .set_json(json!({
            "recipients": ["team@example.com"],
            "subject": "Read before Monday",
            "message": "<b>Heads up</b>"
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Summary shared successfully with 1 recipient");
    assert_eq!(body["recipientCount"], 1);

    let sent = test_app.mailer.sent();
    assert_eq!(sent[0].subject, "Read before Monday");
    assert!(sent[0].html_body.contains("Shared by ada@example.com via Recap"));
    assert!(sent[0].html_body.contains("&lt;b&gt;Heads up&lt;/b&gt;"));
    assert!(sent[0].text_body.contains("<b>Heads up</b>"));

    let shares = test_app.db().list_email_shares(&user.id, None).unwrap();
    assert_eq!(shares[0].share.subject, "Read before Monday");
    assert_eq!(shares[0].share.message.as_deref(), Some("<b>Heads up</b>"));
}

#[actix_rt::test]
async fn test_invalid_recipient_rejects_whole_request() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let summary = seed_summary(&test_app, &user);

    let app = init_test_service!(test_app);
    let req = test::TestRequest::post()
        .uri(&format!("/api/summaries/{}/share", summary.id))
        .cookie(cookie)
        .set_json(json!({ "recipients": ["a@b.com", "not-an-email", "x@y"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email addresses: not-an-email, x@y");
    assert!(test_app.mailer.sent().is_empty());
    assert_eq!(test_app.db().count_email_shares(&user.id).unwrap(), 0);
}

#[actix_rt::test]
async fn test_padded_recipient_is_invalid() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let summary = seed_summary(&test_app, &user);

    let app = init_test_service!(test_app);
    let req = test::TestRequest::post()
        .uri(&format!("/api/summaries/{}/share", summary.id))
        .cookie(cookie)
        .set_json(json!({ "recipients": [" a@b.com"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email addresses:  a@b.com");
    assert!(test_app.mailer.sent().is_empty());
    assert_eq!(test_app.db().count_email_shares(&user.id).unwrap(), 0);
}

#[actix_rt::test]
async fn test_share_requires_recipients() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let summary = seed_summary(&test_app, &user);

    let app = init_test_service!(test_app);
    for payload in [json!({}), json!({ "recipients": [] })] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/summaries/{}/share", summary.id))
            .cookie(cookie.clone())
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "At least one recipient is required");
    }
}

#[actix_rt::test]
async fn test_one_failed_send_records_nothing() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let summary = seed_summary(&test_app, &user);
    test_app.mailer.fail_for("c@d.com");

    let app = init_test_service!(test_app);
    let req = test::TestRequest::post()
        .uri(&format!("/api/summaries/{}/share", summary.id))
        .cookie(cookie)
        .set_json(json!({ "recipients": ["a@b.com", "c@d.com"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "dependency_error");
    assert_eq!(body["message"], "Failed to send emails");
    assert_eq!(test_app.db().count_email_shares(&user.id).unwrap(), 0);
}

#[actix_rt::test]
async fn test_sharing_other_users_summary_is_not_found() {
    let test_app = TestApp::new();
    let (owner, _) = test_app.signed_in_user("owner@example.com", None);
    let (_, intruder_cookie) = test_app.signed_in_user("intruder@example.com", None);
    let summary = seed_summary(&test_app, &owner);

    let app = init_test_service!(test_app);
    let req = test::TestRequest::post()
        .uri(&format!("/api/summaries/{}/share", summary.id))
        .cookie(intruder_cookie)
        .set_json(json!({ "recipients": ["a@b.com"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    assert!(test_app.mailer.sent().is_empty());
}

#[actix_rt::test]
async fn test_share_history_filter_and_order() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);
    let first = seed_summary(&test_app, &user);
    let second = seed_summary(&test_app, &user);

    let mut old_share = TestDataGenerator::create_share(&user.id, &first.id, &["a@b.com"]);
    old_share.sent_at -= 3600;
    test_app.db().create_email_share(&old_share).unwrap();
    let new_share =
        TestDataGenerator::create_share(&user.id, &second.id, &["c@d.com", "e@f.com"]);
    test_app.db().create_email_share(&new_share).unwrap();

    // Someone else's history never shows up
    let (stranger, _) = test_app.signed_in_user("stranger@example.com", None);
    let theirs = seed_summary(&test_app, &stranger);
    test_app
        .db()
        .create_email_share(&TestDataGenerator::create_share(
            &stranger.id,
            &theirs.id,
            &["x@y.com"],
        ))
        .unwrap();

    let app = init_test_service!(test_app);

    let req = test::TestRequest::get()
        .uri("/api/shares")
        .cookie(cookie.clone())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let shares = body["shares"].as_array().unwrap();
    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0]["id"], new_share.id.as_str());
    assert_eq!(shares[0]["recipients"], json!(["c@d.com", "e@f.com"]));
    assert_eq!(shares[0]["summary"]["title"], "Launch decisions");
    assert!(shares[0]["sentAt"].as_i64().is_some());

    let req = test::TestRequest::get()
        .uri(&format!("/api/shares?summaryId={}", first.id))
        .cookie(cookie)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let shares = body["shares"].as_array().unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0]["summaryId"], first.id.as_str());
    assert_eq!(shares[0]["message"], serde_json::Value::Null);
}
