use actix_web::test;
use serde_json::json;

use crate::common::{TestApp, TestDataGenerator};

const HOUR: i64 = 60 * 60;
const DAY: i64 = 24 * HOUR;

#[actix_rt::test]
async fn test_fresh_user_has_zero_stats() {
    let test_app = TestApp::new();
    let (_, cookie) = test_app.signed_in_user("ada@example.com", None);
    let app = init_test_service!(test_app);

    let req = test::TestRequest::get()
        .uri("/api/dashboard/stats")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["stats"],
        json!({
            "totalTranscripts": 0,
            "totalSummaries": 0,
            "totalShares": 0,
            "recentActivity": 0
        })
    );
}

#[actix_rt::test]
async fn test_recent_activity_covers_last_seven_days() {
    let test_app = TestApp::new();
    let (user, cookie) = test_app.signed_in_user("ada@example.com", None);

    let transcript = TestDataGenerator::create_transcript(&user.id, "Quarterly");
    test_app.db().create_transcript(&transcript).unwrap();

    let stale = TestDataGenerator::create_summary_aged(&user.id, &transcript.id, 8 * DAY);
    let fresh = TestDataGenerator::create_summary_aged(&user.id, &transcript.id, HOUR);
    test_app.db().create_summary(&stale).unwrap();
    test_app.db().create_summary(&fresh).unwrap();
    test_app
        .db()
        .create_email_share(&TestDataGenerator::create_share(
            &user.id,
            &fresh.id,
            &["a@b.com"],
        ))
        .unwrap();

    let app = init_test_service!(test_app);
    let req = test::TestRequest::get()
        .uri("/api/dashboard/stats")
        .cookie(cookie)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["stats"]["totalTranscripts"], 1);
    assert_eq!(body["stats"]["totalSummaries"], 2);
    assert_eq!(body["stats"]["totalShares"], 1);
    assert_eq!(body["stats"]["recentActivity"], 1);
}

#[actix_rt::test]
async fn test_stats_ignore_other_users() {
    let test_app = TestApp::new();
    let (_, cookie) = test_app.signed_in_user("ada@example.com", None);
    let (other, _) = test_app.signed_in_user("grace@example.com", None);

    let transcript = TestDataGenerator::create_transcript(&other.id, "Not yours");
    test_app.db().create_transcript(&transcript).unwrap();
    test_app
        .db()
        .create_summary(&TestDataGenerator::create_summary(
            &other.id,
            &transcript.id,
            "Not yours either",
        ))
        .unwrap();

    let app = init_test_service!(test_app);
    let req = test::TestRequest::get()
        .uri("/api/dashboard/stats")
        .cookie(cookie)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["stats"]["totalTranscripts"], 0);
    assert_eq!(body["stats"]["totalSummaries"], 0);
}

#[actix_rt::test]
async fn test_stats_require_a_session() {
    let test_app = TestApp::new();
    let app = init_test_service!(test_app);

    let req = test::TestRequest::get().uri("/api/dashboard/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}
