use serde_json::json;

use crate::common::mock_judge::JudgeReply;
use crate::common::{TestApp, routes};

async fn run_code(app: &TestApp, token: &str, challenge_id: i32, language_id: i32) {
    app.judge.script([JudgeReply::accepted("42")]);
    let res = app
        .post_with_token(
            routes::EXECUTE,
            &json!({
                "challenge_id": challenge_id,
                "source_code": "main",
                "language_id": language_id,
                "expected_output": "42",
            }),
            token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
}

#[tokio::test]
async fn requires_analytics_permission() {
    let app = TestApp::spawn().await;
    let (_, team) = app.create_team("alpha").await;

    let res = app.get_with_token(routes::ANALYTICS, &team).await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn unknown_range_is_rejected() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin().await;

    let res = app
        .get_with_token(&format!("{}?range=1y", routes::ANALYTICS), &admin)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn default_window_is_thirty_days() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin().await;

    let res = app.get_with_token(routes::ANALYTICS, &admin).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["range"], "30d");
    assert_eq!(res.body["daily_submissions"].as_array().unwrap().len(), 30);
    assert_eq!(res.body["overview"]["success_rate"], 0.0);
}

#[tokio::test]
async fn overview_and_series_count_submissions() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin().await;
    let (_, alpha) = app.create_team("alpha").await;
    let (_, beta) = app.create_team("beta").await;
    let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;

    run_code(&app, &alpha, id, 71).await;
    run_code(&app, &alpha, id, 54).await;
    run_code(&app, &beta, id, 71).await;
    app.solve_flag(&alpha, id, "42").await;
    app.submit_buildathon(&alpha, id, "https://github.com/alpha/app")
        .await;

    let res = app
        .get_with_token(&format!("{}?range=7d", routes::ANALYTICS), &admin)
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    let overview = &res.body["overview"];
    assert_eq!(overview["total_teams"], 2);
    assert_eq!(overview["active_challenges"], 1);
    assert_eq!(overview["total_submissions"], 4);
    assert_eq!(overview["algorithmic_submissions"], 3);
    assert_eq!(overview["buildathon_submissions"], 1);
    assert_eq!(overview["accepted_submissions"], 3);
    assert_eq!(overview["pending_reviews"], 1);
    assert_eq!(overview["success_rate"], 75.0);

    let days = res.body["daily_submissions"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    let today = &days[6];
    assert_eq!(today["algorithmic"], 3);
    assert_eq!(today["buildathon"], 1);
    assert_eq!(today["total"], 4);

    let languages = res.body["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[0]["language"], "Python");
    assert_eq!(languages[0]["count"], 2);
    assert_eq!(languages[0]["percentage"], 66.67);
    assert_eq!(languages[1]["language"], "C++");

    let performance = res.body["team_performance"].as_array().unwrap();
    assert_eq!(performance.len(), 2);
    assert_eq!(performance[0]["team_name"], "alpha");
}
