use crate::common::mock_judge::JudgeReply;
use crate::common::{TestApp, routes};

/// Admin token, two team tokens, and one recorded run per team.
async fn two_runs(app: &TestApp) -> (String, String, String, i32) {
    let admin = app.create_admin().await;
    let (_, alpha) = app.create_team("alpha").await;
    let (_, beta) = app.create_team("beta").await;
    let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;

    let mut beta_submission = 0;
    for token in [&alpha, &beta] {
        app.judge.script([JudgeReply::accepted("42")]);
        let res = app
            .post_with_token(
                routes::EXECUTE,
                &serde_json::json!({"challenge_id": id, "source_code": "x", "language_id": 71}),
                token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        beta_submission = res.body["submission_id"].as_i64().unwrap() as i32;
    }
    (admin, alpha, beta, beta_submission)
}

#[tokio::test]
async fn teams_only_list_their_own() {
    let app = TestApp::spawn().await;
    let (_, alpha, _, _) = two_runs(&app).await;

    let res = app.get_with_token(routes::SUBMISSIONS, &alpha).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["pagination"]["total"], 1);
    assert_eq!(res.body["data"][0]["team_name"], "alpha");
}

#[tokio::test]
async fn admins_list_everything_and_filter_by_team() {
    let app = TestApp::spawn().await;
    let (admin, _, _, beta_submission) = two_runs(&app).await;

    let res = app.get_with_token(routes::SUBMISSIONS, &admin).await;
    assert_eq!(res.body["pagination"]["total"], 2);

    let res = app.get_with_token(&routes::submission(beta_submission), &admin).await;
    let beta_id = res.body["team_id"].as_i64().unwrap();

    let res = app
        .get_with_token(&format!("{}?team_id={beta_id}", routes::SUBMISSIONS), &admin)
        .await;
    assert_eq!(res.body["pagination"]["total"], 1);
    assert_eq!(res.body["data"][0]["team_name"], "beta");
}

#[tokio::test]
async fn pagination_is_clamped() {
    let app = TestApp::spawn().await;
    let (admin, _, _, _) = two_runs(&app).await;

    let res = app
        .get_with_token(&format!("{}?per_page=1&page=2", routes::SUBMISSIONS), &admin)
        .await;

    assert_eq!(res.body["pagination"]["per_page"], 1);
    assert_eq!(res.body["pagination"]["total_pages"], 2);
    assert_eq!(res.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn other_teams_submission_is_not_found() {
    let app = TestApp::spawn().await;
    let (_, alpha, _, beta_submission) = two_runs(&app).await;

    let res = app.get_with_token(&routes::submission(beta_submission), &alpha).await;

    assert_eq!(res.status, 404);
}
