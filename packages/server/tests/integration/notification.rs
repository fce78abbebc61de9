use serde_json::json;

use crate::common::{TestApp, routes};

/// Admin token, team token and the team's single review notification.
async fn reviewed(app: &TestApp) -> (String, String, i32) {
    let admin = app.create_admin().await;
    let (_, team) = app.create_team("alpha").await;
    let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;
    app.solve_flag(&team, id, "42").await;
    let submission_id = app
        .submit_buildathon(&team, id, "https://github.com/alpha/app")
        .await;
    app.review(&admin, submission_id, json!({"action": "reject"}))
        .await;

    let res = app.get_with_token(routes::NOTIFICATIONS, &team).await;
    let notification_id = res.body[0]["id"].as_i64().unwrap() as i32;
    (admin, team, notification_id)
}

#[tokio::test]
async fn team_marks_own_notification_read() {
    let app = TestApp::spawn().await;
    let (_, team, id) = reviewed(&app).await;

    let res = app
        .post_with_token(&routes::notification_read(id), &json!({}), &team)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["is_read"], true);

    let res = app
        .get_with_token(&format!("{}?unread=true", routes::NOTIFICATIONS), &team)
        .await;
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn other_teams_cannot_see_or_mark_it() {
    let app = TestApp::spawn().await;
    let (_, _, id) = reviewed(&app).await;
    let (_, other) = app.create_team("beta").await;

    let res = app.get_with_token(routes::NOTIFICATIONS, &other).await;
    assert_eq!(res.body, json!([]));

    let res = app
        .post_with_token(&routes::notification_read(id), &json!({}), &other)
        .await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn team_cannot_read_admin_queue() {
    let app = TestApp::spawn().await;
    let (_, team, _) = reviewed(&app).await;

    let res = app.get_with_token(routes::ADMIN_NOTIFICATIONS, &team).await;

    assert_eq!(res.status, 403);
}
