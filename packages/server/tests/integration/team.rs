use crate::common::{TestApp, routes};

#[tokio::test]
async fn admin_lists_all_accounts() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin().await;
    app.create_team("alpha").await;

    let res = app.get_with_token(routes::TEAMS, &admin).await;

    assert_eq!(res.status, 200, "{}", res.text);
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["admin", "alpha"]);
    assert!(res.body[1].get("password").is_none());
}

#[tokio::test]
async fn delete_removes_team_and_its_submissions() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin().await;
    let (alpha_id, alpha) = app.create_team("alpha").await;
    let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;
    app.solve_flag(&alpha, id, "42").await;
    app.submit_buildathon(&alpha, id, "https://github.com/alpha/app")
        .await;

    let res = app.delete_with_token(&routes::team(alpha_id), &admin).await;
    assert_eq!(res.status, 204, "{}", res.text);

    let res = app.get_with_token(routes::SUBMISSIONS, &admin).await;
    assert_eq!(res.body["pagination"]["total"], 0);
    let res = app.get_without_token(routes::LEADERBOARD).await;
    assert_eq!(res.body.as_array().unwrap().len(), 0);

    // The challenge is free to delete again.
    let res = app.delete_with_token(&routes::challenge(id), &admin).await;
    assert_eq!(res.status, 204);
}

#[tokio::test]
async fn cannot_delete_self() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin().await;
    let res = app.get_with_token(routes::ME, &admin).await;
    let admin_id = res.id();

    let res = app.delete_with_token(&routes::team(admin_id), &admin).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn team_cannot_manage_teams() {
    let app = TestApp::spawn().await;
    let (_, alpha) = app.create_team("alpha").await;

    let res = app.get_with_token(routes::TEAMS, &alpha).await;

    assert_eq!(res.status, 403);
}
