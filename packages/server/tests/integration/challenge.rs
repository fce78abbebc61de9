use serde_json::json;

use crate::common::{TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn admin_creates_and_reads_challenge() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;

        let res = app.get_with_token(&routes::challenge(id), &admin).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Two Sum");
        assert_eq!(res.body["points"], 100);
        assert_eq!(res.body["expected_flag"], "42");
        assert_eq!(res.body["buildathon_requirements"], json!(["README", "Tests"]));
        assert_eq!(res.body["time_limit"], 2000);
    }

    #[tokio::test]
    async fn positions_are_appended_in_order() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let first = app.create_challenge(&admin, "First", 100, "1").await;
        let second = app.create_challenge(&admin, "Second", 100, "2").await;

        let res = app.get_with_token(routes::CHALLENGES, &admin).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![first as i64, second as i64]);
        assert!(res.body[0]["position"].as_i64() < res.body[1]["position"].as_i64());
    }

    #[tokio::test]
    async fn patch_changes_only_given_fields() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;

        let res = app
            .patch_with_token(&routes::challenge(id), &json!({"points": 250}), &admin)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["points"], 250);
        assert_eq!(res.body["title"], "Two Sum");
        assert_eq!(res.body["expected_flag"], "42");
    }

    #[tokio::test]
    async fn delete_unused_challenge() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;

        let res = app.delete_with_token(&routes::challenge(id), &admin).await;
        assert_eq!(res.status, 204);

        let res = app.get_with_token(&routes::challenge(id), &admin).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_with_submissions_conflicts() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let (_, team) = app.create_team("alpha").await;
        let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;
        app.solve_flag(&team, id, "42").await;
        app.submit_buildathon(&team, id, "https://github.com/alpha/app").await;

        let res = app.delete_with_token(&routes::challenge(id), &admin).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn invalid_points_are_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;

        let res = app
            .post_with_token(
                routes::CHALLENGES,
                &json!({
                    "title": "Broken",
                    "points": -5,
                    "problem_description": "x",
                    "expected_flag": "1",
                }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod visibility {
    use super::*;

    #[tokio::test]
    async fn team_cannot_create_challenge() {
        let app = TestApp::spawn().await;
        let (_, team) = app.create_team("alpha").await;

        let res = app
            .post_with_token(
                routes::CHALLENGES,
                &json!({"title": "Mine", "points": 10, "problem_description": "x", "expected_flag": "1"}),
                &team,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn team_never_sees_flag_and_sees_buildathon_only_after_solving() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let (_, team) = app.create_team("alpha").await;
        let id = app.create_challenge(&admin, "Two Sum", 100, "42").await;

        let res = app.get_with_token(&routes::challenge(id), &team).await;
        assert_eq!(res.status, 200);
        assert!(res.body.get("expected_flag").is_none());
        assert!(res.body.get("buildathon_description").is_none());
        assert_eq!(res.body["state"], "available");

        app.solve_flag(&team, id, "42").await;

        let res = app.get_with_token(&routes::challenge(id), &team).await;
        assert!(res.body.get("expected_flag").is_none());
        assert_eq!(res.body["buildathon_description"], "Build a dashboard.");
        assert_eq!(res.body["state"], "algorithmic_solved");
    }

    #[tokio::test]
    async fn inactive_challenge_is_hidden_from_teams() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let (_, team) = app.create_team("alpha").await;
        let id = app.create_challenge(&admin, "Hidden", 100, "42").await;
        app.patch_with_token(&routes::challenge(id), &json!({"is_active": false}), &admin)
            .await;

        let res = app.get_with_token(routes::CHALLENGES, &team).await;
        assert_eq!(res.body, json!([]));

        let res = app.get_with_token(&routes::challenge(id), &team).await;
        assert_eq!(res.status, 404);

        let res = app.get_with_token(routes::CHALLENGES, &admin).await;
        assert_eq!(res.body.as_array().unwrap().len(), 1);
    }
}
