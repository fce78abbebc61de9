use serde_json::json;

use crate::common::{TestApp, routes};

const REPO: &str = "https://github.com/alpha/dashboard";

/// Admin token, team token, challenge ID and a pending buildathon submission.
async fn pending_submission(app: &TestApp, points: i32) -> (String, String, i32, i32) {
    let admin = app.create_admin().await;
    let (_, team) = app.create_team("alpha").await;
    let challenge_id = app.create_challenge(&admin, "Two Sum", points, "42").await;
    app.solve_flag(&team, challenge_id, "42").await;
    let submission_id = app.submit_buildathon(&team, challenge_id, REPO).await;
    (admin, team, challenge_id, submission_id)
}

mod accept {
    use super::*;

    #[tokio::test]
    async fn default_points_come_from_challenge() {
        let app = TestApp::spawn().await;
        let (admin, team, _, submission_id) = pending_submission(&app, 150).await;

        let res = app
            .review(&admin, submission_id, json!({"action": "accept"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["action"], "accept");
        assert_eq!(res.body["points_added"], 150);
        assert_eq!(app.total_points(&team).await, 150);

        let res = app
            .get_with_token(&routes::submission(submission_id), &team)
            .await;
        assert_eq!(res.body["verdict"], "accepted");
        assert_eq!(res.body["points_awarded"], 150);
    }

    #[tokio::test]
    async fn team_is_notified_with_feedback() {
        let app = TestApp::spawn().await;
        let (admin, team, _, submission_id) = pending_submission(&app, 100).await;

        app.review(
            &admin,
            submission_id,
            json!({"action": "accept", "feedback": "Great work"}),
        )
        .await;

        let res = app.get_with_token(routes::NOTIFICATIONS, &team).await;
        assert_eq!(res.status, 200, "{}", res.text);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Buildathon accepted");
        assert!(items[0]["message"].as_str().unwrap().contains("Great work"));
        assert_eq!(items[0]["is_read"], false);
    }

    #[tokio::test]
    async fn review_clears_admin_queue() {
        let app = TestApp::spawn().await;
        let (admin, _, _, submission_id) = pending_submission(&app, 100).await;

        app.review(&admin, submission_id, json!({"action": "accept"}))
            .await;

        let res = app
            .get_with_token(&format!("{}?unread=true", routes::ADMIN_NOTIFICATIONS), &admin)
            .await;
        assert_eq!(res.body, json!([]));

        let res = app.get_with_token(routes::ADMIN_NOTIFICATIONS, &admin).await;
        assert_eq!(res.body[0]["is_read"], true);
    }

    #[tokio::test]
    async fn accepting_after_reject_conflicts() {
        let app = TestApp::spawn().await;
        let (admin, team, _, submission_id) = pending_submission(&app, 100).await;

        let res = app
            .review(&admin, submission_id, json!({"action": "reject"}))
            .await;
        assert_eq!(res.status, 200);

        let res = app
            .review(&admin, submission_id, json!({"action": "accept"}))
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
        assert_eq!(app.total_points(&team).await, 0);
    }

    #[tokio::test]
    async fn repeated_accept_keeps_first_points() {
        let app = TestApp::spawn().await;
        let (admin, team, _, submission_id) = pending_submission(&app, 100).await;

        let res = app
            .review(&admin, submission_id, json!({"action": "accept", "points": 200}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["points_added"], 200);

        let res = app
            .review(&admin, submission_id, json!({"action": "accept", "points": 500}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["points_added"], 0);

        assert_eq!(app.total_points(&team).await, 200);
        let res = app
            .get_with_token(&routes::submission(submission_id), &team)
            .await;
        assert_eq!(res.body["points_awarded"], 200);
        let res = app.get_without_token(routes::LEADERBOARD).await;
        assert_eq!(res.body[0]["total_points"], 200);
        assert_eq!(res.body[0]["challenges_completed"], 1);
    }
}

mod concurrent {
    use super::*;

    #[tokio::test]
    async fn parallel_accepts_for_one_team_all_count() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let (_, team) = app.create_team("alpha").await;

        let mut submissions = Vec::new();
        for title in ["One", "Two", "Three", "Four"] {
            let challenge_id = app.create_challenge(&admin, title, 100, "42").await;
            app.solve_flag(&team, challenge_id, "42").await;
            submissions.push(app.submit_buildathon(&team, challenge_id, REPO).await);
        }

        let accept = |id| app.review(&admin, id, json!({"action": "accept"}));
        let (a, b, c, d) = tokio::join!(
            accept(submissions[0]),
            accept(submissions[1]),
            accept(submissions[2]),
            accept(submissions[3]),
        );

        for res in [a, b, c, d] {
            assert_eq!(res.status, 200, "{}", res.text);
            assert_eq!(res.body["points_added"], 100);
        }
        assert_eq!(app.total_points(&team).await, 400);
        let res = app.get_without_token(routes::LEADERBOARD).await;
        assert_eq!(res.body[0]["total_points"], 400);
        assert_eq!(res.body[0]["challenges_completed"], 4);
    }
}

mod reject {
    use super::*;

    #[tokio::test]
    async fn rejection_allows_resubmission() {
        let app = TestApp::spawn().await;
        let (admin, team, challenge_id, submission_id) = pending_submission(&app, 100).await;

        let res = app
            .review(
                &admin,
                submission_id,
                json!({"action": "reject", "feedback": "Missing README"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["points_added"], 0);

        let res = app.get_with_token(routes::PROGRESS, &team).await;
        assert_eq!(res.body[0]["state"], "rejected");

        let second = app
            .submit_buildathon(&team, challenge_id, "https://github.com/alpha/dashboard2")
            .await;
        let res = app
            .review(&admin, second, json!({"action": "accept", "points": 80}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(app.total_points(&team).await, 80);

        let res = app.get_with_token(routes::LEADERBOARD, &team).await;
        assert_eq!(res.body[0]["total_points"], 80);
        assert_eq!(res.body[0]["challenges_completed"], 1);
    }

    #[tokio::test]
    async fn rejected_submission_keeps_feedback() {
        let app = TestApp::spawn().await;
        let (admin, team, _, submission_id) = pending_submission(&app, 100).await;

        app.review(
            &admin,
            submission_id,
            json!({"action": "reject", "feedback": "Missing README"}),
        )
        .await;

        let res = app
            .get_with_token(&routes::submission(submission_id), &team)
            .await;
        assert_eq!(res.body["verdict"], "rejected");
        assert_eq!(res.body["feedback"], "Missing README");
    }
}

mod guards {
    use super::*;

    #[tokio::test]
    async fn team_cannot_review() {
        let app = TestApp::spawn().await;
        let (_, team, _, submission_id) = pending_submission(&app, 100).await;

        let res = app
            .review(&team, submission_id, json!({"action": "accept"}))
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
        assert_eq!(app.total_points(&team).await, 0);
    }

    #[tokio::test]
    async fn unknown_action_is_rejected() {
        let app = TestApp::spawn().await;
        let (admin, _, _, submission_id) = pending_submission(&app, 100).await;

        let res = app
            .review(&admin, submission_id, json!({"action": "maybe"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_submission_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;

        let res = app.review(&admin, 999, json!({"action": "accept"})).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn algorithmic_submission_cannot_be_reviewed() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin().await;
        let (_, team) = app.create_team("alpha").await;
        let challenge_id = app.create_challenge(&admin, "Two Sum", 100, "42").await;

        let res = app
            .post_with_token(
                routes::EXECUTE,
                &json!({"challenge_id": challenge_id, "source_code": "print(42)", "language_id": 71}),
                &team,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let submission_id = res.body["submission_id"].as_i64().unwrap() as i32;

        let res = app
            .review(&admin, submission_id, json!({"action": "accept"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(app.total_points(&team).await, 0);
    }
}
