use serde_json::json;

use crate::common::{PASSWORD, TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn register_returns_created_account() {
        let app = TestApp::spawn().await;
        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"name": "Null Pointers", "email": "np@example.com", "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Null Pointers");
        assert!(res.body["id"].as_i64().unwrap() > 0);
        assert!(res.body.get("password").is_none());
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let app = TestApp::spawn().await;
        app.register("alpha").await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"name": "alpha", "email": "other@example.com", "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "NAME_TAKEN");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"name": "beta", "email": "beta@example.com", "password": "short"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let res = app
            .post_without_token(routes::REGISTER, &json!({"name": "gamma"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn login_returns_token_and_permissions() {
        let app = TestApp::spawn().await;
        app.register("alpha").await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"name": "alpha", "password": PASSWORD}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(!res.body["token"].as_str().unwrap().is_empty());
        assert_eq!(res.body["role"], "team");
        assert_eq!(res.body["permissions"], json!(["challenge:submit"]));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;
        app.register("alpha").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"name": "alpha", "password": "not-the-password"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_team_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app
            .post_without_token(routes::LOGIN, &json!({"name": "ghost", "password": PASSWORD}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn me_returns_profile() {
        let app = TestApp::spawn().await;
        let (id, token) = app.create_team("alpha").await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["name"], "alpha");
        assert_eq!(res.body["total_points"], 0);
        assert_eq!(res.body["completed_challenges"], json!([]));
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app.get_with_token(routes::ME, "not-a-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}
