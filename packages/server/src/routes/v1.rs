use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/challenges", challenge_routes())
        .nest("/execute", execute_routes())
        .nest("/progress", progress_routes())
        .nest("/submissions", submission_routes())
        .nest("/leaderboard", leaderboard_routes())
        .nest("/notifications", notification_routes())
        .nest("/admin", admin_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn challenge_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::challenge::list_challenges,
            handlers::challenge::create_challenge
        ))
        .routes(routes!(
            handlers::challenge::get_challenge,
            handlers::challenge::update_challenge,
            handlers::challenge::delete_challenge
        ))
        .routes(routes!(handlers::progression::submit_flag))
        .routes(routes!(handlers::progression::submit_buildathon))
}

fn execute_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::execute::execute_code))
}

fn progress_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::progression::list_progress))
}

fn submission_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::submission::list_submissions))
        .routes(routes!(handlers::submission::get_submission))
}

fn leaderboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::leaderboard::get_leaderboard))
}

fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::notification::list_notifications))
        .routes(routes!(handlers::notification::mark_read))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::review::review_submission))
        .routes(routes!(handlers::notification::list_admin_notifications))
        .routes(routes!(handlers::analytics::get_analytics))
        .routes(routes!(handlers::team::list_teams))
        .routes(routes!(handlers::team::delete_team))
}
