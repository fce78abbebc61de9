use axum::Json;
use axum::extract::{Path, Query, State};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::notification;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::notification::*;
use crate::state::AppState;

const LIST_LIMIT: u64 = 200;

#[utoipa::path(
    get,
    path = "/",
    tag = "Notifications",
    operation_id = "listNotifications",
    summary = "The caller's notifications",
    description = "Review outcomes addressed to the calling team, newest first (at most 200).",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications", body = Vec<NotificationResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(team_id = auth_user.team_id))]
pub async fn list_notifications(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    let select = notification::Entity::find()
        .filter(notification::Column::Audience.eq(notification::AUDIENCE_TEAM))
        .filter(notification::Column::TeamId.eq(auth_user.team_id));
    list(&state.db, select, query).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Admin",
    operation_id = "listAdminNotifications",
    summary = "Admin review queue",
    description = "One entry per buildathon submission; entries are marked read when the submission is reviewed. Requires `submission:review` permission.",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications", body = Vec<NotificationResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_admin_notifications(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    auth_user.require_permission("submission:review")?;
    let select = notification::Entity::find()
        .filter(notification::Column::Audience.eq(notification::AUDIENCE_ADMIN));
    list(&state.db, select, query).await.map(Json)
}

#[utoipa::path(
    post,
    path = "/{id}/read",
    tag = "Notifications",
    operation_id = "markNotificationRead",
    summary = "Mark a notification as read",
    description = "Teams can mark their own notifications; callers with `submission:review` can also mark admin entries.",
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification", body = NotificationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Notification not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn mark_read(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NotificationResponse>, AppError> {
    let model = notification::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".into()))?;

    let allowed = match model.audience.as_str() {
        notification::AUDIENCE_ADMIN => auth_user.has_permission("submission:review"),
        _ => model.team_id == Some(auth_user.team_id),
    };
    if !allowed {
        return Err(AppError::NotFound("Notification not found".into()));
    }

    notification::Entity::update_many()
        .col_expr(notification::Column::IsRead, Expr::value(true))
        .filter(notification::Column::Id.eq(id))
        .exec(&state.db)
        .await?;

    Ok(Json(NotificationResponse::from(notification::Model {
        is_read: true,
        ..model
    })))
}

async fn list<C: ConnectionTrait>(
    db: &C,
    mut select: Select<notification::Entity>,
    query: NotificationQuery,
) -> Result<Vec<NotificationResponse>, AppError> {
    if query.unread.unwrap_or(false) {
        select = select.filter(notification::Column::IsRead.eq(false));
    }
    let rows = select
        .order_by_desc(notification::Column::CreatedAt)
        .order_by_desc(notification::Column::Id)
        .limit(LIST_LIMIT)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(NotificationResponse::from).collect())
}
