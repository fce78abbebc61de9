use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entity::{challenge, submission, team};
use crate::error::AppError;
use crate::extractors::auth::AuthUser;

/// Look up a challenge by ID, returning 404 if not found.
pub async fn find_challenge<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<challenge::Model, AppError> {
    challenge::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".into()))
}

/// Like [`find_challenge`], but inactive challenges are hidden from callers
/// without `challenge:manage`.
pub async fn find_visible_challenge<C: ConnectionTrait>(
    db: &C,
    auth_user: &AuthUser,
    id: i32,
) -> Result<challenge::Model, AppError> {
    let model = find_challenge(db, id).await?;
    if !model.is_active && !auth_user.has_permission("challenge:manage") {
        return Err(AppError::NotFound("Challenge not found".into()));
    }
    Ok(model)
}

pub async fn find_team<C: ConnectionTrait>(db: &C, id: i32) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}

pub async fn find_submission<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<submission::Model, AppError> {
    submission::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))
}
