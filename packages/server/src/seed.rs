use sea_orm::sea_query::{Index, IndexCreateStatement, OnConflict};
use sea_orm::*;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::entity::{notification, role, role_permission, submission, team};
use crate::utils::hash;

pub const ADMIN_ROLE: &str = "admin";

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &[ADMIN_ROLE, team::DEFAULT_ROLE];

/// Default role-permission mappings seeded on startup.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Admin: everything except solving challenges
    ("admin", "challenge:manage"),
    ("admin", "submission:review"),
    ("admin", "submission:view_all"),
    ("admin", "analytics:view"),
    ("admin", "team:manage"),
    // Team
    ("team", "challenge:submit"),
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut roles_inserted = 0u64;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        roles_inserted += role::Entity::insert(model)
            .on_conflict(OnConflict::column(role::Column::Name).do_nothing().to_owned())
            .exec_without_returning(db)
            .await?;
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    let mut perms_inserted = 0u64;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        perms_inserted += role_permission::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    role_permission::Column::Role,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Create the configured admin account, or promote it if it already exists.
///
/// Does nothing unless both `auth.admin_name` and `auth.admin_password` are set.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    let (Some(name), Some(password)) = (&auth.admin_name, &auth.admin_password) else {
        return Ok(());
    };
    let name = name.trim();

    let existing = team::Entity::find()
        .filter(team::Column::Name.eq(name))
        .one(db)
        .await?;

    match existing {
        Some(model) if model.role == ADMIN_ROLE => {}
        Some(model) => {
            let mut active: team::ActiveModel = model.into();
            active.role = Set(ADMIN_ROLE.to_string());
            active.update(db).await?;
            warn!(name, "Promoted existing account to admin");
        }
        None => {
            let hashed = hash::hash_password(password)?;
            team::ActiveModel {
                name: Set(name.to_string()),
                email: Set(String::new()),
                password: Set(hashed),
                role: Set(ADMIN_ROLE.to_string()),
                total_points: Set(0),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            info!(name, "Created admin account");
        }
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't create composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Per-team submission history and the analytics window scan:
    // SELECT ... FROM submission WHERE team_id = ? ORDER BY created_at DESC
    create_index(
        db,
        "idx_submission_team_created",
        Index::create()
            .table(submission::Entity)
            .col(submission::Column::TeamId)
            .col(submission::Column::CreatedAt)
            .to_owned(),
    )
    .await;

    // Admin review queue: unread entries for the admin audience
    create_index(
        db,
        "idx_notification_audience_read",
        Index::create()
            .table(notification::Entity)
            .col(notification::Column::Audience)
            .col(notification::Column::IsRead)
            .to_owned(),
    )
    .await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, mut stmt: IndexCreateStatement) {
    stmt.name(name).if_not_exists();
    let backend = db.get_database_backend();

    match db.execute_raw(backend.build(&stmt)).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => warn!("Failed to create index {}: {}", name, e),
    }
}
