use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use tracing::debug;

use crate::entity::{
    challenge, notification, role, role_permission, submission, team, team_completion,
    team_progress,
};

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = connect(db_url).await?;
    sync_schema(&db).await?;

    Ok(db)
}

/// Open the connection pool for `db_url`.
///
/// SQLite gets a single pooled connection: it allows one writer at a time, and
/// two deferred transactions that both read before writing fail with
/// `SQLITE_BUSY` instead of waiting. Queueing on the pool serializes them.
pub async fn connect(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // Set connection pool options
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);
    if is_sqlite(db_url) {
        opt.max_connections(1).min_connections(1);
    }

    Database::connect(opt).await
}

fn is_sqlite(db_url: &str) -> bool {
    db_url.starts_with("sqlite:")
}

/// Create missing tables. Referenced tables come before their dependents.
pub async fn sync_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, role::Entity).await?;
    create_table(db, role_permission::Entity).await?;
    create_table(db, team::Entity).await?;
    create_table(db, challenge::Entity).await?;
    create_table(db, submission::Entity).await?;
    create_table(db, team_progress::Entity).await?;
    create_table(db, team_completion::Entity).await?;
    create_table(db, notification::Entity).await?;
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute_raw(backend.build(&stmt)).await?;
    debug!(table = entity.table_name(), "Ensured table exists");
    Ok(())
}
