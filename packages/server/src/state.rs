use std::sync::Arc;

use judge::JudgeBackend;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub judge: Arc<dyn JudgeBackend>,
}
