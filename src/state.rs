use std::path::PathBuf;

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub media_root: PathBuf,
}
