use crate::database::SqliteDatabase;

pub struct AppState {
    pub db: SqliteDatabase,
}
