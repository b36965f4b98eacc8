//! Classification of SQLx errors into store errors.

use crate::domain::repositories::StoreError;

/// Maps a SQLx error onto [`StoreError`].
///
/// Unique-constraint violations become [`StoreError::UniqueViolation`] carrying
/// the violated constraint name; every other error is kept as-is.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        return StoreError::UniqueViolation {
            constraint: db_err.constraint().map(str::to_owned),
        };
    }

    StoreError::Database(e)
}
