//! Column decoding shared by the repositories.

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, Timestamp};

/// Reads a column, mapping decode failures to a database error.
pub(super) fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", column, e)))
}

pub(super) fn timestamp(row: &PgRow, column: &str) -> Result<Timestamp, DomainError> {
    get::<chrono::DateTime<chrono::Utc>>(row, column).map(Timestamp::from_datetime)
}

pub(super) fn optional_timestamp(
    row: &PgRow,
    column: &str,
) -> Result<Option<Timestamp>, DomainError> {
    Ok(get::<Option<chrono::DateTime<chrono::Utc>>>(row, column)?.map(Timestamp::from_datetime))
}

/// Parses a stored enum label.
pub(super) fn parse<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::database(format!("Invalid {}: {}", what, value)))
}

pub(super) fn query_failed(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}
