use crate::common::error::AppError;

/// Maps constraint violations raised by Postgres to client errors.
///
/// Unique violations become `Conflict(on_unique)`, foreign-key violations
/// a `BadRequest` naming the broken constraint. Anything else stays a
/// database error (500).
pub(crate) fn map_constraint_error(err: sqlx::Error, on_unique: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::Conflict(on_unique.to_string());
        }
        if db_err.is_foreign_key_violation() {
            let constraint = db_err.constraint().unwrap_or("foreign key");
            return AppError::BadRequest(format!(
                "Referenced record does not exist ({constraint})"
            ));
        }
    }
    AppError::DatabaseError(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_pass_through() {
        let mapped = map_constraint_error(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(mapped, AppError::DatabaseError(sqlx::Error::RowNotFound)));
    }
}
