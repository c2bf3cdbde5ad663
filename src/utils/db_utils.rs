use crate::error::{ApiError, ApiResult};
use sqlx::error::ErrorKind;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 500;

/// ===============================
/// Offset pagination window
/// ===============================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> ApiResult<Self> {
        let skip = skip.unwrap_or(0);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if skip < 0 {
            return Err(ApiError::validation("skip", "skip must be greater than or equal to 0"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::validation(
                "limit",
                format!("limit must be between 1 and {}", MAX_LIMIT),
            ));
        }

        Ok(Self { skip, limit })
    }
}

/// One page of rows plus the total under the same filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// `%term%` for `LIKE ... ESCAPE '\'`, with the term's own wildcards escaped.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// ===============================
/// Constraint violation helpers
/// ===============================
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.kind() == ErrorKind::UniqueViolation)
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.kind() == ErrorKind::ForeignKeyViolation)
}

/// True when a unique violation names `table.column`
/// (SQLite reports "UNIQUE constraint failed: employees.email").
pub fn violates_unique_column(err: &sqlx::Error, table: &str, column: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) if db_err.kind() == ErrorKind::UniqueViolation => {
            let needle = format!("{}.{}", table, column);
            db_err.message().contains(&needle)
                || db_err.constraint().is_some_and(|c| c.contains(column))
        }
        _ => false,
    }
}
