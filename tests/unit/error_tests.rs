//! Unit tests for the `AppError` taxonomy.

use tasker::AppError;

#[test]
fn display_includes_category_prefix() {
    assert_eq!(
        AppError::Config("DATABASE_URL missing".into()).to_string(),
        "config: DATABASE_URL missing"
    );
    assert_eq!(AppError::Db("locked".into()).to_string(), "db: locked");
    assert_eq!(
        AppError::Validation("empty title".into()).to_string(),
        "validation: empty title"
    );
    assert_eq!(
        AppError::NotFound("task x".into()).to_string(),
        "not found: task x"
    );
    assert_eq!(AppError::Mcp("boom".into()).to_string(), "mcp: boom");
}

#[test]
fn mutations_disabled_names_the_gate() {
    let msg = AppError::MutationsDisabled.to_string();
    assert!(msg.contains("ALLOW_MUTATIONS"));
}

#[test]
fn sqlx_errors_become_db_errors() {
    let err: AppError = sqlx::Error::RowNotFound.into();
    assert!(matches!(err, AppError::Db(_)));
}
