use crate::database::mysql::{is_unique_violation, parse_uuid};

#[test]
fn test_parse_uuid_reports_column() {
    let id = uuid::Uuid::new_v4();
    assert_eq!(parse_uuid("accounts.id", &id.to_string()).unwrap(), id);

    let err = parse_uuid("refresh_tokens.account_id", "not-a-uuid").unwrap_err();
    assert!(err.is_infrastructure());
    assert!(err.to_string().contains("refresh_tokens.account_id"));
}

#[test]
fn test_non_database_errors_are_not_unique_violations() {
    assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
}
