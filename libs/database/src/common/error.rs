#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_cause() {
        let err = DatabaseError::ConnectionFailed("connection refused".into());
        assert_eq!(err.to_string(), "Connection failed: connection refused");

        let err = DatabaseError::MigrationError("relation exists".into());
        assert_eq!(err.to_string(), "Migration error: relation exists");
    }
}
