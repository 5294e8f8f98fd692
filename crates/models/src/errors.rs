use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_keep_their_detail() {
        let err: ModelError = sea_orm::DbErr::Custom("disk full".into()).into();
        assert!(matches!(&err, ModelError::Db(msg) if msg.contains("disk full")));
        assert!(err.to_string().starts_with("database error"));
    }
}
