use thiserror::Error;

/// Errores del almacén de registros
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No schema registered for entity '{0}'")]
    SchemaMissing(String),

    #[error("Invalid entity name: '{0}'")]
    InvalidEntityName(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
