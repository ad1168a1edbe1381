use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Invalid {what}: '{value}'")]
    InvalidArgument { what: &'static str, value: String },

    #[error("Churn probability {value} is outside [0, 1]")]
    OutOfRange { value: f64 },

    #[error("Customer {id} not found")]
    CustomerNotFound { id: u32 },

    #[error("Cannot read {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashError {
    pub fn invalid(what: &'static str, value: impl ToString) -> Self {
        DashError::InvalidArgument { what, value: value.to_string() }
    }
}

pub type DashResult<T> = Result<T, DashError>;
