use thiserror::Error;

pub type StackResult<T> = Result<T, StackError>;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("{axis} accessor failed on dataset `{dataset}` observation {index}: {message}")]
    Extraction {
        axis: &'static str,
        dataset: String,
        index: usize,
        message: String,
    },

    #[error("unknown dataset `{0}`")]
    UnknownDataset(String),

    #[error("dataset `{0}` is already part of the stack group")]
    DuplicateDataset(String),
}
