use thiserror::Error;

pub type DiagramResult<T> = Result<T, DiagramError>;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("invalid number for `{field}`: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid diagram config: {0}")]
    InvalidConfig(String),

    #[error("form field `{field}` does not accept this kind of value")]
    FormValueMismatch { field: &'static str },

    #[error("drag and drop is disabled for this diagram")]
    DragDisabled,

    #[error("serialization failed: {0}")]
    Serialization(String),
}
