use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request for {path} failed with status {status}")]
    Status { path: String, status: u16 },

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
