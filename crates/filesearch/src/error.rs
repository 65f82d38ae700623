use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FileSearchError {
    #[error("no search folder specified")]
    NoBaseFolder,

    #[error("folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("no keyword provided")]
    NoKeywordProvided,

    #[error("traversal error: {0}")]
    Traversal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FileSearchError>;
