//! Errors for the fallible edges of the crate: codecs, configuration and
//! page storage. Interactive geometry never returns these; it clamps,
//! filters or no-ops instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InkError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MessagePack encode error: {0}")]
    MsgpackEncode(#[from] rmp_serde::encode::Error),

    #[error("MessagePack decode error: {0}")]
    MsgpackDecode(#[from] rmp_serde::decode::Error),

    #[error("invalid path data: {0}")]
    PathData(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("page store error: {0}")]
    Store(String),
}

pub type Result<T, E = InkError> = std::result::Result<T, E>;
