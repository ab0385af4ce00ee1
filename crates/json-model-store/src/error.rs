use json_model::EncodeError;
use thiserror::Error;

/// Failure reported by an [`Encryptor`](crate::Encryptor).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CipherError(pub String);

impl CipherError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("encryption failed: {0}")]
    Encryption(#[source] CipherError),
    #[error("decryption failed: {0}")]
    Decryption(#[source] CipherError),
    #[error("malformed JSON text: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("cannot encode value: {0}")]
    Encoding(#[from] EncodeError),
    #[error("cannot serialize JSON text: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    /// Whether the error came from the byte sink or source.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }
}
