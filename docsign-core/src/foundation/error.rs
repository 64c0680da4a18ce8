use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    AuthenticationRequired,
    InvalidSignaturePayload,
    NotPermittedForRole,
    AlreadySigned,
    OutOfOrder,
    SignaturesNotLoaded,
    CoordinatorClosed,
    CaptureClosed,
    StoreWriteFailed,
    StoreReadFailed,
    StorageError,
    StorageLockTimeout,
    SchemaMismatch,
    SerializationError,
    EncodingError,
    ConfigError,
    InvalidIdentifier,
    UnrecognizedResponseShape,
    Message,
}

#[derive(Debug, Error)]
pub enum SignatureError {
    // === Signing workflow ===
    #[error("not authenticated")]
    AuthenticationRequired,

    #[error("invalid signature format: {details}")]
    InvalidSignaturePayload { details: String },

    #[error("signature not required for this document: role={role} document_type={document_type}")]
    NotPermittedForRole { role: String, document_type: String },

    #[error("already signed: role={role}")]
    AlreadySigned { role: String },

    #[error("out of order: role={role} waiting_for={waiting_for:?} ({message})")]
    OutOfOrder { role: String, waiting_for: Vec<String>, message: String },

    #[error("signatures are still loading")]
    SignaturesNotLoaded,

    #[error("signature session closed for document {document_id}")]
    CoordinatorClosed { document_id: String },

    #[error("signature capture subscription closed")]
    CaptureClosed,

    // === Store ===
    #[error("store write failed during {operation}: {details}")]
    StoreWriteFailed { operation: String, details: String },

    #[error("store read failed during {operation}: {details}")]
    StoreReadFailed { operation: String, details: String },

    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("storage lock timeout: {operation} (waited {timeout_secs}s)")]
    StorageLockTimeout { operation: String, timeout_secs: u64 },

    #[error("schema mismatch: stored={stored} current={current}")]
    SchemaMismatch { stored: u32, current: u32 },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("encoding error: {0}")]
    EncodingError(String),

    // === Configuration ===
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid {kind}: {value}")]
    InvalidIdentifier { kind: String, value: String },

    // === Questionnaire generation ===
    #[error("unrecognized response shape: {details}")]
    UnrecognizedResponseShape { details: String },

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, SignatureError>;

impl SignatureError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SignatureError::AuthenticationRequired => ErrorCode::AuthenticationRequired,
            SignatureError::InvalidSignaturePayload { .. } => ErrorCode::InvalidSignaturePayload,
            SignatureError::NotPermittedForRole { .. } => ErrorCode::NotPermittedForRole,
            SignatureError::AlreadySigned { .. } => ErrorCode::AlreadySigned,
            SignatureError::OutOfOrder { .. } => ErrorCode::OutOfOrder,
            SignatureError::SignaturesNotLoaded => ErrorCode::SignaturesNotLoaded,
            SignatureError::CoordinatorClosed { .. } => ErrorCode::CoordinatorClosed,
            SignatureError::CaptureClosed => ErrorCode::CaptureClosed,
            SignatureError::StoreWriteFailed { .. } => ErrorCode::StoreWriteFailed,
            SignatureError::StoreReadFailed { .. } => ErrorCode::StoreReadFailed,
            SignatureError::StorageError { .. } => ErrorCode::StorageError,
            SignatureError::StorageLockTimeout { .. } => ErrorCode::StorageLockTimeout,
            SignatureError::SchemaMismatch { .. } => ErrorCode::SchemaMismatch,
            SignatureError::SerializationError { .. } => ErrorCode::SerializationError,
            SignatureError::EncodingError(_) => ErrorCode::EncodingError,
            SignatureError::ConfigError(_) => ErrorCode::ConfigError,
            SignatureError::InvalidIdentifier { .. } => ErrorCode::InvalidIdentifier,
            SignatureError::UnrecognizedResponseShape { .. } => ErrorCode::UnrecognizedResponseShape,
            SignatureError::Message(_) => ErrorCode::Message,
        }
    }

    /// Errors the host UI should show to the signer as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::AuthenticationRequired
                | ErrorCode::InvalidSignaturePayload
                | ErrorCode::NotPermittedForRole
                | ErrorCode::AlreadySigned
                | ErrorCode::OutOfOrder
                | ErrorCode::SignaturesNotLoaded
        )
    }

    pub fn invalid_payload(details: impl Into<String>) -> Self {
        SignatureError::InvalidSignaturePayload { details: details.into() }
    }

    pub fn store_write(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        SignatureError::StoreWriteFailed { operation: operation.into(), details: err.to_string() }
    }

    pub fn store_read(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        SignatureError::StoreReadFailed { operation: operation.into(), details: err.to_string() }
    }
}

#[macro_export]
macro_rules! storage_err {
    ($op:expr, $err:expr) => {
        $crate::foundation::SignatureError::StorageError { operation: $op.into(), details: $err.to_string() }
    };
}

#[macro_export]
macro_rules! serde_err {
    ($fmt:expr, $err:expr) => {
        $crate::foundation::SignatureError::SerializationError { format: $fmt.into(), details: $err.to_string() }
    };
}

impl From<io::Error> for SignatureError {
    fn from(err: io::Error) -> Self {
        SignatureError::StorageError { operation: "io".to_string(), details: err.to_string() }
    }
}

impl From<serde_json::Error> for SignatureError {
    fn from(err: serde_json::Error) -> Self {
        serde_err!("json", err)
    }
}

impl From<bincode::Error> for SignatureError {
    fn from(err: bincode::Error) -> Self {
        serde_err!("bincode", err)
    }
}

impl From<base64::DecodeError> for SignatureError {
    fn from(err: base64::DecodeError) -> Self {
        SignatureError::EncodingError(format!("base64: {}", err))
    }
}

impl From<rocksdb::Error> for SignatureError {
    fn from(err: rocksdb::Error) -> Self {
        storage_err!("rocksdb", err)
    }
}

impl From<figment::Error> for SignatureError {
    fn from(err: figment::Error) -> Self {
        SignatureError::ConfigError(err.to_string())
    }
}
