use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// バックエンドが 2xx 以外を返した（PostgREST / Storage のエラーボディ由来）
    Backend { status: u16, message: String },
    Network(String),
    Storage(String),
    Realtime(String),
    NotFound(String),
    InvalidInput(String),
    ValidationError(String),
    ConfigurationError(String),
    DeserializationError(String),
    Internal(String),
}

impl AppError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        AppError::Backend {
            status,
            message: message.into(),
        }
    }

    /// フロントエンド向けの安定したエラーコード
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Backend { .. } => "BACKEND_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Realtime(_) => "REALTIME_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AppError::DeserializationError(_) => "DESERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 利用者に見せるメッセージ（種別プレフィックスなし）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Backend { message, .. } => message.clone(),
            AppError::Network(msg)
            | AppError::Storage(msg)
            | AppError::Realtime(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidInput(msg)
            | AppError::ValidationError(msg)
            | AppError::ConfigurationError(msg)
            | AppError::DeserializationError(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Backend { status, message } => {
                write!(f, "Backend error ({}): {}", status, message)
            }
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Realtime(msg) => write!(f, "Realtime error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Tauri コマンドの戻り値として渡すため文字列でシリアライズする
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DeserializationError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigurationError(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for AppError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        AppError::Realtime(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Internal(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
