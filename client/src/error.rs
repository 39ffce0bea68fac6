//! Error handling for the Blend Vinos client
//!
//! Provides consistent, user-presentable errors in Spanish and English.
//! Everything here is terminal at the screen boundary: screens render the
//! message and stop, nothing is retried.

use serde::Serialize;
use shared::{DraftError, Language};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Session errors
    #[error("No authentication token")]
    MissingToken,

    #[error("Session expired. Please log in again.")]
    SessionExpired,

    // Local validation errors; these never reach the network
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("wine already added to the draft")]
    DuplicateItem,

    #[error(transparent)]
    Draft(#[from] DraftError),

    // Collaborator errors, rendered verbatim to the user
    #[error("Request failed: {status} {status_text} - {body}")]
    RequestFailed {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Expected outcome of a torn-down in-flight request; never surfaced
    #[error("Request cancelled")]
    Cancelled,

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// User-facing error rendering
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    /// Message in the user's preferred language
    pub fn message(&self, language: &Language) -> &str {
        match language {
            Language::Spanish => &self.message_es,
            Language::English => &self.message_en,
        }
    }
}

impl AppError {
    /// Render this error for display, with the Spanish text the UI shows
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AppError::MissingToken => ErrorDetail {
                code: "NO_TOKEN".to_string(),
                message_en: "No authentication token".to_string(),
                message_es: "No hay una sesión activa".to_string(),
                field: None,
            },
            AppError::SessionExpired => ErrorDetail {
                code: "SESSION_EXPIRED".to_string(),
                message_en: "Session expired. Please log in again.".to_string(),
                message_es: "La sesión expiró. Inicie sesión nuevamente.".to_string(),
                field: None,
            },
            AppError::Validation {
                field,
                message,
                message_es,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: message.clone(),
                message_es: message_es.clone(),
                field: Some(field.clone()),
            },
            AppError::DuplicateItem => ErrorDetail {
                code: "DUPLICATE_ITEM".to_string(),
                message_en: "This wine was already added to the list".to_string(),
                message_es: "Ese vino ya fue agregado a la lista".to_string(),
                field: Some("wine_code".to_string()),
            },
            AppError::Draft(_) => ErrorDetail {
                code: "INCOMPLETE_DRAFT".to_string(),
                message_en: "The movement draft is not ready to submit".to_string(),
                message_es: "El movimiento no está listo para guardar".to_string(),
                field: None,
            },
            AppError::RequestFailed { .. } => ErrorDetail {
                code: "REQUEST_FAILED".to_string(),
                // The collaborator's message goes out verbatim in both slots
                message_en: self.to_string(),
                message_es: self.to_string(),
                field: None,
            },
            AppError::Cancelled => ErrorDetail {
                code: "CANCELLED".to_string(),
                message_en: "Request cancelled".to_string(),
                message_es: "Operación cancelada".to_string(),
                field: None,
            },
            AppError::Transport(err) => ErrorDetail {
                code: "TRANSPORT_ERROR".to_string(),
                message_en: format!("HTTP transport error: {}", err),
                message_es: "No se pudo contactar al servidor".to_string(),
                field: None,
            },
            AppError::Configuration(err) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message_en: format!("Configuration error: {}", err),
                message_es: format!("Error de configuración: {}", err),
                field: None,
            },
            AppError::Internal(msg) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: msg.clone(),
                message_es: "Ocurrió un error interno".to_string(),
                field: None,
            },
        }
    }

    /// Whether this is the expected outcome of an aborted request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }
}

/// Result type alias for the client core
pub type AppResult<T> = Result<T, AppError>;
