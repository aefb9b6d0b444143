use axum::http::StatusCode;
use thiserror::Error;

pub const MSG_NO_FILE: &str = "Veuillez sélectionner un fichier";
pub const MSG_BAD_EXTENSION: &str = "Le fichier doit être au format Excel (.xlsx ou .xls)";
pub const MSG_TOO_LARGE: &str = "Le fichier dépasse la taille maximale autorisée";
pub const MSG_MALFORMED: &str = "Requête d'envoi invalide";
pub const MSG_UPLOAD_FAILED: &str = "Erreur lors du traitement du fichier";
pub const MSG_PROCESSING_FAILED: &str = "Erreur lors du traitement des données";
pub const MSG_NO_DATA: &str = "Aucune donnée disponible";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        Self {
            status: err.status(),
            message: err.user_message(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "success": false, "error": self.message });
        (self.status, axum::Json(body)).into_response()
    }
}

/// Every way an upload can end without results.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("no file selected")]
    NoFile,

    #[error("unsupported file extension: {file_name}")]
    InvalidExtension { file_name: String },

    #[error("upload exceeds the body limit")]
    TooLarge,

    #[error("malformed multipart body: {message}")]
    Malformed { message: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream rejected the file ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("upstream answered {status} without an error message")]
    UpstreamStatus { status: u16 },

    #[error("upstream body is not valid JSON: {0}")]
    UnreadableBody(#[from] serde_json::Error),

    #[error("upstream reported failure or sent an incomplete payload")]
    Unsuccessful,
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoFile | Self::InvalidExtension { .. } | Self::Malformed { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Transport(_)
            | Self::Rejected { .. }
            | Self::UpstreamStatus { .. }
            | Self::UnreadableBody(_)
            | Self::Unsuccessful => StatusCode::BAD_GATEWAY,
        }
    }

    /// Text shown in the inline message on the upload page.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoFile => MSG_NO_FILE.to_string(),
            Self::InvalidExtension { .. } => MSG_BAD_EXTENSION.to_string(),
            Self::TooLarge => MSG_TOO_LARGE.to_string(),
            Self::Malformed { .. } => MSG_MALFORMED.to_string(),
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) | Self::UpstreamStatus { .. } | Self::UnreadableBody(_) => {
                MSG_UPLOAD_FAILED.to_string()
            }
            Self::Unsuccessful => MSG_PROCESSING_FAILED.to_string(),
        }
    }
}
