use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use footprint_catalog::ItemActionError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to a shopper
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) | AppError::NotFoundError(msg) | AppError::ConflictError(msg) => msg.clone(),
            AppError::InternalServerError(_) | AppError::Anyhow(_) => "Internal Server Error".to_string(),
        }
    }

    /// Mode mismatches and a hidden matrix are conflicts with the current view;
    /// bad quantities and empty batches are plain validation failures.
    pub fn from_item_action(err: ItemActionError) -> Self {
        match err {
            ItemActionError::ModeMismatch { .. } | ItemActionError::MatrixHidden => {
                AppError::ConflictError(err.to_string())
            }
            ItemActionError::Quantity(_) | ItemActionError::Batch(_) => {
                AppError::ValidationError(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::ValidationError(msg) => msg,
            AppError::NotFoundError(msg) => msg,
            AppError::ConflictError(msg) => msg,
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                "Internal Server Error".to_string()
            },
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                "Internal Server Error".to_string()
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
