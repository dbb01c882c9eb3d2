//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::PredictorError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Predictor(#[from] PredictorError),

    #[error("{0}")]
    InvalidBody(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Predictor(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ServerError::Predictor(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        // client faults at warn, service faults at error
        if status.is_server_error() {
            tracing::error!(kind = "operational", status = status.as_u16(), detail = %detail, "Request failed");
        } else {
            tracing::warn!(kind = "client", status = status.as_u16(), detail = %detail, "Request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
