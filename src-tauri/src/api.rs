//! `codecube://` URI scheme routes
//!
//! The webview reaches the generation route with
//! `fetch("codecube://localhost/api/generate-code")` (on Windows
//! `http://codecube.localhost/api/generate-code`).

use crate::completion::CompletionService;
use crate::error::GenerationError;
use crate::generator::{generate_code, prompt_from_value};
use crate::models::ErrorBody;
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use tauri::http::{header, Method, Request, Response, StatusCode};

/// Scheme registered with the webview
pub const API_SCHEME: &str = "codecube";

pub const GENERATE_CODE_PATH: &str = "/api/generate-code";

fn with_cors(builder: tauri::http::response::Builder) -> tauri::http::response::Builder {
    builder
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Vec<u8>> {
    let bytes = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    with_cors(Response::builder())
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(bytes)
        .unwrap_or_default()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response<Vec<u8>> {
    json_response(
        status,
        &ErrorBody {
            error: message.into(),
        },
    )
}

/// Routes one scheme request.
///
/// `make_service` is only called for a valid generation request, so a
/// rejected request never builds an HTTP client.
pub async fn handle_request<C, F>(request: &Request<Vec<u8>>, make_service: F) -> Response<Vec<u8>>
where
    C: CompletionService,
    F: FnOnce() -> Result<C, GenerationError>,
{
    let path = request.uri().path();
    if path != GENERATE_CODE_PATH {
        return error_response(StatusCode::NOT_FOUND, format!("No route for {}", path));
    }

    match request.method() {
        &Method::POST => {}
        &Method::OPTIONS => {
            return with_cors(Response::builder())
                .status(StatusCode::NO_CONTENT)
                .body(Vec::new())
                .unwrap_or_default();
        }
        _ => {
            return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
        }
    }

    let body: Value = match serde_json::from_slice(request.body()) {
        Ok(body) => body,
        Err(e) => {
            warn!("[api] Unreadable generate-code body: {}", e);
            return error_response(StatusCode::BAD_REQUEST, GenerationError::InvalidInput.to_string());
        }
    };

    let prompt = match prompt_from_value(&body) {
        Ok(prompt) => prompt,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match generate_code(make_service(), prompt).await {
        Ok(outcome) => {
            info!("[api] generate-code answered from {:?}", outcome.source);
            json_response(StatusCode::OK, &outcome.code)
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}
