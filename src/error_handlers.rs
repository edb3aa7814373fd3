//! src/error_handlers.rs

use actix_web::dev::ServiceResponse;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};

/// Renders client and server errors as JSON documents.
pub fn error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .handler(StatusCode::BAD_REQUEST, render_json)
        .handler(StatusCode::NOT_FOUND, render_json)
        .handler(StatusCode::METHOD_NOT_ALLOWED, render_json)
        .handler(StatusCode::UNSUPPORTED_MEDIA_TYPE, render_json)
        .handler(StatusCode::INTERNAL_SERVER_ERROR, render_json)
}

fn message_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "The request could not be understood",
        StatusCode::NOT_FOUND => "The requested resource was not found",
        StatusCode::METHOD_NOT_ALLOWED => "The method is not allowed for the requested URL",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "The media type of the request is not supported",
        _ => "The server encountered an internal error",
    }
}

fn render_json<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), "Internal server error");
    } else {
        tracing::warn!(status = status.as_u16(), "{}", message_for(status));
    }

    let body = serde_json::json!({
        "status": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Unknown"),
        "message": message_for(status),
    });

    let (req, res) = res.into_parts();
    let mut res = res.set_body(body.to_string());
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let res = ServiceResponse::new(req, res)
        .map_into_boxed_body()
        .map_into_right_body();
    Ok(ErrorHandlerResponse::Response(res))
}
