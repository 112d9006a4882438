use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest caller-supplied id that is reused as is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id of the current request, available as an extension.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn caller_id(request: &Request) -> Option<String> {
    let value = request.headers().get(&REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let usable = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.chars().all(|c| c.is_ascii_graphic());
    usable.then(|| value.to_string())
}

/// Reuse the caller's `x-request-id` when it is short printable ASCII,
/// otherwise mint one, and echo it back.
pub async fn ensure_request_id(mut request: Request, next: Next) -> Response {
    let request_id = RequestId(
        caller_id(&request).unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
    );

    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!(
        "http",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path()
    );
    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
