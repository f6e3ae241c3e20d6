use crate::config::Opt;
use crate::payload_log::PayloadLog;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum::Router;
use bytes::Bytes;
use schema_sort::CodecError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(error) if error.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) | ProxyError::Codec(CodecError::Decode(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::Codec(CodecError::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ProxyError::Upstream(error) if error.is_timeout() => "UPSTREAM_TIMEOUT",
            ProxyError::Upstream(_) => "UPSTREAM_REQUEST_FAILED",
            ProxyError::Codec(CodecError::Decode(_)) => "MALFORMED_INTROSPECTION",
            ProxyError::Codec(CodecError::Encode(_)) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "could not proxy request");
        let body = serde_json::json!({
            "errors": [{
                "message": self.to_string(),
                "extensions": { "code": self.code() },
            }]
        });
        (self.status(), Json(body)).into_response()
    }
}

struct ProxyState {
    opt: Opt,
    client: reqwest::Client,
    payloads: Option<PayloadLog>,
}

/// The proxy service: every method and path is forwarded upstream.
pub fn router(opt: &Opt) -> Result<Router, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(opt.timeout).build()?;
    let payloads = opt
        .log_payloads
        .then(|| PayloadLog::new(opt.payload_dir.clone()));
    let state = Arc::new(ProxyState {
        opt: opt.clone(),
        client,
        payloads,
    });
    Ok(Router::new().fallback(forward).with_state(state))
}

async fn forward(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path_and_query = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    let url = state.opt.upstream_url(path_and_query);
    tracing::debug!(%method, %url, "forwarding request");

    let mut request = state.client.request(method.clone(), &url).body(body);
    if let Some(content_type) = headers.get(CONTENT_TYPE) {
        request = request.header(CONTENT_TYPE, content_type);
    }
    let upstream = request.send().await.map_err(ProxyError::Upstream)?;
    let status = upstream.status();
    let raw = upstream.bytes().await.map_err(ProxyError::Upstream)?;

    let mut response = schema_sort::decode(&raw)?;
    response.canonicalize();
    for duplicate in schema_sort::find_duplicates(&response) {
        tracing::warn!(
            collection = %duplicate.collection,
            name = %duplicate.name,
            "introspection contains a duplicate name"
        );
    }
    let sorted = if state.opt.pretty {
        schema_sort::encode_pretty(&response)?
    } else {
        schema_sort::encode(&response)?
    };

    tracing::info!(
        %method,
        path = uri.path(),
        %status,
        bytes = sorted.len(),
        "wrote sorted response"
    );

    if let Some(payloads) = &state.payloads {
        payloads.persist(&raw, &sorted).await;
    }

    Ok((
        status,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        sorted,
    )
        .into_response())
}
