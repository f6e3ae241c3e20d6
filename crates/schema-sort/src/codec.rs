use crate::response::Response;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed introspection payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("could not serialize introspection response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Parse the body of an introspection response.
pub fn decode(payload: &[u8]) -> Result<Response, CodecError> {
    serde_json::from_slice(payload).map_err(CodecError::Decode)
}

/// Serialize as compact JSON.
pub fn encode(response: &Response) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(response).map_err(CodecError::Encode)
}

/// Serialize as JSON indented with two spaces.
pub fn encode_pretty(response: &Response) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec_pretty(response).map_err(CodecError::Encode)
}
