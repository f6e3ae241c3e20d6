//! Deterministic ordering for GraphQL [schema introspection] responses.
//!
//! A server is free to return the members of `__schema` in any order, so two
//! introspections of the same schema rarely serialize to the same bytes.
//! This crate decodes an introspection response into a typed [`Response`],
//! sorts every sibling collection by name, and encodes it back. Only the
//! order changes: no value is rewritten, absent keys stay absent, and JSON
//! the model does not interpret is written back with its exact text.
//!
//! ## Example
//! ```rust
//! let payload = br#"{"data":{"__schema":{"types":[{"kind":"SCALAR","name":"String"},{"kind":"OBJECT","name":"Query"}],"directives":[]}}}"#;
//!
//! let sorted = schema_sort::sort_payload(payload).unwrap();
//! assert_eq!(
//!     String::from_utf8(sorted).unwrap(),
//!     r#"{"data":{"__schema":{"types":[{"kind":"OBJECT","name":"Query"},{"kind":"SCALAR","name":"String"}],"directives":[]}}}"#,
//! );
//! ```
//!
//! [schema introspection]: https://spec.graphql.org/October2021/#sec-Schema-Introspection

mod codec;
mod duplicates;
mod introspection;
mod raw;
mod response;
mod sort;

pub use self::codec::decode;
pub use self::codec::encode;
pub use self::codec::encode_pretty;
pub use self::codec::CodecError;
pub use self::duplicates::find_duplicates;
pub use self::duplicates::Duplicate;
pub use self::introspection::Data;
pub use self::introspection::Directive;
pub use self::introspection::DirectiveLocation;
pub use self::introspection::EnumValue;
pub use self::introspection::Field;
pub use self::introspection::InputValue;
pub use self::introspection::Named;
pub use self::introspection::NamedType;
pub use self::introspection::RootOperationType;
pub use self::introspection::Schema;
pub use self::introspection::Service;
pub use self::introspection::Type;
pub use self::introspection::TypeKind;
pub use self::introspection::TypeWrapping;
pub use self::introspection::Wrapped;
pub use self::introspection::WrappedType;
pub use self::raw::RawJson;
pub use self::raw::RawMap;
pub use self::response::Error;
pub use self::response::Location;
pub use self::response::PathElement;
pub use self::response::Response;
pub use self::sort::canonicalize;

/// Decode an introspection response, sort it, and encode it as compact JSON.
pub fn sort_payload(payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let response = canonicalize(decode(payload)?);
    encode(&response)
}

/// Same as [`sort_payload`], but the output is indented.
pub fn sort_payload_pretty(payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let response = canonicalize(decode(payload)?);
    encode_pretty(&response)
}
