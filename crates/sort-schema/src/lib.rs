//! An HTTP proxy that forwards GraphQL requests to an upstream server and
//! returns its introspection responses in canonical order.
//!
//! See [`schema_sort`] for the ordering itself.

mod config;
mod payload_log;
mod proxy;

pub use self::config::LogFormat;
pub use self::config::Opt;
pub use self::config::DEFAULT_ENDPOINT;
pub use self::config::DEFAULT_LISTEN;
pub use self::payload_log::PayloadLog;
pub use self::proxy::router;
pub use self::proxy::ProxyError;
