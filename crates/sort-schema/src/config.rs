use clap::Parser;
use clap::ValueEnum;
use reqwest::Url;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8081";

/// Proxies GraphQL requests and returns introspection responses sorted.
///
/// Repeated introspection of an unchanged schema always yields the same
/// bytes, which keeps schema files committed under version control free of
/// ordering noise.
#[derive(Debug, Clone, Parser)]
#[command(name = "sort-schema", version)]
pub struct Opt {
    /// The GraphQL server to proxy requests to. The request path is appended.
    #[arg(long, env = "SORT_SCHEMA_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Address to serve.
    #[arg(long, env = "SORT_SCHEMA_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Write every payload to the payload directory, before and after sorting.
    #[arg(long = "log-payloads", alias = "log", env = "SORT_SCHEMA_LOG_PAYLOADS")]
    pub log_payloads: bool,

    /// Where `--log-payloads` writes its files.
    #[arg(long, env = "SORT_SCHEMA_PAYLOAD_DIR", default_value = ".")]
    pub payload_dir: PathBuf,

    /// Give up on the upstream after this long, such as `30s` or `1m 30s`.
    #[arg(
        long,
        env = "SORT_SCHEMA_TIMEOUT",
        default_value = "30s",
        value_parser = humantime::parse_duration
    )]
    pub timeout: Duration,

    /// Indent the sorted JSON instead of emitting it compact.
    #[arg(long, env = "SORT_SCHEMA_PRETTY")]
    pub pretty: bool,

    /// Log level (off|error|warn|info|debug|trace). `RUST_LOG` takes precedence.
    #[arg(long, env = "SORT_SCHEMA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, env = "SORT_SCHEMA_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Opt {
    /// The upstream URL a request for `path_and_query` is forwarded to.
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        let endpoint = self.endpoint.as_str().trim_end_matches('/');
        if path_and_query.starts_with('/') {
            format!("{endpoint}{path_and_query}")
        } else {
            format!("{endpoint}/{path_and_query}")
        }
    }
}
