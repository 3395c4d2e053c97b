//! Command-line and environment configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Command-line arguments for whiteboard-server.
#[derive(Debug, Clone, Parser)]
#[command(name = "whiteboard-server")]
#[command(about = "Relay server for the collaborative whiteboard")]
#[command(version)]
pub struct CliArgs {
    /// Address to bind
    #[arg(long, env = "WHITEBOARD_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory of browser assets served at `/`
    #[arg(long, env = "WHITEBOARD_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Extra allowed CORS origin (repeatable or comma-separated)
    #[arg(long = "cors-origin", env = "WHITEBOARD_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Log output format
    #[arg(long, env = "RUST_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Static asset directory, if any.
    pub static_dir: Option<PathBuf>,
    /// Allowed CORS origins beyond the local defaults.
    pub cors_origins: Vec<String>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            static_dir: None,
            cors_origins: Vec::new(),
            log_format: LogFormat::Text,
        }
    }
}

impl From<CliArgs> for ServerConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            bind: args.bind,
            port: args.port,
            static_dir: args.static_dir,
            cors_origins: args
                .cors_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            log_format: args.log_format,
        }
    }
}

impl ServerConfig {
    /// Socket address to listen on.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Every origin the CORS layer accepts.
    ///
    /// Localhost on the configured port is always allowed.
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![
            format!("http://localhost:{}", self.port),
            format!("http://127.0.0.1:{}", self.port),
        ];
        for origin in &self.cors_origins {
            if !origins.contains(origin) {
                origins.push(origin.clone());
            }
        }
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["whiteboard-server"]);
        let config = ServerConfig::from(args);
        // Defaults only hold when the environment does not override them.
        if std::env::var_os("PORT").is_none() {
            assert_eq!(config.port, DEFAULT_PORT);
        }
        if std::env::var_os("WHITEBOARD_BIND").is_none() {
            assert_eq!(config.bind, IpAddr::V4(Ipv4Addr::LOCALHOST));
        }
        if std::env::var_os("WHITEBOARD_STATIC_DIR").is_none() {
            assert!(config.static_dir.is_none());
        }
    }

    #[test]
    fn test_flags() {
        let args = CliArgs::parse_from([
            "whiteboard-server",
            "--bind",
            "0.0.0.0",
            "--port",
            "8081",
            "--static-dir",
            "public",
            "--cors-origin",
            "https://board.example, ,https://other.example",
            "--log-format",
            "json",
        ]);
        let config = ServerConfig::from(args);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8081");
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
        assert_eq!(
            config.cors_origins,
            vec!["https://board.example", "https://other.example"]
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_allowed_origins_deduplicated() {
        let config = ServerConfig {
            port: 4000,
            cors_origins: vec!["http://localhost:4000".into(), "https://a.example".into()],
            ..ServerConfig::default()
        };
        assert_eq!(
            config.allowed_origins(),
            vec![
                "http://localhost:4000",
                "http://127.0.0.1:4000",
                "https://a.example"
            ]
        );
    }
}
