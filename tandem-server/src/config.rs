use anyhow::{Context, Result};

/// Boot surface of the relay binary: where to listen and which origin the
/// browser clients are served from. Both are required, either as flags or
/// via the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `*` disables the origin check.
    pub allowed_origin: String,
}

impl ServerConfig {
    /// Resolve from explicit values with environment fallback.
    pub fn resolve(port: Option<u16>, allowed_origin: Option<String>) -> Result<Self> {
        let port = match port {
            Some(port) => port,
            None => std::env::var("TANDEM_PORT")
                .context("TANDEM_PORT environment variable is not set")?
                .parse()
                .context("TANDEM_PORT is not a valid port number")?,
        };

        let allowed_origin = match allowed_origin {
            Some(origin) => origin,
            None => std::env::var("TANDEM_ALLOWED_ORIGIN")
                .context("TANDEM_ALLOWED_ORIGIN environment variable is not set")?,
        };

        Ok(Self {
            port,
            allowed_origin,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }
}
