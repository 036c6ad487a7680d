use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        }
    }
}
