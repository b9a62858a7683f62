use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Built frontend directory (SSR shell + hashed assets).
    pub frontend_dist: PathBuf,
    pub uploads_dir: PathBuf,
    /// Shared secret for signing the admin cookie token.
    pub token_secret: String,
    pub resend_api_key: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("apna.db")
    }
}
