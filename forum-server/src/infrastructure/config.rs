use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub media_root: String,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let media_root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".into());
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid MAX_UPLOAD_BYTES: {}", e))?;
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            media_root,
            public_base_url,
            max_upload_bytes,
            cors_origins,
        })
    }
}
