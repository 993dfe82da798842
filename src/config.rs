use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_path: PathBuf,
    /// Currency unit appended to formatted amounts, e.g. "Kč".
    pub currency: String,
    /// BCP 47 locale tag controlling number separators, e.g. "cs-CZ".
    pub locale: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("ROZPOCET_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("ROZPOCET_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7070),
            static_path: env::var("ROZPOCET_STATIC_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            currency: env::var("ROZPOCET_CURRENCY").unwrap_or_else(|_| "Kč".into()),
            locale: env::var("ROZPOCET_LOCALE").unwrap_or_else(|_| "cs-CZ".into()),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
