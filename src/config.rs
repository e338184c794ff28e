use std::path::PathBuf;

use derive_builder::Builder;

use crate::{
    error::{Error, Result},
    provider::DatasetSource,
};

pub const DEFAULT_DATASET_URL: &str = "http://localhost:8002/data/restaurants.json";

#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(build_fn(error = "Error"))]
pub struct Config {
    #[builder(setter(into), default = "DEFAULT_DATASET_URL.to_string()")]
    pub dataset_url: String,
    /// read the dataset from disk instead of `dataset_url`
    #[builder(setter(into, strip_option), default)]
    pub dataset_path: Option<PathBuf>,
    #[builder(setter(into), default = "\"127.0.0.1\".to_string()")]
    pub bind_addr: String,
    #[builder(default = "8080")]
    pub port: u16,
    #[builder(setter(into), default = "\"http://localhost:3000\".to_string()")]
    pub allowed_origin: String,
    #[builder(setter(into, strip_option), default)]
    pub maps_api_key: Option<String>,
    #[builder(default = "tracing::Level::INFO")]
    pub log_level: tracing::Level,
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Self::Config(e.to_string())
    }
}

impl Config {
    /// Read the configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = ConfigBuilder::default();
        if let Some(url) = var("DATASET_URL") {
            builder.dataset_url(url);
        }
        if let Some(path) = var("DATASET_PATH") {
            builder.dataset_path(path);
        }
        if let Some(addr) = var("BIND_ADDR") {
            builder.bind_addr(addr);
        }
        if let Some(port) = var("PORT") {
            let port = port
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a port number: {port}")))?;
            builder.port(port);
        }
        if let Some(origin) = var("ALLOWED_ORIGIN") {
            check_origin(&origin)?;
            builder.allowed_origin(origin);
        }
        if let Some(key) = var("MAPS_API_KEY").filter(|key| !key.is_empty()) {
            builder.maps_api_key(key);
        }
        if let Some(level) = var("LOG_LEVEL") {
            let level = level
                .parse()
                .map_err(|_| Error::Config(format!("unknown LOG_LEVEL {level}")))?;
            builder.log_level(level);
        }
        builder.build()
    }

    pub fn dataset_source(&self) -> DatasetSource {
        match &self.dataset_path {
            Some(path) => DatasetSource::File(path.clone()),
            None => DatasetSource::http(self.dataset_url.as_str()),
        }
    }
}

/// The CORS layer panics on an origin it cannot parse, so reject it here.
fn check_origin(origin: &str) -> Result<()> {
    if origin.trim() == "*" {
        return Err(Error::Config(
            "ALLOWED_ORIGIN must name one origin, not *".to_string(),
        ));
    }
    let uri = origin
        .parse::<actix_web::http::Uri>()
        .map_err(|_| Error::Config(format!("ALLOWED_ORIGIN is not a URL: {origin}")))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(Error::Config(format!(
            "ALLOWED_ORIGIN needs a scheme and host: {origin}"
        )));
    }
    Ok(())
}
