use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a fetch or a render.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Request failed. Returned status of {0}")]
    RequestFailed(u16),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read dataset {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Restaurant does not exist")]
    RestaurantNotFound,
    #[error("No restaurant id in URL")]
    MissingId,
    #[error("no element with id \"{0}\" on the page")]
    MissingElement(String),
    #[error("invalid page template: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("failed to render page \"{0}\": {1}")]
    Render(String, handlebars::RenderError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
