use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("No API key set. Put `apiKey` in config.json or set IMMICH_API_KEY")]
    MissingApiKey,

    #[error("No API URL set. Put `apiURL` in config.json or set IMMICH_API_URL")]
    MissingApiUrl,

    #[error("Cannot read export directory {path}: {source}")]
    ExportRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse API response: {0}")]
    ApiParse(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] takeout_sync_common::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for SyncError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
        SyncError::ExportRead { path, source }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
