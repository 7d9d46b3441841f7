use thiserror::Error;

#[derive(Debug, Error)]
pub enum DroidScopeError {
    /// The dump could not be turned into a node tree (truncated or invalid markup).
    #[error("Malformed UI dump: {0}")]
    MalformedDocument(String),

    /// The capture transport could not deliver a dump.
    #[error("Acquisition failure: {0}")]
    Acquisition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl serde::Serialize for DroidScopeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

pub type DroidScopeResult<T> = Result<T, DroidScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_display_string() {
        let err = DroidScopeError::MalformedDocument("unexpected end of stream".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Malformed UI dump: unexpected end of stream\"");
    }
}
