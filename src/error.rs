use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine's outer edges (spawning, config, axis lookup).
///
/// The per-frame physics pipeline never returns one of these; numeric
/// degeneracies there fall back to defined values instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid spawn argument or configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Boundary handling was asked for an axis that does not exist in 2D.
    #[error("invalid axis index {0}: expected 0 (x) or 1 (y)")]
    InvalidAxis(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed YAML configuration.
    #[error("config: {0}")]
    Config(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_param_message_names_the_field() {
        let e = Error::InvalidParam("mass must be finite and > 0".to_string());
        let msg = e.to_string();
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("mass"));
    }

    #[test]
    fn invalid_axis_reports_index() {
        let msg = Error::InvalidAxis(7).to_string();
        assert!(msg.contains('7'));
    }
}
