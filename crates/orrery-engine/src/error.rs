//! Error kinds for the orrery kernel.
//!
//! Configuration errors are fatal and surface at startup. Asset and media
//! errors are logged and otherwise absorbed: the affected body is hidden
//! and the simulation keeps running.

use thiserror::Error;

/// Malformed scene parameters, caught by `SceneConfig::validate` before the
/// first frame runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("body `{name}`: semi-major axis must be positive (got {value})")]
    NonPositiveAxis { name: String, value: f32 },

    #[error("body `{name}`: radius must be positive (got {value})")]
    NonPositiveRadius { name: String, value: f32 },

    #[error("minor-axis ratio must be in (0, 1] (got {0})")]
    InvalidAxisRatio(f32),

    #[error("moon of `{name}`: orbit radius must be positive (got {value})")]
    InvalidMoonOrbit { name: String, value: f32 },

    #[error("belt `{name}`: radii must satisfy 0 < inner < outer (got {inner}..{outer})")]
    InvalidBeltRadii { name: String, inner: f32, outer: f32 },

    #[error("belt `{name}`: asteroid sizes must satisfy 0 < min <= max (got {min}..{max})")]
    InvalidAsteroidSize { name: String, min: f32, max: f32 },

    #[error("transition `{name}`: duration must be positive (got {value} ms)")]
    NonPositiveDuration { name: &'static str, value: f32 },

    #[error("duplicate body name: {0}")]
    DuplicateName(String),
}

/// Non-fatal failures reported by the host's asynchronous loaders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("asset `{name}` failed to load: {reason}")]
    LoadFailed { name: String, reason: String },

    #[error("playback of `{name}` was blocked: {reason}")]
    MediaBlocked { name: String, reason: String },

    #[error("asset `{0}` is not in the manifest")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = ConfigError::NonPositiveAxis { name: "Marte".into(), value: 0.0 };
        assert!(err.to_string().contains("Marte"));

        let err = AssetError::LoadFailed { name: "earth".into(), reason: "404".into() };
        assert_eq!(err.to_string(), "asset `earth` failed to load: 404");
    }

    #[test]
    fn parse_errors_convert() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
