//! Exit codes for `hexgl` failures.
//!
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: the core rejected the request, e.g. a tile grid with zero columns
//!       or more cells than can be allocated
//! - 11: a file could not be read or decoded
//! - 12: malformed `--color` or `--config`
//! - 13: JSON output could not be produced
//!
//! `RenderError`s are routed by cause: decode failures count as I/O and
//! config parse failures as input, everything else keeps code 10.

use hexgl_core::RenderError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// The core rejected a tile grid or other request.
    Render(RenderError),
    /// Reading or decoding a file failed.
    Io(String),
    /// A flag value could not be parsed.
    Input(String),
    /// JSON output failed.
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Render(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Decode { .. } => CliError::Io(e.to_string()),
            RenderError::InvalidConfig(msg) => CliError::Input(format!("invalid --config: {msg}")),
            other => CliError::Render(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgl_core::TileMap;

    #[test]
    fn zero_column_grid_is_a_render_error() {
        let err = CliError::from(TileMap::filled(0, 4, 1).unwrap_err());
        assert!(matches!(err, CliError::Render(RenderError::InvalidTileMap(_))));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn oversized_grid_keeps_core_message() {
        let err = CliError::from(TileMap::filled(usize::MAX, 2, 1).unwrap_err());
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("too large"), "got: {err}");
    }

    #[test]
    fn png_decode_failure_is_io() {
        let err = CliError::from(RenderError::Decode {
            path: "tiles/grass.png".into(),
            message: "truncated IDAT".into(),
        });
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("tiles/grass.png"));
    }

    #[test]
    fn malformed_config_is_input_and_names_the_flag() {
        let core_err = hexgl_core::RenderConfig::from_json("{\"camera\": 3}").unwrap_err();
        let err = CliError::from(core_err);
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().starts_with("invalid --config:"), "got: {err}");
    }

    #[test]
    fn missing_gl_capability_stays_render() {
        let err = CliError::from(RenderError::MissingCapability(
            "explicit uniform locations".into(),
        ));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn bad_color_is_input() {
        assert_eq!(CliError::Input("invalid --color 'red'".into()).exit_code(), 12);
    }

    #[test]
    fn json_output_failure_is_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let err = CliError::from(bad_json.unwrap_err());
        assert_eq!(err.exit_code(), 13);
    }
}
