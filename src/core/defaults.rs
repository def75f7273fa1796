use serde::Serialize;
use std::path::PathBuf;

/// Directory scanned by the fixer, relative to the invocation directory.
pub const ICON_DIR: &str = "src/weather_icons";

/// Prefix that turns a digit-leading icon name into a valid C identifier.
pub const IDENTIFIER_PREFIX: &str = "icon_";

/// Icon codes the firmware declares descriptors for (`icon_01d` .. `icon_50n`).
pub const EXPECTED_ICON_CODES: &[&str] = &[
    "01d", "01n", "02d", "02n", "03d", "03n", "04d", "04n", "09d", "09n", "10d", "10n", "11d",
    "11n", "13d", "13n", "50d", "50n",
];

/// Hardcoded settings for a fixer run. Not user-configurable; serialized so
/// JSON output can echo what the run used.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixerDefaults {
    pub directory: PathBuf,
    pub identifier_prefix: String,
    pub expected_codes: Vec<String>,
}

impl Default for FixerDefaults {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(ICON_DIR),
            identifier_prefix: IDENTIFIER_PREFIX.to_string(),
            expected_codes: EXPECTED_ICON_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl FixerDefaults {
    /// Same defaults, pointed at another directory. Used by tests and library
    /// callers; the CLI always uses [`ICON_DIR`].
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }
}
