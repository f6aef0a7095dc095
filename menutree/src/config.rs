//! Menu configuration

use serde::Deserialize;

use crate::error::ConfigError;
use crate::path::{DEFAULT_SEPARATOR, validate_separator};

/// Initial settings for a [`StatefulMenu`](crate::StatefulMenu).
///
/// Every field can still be changed on the live menu through its accessors.
///
/// # Example
///
/// ```
/// use menutree::MenuConfig;
///
/// let config = MenuConfig::default()
///     .ignore_errors(true)
///     .with_separator("::");
/// assert!(config.popup);
///
/// let config = MenuConfig::from_json(r#"{ "popup": false, "anchor_label": "main" }"#).unwrap();
/// assert_eq!(config.anchor_label.as_deref(), Some("main"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Wrap the whole menu in a popup keyed by the anchor label.
    ///
    /// Default: true
    pub popup: bool,

    /// Drop failing requests silently instead of reporting them from
    /// `render`.
    ///
    /// Default: false
    pub ignore_errors: bool,

    /// Separator between path segments.
    ///
    /// Default: `/`
    pub separator: String,

    /// Fixed anchor label. `None` generates a random `##` label.
    ///
    /// Default: None
    pub anchor_label: Option<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            popup: true,
            ignore_errors: false,
            separator: DEFAULT_SEPARATOR.to_string(),
            anchor_label: None,
        }
    }
}

impl MenuConfig {
    /// Creates a popup config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config for a menu rendered in place every pass.
    pub fn inline() -> Self {
        Self {
            popup: false,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config can be used to build a menu.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_separator(&self.separator)?;
        Ok(())
    }

    /// Sets popup mode.
    pub fn popup(mut self, popup: bool) -> Self {
        self.popup = popup;
        self
    }

    /// Sets ignore-errors mode.
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    /// Sets the path separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets a fixed anchor label.
    pub fn with_anchor_label(mut self, label: impl Into<String>) -> Self {
        self.anchor_label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;

    #[test]
    fn test_defaults() {
        let config = MenuConfig::default();
        assert!(config.popup);
        assert!(!config.ignore_errors);
        assert_eq!(config.separator, "/");
        assert_eq!(config.anchor_label, None);
        assert!(!MenuConfig::inline().popup);
    }

    #[test]
    fn test_from_json_partial() {
        let config = MenuConfig::from_json(r#"{ "ignore_errors": true, "separator": "." }"#).unwrap();
        assert_eq!(
            config,
            MenuConfig::default().ignore_errors(true).with_separator(".")
        );
    }

    #[test]
    fn test_from_json_rejects_empty_separator() {
        let err = MenuConfig::from_json(r#"{ "separator": "" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Menu(MenuError::EmptySeparator)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            MenuConfig::from_json("{ popup: yes }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
