use std::time::Duration;

use crate::error::ConfigError;
use crate::key::KeyCode;

/// Engine settings.
///
/// Build one with [`Config::builder`]; `Config::default()` gives the stock
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Emit per-keystroke routing events.
    pub debug: bool,
    /// Keys the engine never intercepts.
    pub passthrough: Vec<KeyCode>,
    /// Longest pause between the two keys of a chord; `None` accepts any pause.
    pub chord_window: Option<Duration>,
    /// Undo snapshots kept per field.
    pub undo_limit: usize,
    /// Delay before an insert command actually enters insert mode.
    pub mode_switch_delay: Duration,
    /// Delay before the caret is repaired after a replace-char keystroke.
    pub replace_repair_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let mut passthrough = vec![KeyCode::Tab];
        passthrough.extend((1..=12).map(KeyCode::F));
        Self {
            debug: false,
            passthrough,
            chord_window: Some(Duration::from_millis(600)),
            undo_limit: 100,
            mode_switch_delay: Duration::from_millis(100),
            replace_repair_delay: Duration::from_millis(50),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn passes_through(&self, code: KeyCode) -> bool {
        self.passthrough.contains(&code)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.undo_limit == 0 {
            return Err(ConfigError::ZeroUndoLimit);
        }
        if self.passes_through(KeyCode::Esc) {
            return Err(ConfigError::ReservedPassthrough(KeyCode::Esc));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn passthrough(mut self, keys: impl IntoIterator<Item = KeyCode>) -> Self {
        self.config.passthrough = keys.into_iter().collect();
        self
    }

    pub fn chord_window(mut self, window: Option<Duration>) -> Self {
        self.config.chord_window = window;
        self
    }

    pub fn undo_limit(mut self, limit: usize) -> Self {
        self.config.undo_limit = limit;
        self
    }

    pub fn mode_switch_delay(mut self, delay: Duration) -> Self {
        self.config.mode_switch_delay = delay;
        self
    }

    pub fn replace_repair_delay(mut self, delay: Duration) -> Self {
        self.config.replace_repair_delay = delay;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_tab_and_function_keys() {
        let config = Config::default();
        assert!(config.passes_through(KeyCode::Tab));
        assert!(config.passes_through(KeyCode::F(5)));
        assert!(!config.passes_through(KeyCode::Char('j')));
        assert_eq!(config.undo_limit, 100);
    }

    #[test]
    fn rejects_zero_undo_limit() {
        let err = Config::builder().undo_limit(0).build().unwrap_err();
        assert_eq!(err, ConfigError::ZeroUndoLimit);
    }

    #[test]
    fn rejects_escape_passthrough() {
        let err = Config::builder()
            .passthrough([KeyCode::Tab, KeyCode::Esc])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ReservedPassthrough(KeyCode::Esc));
    }
}
