// (C) 2025 - Enzo Lombardi
//! Process-wide configuration.
//!
//! Replaces ad-hoc global property lookups with a single [`Config`] struct, constructed once at
//! startup and held by the [`crate::app::Application`] for the process lifetime. Call sites that
//! need a configured value borrow `&Config` from the `Application` they already hold a reference
//! to; nothing under `app`/`views`/`terminal` reads an environment variable or process global
//! directly.

use crate::core::error::{Result, TurboVisionError};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default mouse-reporting mode a backend should request on startup, before any application or
/// embedded terminal overrides it. Mirrors `core::terminal_emulator`'s private `MouseProtocol`
/// without coupling `Config` to that module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseTrackingDefault {
    Off,
    Normal,
    ButtonEvent,
    AnyEvent,
}

/// Border glyphs used when drawing window/dialog frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Single,
    Double,
    None,
}

/// Process-wide options (§6A). Construct with [`Config::default`] or [`Config::builder`], or load
/// overrides from a `key = value` file with [`Config::load_file`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Cursor blink interval; `None` disables blinking (cursor stays solid).
    pub cursor_blink_rate: Option<Duration>,
    /// Maximum number of lines retained in the embedded terminal's scrollback.
    pub scrollback_cap: usize,
    /// Minimum time a key must be held before auto-repeat kicks in.
    pub key_repeat_threshold: Duration,
    /// Whether newly created windows default to focus-follows-mouse.
    pub focus_follows_mouse: bool,
    /// Font file path for the native-window backend. `None` uses the platform default.
    pub font_path: Option<String>,
    /// Font size in points for the native-window backend.
    pub font_size: f32,
    /// Whether the ECMA-48 backend is allowed to emit sixel pixel tiles.
    pub sixel_output_enabled: bool,
    /// Whether the ECMA-48 backend is allowed to emit iTerm2 OSC 1337 image tiles.
    pub iterm_image_output_enabled: bool,
    /// Mouse tracking mode requested by a freshly created backend.
    pub mouse_tracking_default: MouseTrackingDefault,
    /// Opacity (0-255) applied to menu/dialog shadows; 255 is fully opaque.
    pub menu_opacity: u8,
    /// Border style drawn around windows and dialogs.
    pub border_style: BorderStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cursor_blink_rate: Some(Duration::from_millis(530)),
            scrollback_cap: 2000,
            key_repeat_threshold: Duration::from_millis(400),
            focus_follows_mouse: false,
            font_path: None,
            font_size: 14.0,
            sixel_output_enabled: true,
            iterm_image_output_enabled: true,
            mouse_tracking_default: MouseTrackingDefault::ButtonEvent,
            menu_opacity: 255,
            border_style: BorderStyle::Single,
        }
    }
}

impl Config {
    /// Starts a [`ConfigBuilder`] seeded with [`Config::default`].
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Loads overrides from a line-oriented `key = value` file, applying them on top of `self`.
    ///
    /// Lines starting with `#` and blank lines are ignored. Unknown keys are logged at `warn` and
    /// otherwise ignored, never an error - matching "unknown options are ignored."
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, or if a known key's value fails to parse.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| TurboVisionError::file_operation(path, e))?;

        for (lineno, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("{}:{}: ignoring malformed line (expected key = value)", path.display(), lineno + 1);
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            self.apply_key(key, value, path, lineno + 1)?;
        }
        Ok(())
    }

    fn apply_key(&mut self, key: &str, value: &str, path: &Path, lineno: usize) -> Result<()> {
        match key {
            "cursor_blink_rate_ms" => {
                let ms: u64 = parse_field(value, path, lineno, key)?;
                self.cursor_blink_rate = if ms == 0 { None } else { Some(Duration::from_millis(ms)) };
            }
            "scrollback_cap" => self.scrollback_cap = parse_field(value, path, lineno, key)?,
            "key_repeat_threshold_ms" => {
                let ms: u64 = parse_field(value, path, lineno, key)?;
                self.key_repeat_threshold = Duration::from_millis(ms);
            }
            "focus_follows_mouse" => self.focus_follows_mouse = parse_field(value, path, lineno, key)?,
            "font_path" => self.font_path = Some(value.to_string()),
            "font_size" => self.font_size = parse_field(value, path, lineno, key)?,
            "sixel_output_enabled" => self.sixel_output_enabled = parse_field(value, path, lineno, key)?,
            "iterm_image_output_enabled" => self.iterm_image_output_enabled = parse_field(value, path, lineno, key)?,
            "mouse_tracking_default" => {
                self.mouse_tracking_default = match value {
                    "off" => MouseTrackingDefault::Off,
                    "normal" => MouseTrackingDefault::Normal,
                    "button_event" => MouseTrackingDefault::ButtonEvent,
                    "any_event" => MouseTrackingDefault::AnyEvent,
                    other => {
                        return Err(TurboVisionError::config(format!(
                            "{}:{}: unknown mouse_tracking_default value {other:?}",
                            path.display(),
                            lineno
                        )));
                    }
                };
            }
            "menu_opacity" => self.menu_opacity = parse_field(value, path, lineno, key)?,
            "border_style" => {
                self.border_style = match value {
                    "single" => BorderStyle::Single,
                    "double" => BorderStyle::Double,
                    "none" => BorderStyle::None,
                    other => {
                        return Err(TurboVisionError::config(format!(
                            "{}:{}: unknown border_style value {other:?}",
                            path.display(),
                            lineno
                        )));
                    }
                };
            }
            _ => log::warn!("{}:{}: ignoring unknown config key {key:?}", path.display(), lineno),
        }
        Ok(())
    }
}

fn parse_field<T: std::str::FromStr>(value: &str, path: &Path, lineno: usize, key: &str) -> Result<T> {
    value.parse().map_err(|_| {
        TurboVisionError::config(format!(
            "{}:{}: invalid value {value:?} for {key}",
            path.display(),
            lineno
        ))
    })
}

/// Builder for [`Config`], seeded with defaults; every setter is optional.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self { config: Config::default() }
    }

    #[must_use]
    pub fn cursor_blink_rate(mut self, rate: Option<Duration>) -> Self {
        self.config.cursor_blink_rate = rate;
        self
    }

    #[must_use]
    pub fn scrollback_cap(mut self, cap: usize) -> Self {
        self.config.scrollback_cap = cap;
        self
    }

    #[must_use]
    pub fn key_repeat_threshold(mut self, threshold: Duration) -> Self {
        self.config.key_repeat_threshold = threshold;
        self
    }

    #[must_use]
    pub fn focus_follows_mouse(mut self, enabled: bool) -> Self {
        self.config.focus_follows_mouse = enabled;
        self
    }

    #[must_use]
    pub fn font(mut self, path: impl Into<String>, size: f32) -> Self {
        self.config.font_path = Some(path.into());
        self.config.font_size = size;
        self
    }

    #[must_use]
    pub fn sixel_output_enabled(mut self, enabled: bool) -> Self {
        self.config.sixel_output_enabled = enabled;
        self
    }

    #[must_use]
    pub fn iterm_image_output_enabled(mut self, enabled: bool) -> Self {
        self.config.iterm_image_output_enabled = enabled;
        self
    }

    #[must_use]
    pub fn mouse_tracking_default(mut self, mode: MouseTrackingDefault) -> Self {
        self.config.mouse_tracking_default = mode;
        self
    }

    #[must_use]
    pub fn menu_opacity(mut self, opacity: u8) -> Self {
        self.config.menu_opacity = opacity;
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: BorderStyle) -> Self {
        self.config.border_style = style;
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_only_set_fields() {
        let config = Config::builder().scrollback_cap(5000).build();
        assert_eq!(config.scrollback_cap, 5000);
        assert_eq!(config.font_size, Config::default().font_size);
    }

    #[test]
    fn load_file_applies_known_keys_and_ignores_unknown() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tv.conf");
        fs::write(
            &path,
            "# comment\n\nscrollback_cap = 500\nmouse_tracking_default = any_event\nbogus_key = 1\n",
        )
        .expect("write config file");

        let mut config = Config::default();
        config.load_file(&path).expect("load config file");

        assert_eq!(config.scrollback_cap, 500);
        assert_eq!(config.mouse_tracking_default, MouseTrackingDefault::AnyEvent);
    }

    #[test]
    fn load_file_rejects_invalid_enum_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tv.conf");
        fs::write(&path, "border_style = triangle\n").expect("write config file");

        let mut config = Config::default();
        assert!(config.load_file(&path).is_err());
    }

    #[test]
    fn cursor_blink_rate_zero_disables_blinking() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tv.conf");
        fs::write(&path, "cursor_blink_rate_ms = 0\n").expect("write config file");

        let mut config = Config::default();
        config.load_file(&path).expect("load config file");
        assert_eq!(config.cursor_blink_rate, None);
    }
}
