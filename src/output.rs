//! # Terminal Presentation
//!
//! Decides once per run whether the CLI decorates its progress messages and
//! renders the few decorations it uses: bold green section headers and a
//! status marker in front of summary lines.
//!
//! `--color=auto` follows the usual conventions. `NO_COLOR` (any value) and
//! `CLICOLOR=0` turn decoration off, `CLICOLOR_FORCE` turns it on even when
//! stdout is piped, and `TERM=dumb` turns it off. Without any of these the
//! decision falls to whether stdout supports colors.
//!
//! ```rust,ignore
//! use envmeta::output::{Marker, OutputConfig};
//!
//! let out = OutputConfig::from_env_and_flag("auto");
//! println!("{}", out.header("Writing files into .metadata.tmp/ directory..."));
//! println!("{} Environment dev written", out.marker(Marker::Ok));
//! ```

use std::env;
use std::ffi::OsString;
use std::str::FromStr;

use console::style;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    Always,
    Never,
    #[default]
    Auto,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            "auto" => Ok(ColorChoice::Auto),
            other => Err(format!("invalid color choice '{other}'")),
        }
    }
}

/// Status shown in front of a summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Failed,
    Scan,
    Summary,
}

impl Marker {
    fn symbol(self) -> &'static str {
        match self {
            Marker::Ok => "✅",
            Marker::Failed => "❌",
            Marker::Scan => "🔍",
            Marker::Summary => "📊",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Marker::Ok => "[OK]",
            Marker::Failed => "[ERR]",
            Marker::Scan => "[SCAN]",
            Marker::Summary => "[INFO]",
        }
    }
}

/// Presentation settings shared by every command of one run.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag against the process environment.
    ///
    /// Unrecognized flag values behave like `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let choice = color_flag.parse::<ColorChoice>().unwrap_or_default();
        Self::resolve(choice, |name| env::var_os(name), || {
            console::Term::stdout().features().colors_supported()
        })
    }

    fn resolve(
        choice: ColorChoice,
        var: impl Fn(&str) -> Option<OsString>,
        terminal_supports_color: impl FnOnce() -> bool,
    ) -> Self {
        let is = |name: &str, expected: &str| var(name).is_some_and(|v| v == expected);
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto if var("NO_COLOR").is_some() || is("CLICOLOR", "0") => false,
            ColorChoice::Auto
                if var("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") =>
            {
                true
            }
            ColorChoice::Auto if is("TERM", "dumb") => false,
            ColorChoice::Auto => terminal_supports_color(),
        };
        Self { use_color }
    }

    /// Render a section header, green and bold when decorating.
    pub fn header(&self, text: &str) -> String {
        style(text)
            .green()
            .bold()
            .force_styling(self.use_color)
            .to_string()
    }

    /// Emoji for `marker` when decorating, a bracketed tag otherwise.
    pub fn marker(&self, marker: Marker) -> &'static str {
        if self.use_color {
            marker.symbol()
        } else {
            marker.plain()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_with(choice: ColorChoice, vars: &[(&str, &str)], tty: bool) -> bool {
        OutputConfig::resolve(
            choice,
            |name| {
                vars.iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| OsString::from(v))
            },
            || tty,
        )
        .use_color
    }

    #[test]
    fn test_parse_color_choice() {
        assert_eq!("NEVER".parse::<ColorChoice>(), Ok(ColorChoice::Never));
        assert_eq!("always".parse::<ColorChoice>(), Ok(ColorChoice::Always));
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_explicit_choice_ignores_environment() {
        assert!(resolve_with(ColorChoice::Always, &[("NO_COLOR", "1")], false));
        assert!(!resolve_with(ColorChoice::Never, &[("CLICOLOR_FORCE", "1")], true));
    }

    #[test]
    fn test_auto_environment_conventions() {
        assert!(!resolve_with(ColorChoice::Auto, &[("NO_COLOR", "")], true));
        assert!(!resolve_with(ColorChoice::Auto, &[("CLICOLOR", "0")], true));
        assert!(resolve_with(ColorChoice::Auto, &[("CLICOLOR_FORCE", "1")], false));
        assert!(!resolve_with(ColorChoice::Auto, &[("CLICOLOR_FORCE", "0")], false));
        assert!(!resolve_with(ColorChoice::Auto, &[("TERM", "dumb")], true));
        assert!(resolve_with(ColorChoice::Auto, &[], true));
    }

    #[test]
    fn test_markers() {
        let plain = OutputConfig { use_color: false };
        let fancy = OutputConfig { use_color: true };
        assert_eq!(plain.marker(Marker::Ok), "[OK]");
        assert_eq!(fancy.marker(Marker::Ok), "✅");
        assert_eq!(plain.marker(Marker::Failed), "[ERR]");
    }

    #[test]
    fn test_header_styling() {
        assert_eq!(
            OutputConfig { use_color: false }.header("Writing files"),
            "Writing files"
        );
        let styled = OutputConfig { use_color: true }.header("Writing files");
        assert!(styled.contains("Writing files"));
        assert!(styled.contains('\u{1b}'));
    }
}
