/*!
Mode enum for the dispatcher.

Variants:
  delegate (print a static file through an external command)
  spaced   (in-process JSON, `", "` / `": "` separators)
  compact  (in-process JSON, `","` / `":"` separators)

Helpers:
  - variants()
  - from_str_ci()
  - keyword()
  - separators()
*/

use std::fmt;

use serde::Deserialize;

use super::format::Separators;

/// How the dispatcher produces its output.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Copy `current_weather*.json` to stdout via an external command
    Delegate,
    /// Build JSON in-process with spaced separators
    #[default]
    Spaced,
    /// Build JSON in-process with compact separators
    Compact,
}

impl Mode {
    /// Return a static slice of all variants (order matters for help display).
    pub const fn variants() -> &'static [Mode] {
        &[Mode::Delegate, Mode::Spaced, Mode::Compact]
    }

    /// Case-insensitive parser not relying on `clap`, for profile files.
    pub fn from_str_ci(s: &str) -> Option<Self> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "delegate" => Some(Mode::Delegate),
            "spaced" => Some(Mode::Spaced),
            "compact" => Some(Mode::Compact),
            _ => None,
        }
    }

    /// The single argument that selects the function specification.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Mode::Delegate | Mode::Spaced => "specification",
            Mode::Compact => "spec",
        }
    }

    /// JSON separators for in-process modes; `None` when delegating.
    pub const fn separators(&self) -> Option<Separators> {
        match self {
            Mode::Delegate => None,
            Mode::Spaced => Some(Separators::Spaced),
            Mode::Compact => Some(Separators::Compact),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Delegate => "delegate",
            Mode::Spaced => "spaced",
            Mode::Compact => "compact",
        };
        f.write_str(s)
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Mode::from_str_ci(&raw).ok_or_else(|| {
            let names: Vec<String> = Mode::variants().iter().map(Mode::to_string).collect();
            serde::de::Error::custom(format!(
                "unknown mode '{}' (expected one of: {})",
                raw.trim(),
                names.join(", ")
            ))
        })
    }
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::Mode;
    use crate::cmd::format::Separators;

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(Mode::from_str_ci("DELEGATE"), Some(Mode::Delegate));
        assert_eq!(Mode::from_str_ci(" Spaced "), Some(Mode::Spaced));
        assert_eq!(Mode::from_str_ci("compact"), Some(Mode::Compact));
        assert_eq!(Mode::from_str_ci("pretty"), None);
    }

    #[test]
    fn keywords_per_mode() {
        assert_eq!(Mode::Delegate.keyword(), "specification");
        assert_eq!(Mode::Spaced.keyword(), "specification");
        assert_eq!(Mode::Compact.keyword(), "spec");
    }

    #[test]
    fn separators_per_mode() {
        assert_eq!(Mode::Delegate.separators(), None);
        assert_eq!(Mode::Spaced.separators(), Some(Separators::Spaced));
        assert_eq!(Mode::Compact.separators(), Some(Separators::Compact));
    }

    #[test]
    fn default_is_spaced() {
        assert_eq!(Mode::default(), Mode::Spaced);
    }

    #[test]
    fn deserialize_reports_unknown_mode() {
        let ok: Mode = serde_yaml::from_str("Compact").unwrap();
        assert_eq!(ok, Mode::Compact);
        let err = serde_yaml::from_str::<Mode>("pretty").unwrap_err();
        assert!(err.to_string().contains("unknown mode 'pretty'"));
    }

    #[test]
    fn display_output() {
        assert_eq!(Mode::Delegate.to_string(), "delegate");
        assert_eq!(Mode::Compact.to_string(), "compact");
    }
}
