/*!
`profile.rs`

Optional configuration file for the dispatcher (`--config PATH`).

Format is chosen by extension: `.yaml` / `.yml` -> YAML, anything else ->
JSON. Every key is optional; unknown keys are rejected.

```yaml
mode: compact
keyword: spec
weather_file: current_weather.json
specification_file: current_weather_specification.json
delegate: cat
```

Command-line flags override profile entries, which override defaults.
*/

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::mode::Mode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub mode: Option<Mode>,
    pub keyword: Option<String>,
    pub weather_file: Option<PathBuf>,
    pub specification_file: Option<PathBuf>,
    pub delegate: Option<String>,
}

/// Read and parse a profile file.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile: {}", path.display()))?;
    parse_profile(&raw, is_yaml(path))
        .with_context(|| format!("invalid profile: {}", path.display()))
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

fn parse_profile(raw: &str, yaml: bool) -> Result<Profile> {
    // An empty YAML document is a valid "no overrides" profile.
    if yaml && raw.trim().is_empty() {
        return Ok(Profile::default());
    }
    let profile = if yaml {
        serde_yaml::from_str(raw).context("failed to parse YAML profile")?
    } else {
        serde_json::from_str(raw).context("failed to parse JSON profile")?
    };
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn yaml_profile_full() {
        let file = write_temp(
            ".yaml",
            "mode: delegate\nkeyword: describe\nweather_file: /data/w.json\nspecification_file: /data/s.json\ndelegate: head -c 100\n",
        );
        let profile = load_profile(file.path()).unwrap();
        assert_eq!(
            profile,
            Profile {
                mode: Some(Mode::Delegate),
                keyword: Some("describe".into()),
                weather_file: Some(PathBuf::from("/data/w.json")),
                specification_file: Some(PathBuf::from("/data/s.json")),
                delegate: Some("head -c 100".into()),
            }
        );
    }

    #[test]
    fn json_profile_partial() {
        let file = write_temp(".json", r#"{ "mode": "COMPACT" }"#);
        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.mode, Some(Mode::Compact));
        assert_eq!(profile.keyword, None);
    }

    #[test]
    fn empty_yaml_is_default() {
        let file = write_temp(".yml", "");
        assert_eq!(load_profile(file.path()).unwrap(), Profile::default());
    }

    #[test]
    fn unknown_mode_rejected() {
        let file = write_temp(".yaml", "mode: pretty\n");
        let err = load_profile(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown mode"));
    }

    #[test]
    fn unknown_key_rejected() {
        let file = write_temp(".json", r#"{ "colour": "blue" }"#);
        assert!(load_profile(file.path()).is_err());
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_profile(Path::new("/nonexistent/profile.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/profile.yaml"));
    }
}
