use crate::controller::SharedEditorState;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const RC_FILE_NAME: &str = ".combofxrc";
pub const DEFAULT_OUTPUT: &str = "combo_fx.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct RcConfig {
    pub output_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub show_preview: bool,
    pub wrap_cursor: bool,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            catalog_path: None,
            show_preview: true,
            wrap_cursor: true,
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .combofxrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.combofxrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file
    pub fn load_config() -> RcConfig {
        let mut config = RcConfig::default();

        if let Some(rc_path) = Self::get_rc_path() {
            match fs::read_to_string(&rc_path) {
                Ok(content) => {
                    tracing::debug!("loading {}", rc_path.display());
                    Self::parse_config_content(&content, &mut config);
                }
                Err(e) => {
                    tracing::warn!("could not read {}: {e}", rc_path.display());
                }
            }
        }

        config
    }

    /// Parse the content of an RC file
    pub fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        if let Some(stripped) = line.strip_prefix("set ") {
            let setting = stripped.trim();
            match setting {
                "preview" => config.show_preview = true,
                "nopreview" => config.show_preview = false,
                "wrap" => config.wrap_cursor = true,
                "nowrap" => config.wrap_cursor = false,
                _ => {
                    if let Some((key, value)) = setting.split_once('=') {
                        Self::apply_key_value(key.trim(), value.trim(), config);
                    }
                }
            }
        } else if let Some((key, value)) = line.split_once('=') {
            Self::apply_key_value(key.trim(), value.trim(), config);
        }
    }

    fn apply_key_value(key: &str, value: &str, config: &mut RcConfig) {
        match key {
            "output" | "output_path" => {
                if !value.is_empty() {
                    config.output_path = PathBuf::from(value);
                }
            }
            "catalog" | "catalog_path" => {
                if !value.is_empty() {
                    config.catalog_path = Some(PathBuf::from(value));
                }
            }
            "preview" | "show_preview" => {
                if let Some(flag) = parse_flag(value) {
                    config.show_preview = flag;
                }
            }
            "wrap" | "wrap_cursor" => {
                if let Some(flag) = parse_flag(value) {
                    config.wrap_cursor = flag;
                }
            }
            _ => {} // Unknown setting, ignore
        }
    }

    /// Push the settings that live in the running editor
    pub fn apply_config_to_shared_state(shared_state: &mut SharedEditorState, config: &RcConfig) {
        shared_state.view.set_show_preview(config.show_preview);
        shared_state.wrap_cursor = config.wrap_cursor;
        shared_state.output_path = config.output_path.clone();
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# combo-fx configuration file (.combofxrc)
# Lines starting with # or " are comments

# Display settings
set preview            # Show the export preview pane (or set nopreview)
set wrap               # Cursor wraps around pool lists (or set nowrap)

# Files
output=combo_fx.toml   # Where :w writes when no path is given
# catalog=fighters.toml

# Alternative key=value syntax:
# show_preview=false
# wrap_cursor=true
"#
        .to_string()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vim_style_config() {
        let mut config = RcConfig::default();
        let content = r#"
            set nopreview
            set nowrap
            set output=out/fx.toml
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert!(!config.show_preview);
        assert!(!config.wrap_cursor);
        assert_eq!(config.output_path, PathBuf::from("out/fx.toml"));
    }

    #[test]
    fn test_parse_key_value_config() {
        let mut config = RcConfig::default();
        let content = r#"
            output_path=mine.toml
            catalog=roster.toml
            show_preview=no
            wrap=0
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config.output_path, PathBuf::from("mine.toml"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("roster.toml")));
        assert!(!config.show_preview);
        assert!(!config.wrap_cursor);
    }

    #[test]
    fn test_parse_mixed_config_with_comments() {
        let mut config = RcConfig::default();
        let content = r#"
            # This is a comment
            set nopreview          # hide the preview
            " This is also a comment

            # set nowrap           # This is commented out
            preview=yes            # turned back on
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert!(config.show_preview);
        assert!(config.wrap_cursor);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let mut config = RcConfig::default();
        let content = r#"
            preview=maybe
            output=
            unknown_setting=value
            set bogus
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config, RcConfig::default());
    }

    #[test]
    fn test_sample_rc_parses_to_defaults() {
        let mut config = RcConfig::default();
        RcLoader::parse_config_content(&RcLoader::generate_sample_rc(), &mut config);
        assert_eq!(config, RcConfig::default());
    }
}
