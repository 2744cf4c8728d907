//! Locating and loading `config.toml`.
//!
//! A config file has two optional sections, both mapped onto
//! [`AppConfig`]:
//!
//! ```toml
//! [layout]
//! column_spacing = 40.0
//! item_height = 20.0
//! item_spacing = 5.0
//!
//! [style]
//! color_key = "branch"   # or "lane"
//! saturation = 70.0
//! lightness = 55.0
//! ```
//!
//! Unknown keys are rejected, and distances and color percentages are checked
//! on load, so a bad value is reported against the file that holds it.

use std::{
    fs, io,
    ops::Range,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use lanegraph::{LanegraphError, config::AppConfig};

const CONFIG_FILE: &str = "config.toml";

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file is missing or unreadable.
    #[error("cannot read config file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML, or has keys outside `[layout]`/`[style]`.
    #[error("malformed config file `{}`: {message}", path.display())]
    Syntax {
        path: PathBuf,
        src: String,
        message: String,
        span: Option<Range<usize>>,
    },

    /// A section parsed but holds an unusable value.
    #[error("invalid [{section}] settings in `{}`: {message}", path.display())]
    Invalid {
        path: PathBuf,
        section: &'static str,
        message: String,
    },
}

/// Load the configuration for one run.
///
/// An explicit path must exist. Without one, the first existing file of
/// [`search_paths`] is used, and defaults apply when there is none.
///
/// # Errors
///
/// Returns [`ConfigError`] if the chosen file cannot be read, parsed or
/// validated.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => path,
            None => {
                debug!("No configuration file found, using default configuration");
                return Ok(AppConfig::default());
            }
        },
    };

    info!(path = path.display().to_string(); "Loading configuration");
    read_config(&path)
}

/// Config locations tried when none is given: `lanegraph/config.toml` in the
/// working directory, then the platform config directory.
fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("lanegraph").join(CONFIG_FILE)];
    match ProjectDirs::from("com", "lanegraph", "lanegraph") {
        Some(dirs) => paths.push(dirs.config_dir().join(CONFIG_FILE)),
        None => debug!("Could not determine platform-specific config directory"),
    }
    paths
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: AppConfig = match toml::from_str(&src) {
        Ok(config) => config,
        Err(err) => {
            return Err(ConfigError::Syntax {
                path: path.to_path_buf(),
                message: err.message().to_string(),
                span: err.span(),
                src,
            });
        }
    };

    check_values(&config).map_err(|(section, message)| ConfigError::Invalid {
        path: path.to_path_buf(),
        section,
        message,
    })?;

    debug!(
        color_key:? = config.style().color_key(),
        column_spacing = config.layout().spacing().column_spacing();
        "Configuration loaded"
    );
    Ok(config)
}

/// Returns the offending section and a message for the first unusable value.
fn check_values(config: &AppConfig) -> Result<(), (&'static str, String)> {
    config
        .layout()
        .spacing()
        .validate()
        .map_err(|err| match err {
            LanegraphError::Layout(message) => ("layout", message),
            other => ("layout", other.to_string()),
        })?;
    config
        .style()
        .color_cache()
        .map_err(|message| ("style", message))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use lanegraph::config::ColorKey;
    use tempfile::tempdir;

    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let (_dir, path) = write_config("[style]\ncolor_key = \"lane\"\n\n[layout]\nitem_height = 12.0\n");

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.style().color_key(), ColorKey::Lane);
        assert_eq!(config.layout().spacing().item_height(), 12.0);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();

        match err {
            ConfigError::Read { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("Expected Read error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_config_keeps_location() {
        let (_dir, path) = write_config("[layout]\ncolumn_spacing = \n");

        let err = load_config(Some(&path)).unwrap_err();

        match err {
            ConfigError::Syntax { src, span, .. } => {
                assert!(src.starts_with("[layout]"));
                let span = span.expect("TOML errors carry a span");
                assert!(span.start >= "[layout]\n".len());
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_misspelled_key_is_rejected() {
        let (_dir, path) = write_config("[style]\ncolour_key = \"lane\"\n");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Syntax { .. }));
        assert!(err.to_string().contains("colour_key"));
    }

    #[test]
    fn test_out_of_range_values_name_their_section() {
        let (_dir, path) = write_config("[layout]\ncolumn_spacing = -4.0\n");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "layout", .. }));
        assert!(err.to_string().contains("column_spacing"));

        let (_dir, path) = write_config("[style]\nlightness = 140.0\n");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "style", .. }));
        assert!(err.to_string().contains("lightness"));
    }

    #[test]
    fn test_search_starts_in_working_directory() {
        let paths = search_paths();
        assert_eq!(paths[0], Path::new("lanegraph").join("config.toml"));
    }
}
