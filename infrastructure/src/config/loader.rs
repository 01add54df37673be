//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "leap-studio";
const PROJECT_FILES: [&str; 2] = ["leap.toml", ".leap.toml"];
const ENV_PREFIX: &str = "LEAP_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LEAP_` environment variables (`LEAP_MODEL__NAME=...`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./leap.toml` or `./.leap.toml`
    /// 4. Global: `<config dir>/leap-studio/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let project = Self::project_config_path_in(Path::new("."));
        Self::figment(
            Self::global_config_path().as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Layer the file sources over the defaults; missing files are skipped.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // An explicit path that does not exist is an error, not a silent skip
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_path_in(Path::new("."))
    }

    fn project_config_path_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Describe the config file locations being consulted, highest priority first
    pub fn config_sources(explicit: Option<&PathBuf>) -> Vec<(String, Option<PathBuf>, bool)> {
        let mut sources = Vec::new();
        if let Some(path) = explicit {
            sources.push(("Explicit".to_string(), Some(path.clone()), path.exists()));
        }
        let project = Self::project_config_path();
        let found = project.is_some();
        sources.push(("Project".to_string(), project, found));
        if let Some(path) = Self::global_config_path() {
            let found = path.exists();
            sources.push(("Global".to_string(), Some(path), found));
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leap_domain::OutputFormat;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert!(config.extraction.bracket_scan);
    }

    #[test]
    fn test_global_config_path_names_app_dir() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("leap-studio"));
        }
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "[model]\nname = \"gemini-global\"\ntimeout_seconds = 30\n",
        );
        let project = write(dir.path(), "leap.toml", "[model]\nname = \"gemini-project\"\n");
        let explicit = write(dir.path(), "explicit.toml", "[output]\nformat = \"json\"\n");

        let config: FileConfig =
            ConfigLoader::figment(Some(&global), Some(&project), Some(&explicit))
                .extract()
                .unwrap();

        assert_eq!(config.model.name, "gemini-project");
        assert_eq!(config.model.timeout_seconds, 30);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(config.extraction.bracket_scan);
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config: FileConfig = ConfigLoader::figment(Some(&missing), Some(&missing), None)
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&missing)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_project_file_discovery_prefers_plain_name() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::project_config_path_in(dir.path()).is_none());

        write(dir.path(), ".leap.toml", "");
        assert_eq!(
            ConfigLoader::project_config_path_in(dir.path()),
            Some(dir.path().join(".leap.toml"))
        );

        write(dir.path(), "leap.toml", "");
        assert_eq!(
            ConfigLoader::project_config_path_in(dir.path()),
            Some(dir.path().join("leap.toml"))
        );
    }
}
