use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::seed::DEFAULT_USER_NAME;

pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://source.unsplash.com/800x600/?medical,health,hospital";

#[derive(Debug, Clone)]
pub struct WellnestConfig {
    pub paths: WellnestPaths,
    pub default_user_name: String,
    pub ui: UiConfig,
}

impl WellnestConfig {
    pub fn from_env() -> Result<Self> {
        let paths = match env::var("WELLNEST_HOME") {
            Ok(raw) if !raw.trim().is_empty() => WellnestPaths::from_base_dir(raw.trim())?,
            _ => WellnestPaths::discover()?,
        };
        let default_user_name = env::var("WELLNEST_USER_NAME")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
        Ok(Self {
            paths,
            default_user_name,
            ui: UiConfig::from_env(),
        })
    }

    pub fn new(paths: WellnestPaths) -> Self {
        Self {
            paths,
            default_user_name: DEFAULT_USER_NAME.to_string(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    /// How long a reaction burst stays on screen.
    pub reaction_burst: Duration,
    /// After this the map widget is considered failed.
    pub map_load_timeout: Duration,
    /// Stand-in photo used when capture is triggered without a camera.
    pub placeholder_image: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            reaction_burst: Duration::from_millis(2000),
            map_load_timeout: Duration::from_millis(5000),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl UiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let millis = |key: &str| {
            env::var(key)
                .ok()
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };
        let placeholder_image = env::var("WELLNEST_PLACEHOLDER_IMAGE")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.placeholder_image);
        Self {
            reaction_burst: millis("WELLNEST_REACTION_BURST_MS").unwrap_or(defaults.reaction_burst),
            map_load_timeout: millis("WELLNEST_MAP_TIMEOUT_MS").unwrap_or(defaults.map_load_timeout),
            placeholder_image,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct WellnestPaths {
    pub base: PathBuf,
    pub data_dir: PathBuf,
    pub prefs_path: PathBuf,
    pub cache_dir: PathBuf,
    pub image_cache_dir: PathBuf,
}

impl WellnestPaths {
    pub fn discover() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("unable to resolve home directory"))?;
        Self::from_base_dir(home.join(".wellnest"))
    }

    pub fn from_base_dir<P: AsRef<Path>>(base: P) -> Result<Self> {
        let base = base.as_ref().to_path_buf();
        if base.as_os_str().is_empty() {
            return Err(anyhow!("base directory must not be empty"));
        }
        let data_dir = base.join("data");
        let prefs_path = data_dir.join("prefs.json");
        let cache_dir = base.join("cache");
        let image_cache_dir = cache_dir.join("images");

        Ok(Self {
            base,
            data_dir,
            prefs_path,
            cache_dir,
            image_cache_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_derived_from_base() {
        let paths = WellnestPaths::from_base_dir("/tmp/wellnest-test").expect("paths");
        assert_eq!(paths.prefs_path, PathBuf::from("/tmp/wellnest-test/data/prefs.json"));
        assert_eq!(paths.image_cache_dir, PathBuf::from("/tmp/wellnest-test/cache/images"));
    }

    #[test]
    fn empty_base_is_rejected() {
        assert!(WellnestPaths::from_base_dir("").is_err());
    }

    #[test]
    fn ui_defaults_match_screen_timings() {
        let ui = UiConfig::default();
        assert_eq!(ui.reaction_burst, Duration::from_secs(2));
        assert_eq!(ui.map_load_timeout, Duration::from_secs(5));
    }
}
