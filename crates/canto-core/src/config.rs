//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults, `config.toml`,
//! `config.<env>.toml` and `APP_*` env vars (`__` separates nested keys, so
//! `APP_DATA__CHANTS_DIR` sets `data.chants_dir`). Provides helpers to expand
//! `~` and `${VAR}` and to resolve relative paths against a known base directory.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::repository::DEFAULT_REPORT_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding `Canto_1.txt` .. `Canto_34.txt`.
    pub chants_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings { chants_dir: "chants".to_string() },
            report: ReportSettings { path: DEFAULT_REPORT_PATH.to_string() },
        }
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        Self::load_from_dir(Path::new("."), env_name)
    }

    /// Like [`Config::load_for_env`], but looks for the TOML files in `dir`.
    /// Relative paths in the settings are then taken relative to `dir`.
    pub fn load_from_dir(dir: &Path, env_name: &str) -> Result<Self> {
        let config = Self { figment: Self::base_figment(dir, env_name), base_dir: dir.to_path_buf() };
        config.validate()?;
        Ok(config)
    }

    fn base_figment(dir: &Path, env_name: &str) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment.merge(Env::prefixed("APP_").split("__"))
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `data.chants_dir`, expanded and resolved against the config directory.
    pub fn chants_dir(&self) -> Result<PathBuf> {
        Ok(resolve_with_base(&self.base_dir, self.settings()?.data.chants_dir))
    }

    /// `report.path`, expanded and resolved against the config directory.
    pub fn report_path(&self) -> Result<PathBuf> {
        Ok(resolve_with_base(&self.base_dir, self.settings()?.report.path))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        let settings = self.settings()?;
        if settings.data.chants_dir.trim().is_empty() {
            return Err(Error::InvalidConfig("data.chants_dir must not be empty".to_string()));
        }
        if settings.report.path.trim().is_empty() {
            return Err(Error::InvalidConfig("report.path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Expand `~` and `$VAR`/`${VAR}` in a user-supplied path. The result is not
/// canonicalized; unknown variables leave the input untouched.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Expand `p`, then anchor it at `base` unless it is already absolute.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
