use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::catalog::CatalogMode;

pub const CONFIG_FILE_NAME: &str = "auto-i18n.config.json";

/// How components obtain the translation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CallingConvention {
    /// `const { t } = useTranslation();` inside components and hooks.
    Hook,
    /// `import { t } from "..."` and call it directly.
    #[default]
    BareFunction,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_language", alias = "keyLanguage")]
    pub source_language: String,
    /// Unset means the legacy `useHook` flag decides, else bare function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calling_convention: Option<CallingConvention>,
    #[serde(default, rename = "useHook", skip_serializing)]
    pub legacy_use_hook: Option<bool>,
    #[serde(default)]
    pub aggressive: bool,
    #[serde(default = "default_module_source", alias = "importModuleName")]
    pub translation_module_source: String,
    #[serde(default)]
    pub extract_only: bool,
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    #[serde(default = "default_ext")]
    pub ext: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default)]
    pub output_json_mode: CatalogMode,
    #[serde(default)]
    pub comment: bool,
    #[serde(default)]
    pub default_translation: String,
    #[serde(default)]
    pub dry: bool,
}

fn default_source_language() -> String {
    "zh".to_string()
}

fn default_module_source() -> String {
    "react-i18next".to_string()
}

fn default_include() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_exclude() -> Vec<String> {
    ["node_modules", "dist", "build", "test"]
        .map(String::from)
        .to_vec()
}

fn default_ext() -> Vec<String> {
    ["js", "jsx", "ts", "tsx"].map(String::from).to_vec()
}

fn default_output_dir() -> String {
    "public/locales".to_string()
}

fn default_output_file_name() -> String {
    "translation.json".to_string()
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            calling_convention: Some(CallingConvention::default()),
            legacy_use_hook: None,
            aggressive: false,
            translation_module_source: default_module_source(),
            extract_only: false,
            include: default_include(),
            exclude: default_exclude(),
            ext: default_ext(),
            output_dir: default_output_dir(),
            output_file_name: default_output_file_name(),
            locales: default_locales(),
            output_json_mode: CatalogMode::default(),
            comment: false,
            default_translation: String::new(),
            dry: false,
        }
    }
}

impl Config {
    /// `callingConvention` wins over the legacy `useHook` flag.
    pub fn calling_convention(&self) -> CallingConvention {
        match (self.calling_convention, self.legacy_use_hook) {
            (Some(convention), _) => convention,
            (None, Some(true)) => CallingConvention::Hook,
            (None, _) => CallingConvention::BareFunction,
        }
    }

    pub fn use_hook(&self) -> bool {
        self.calling_convention() == CallingConvention::Hook
    }

    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns, an empty module source and an empty
    /// extension list.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.exclude {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'exclude': \"{}\"", pattern)
                })?;
            }
        }

        // Patterns without wildcards are literal paths, so `app/[locale]`
        // is valid without escaping.
        for pattern in &self.include {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'include': \"{}\"", pattern)
                })?;
            }
        }

        if self.translation_module_source.trim().is_empty() {
            bail!("'translationModuleSource' must not be empty");
        }
        if self.ext.is_empty() {
            bail!("'ext' must list at least one file extension");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory that relative paths in the config are resolved against:
    /// the config file's directory, or the start directory for defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load an explicit config file.
pub fn load_config_file(path: &Path) -> Result<ConfigLoadResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;

    let base_dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok(ConfigLoadResult {
        config,
        base_dir,
        from_file: true,
    })
}

/// Search upwards from `start_dir` and load the first config file found,
/// falling back to defaults.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => load_config_file(&path),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
