//! Named, string-valued settings.
//!
//! Settings can be applied one at a time with [`Configuration::set_setting`],
//! or in bulk from TOML or the environment with [`SettingsFile`]. Names are
//! accepted in either naming convention (`tag_syntax` or `tagSyntax`).

use crate::builder::ConfigurationBuilder;
use crate::cache::cache_storage_from_setting;
use crate::configuration::{
    Configuration, AUTO_ESCAPING_POLICY_KEY, CACHE_STORAGE_KEY, INCOMPATIBLE_IMPROVEMENTS_KEY,
    NAMING_CONVENTION_KEY, OUTPUT_FORMAT_KEY, SETTING_NAMES, TAG_SYNTAX_KEY,
    TEMPLATE_EXCEPTION_HANDLER_KEY,
};
use crate::error::{EngineResult, SettingError};
use crate::handler::handler_by_name;
use crate::installation::EngineInstallation;
use crate::internal;
use serde::Deserialize;
use std::collections::BTreeMap;
use stencil_core::{
    builtin_output_format, AutoEscapingPolicy, NamingConvention, SettingEnum, TagSyntax, Version,
    BUILTIN_OUTPUT_FORMAT_NAMES,
};

/// Prefix of the environment variables read by [`SettingsFile::from_env`].
pub const ENV_PREFIX: &str = "STENCIL_";

/// Value that resets handler or cache storage to its version-dependent default.
pub const DEFAULT_VALUE: &str = "default";

/// Map a setting name in either convention to its legacy spelling.
fn canonical_setting_name(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    SETTING_NAMES.iter().copied().find(|legacy| {
        *legacy == trimmed || crate::configuration::to_camel_case(legacy) == trimmed
    })
}

/// Key under which a [`SettingsFile`] stores `name`: the legacy spelling
/// for recognized settings, the trimmed name otherwise.
fn entry_key(name: &str) -> String {
    canonical_setting_name(name)
        .map(str::to_string)
        .unwrap_or_else(|| name.trim().to_string())
}

fn unknown_setting(configuration: &Configuration, name: &str) -> SettingError {
    let camel_case = NamingConvention::detect(name) == NamingConvention::CamelCase;
    SettingError::UnknownSetting {
        name: name.to_string(),
        known: internal::setting_names(configuration, camel_case)
            .into_iter()
            .collect(),
    }
}

impl Configuration {
    /// Apply one setting given as text.
    ///
    /// Enumerated values accept their symbolic name in any case/underscore
    /// spelling, or their integer code. A rejected value leaves the
    /// configuration unchanged.
    pub fn set_setting(
        &mut self,
        installation: &EngineInstallation,
        name: &str,
        value: &str,
    ) -> EngineResult<()> {
        let key = canonical_setting_name(name).ok_or_else(|| unknown_setting(self, name))?;
        let value = value.trim();

        match key {
            INCOMPATIBLE_IMPROVEMENTS_KEY => {
                let version: Version = value.parse()?;
                self.set_incompatible_improvements(installation, version)?;
            }
            AUTO_ESCAPING_POLICY_KEY => {
                self.set_auto_escaping_policy(AutoEscapingPolicy::parse_setting_value(value)?);
            }
            NAMING_CONVENTION_KEY => {
                self.set_naming_convention(NamingConvention::parse_setting_value(value)?);
            }
            TAG_SYNTAX_KEY => {
                self.set_tag_syntax(TagSyntax::parse_setting_value(value)?);
            }
            OUTPUT_FORMAT_KEY => {
                let format =
                    builtin_output_format(value).ok_or_else(|| SettingError::InvalidValue {
                        name: name.to_string(),
                        value: value.to_string(),
                        reason: format!(
                            "unknown output format; built-in formats are {}",
                            BUILTIN_OUTPUT_FORMAT_NAMES.join(", ")
                        ),
                    })?;
                self.set_output_format(format);
            }
            TEMPLATE_EXCEPTION_HANDLER_KEY => {
                if value.eq_ignore_ascii_case(DEFAULT_VALUE) {
                    self.unset_template_exception_handler();
                } else {
                    let handler =
                        handler_by_name(value).ok_or_else(|| SettingError::InvalidValue {
                            name: name.to_string(),
                            value: value.to_string(),
                            reason: "expected rethrow, debug, html_debug, ignore or default"
                                .to_string(),
                        })?;
                    self.set_template_exception_handler(handler);
                }
            }
            CACHE_STORAGE_KEY => {
                if value.eq_ignore_ascii_case(DEFAULT_VALUE) {
                    self.unset_cache_storage();
                } else {
                    let storage = cache_storage_from_setting(value).map_err(|reason| {
                        SettingError::InvalidValue {
                            name: name.to_string(),
                            value: value.to_string(),
                            reason,
                        }
                    })?;
                    self.set_cache_storage(storage);
                }
            }
            _ => return Err(unknown_setting(self, name).into()),
        }

        tracing::debug!(setting = key, value, "Applied setting");
        Ok(())
    }
}

// ============================================================================
// SETTINGS FILE
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawSettingsFile {
    #[serde(default)]
    settings: BTreeMap<String, toml::Value>,
}

/// A set of textual settings, loaded from TOML or the environment.
///
/// ```toml
/// [settings]
/// incompatible_improvements = "3.0.0"
/// tagSyntax = "square_bracket"
/// auto_escaping_policy = 22
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFile {
    entries: BTreeMap<String, String>,
}

impl SettingsFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `[settings]` table of a TOML document.
    ///
    /// Strings are taken as-is; integers and booleans are stringified.
    pub fn from_toml_str(input: &str) -> Result<Self, SettingError> {
        let raw: RawSettingsFile = toml::from_str(input).map_err(|e| SettingError::Parse {
            reason: e.to_string(),
        })?;

        let mut entries = BTreeMap::new();
        let mut spellings: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in raw.settings {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(SettingError::InvalidValue {
                        name,
                        value: other.to_string(),
                        reason: "setting values must be strings, integers or booleans"
                            .to_string(),
                    })
                }
            };
            let key = entry_key(&name);
            if let Some(first) = spellings.get(&key) {
                return Err(SettingError::InvalidValue {
                    reason: format!("setting is already given as {:?}", first),
                    name,
                    value: text,
                });
            }
            spellings.insert(key.clone(), name);
            entries.insert(key, text);
        }
        Ok(Self { entries })
    }

    /// Read `STENCIL_<SETTING_NAME>` variables, e.g. `STENCIL_TAG_SYNTAX`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SettingsFile::from_env`], with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let entries = SETTING_NAMES
            .iter()
            .filter_map(|name| {
                let var = format!("{}{}", ENV_PREFIX, name.to_ascii_uppercase());
                lookup(&var).map(|value| ((*name).to_string(), value))
            })
            .collect();
        Self { entries }
    }

    /// Set `name` to `value`, replacing any earlier value of the same
    /// setting under either spelling.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(entry_key(&name.into()), value.into());
        self
    }

    /// Value of `name`, looked up under either spelling.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&entry_key(name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }


    /// Apply every entry to `configuration`, all or nothing.
    ///
    /// `incompatible_improvements` goes first so that explicit handler or
    /// cache settings are not overwritten by re-derived defaults.
    pub fn apply(
        &self,
        configuration: &mut Configuration,
        installation: &EngineInstallation,
    ) -> EngineResult<()> {
        let mut staged = configuration.clone();

        if let Some(value) = self.get(INCOMPATIBLE_IMPROVEMENTS_KEY) {
            staged.set_setting(installation, INCOMPATIBLE_IMPROVEMENTS_KEY, value)?;
        }
        for (name, value) in &self.entries {
            if name == INCOMPATIBLE_IMPROVEMENTS_KEY {
                continue;
            }
            staged.set_setting(installation, name, value)?;
        }

        *configuration = staged;
        Ok(())
    }

    /// Build a new configuration from these settings.
    ///
    /// Fails with a missing-argument error if `incompatible_improvements`
    /// is absent.
    pub fn to_configuration(&self, installation: &EngineInstallation) -> EngineResult<Configuration> {
        let version = self
            .get(INCOMPATIBLE_IMPROVEMENTS_KEY)
            .map(|value| value.trim().parse::<Version>())
            .transpose()?;
        let mut builder = ConfigurationBuilder::default();
        if let Some(version) = version {
            builder = builder.incompatible_improvements(version);
        }
        let mut configuration = builder.build(installation)?;
        self.apply(&mut configuration, installation)?;
        Ok(configuration)
    }
}

// =============================================================================
// TESTS
// =============================================================================
