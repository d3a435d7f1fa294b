use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;
use typemux_schema::naming;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid typemux config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

///
/// ConflictLevel
///
/// How loudly a dropped duplicate claim is reported. Duplicate claims are
/// never an error; the first claiming group always wins.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictLevel {
    Silent,
    #[default]
    Debug,
    Warn,
}

///
/// BuildConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Module path the generated files are mounted under.
    pub namespace: String,

    /// Type name of the composite dispatcher.
    pub dispatcher: String,

    pub conflicts: ConflictLevel,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            namespace: "crate::internal".to_string(),
            dispatcher: "Dispatcher".to_string(),
            conflicts: ConflictLevel::default(),
        }
    }
}

impl BuildConfig {
    pub const FILE_NAME: &'static str = "typemux.toml";

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&source)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        naming::validate_path(&self.namespace).map_err(|reason| ConfigError::Invalid {
            key: "namespace",
            reason,
        })?;
        naming::validate_ident(&self.dispatcher).map_err(|reason| ConfigError::Invalid {
            key: "dispatcher",
            reason,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = BuildConfig::from_toml("").expect("empty config is valid");

        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.namespace, "crate::internal");
        assert_eq!(config.conflicts, ConflictLevel::Debug);
    }

    #[test]
    fn reads_every_key() {
        let config = BuildConfig::from_toml(
            r#"
            namespace = "crate::generated"
            dispatcher = "Hydrators"
            conflicts = "warn"
            "#,
        )
        .expect("config is valid");

        assert_eq!(config.namespace, "crate::generated");
        assert_eq!(config.dispatcher, "Hydrators");
        assert_eq!(config.conflicts, ConflictLevel::Warn);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            BuildConfig::from_toml("namespaces = \"x\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            BuildConfig::from_toml("dispatcher = \"two words\""),
            Err(ConfigError::Invalid { key: "dispatcher", .. })
        ));
        assert!(matches!(
            BuildConfig::from_toml("namespace = \"crate::\""),
            Err(ConfigError::Invalid { key: "namespace", .. })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = BuildConfig::load_or_default(dir.path().join(BuildConfig::FILE_NAME))
            .expect("missing config is fine");
        assert_eq!(config, BuildConfig::default());

        let path = dir.path().join(BuildConfig::FILE_NAME);
        let mut file = fs::File::create(&path).expect("create config");
        file.write_all(b"conflicts = \"silent\"").expect("write config");

        let config = BuildConfig::load_or_default(&path).expect("config loads");
        assert_eq!(config.conflicts, ConflictLevel::Silent);
    }
}
