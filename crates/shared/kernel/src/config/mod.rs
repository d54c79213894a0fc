use config::{Config, Environment, File, FileFormat, Map, Value, ValueKind};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

const DEFAULT_CONFIG_FILE: &str = "genu";
const ENV_PREFIX: &str = "GENU";
const ENV_SEPARATOR: &str = "__";

pub use config::FileFormat as Format;

/// Custom error type for config loading.
#[genu_derive::genu_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
    #[error("Invalid override '{raw}'{}: expected key=value", format_context(.context))]
    Override { raw: String, context: Option<Cow<'static, str>> },
}

/// A single `key=value` context override, applied on top of every other source.
///
/// The value is read as JSON when it parses (`true`, `42`, `["a","b"]`), as a plain string
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextOverride {
    pub key: String,
    pub value: serde_json::Value,
}

impl FromStr for ContextOverride {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(ConfigError::Override { raw: raw.to_owned(), context: None });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Override { raw: raw.to_owned(), context: None });
        }
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_owned()));
        Ok(Self { key: key.to_owned(), value })
    }
}

enum BaseSource {
    Path(PathBuf),
    Inline(String, FileFormat),
}

/// Layered configuration loader.
///
/// Sources are applied in this order, later ones winning:
/// 1. **Base**: a file (format from its extension, default `genu`) or an inline string.
/// 2. **Environment**: variables prefixed with `GENU__`; `GENU__MODEL_REGION` maps to
///    `modelRegion`.
/// 3. **Overrides**: explicit [`ContextOverride`] values.
pub struct ConfigLoader {
    base: BaseSource,
    required: bool,
    env: Option<Map<String, String>>,
    overrides: Vec<ContextOverride>,
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let base = match &self.base {
            BaseSource::Path(path) => path.display().to_string(),
            BaseSource::Inline(..) => "<inline>".to_owned(),
        };
        f.debug_struct("ConfigLoader")
            .field("base", &base)
            .field("required", &self.required)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            base: BaseSource::Path(PathBuf::from(DEFAULT_CONFIG_FILE)),
            required: true,
            env: None,
            overrides: Vec::new(),
        }
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.base = BaseSource::Path(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn inline(mut self, content: impl Into<String>, format: FileFormat) -> Self {
        self.base = BaseSource::Inline(content.into(), format);
        self
    }

    /// Whether a missing base file is an error (default `true`).
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Reads environment overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn env_source(mut self, vars: Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    #[must_use]
    pub fn overrides(mut self, overrides: impl IntoIterator<Item = ContextOverride>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Builds the layered configuration and deserializes it into `T`.
    ///
    /// # Errors
    /// * [`ConfigError::Config`] if the base file is required and missing, a source is
    ///   malformed, or the merged value does not match `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let mut builder = Config::builder();

        builder = match &self.base {
            BaseSource::Path(path) => {
                info!("Loading config from {}", path.display());
                builder.add_source(File::from(path.as_path()).required(self.required))
            },
            BaseSource::Inline(content, format) => {
                builder.add_source(File::from_str(content, *format))
            },
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .convert_case(config::Case::Camel)
                .source(self.env),
        );

        for ContextOverride { key, value } in self.overrides {
            debug!(key = %key, "Applying context override");
            builder = builder
                .set_override(key.as_str(), to_config_value(value))
                .context(format!("Override for '{key}'"))?;
        }

        let config = builder
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")?;

        Ok(config)
    }
}

fn to_config_value(value: serde_json::Value) -> Value {
    let kind = match value {
        serde_json::Value::Null => ValueKind::Nil,
        serde_json::Value::Bool(b) => ValueKind::Boolean(b),
        serde_json::Value::Number(n) => n.as_i64().map_or_else(
            || ValueKind::Float(n.as_f64().unwrap_or_default()),
            ValueKind::I64,
        ),
        serde_json::Value::String(s) => ValueKind::String(s),
        serde_json::Value::Array(items) => {
            ValueKind::Array(items.into_iter().map(to_config_value).collect())
        },
        serde_json::Value::Object(map) => ValueKind::Table(
            map.into_iter().map(|(k, v)| (k, to_config_value(v))).collect(),
        ),
    };
    Value::new(None, kind)
}

/// Loads `T` from a required file plus `GENU__` environment overrides.
///
/// # Errors
/// See [`ConfigLoader::load`].
///
/// # Example
/// ```rust
/// use genu_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Input {
///     region: String,
/// }
///
/// let input: Input = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.path(path),
        None => loader,
    }
    .load()
}

/// Loads `T` from an inline document (no file access), still honoring `GENU__` variables.
///
/// # Errors
/// See [`ConfigLoader::load`].
pub fn load_config_from_str<T>(content: &str, format: FileFormat) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    ConfigLoader::new().inline(content, format).load()
}
