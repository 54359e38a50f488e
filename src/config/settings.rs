use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::codec::{CodecConfig, CodecKind};
use crate::crypto::Argon2Params;
use crate::errors::{Result, SecuraError};
use crate::remote::{HttpRemote, JsonFileMetadata, MetadataRemote, NoRemote, RemoteStore};

/// Project-level configuration, loaded from `.secura.toml`.
///
/// Every field has a default so Secura works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) for local vault data.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// User to act as when `--user` is not given.  `None` means anonymous.
    #[serde(default)]
    pub default_user: Option<String>,

    /// Codec for blobs at rest and in the remote bag.
    #[serde(default)]
    pub codec: CodecKind,

    /// Metadata endpoint for remote sync.
    #[serde(default)]
    pub remote_endpoint: Option<String>,

    /// Local JSON file standing in for the remote metadata store.
    #[serde(default)]
    pub metadata_file: Option<String>,

    /// Base URL of the breach range API.
    #[serde(default = "default_breach_api")]
    pub breach_api: String,

    /// Timeout for every HTTP request, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Argon2 memory cost in KiB (default: 64 MB).  Sealed codec only.
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".secura".to_string()
}

fn default_breach_api() -> String {
    crate::breach::DEFAULT_API.to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_user: None,
            codec: CodecKind::default(),
            remote_endpoint: None,
            metadata_file: None,
            breach_api: default_breach_api(),
            http_timeout_secs: default_http_timeout_secs(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".secura.toml";

    /// Load settings from `<project_dir>/.secura.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SecuraError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.remote_endpoint.is_some() && settings.metadata_file.is_some() {
            return Err(SecuraError::ConfigError(
                "set either remote_endpoint or metadata_file, not both".into(),
            ));
        }

        Ok(settings)
    }

    /// Directory holding the local key-value files.
    ///
    /// Example: `project_dir/.secura`
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Codec settings; `passphrase` is only kept for the sealed codec.
    pub fn codec_config(&self, passphrase: Option<Zeroizing<String>>) -> CodecConfig {
        CodecConfig {
            kind: self.codec,
            passphrase: passphrase.filter(|_| self.codec == CodecKind::Sealed),
            argon2: self.argon2_params(),
        }
    }

    /// The remote store these settings select.
    ///
    /// A relative `metadata_file` is resolved against `project_dir`.
    pub fn remote(&self, project_dir: &Path) -> Box<dyn RemoteStore> {
        if let Some(endpoint) = &self.remote_endpoint {
            return Box::new(HttpRemote::new(endpoint, self.http_timeout()));
        }
        if let Some(file) = &self.metadata_file {
            let path = project_dir.join(file);
            return Box::new(MetadataRemote::new(JsonFileMetadata::new(path)));
        }
        Box::new(NoRemote)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
