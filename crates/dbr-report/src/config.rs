//! Renderer configuration types.

use serde::{Deserialize, Serialize};

/// Document language attribute.
pub const DOCUMENT_LANG: &str = "en-US";

/// CDN library configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnLibrary {
    /// npm package name.
    pub package: String,
    /// Pinned version number.
    pub version: String,
    /// Subresource integrity hash.
    pub sri: String,
    /// Path within npm package.
    #[serde(default)]
    pub path: Option<String>,
}

impl CdnLibrary {
    /// Create a new CDN library configuration.
    pub fn new(
        package: impl Into<String>,
        version: impl Into<String>,
        sri: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            sri: sri.into(),
            path: None,
        }
    }

    /// Set the path within the npm package.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Get the full CDN URL for this library.
    pub fn url(&self, base_url: &str) -> String {
        let path = self.path.as_deref().unwrap_or("dist/index.min.js");
        format!("{}/{}@{}/{}", base_url, self.package, self.version, path)
    }
}

/// CDN configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Base URL for CDN resources.
    #[serde(default = "default_cdn_base")]
    pub base_url: String,
    /// DOM/event utility library loaded before caller scripts.
    #[serde(default = "default_library")]
    pub library: CdnLibrary,
}

fn default_cdn_base() -> String {
    "https://cdn.jsdelivr.net/npm".to_string()
}

fn default_library() -> CdnLibrary {
    CdnLibrary::new(
        "jquery",
        "3.7.1",
        "sha256-/JqT3SQfawRcv/BIHPThkBvs0OEvtFFmqPF/lYI/Cxo=",
    )
    .with_path("dist/jquery.min.js")
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: default_cdn_base(),
            library: default_library(),
        }
    }
}

impl CdnConfig {
    /// URL of the pinned utility library.
    pub fn library_url(&self) -> String {
        self.library.url(&self.base_url)
    }
}

/// Complete renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Document schema version, emitted as a `report-schema-version` meta tag.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Minify the generated document.
    #[serde(default)]
    pub minify: bool,
    /// CDN configuration.
    #[serde(default)]
    pub cdn_config: CdnConfig,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            minify: false,
            cdn_config: CdnConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Create a new renderer configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable output minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Replace the pinned utility library.
    pub fn with_library(mut self, library: CdnLibrary) -> Self {
        self.cdn_config.library = library;
        self
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
