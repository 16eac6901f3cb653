//! Configuration for the assistant server

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "FACULTY_ASSIST_CONFIG";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Sample data used to build the question context
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl AppConfig {
    /// Load defaults, then the optional TOML file, then environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse TOML config text
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Ok(origin) = std::env::var("CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
    }

    /// Check that the server can start with this configuration
    pub fn validate(&self) -> Result<()> {
        match self.gemini.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(Error::Config(
                    "GEMINI_API_KEY is not set; the model cannot be reached".to_string(),
                ))
            }
        }
        if self.server.max_upload_size == 0 {
            return Err(Error::Config("max_upload_size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Allowed CORS origin (`*` for any)
    pub cors_origin: String,
    /// Directory of the bundled web client
    pub static_dir: PathBuf,
    /// Directory for temporary uploads
    pub upload_dir: PathBuf,
    /// Maximum size of one uploaded file in bytes (default: 15MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origin: "*".to_string(),
            static_dir: PathBuf::from("client"),
            upload_dir: PathBuf::from("uploads"),
            max_upload_size: 15 * 1024 * 1024, // 15MB
        }
    }
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key
    pub api_key: Option<String>,
    /// Generative Language API base URL
    pub base_url: String,
    /// Model used for both text and vision
    pub model: String,
    /// Sampling temperature for `/chat` replies
    pub temperature: f32,
    /// Nucleus sampling threshold
    pub top_p: f32,
    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-pro-exp-03-25".to_string(),
            temperature: 0.7,
            top_p: 0.9,
            timeout_secs: None,
        }
    }
}

/// Sample image analysed into the question context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleImage {
    /// Context key
    pub key: String,
    /// File name relative to the data directory
    pub file: String,
    /// Declared MIME type
    pub mime_type: String,
    /// Human description stored alongside the analysis
    pub description: String,
}

/// Sample PDF extracted into the question context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleDocument {
    /// Context key
    pub key: String,
    /// File name relative to the data directory
    pub file: String,
}

/// Knowledge sources for `/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Directory holding the sample files
    pub data_dir: PathBuf,
    /// Sample images
    pub images: Vec<SampleImage>,
    /// Sample documents
    pub documents: Vec<SampleDocument>,
    /// Page scraped for extra context
    pub website_url: String,
    /// Reuse the built context until it is explicitly refreshed
    pub cache_context: bool,
}

impl KnowledgeConfig {
    /// Absolute-or-relative path of a sample file
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            images: vec![
                SampleImage {
                    key: "tuition".to_string(),
                    file: "ค่าธรรมเนียมการศึกษาป.ตรี-650x900.png".to_string(),
                    mime_type: "image/png".to_string(),
                    description: "ตารางค่าธรรมเนียมการศึกษาคณะวิศวกรรมศาสตร์ มข.".to_string(),
                },
                SampleImage {
                    key: "contact".to_string(),
                    file: "ช่องทางการติดต่อสำหรับนักศึกษาปตรี.jpg".to_string(),
                    mime_type: "image/jpeg".to_string(),
                    description: "ช่องทางการติดต่อคณะวิศวกรรมศาสตร์ มข.".to_string(),
                },
            ],
            documents: vec![
                SampleDocument {
                    key: "faq".to_string(),
                    file: "FAQ สำหรับจัดทำ Chat bot เพจคณะวิศวกรรมศาสตร์ มหาวิทยาลัยขอนแก่น.pdf"
                        .to_string(),
                },
                SampleDocument {
                    key: "admission".to_string(),
                    file: "เอกสารการเข้ารับการศึกษา.pdf".to_string(),
                },
            ],
            website_url: "https://www.en.kku.ac.th/web/%E0%B8%87%E0%B8%B2%E0%B8%99%E0%B8%9A%E0%B8%A3%E0%B8%B4%E0%B8%81%E0%B8%B2%E0%B8%A3%E0%B8%A7%E0%B8%B4%E0%B8%8A%E0%B8%B2%E0%B8%81%E0%B8%B2%E0%B8%A3%E0%B9%81%E0%B8%A5%E0%B8%B0%E0%B8%A7%E0%B8%B4%E0%B8%88/".to_string(),
            cache_context: false,
        }
    }
}
