use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认配置文件名（位于工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "pdf_sorter.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 待分类文件所在目录
    pub input_dir: PathBuf,
    /// 分类结果输出目录
    pub output_dir: PathBuf,
    /// 待处理文件扩展名（不含点）
    pub file_extension: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 上传文件时使用的 purpose 标记
    pub upload_purpose: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            file_extension: "pdf".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string(),
            llm_model_name: "qwen-long".to_string(),
            upload_purpose: "file-extract".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：配置文件（可选）→ 环境变量覆盖
    ///
    /// 配置文件路径取 `PDF_SORTER_CONFIG`，未设置时使用工作目录下的 `pdf_sorter.toml`，
    /// 文件不存在则直接使用默认值。
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PDF_SORTER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let base = if path.exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };

        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 只从环境变量读取（未设置的字段使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取，缺失字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::TomlParseFailed { source, .. } => ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParseFailed {
            path: String::new(),
            source: e,
        })
    }

    fn with_env_overrides(self) -> Self {
        Self {
            input_dir: std::env::var("INPUT_DIR").map(PathBuf::from).unwrap_or(self.input_dir),
            output_dir: std::env::var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            file_extension: std::env::var("FILE_EXTENSION").unwrap_or(self.file_extension),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            upload_purpose: std::env::var("UPLOAD_PURPOSE").unwrap_or(self.upload_purpose),
        }
    }

    /// 校验必填项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                field: "llm_api_key".to_string(),
            });
        }
        if self.file_extension.trim().trim_start_matches('.').is_empty() {
            return Err(ConfigError::MissingValue {
                field: "file_extension".to_string(),
            });
        }
        Ok(())
    }

    /// 规范化后的扩展名（去掉前导点）
    pub fn extension(&self) -> &str {
        self.file_extension.trim().trim_start_matches('.')
    }
}
