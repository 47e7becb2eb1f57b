// ============================================================================
// DotBuild - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置默认值
//   - ✅ 配置文件读写操作
//   - ✅ CLI 运行时参数合并
//   - ❌ 不应包含翻译流程逻辑
//   - ❌ 不应包含 CLI 参数定义
//   - ❌ 不应包含翻译服务客户端
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::core::scheduler::SchedulerConfig;
use crate::core::translator::TranslatorSettings;

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// DotBuild 配置文件结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// i18n 文件配置
    #[serde(default)]
    pub i18n: I18nConfig,
    /// 翻译服务配置
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// i18n 文件配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18nConfig {
    /// src.json 与各语言文件所在目录
    #[serde(default = "Config::default_i18n_dir")]
    pub dir: String,
    /// 源语言
    #[serde(default = "Config::default_source_language")]
    pub source_language: String,
    /// 目标语言列表
    #[serde(default)]
    pub languages: Vec<String>,
    /// 项目名（术语表名前缀）
    #[serde(default = "Config::default_project")]
    pub project: String,
    /// 术语表目录，默认为 `{dir}/glossaries`
    #[serde(default)]
    pub glossary_dir: Option<String>,
}

/// 翻译服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// 自定义 API 地址
    #[serde(default)]
    pub api_url: Option<String>,
    /// 语气偏好
    #[serde(default = "Config::default_formality")]
    pub formality: String,
    /// 最大并发语言数
    #[serde(default = "Config::default_max_concurrency")]
    pub max_concurrency: usize,
    /// 单个语言超时时间（秒），0 表示不限制
    #[serde(default)]
    pub timeout: u64,
}

/// 输出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 是否详细输出
    #[serde(default)]
    pub verbose: bool,
    /// 是否彩色输出
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
    /// 界面语言
    #[serde(default = "Config::default_language")]
    pub language: String,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub language: Option<String>,
    pub i18n_dir: Option<String>,
    pub max_concurrency: Option<usize>,
    pub timeout: Option<u64>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    fn default_i18n_dir() -> String {
        "src/i18n".to_string()
    }

    fn default_source_language() -> String {
        "en".to_string()
    }

    fn default_project() -> String {
        "dotbuild".to_string()
    }

    fn default_formality() -> String {
        "prefer_less".to_string()
    }

    fn default_max_concurrency() -> usize {
        4
    }

    fn default_colored() -> bool {
        true
    }

    /// 默认界面语言
    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    pub fn initialize(config: Self) -> anyhow::Result<()> {
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 加载配置文件，文件不存在时使用默认配置
    pub fn load_config(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 合并运行时参数到全局配置
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.merge(args);
        Ok(())
    }

    /// 合并运行时参数
    pub fn merge(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(language) = args.language {
            self.output.language = language;
        }
        if let Some(dir) = args.i18n_dir {
            self.i18n.dir = dir;
        }
        if let Some(max_concurrency) = args.max_concurrency {
            self.translator.max_concurrency = max_concurrency;
        }
        if let Some(timeout) = args.timeout {
            self.translator.timeout = timeout;
        }
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板
    pub fn generate_default_template() -> Self {
        let mut config = Self::default();
        config.i18n.languages = vec!["de".to_string(), "fr".to_string(), "nl".to_string()];
        config
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::generate_default_template().save_to_file(config_path)
    }

    /// 获取当前全局配置的副本
    pub fn current() -> anyhow::Result<Self> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(config.clone())
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        Ok(Self::current()?.output.language)
    }

    /// 术语表目录
    pub fn glossary_dir(&self) -> PathBuf {
        match &self.i18n.glossary_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&self.i18n.dir).join("glossaries"),
        }
    }

    /// 单个语言超时时间
    pub fn timeout(&self) -> Option<Duration> {
        (self.translator.timeout > 0).then(|| Duration::from_secs(self.translator.timeout))
    }

    /// 翻译会话设置
    pub fn translator_settings(&self) -> TranslatorSettings {
        TranslatorSettings {
            i18n_dir: PathBuf::from(&self.i18n.dir),
            glossary_dir: self.glossary_dir(),
            source_language: self.i18n.source_language.clone(),
            project: self.i18n.project.clone(),
            formality: self.translator.formality.clone(),
        }
    }

    /// 多语言调度配置
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_concurrency: self.translator.max_concurrency.max(1),
            timeout: self.timeout(),
            verbose: self.output.verbose,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            i18n: I18nConfig::default(),
            translator: TranslatorConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            dir: Config::default_i18n_dir(),
            source_language: Config::default_source_language(),
            languages: Vec::new(),
            project: Config::default_project(),
            glossary_dir: None,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            formality: Config::default_formality(),
            max_concurrency: Config::default_max_concurrency(),
            timeout: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            colored: Config::default_colored(),
            language: Config::default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_config(&dir.path().join("dotbuild.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.glossary_dir(), PathBuf::from("src/i18n/glossaries"));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dotbuild.toml");
        std::fs::write(
            &path,
            r#"
[i18n]
dir = "app/i18n"
languages = ["de", "nl"]
project = "bitstillery"

[translator]
timeout = 30
"#,
        )
        .unwrap();

        let config = Config::load_config(&path).unwrap();
        assert_eq!(config.i18n.languages, vec!["de", "nl"]);
        assert_eq!(config.i18n.source_language, "en");
        assert_eq!(config.translator.formality, "prefer_less");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));

        let settings = config.translator_settings();
        assert_eq!(settings.source_path(), PathBuf::from("app/i18n/src.json"));
        assert_eq!(settings.target_path("de"), PathBuf::from("app/i18n/de.json"));
        assert_eq!(settings.glossary_dir, PathBuf::from("app/i18n/glossaries"));
        assert_eq!(settings.project, "bitstillery");
    }

    #[test]
    fn test_runtime_args_override_file() {
        let mut config = Config::default();
        config.merge(RuntimeArgs {
            verbose: Some(true),
            i18n_dir: Some("locales".to_string()),
            max_concurrency: Some(0),
            ..RuntimeArgs::default()
        });

        assert!(config.output.verbose);
        assert_eq!(config.i18n.dir, "locales");
        // 并发数至少为 1
        assert_eq!(config.scheduler_config().max_concurrency, 1);
        assert!(config.scheduler_config().verbose);
    }

    #[test]
    fn test_template_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dotbuild.toml");
        Config::create_default_config_file(&path).unwrap();

        let config = Config::load_config(&path).unwrap();
        assert_eq!(config, Config::generate_default_template());
    }
}
