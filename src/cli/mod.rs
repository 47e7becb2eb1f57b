// ============================================================================
// DotBuild - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 命令行参数解析配置
//   - ✅ 命令路由分发
//   - ✅ 翻译服务客户端构建
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含业务逻辑处理
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

pub mod glossary;
pub mod init;
pub mod translate;
pub mod usage;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::core::{DeeplClient, TranslationProvider};
use crate::models::config::{Config, RuntimeArgs};
use crate::tf;
use crate::utils::colors::Colors;
use crate::utils::constants::CONFIG_FILE;
use glossary::{handle_glossary, GlossaryArgs};
use init::{handle_init, InitArgs};
use translate::{handle_translate, TranslateArgs};
use usage::handle_usage;

/// DotBuild - i18n translation synchronizer
#[derive(Debug, Parser)]
#[command(name = "dotbuild")]
#[command(about = "Keep i18n target files in sync with the source language file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language (zh_cn, en_us)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding src.json and the target language files
    #[arg(short = 'C', long, global = true)]
    pub dir: Option<String>,

    /// Maximum number of languages translated concurrently
    #[arg(short = 'j', long, global = true)]
    pub max_concurrency: Option<usize>,

    /// Per-language timeout (seconds)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Translate missing and changed keys into every target language
    Translate(TranslateArgs),
    /// Recreate provider glossaries from the local glossary files
    Glossary(GlossaryArgs),
    /// Show translation provider usage
    Usage,
    /// Initialize configuration file
    Init(InitArgs),
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    Config::initialize(startup_config(&cli)?)?;

    // Build runtime args to override config
    let runtime_args = build_runtime_args(&cli);
    // Merge runtime args to global config
    Config::merge_runtime_args(runtime_args)?;

    if !Config::current()?.output.colored {
        Colors::set_enabled(false);
    }

    match cli.command {
        Commands::Translate(args) => handle_translate(args).await,
        Commands::Glossary(args) => handle_glossary(args).await,
        Commands::Usage => handle_usage().await,
        Commands::Init(args) => handle_init(args, &cli.config),
    }
}

/// 启动时的配置：init 不读取现有配置文件，以便覆盖损坏的文件
fn startup_config(cli: &Cli) -> Result<Config> {
    match cli.command {
        Commands::Init(_) => Ok(Config::default()),
        _ => Config::load_config(&cli.config)
            .with_context(|| tf!("config.load_failed", cli.config.display())),
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        language: cli.language.clone(),
        i18n_dir: cli.dir.clone(),
        max_concurrency: cli.max_concurrency,
        timeout: cli.timeout,
    }
}

/// 按配置构建翻译服务客户端，未设置凭据时返回 None
pub(crate) fn build_provider(config: &Config) -> Result<Option<Arc<dyn TranslationProvider>>> {
    let client = DeeplClient::from_env(config.translator.api_url.clone(), config.timeout())?;
    if let Some(client) = &client {
        debug!(api_url = client.api_url(), "translation provider configured");
    }
    Ok(client.map(|client| Arc::new(client) as Arc<dyn TranslationProvider>))
}
