// ============================================================================
// DotBuild - 术语表命令处理
// ============================================================================
//
// 文件: src/cli/glossary.rs
// 职责: 处理 glossary 命令
// 边界:
//   - ✅ 术语表命令参数解析
//   - ✅ 预演模式 (--dry-run)
//   - ❌ 不应包含术语表文件解析
//   - ❌ 不应包含翻译服务实现
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::cli::build_provider;
use crate::core::Translator;
use crate::models::config::Config;
use crate::utils::constants::CREDENTIAL_ENV;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 术语表命令参数
#[derive(Debug, Args)]
pub struct GlossaryArgs {
    /// 只显示将要执行的删除与创建操作
    #[arg(long)]
    pub dry_run: bool,
}

/// 处理术语表命令
pub async fn handle_glossary(args: GlossaryArgs) -> Result<()> {
    let config = Config::current()?;
    let mut translator = Translator::new(config.translator_settings(), build_provider(&config)?);

    if translator.has_provider() {
        translator.connect().await?;
    } else if args.dry_run {
        Logger::warn(tf!("translate.no_credential", CREDENTIAL_ENV));
    }

    if args.dry_run {
        Logger::info(t!("glossary.dry_run"));
    }

    let report = translator.update_glossaries(args.dry_run).await?;
    Logger::success(tf!(
        "glossary.done",
        report.removed.len(),
        report.created.len(),
        report.skipped.len()
    ));
    Ok(())
}
