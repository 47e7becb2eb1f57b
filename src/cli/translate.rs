// ============================================================================
// DotBuild - 翻译命令处理
// ============================================================================
//
// 文件: src/cli/translate.rs
// 职责: 处理 translate 命令（单次运行与监听模式）
// 边界:
//   - ✅ 翻译命令参数解析
//   - ✅ 目标语言选择
//   - ✅ 每轮同步后刷新翻译缓存
//   - ✅ 监听源文件变化并重新同步
//   - ✅ 失败语言的退出码处理
//   - ❌ 不应包含差异比对逻辑
//   - ❌ 不应包含翻译服务实现
//
// ============================================================================

use anyhow::{Context, Result};
use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::cli::build_provider;
use crate::core::diff::SyncStats;
use crate::core::scheduler::TaskResult;
use crate::core::{SchedulerConfig, Translator};
use crate::models::config::Config;
use crate::ui::summary::{failed_languages, render_sync_summary};
use crate::utils::constants::{CREDENTIAL_ENV, WATCH_DEBOUNCE_MS};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 翻译命令参数
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// 重新翻译所有键，忽略已有的目标文件
    #[arg(long)]
    pub overwrite: bool,

    /// 目标语言（可多次指定，默认使用配置文件中的 languages）
    #[arg(short = 't', long = "target")]
    pub targets: Vec<String>,

    /// 监听源文件变化并持续同步
    #[arg(short, long)]
    pub watch: bool,
}

/// 处理翻译命令
pub async fn handle_translate(args: TranslateArgs) -> Result<()> {
    let config = Config::current()?;
    let languages = if args.targets.is_empty() {
        config.i18n.languages.clone()
    } else {
        args.targets.clone()
    };
    if languages.is_empty() {
        anyhow::bail!(t!("translate.no_languages"));
    }

    let mut translator = Translator::new(config.translator_settings(), build_provider(&config)?);
    let source_path = translator.settings().source_path();
    translator
        .update_cache()
        .await
        .with_context(|| tf!("translate.read_source_failed", source_path.display()))?;

    if translator.has_provider() {
        translator.connect().await?;
    } else {
        Logger::warn(tf!("translate.no_credential", CREDENTIAL_ENV));
    }

    let results = sync_cycle(
        &mut translator,
        &languages,
        args.overwrite,
        config.scheduler_config(),
    )
    .await?;
    let failed = failed_languages(&results);

    if args.watch {
        if !failed.is_empty() {
            Logger::warn(tf!("translate.failed_languages", failed.join(", ")));
        }
        return watch(&mut translator, &languages, config.scheduler_config()).await;
    }

    if !failed.is_empty() {
        anyhow::bail!(tf!("translate.failed_languages", failed.join(", ")));
    }
    Ok(())
}

/// 同步所有语言一次并输出汇总，然后以当前源文档刷新缓存
pub(crate) async fn sync_cycle(
    translator: &mut Translator,
    languages: &[String],
    overwrite: bool,
    scheduler_config: SchedulerConfig,
) -> Result<Vec<(String, TaskResult<SyncStats>)>> {
    Logger::info(tf!("translate.start", languages.join(", ")));
    let results = translator
        .translate_all(languages, overwrite, scheduler_config)
        .await;
    render_sync_summary(&results);

    let source_path = translator.settings().source_path();
    translator
        .update_cache()
        .await
        .with_context(|| tf!("translate.read_source_failed", source_path.display()))?;
    Ok(results)
}

/// 监听源文件变化，防抖后重新同步，Ctrl-C 退出
async fn watch(
    translator: &mut Translator,
    languages: &[String],
    scheduler_config: SchedulerConfig,
) -> Result<()> {
    let source_path = translator.settings().source_path();
    let dir = watch_dir(&source_path);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| {
        let _ = tx.send(event);
    })
    .with_context(|| tf!("translate.watch_failed", dir.display()))?;
    // 编辑器保存时可能整体替换文件，所以监听所在目录
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| tf!("translate.watch_failed", dir.display()))?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    Logger::info(tf!("translate.watch_start", source_path.display()));
    loop {
        tokio::select! {
            result = &mut shutdown => {
                result.context(t!("translate.watch_signal_failed"))?;
                Logger::info(t!("translate.watch_stopped"));
                return Ok(());
            }
            event = rx.recv() => {
                match event {
                    Some(Ok(event)) if touches_source(&event, &source_path) => {}
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        Logger::warn(tf!("translate.watch_error", e));
                        continue;
                    }
                    None => return Ok(()),
                }

                debounce(&mut rx).await;
                Logger::info(tf!("translate.watch_changed", source_path.display()));
                match sync_cycle(translator, languages, false, scheduler_config.clone()).await {
                    Ok(results) => {
                        let failed = failed_languages(&results);
                        if !failed.is_empty() {
                            Logger::warn(tf!("translate.failed_languages", failed.join(", ")));
                        }
                    }
                    // 源文件可能正在编辑中，下次变化时再试
                    Err(e) => Logger::warn(format!("{:#}", e)),
                }
            }
        }
    }
}

/// 等待防抖时间，丢弃期间积压的事件
async fn debounce(rx: &mut UnboundedReceiver<notify::Result<Event>>) {
    tokio::time::sleep(Duration::from_millis(WATCH_DEBOUNCE_MS)).await;
    while rx.try_recv().is_ok() {}
}

fn touches_source(event: &Event, source_path: &Path) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == source_path.file_name())
}

fn watch_dir(source_path: &Path) -> &Path {
    match source_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
