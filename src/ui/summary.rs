// ============================================================================
// DotBuild - 同步结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 多语言同步结果汇总显示
// 边界:
//   - ✅ 每个语言的结果行
//   - ✅ 翻译量汇总行
//   - ✅ 国际化文本支持
//   - ❌ 不应包含翻译流程逻辑
//   - ❌ 不应包含文件操作
//
// ============================================================================

use std::io::{self, Write};

use crate::core::diff::SyncStats;
use crate::core::scheduler::TaskResult;
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::utils::styles::TextStyles;
use crate::{t, tf};

/// 汇总所有成功语言的翻译量
pub fn total_stats(results: &[(String, TaskResult<SyncStats>)]) -> SyncStats {
    results
        .iter()
        .filter_map(|(_, result)| result.success().copied())
        .sum()
}

/// 失败（含超时、取消）的语言
pub fn failed_languages(results: &[(String, TaskResult<SyncStats>)]) -> Vec<String> {
    results
        .iter()
        .filter(|(_, result)| !result.is_success())
        .map(|(language, _)| language.clone())
        .collect()
}

/// 汇总行：`translate i18n entries: (update: K/C) (total: N keys/M chars)`
pub fn summary_line(stats: &SyncStats) -> String {
    tf!(
        "summary.entries",
        stats.costs.keys,
        stats.costs.chars,
        stats.total.keys,
        stats.total.chars
    )
}

/// 单个语言的结果行
fn language_line(language: &str, result: &TaskResult<SyncStats>) -> String {
    let tag = format!("[{}]", language);
    match result {
        TaskResult::Success(stats) => format!(
            "{} {} {}",
            Colors::success(icons::SUCCESS),
            Colors::info(&tag),
            tf!(
                "summary.language_success",
                stats.costs.keys,
                stats.costs.chars,
                stats.total.keys
            )
        ),
        TaskResult::Failed(err) => format!(
            "{} {} {}",
            Colors::error(icons::ERROR),
            Colors::info(&tag),
            tf!("summary.language_failed", err)
        ),
        TaskResult::Timeout => format!(
            "{} {} {}",
            Colors::warn(icons::TIME),
            Colors::info(&tag),
            t!("summary.language_timeout")
        ),
        TaskResult::Cancelled => format!(
            "{} {} {}",
            Colors::warn(icons::WARNING),
            Colors::info(&tag),
            t!("summary.language_cancelled")
        ),
    }
}

/// 渲染同步汇总
pub fn render_sync_summary(results: &[(String, TaskResult<SyncStats>)]) {
    let mut summary_lines = vec![
        "".to_string(),
        TextStyles::bold(&t!("summary.title")),
        Colors::secondary("═══════════════════════════════════════"),
    ];
    summary_lines.extend(
        results
            .iter()
            .map(|(language, result)| language_line(language, result)),
    );

    for line in summary_lines {
        Logger::info(line);
    }

    let line = format!("{} {}", icons::SUMMARY, summary_line(&total_stats(results)));
    Logger::success(line);

    let _ = io::stdout().flush();
}
