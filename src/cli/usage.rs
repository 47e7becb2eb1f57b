// ============================================================================
// DotBuild - 用量命令处理
// ============================================================================
//
// 文件: src/cli/usage.rs
// 职责: 处理 usage 命令
// 边界:
//   - ✅ 查询并输出翻译服务用量
//   - ✅ 列出已注册的术语表
//   - ❌ 不应包含 HTTP 实现
//
// ============================================================================

use anyhow::Result;

use crate::cli::build_provider;
use crate::core::{TranslateError, Translator};
use crate::models::config::Config;
use crate::utils::constants::CREDENTIAL_ENV;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 处理用量命令
pub async fn handle_usage() -> Result<()> {
    let config = Config::current()?;
    let provider = build_provider(&config)?
        .ok_or(TranslateError::MissingCredential { var: CREDENTIAL_ENV })?;

    let mut translator = Translator::new(config.translator_settings(), Some(provider));
    translator.connect().await?;

    if translator.glossaries().is_empty() {
        Logger::info(t!("usage.no_glossaries"));
    }
    for glossary in translator.glossaries() {
        Logger::info(tf!(
            "usage.glossary",
            &glossary.name,
            &glossary.glossary_id,
            &glossary.source_lang,
            &glossary.target_lang,
            glossary.entry_count
        ));
    }
    Ok(())
}
