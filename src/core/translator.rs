// ============================================================================
// DotBuild - 翻译同步会话
// ============================================================================
//
// 文件: src/core/translator.rs
// 职责: 单次运行的翻译同步流程编排
// 边界:
//   - ✅ 会话上下文 (设置 / 翻译服务 / 术语表 / 缓存快照)
//   - ✅ 单语言流程: 比对 → 翻译 → 写回
//   - ✅ 多语言并发执行
//   - ✅ 术语表重建
//   - ✅ 用量报告
//   - ❌ 不应包含差异比对细节
//   - ❌ 不应包含 HTTP 实现
//   - ❌ 不应包含 CLI 参数处理
//
// ============================================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::core::diff::{self, SyncStats};
use crate::core::error::{TranslateError, TranslateResult};
use crate::core::glossary::{self, glossary_name};
use crate::core::placeholder;
use crate::core::provider::{Glossary, TranslateOptions, TranslationProvider, Usage};
use crate::core::scheduler::{AsyncTaskScheduler, SchedulerConfig, TaskResult};
use crate::models::document::Document;
use crate::utils::constants::{CREDENTIAL_ENV, SOURCE_FILE};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 翻译会话所需的设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorSettings {
    /// 存放 src.json 与各语言文件的目录
    pub i18n_dir: PathBuf,
    /// 术语表定义目录
    pub glossary_dir: PathBuf,
    /// 源语言代码
    pub source_language: String,
    /// 项目名，用作术语表名前缀
    pub project: String,
    /// 语气偏好
    pub formality: String,
}

impl TranslatorSettings {
    pub fn source_path(&self) -> PathBuf {
        self.i18n_dir.join(SOURCE_FILE)
    }

    pub fn target_path(&self, language: &str) -> PathBuf {
        self.i18n_dir.join(format!("{}.json", language))
    }
}

/// 本次术语表重建的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryReport {
    /// 删除的术语表名称
    pub removed: Vec<String>,
    /// 创建的术语表名称
    pub created: Vec<String>,
    /// 因为为空而跳过的语言
    pub skipped: Vec<String>,
}

/// 翻译同步会话
///
/// 每次命令运行构造一次，显式传递给每个操作。克隆代价很低，多语言并发
/// 执行时每个任务持有一份克隆，共享只读快照。
#[derive(Clone)]
pub struct Translator {
    settings: Arc<TranslatorSettings>,
    provider: Option<Arc<dyn TranslationProvider>>,
    glossaries: Arc<Vec<Glossary>>,
    cache: Arc<Document>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("settings", &self.settings)
            .field("has_provider", &self.provider.is_some())
            .field("glossaries", &self.glossaries.len())
            .field("cache_keys", &self.cache.leaf_count())
            .finish()
    }
}

impl Translator {
    /// 创建会话，缓存为空，术语表未加载
    pub fn new(settings: TranslatorSettings, provider: Option<Arc<dyn TranslationProvider>>) -> Self {
        Self {
            settings: Arc::new(settings),
            provider,
            glossaries: Arc::new(Vec::new()),
            cache: Arc::new(Document::empty()),
        }
    }

    pub fn settings(&self) -> &TranslatorSettings {
        &self.settings
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn glossaries(&self) -> &[Glossary] {
        &self.glossaries
    }

    fn provider(&self) -> TranslateResult<&Arc<dyn TranslationProvider>> {
        self.provider
            .as_ref()
            .ok_or(TranslateError::MissingCredential { var: CREDENTIAL_ENV })
    }

    /// 以当前源文档作为"已翻译"快照
    pub async fn update_cache(&mut self) -> TranslateResult<()> {
        let source = read_document(&self.settings.source_path()).await?;
        debug!(keys = source.leaf_count(), "translation cache updated");
        self.cache = Arc::new(source);
        Ok(())
    }

    /// 连接翻译服务：加载术语表并报告用量
    pub async fn connect(&mut self) -> TranslateResult<Usage> {
        Logger::info(t!("translator.initializing"));
        let provider = Arc::clone(self.provider()?);

        self.glossaries = Arc::new(provider.list_glossaries().await?);
        debug!(glossaries = self.glossaries.len(), "glossaries loaded");

        let usage = provider.get_usage().await?;
        report_usage(&usage);
        Ok(usage)
    }

    /// 同步单个目标语言：比对、翻译、写回
    pub async fn translate(&self, language: &str, overwrite: bool) -> TranslateResult<SyncStats> {
        let source = read_document(&self.settings.source_path()).await?;
        let target_path = self.settings.target_path(language);

        let target_exists = tokio::fs::try_exists(&target_path)
            .await
            .map_err(|e| TranslateError::io(&target_path, e))?;
        let target = if target_exists && !overwrite {
            Some(read_document(&target_path).await?)
        } else {
            None
        };

        let diff::DiffOutcome {
            mut target,
            actions,
            stats,
        } = diff::diff(&source, target, &self.cache, overwrite);

        for action in &actions.remove {
            Logger::warn(tf!("translate.remove_obsolete", language, action.dotted()));
        }

        if !actions.update.is_empty() {
            // 从这里开始需要翻译服务
            let provider = self.provider()?;

            let name = glossary_name(&self.settings.project, language);
            let glossary = self.glossaries.iter().find(|g| g.name == name);
            if let Some(glossary) = glossary {
                debug!(language, glossary = %glossary.glossary_id, "using glossary");
            }
            let options = TranslateOptions::new(&self.settings.formality).with_glossary(glossary);

            let texts: Vec<String> = actions.update.iter().map(|a| a.prepared.clone()).collect();
            let results = provider
                .translate_text(&texts, &self.settings.source_language, language, &options)
                .await?;

            if results.len() != texts.len() {
                return Err(TranslateError::ResultCountMismatch {
                    expected: texts.len(),
                    actual: results.len(),
                });
            }

            // 结果顺序与提交顺序一致
            for (action, result) in actions.update.iter().zip(results) {
                debug!(
                    language,
                    key = %action.dotted(),
                    detected = ?result.detected_source_lang,
                    "translated"
                );
                let text = placeholder::restore(&result.text);
                Logger::success(tf!(
                    "translate.updated_key",
                    language,
                    action.dotted(),
                    &text
                ));
                target.set_leaf(&action.path, &action.key, text);
            }
        }

        if actions.is_empty() {
            debug!(language, "target up to date");
        } else {
            write_document(&target_path, &target).await?;
            debug!(language, path = %target_path.display(), "target written");
        }

        Ok(stats)
    }

    /// 并发同步多个语言，每个语言一个任务，返回每个语言的结果
    pub async fn translate_all(
        &self,
        languages: &[String],
        overwrite: bool,
        config: SchedulerConfig,
    ) -> Vec<(String, TaskResult<SyncStats>)> {
        let scheduler = AsyncTaskScheduler::new(config);
        let tasks = languages
            .iter()
            .map(|language| {
                let translator = self.clone();
                let lang = language.clone();
                let task = async move {
                    translator
                        .translate(&lang, overwrite)
                        .await
                        .map_err(anyhow::Error::from)
                };
                (language.clone(), task)
            })
            .collect();

        scheduler.execute_batch(tasks).await
    }

    /// 重建术语表：删除本项目所有术语表，再按本地定义文件逐个创建
    pub async fn update_glossaries(&mut self, dry_run: bool) -> TranslateResult<GlossaryReport> {
        let definitions = glossary::load_definitions(&self.settings.glossary_dir).await?;
        if definitions.is_empty() {
            Logger::warn(tf!(
                "glossary.none_found",
                self.settings.glossary_dir.display()
            ));
        }

        let prefix = glossary_name(&self.settings.project, "");
        let stale: Vec<Glossary> = self
            .glossaries
            .iter()
            .filter(|g| g.name.starts_with(&prefix))
            .cloned()
            .collect();

        let mut report = GlossaryReport::default();
        let provider = if dry_run {
            None
        } else {
            Some(Arc::clone(self.provider()?))
        };

        for glossary in &stale {
            match &provider {
                Some(provider) => {
                    Logger::info(tf!(
                        "glossary.remove_stale",
                        &glossary.name,
                        &glossary.glossary_id
                    ));
                    provider.delete_glossary(glossary).await?;
                }
                None => Logger::info(tf!(
                    "glossary.dry_run_remove",
                    &glossary.name,
                    &glossary.glossary_id
                )),
            }
            report.removed.push(glossary.name.clone());
        }

        for definition in &definitions {
            // 翻译服务不接受空术语表
            if definition.is_empty() {
                Logger::info(tf!("glossary.skip_empty", definition.path.display()));
                report.skipped.push(definition.language.clone());
                continue;
            }

            let name = glossary_name(&self.settings.project, &definition.language);
            match &provider {
                Some(provider) => {
                    Logger::info(tf!("glossary.create", &name, definition.entries.len()));
                    provider
                        .create_glossary(
                            &name,
                            &self.settings.source_language,
                            &definition.language,
                            &definition.entries,
                        )
                        .await?;
                }
                None => Logger::info(tf!(
                    "glossary.dry_run_create",
                    &name,
                    definition.entries.len()
                )),
            }
            report.created.push(name);
        }

        if let Some(provider) = provider {
            self.glossaries = Arc::new(provider.list_glossaries().await?);
            Logger::success(tf!("glossary.reloaded", self.glossaries.len()));
        }

        Ok(report)
    }
}

/// 输出用量信息，超出额度时给出警告
pub fn report_usage(usage: &Usage) {
    if usage.any_limit_reached() {
        Logger::warn(t!("translator.limit_exceeded"));
    }
    if let Some(character) = usage.character {
        Logger::info(tf!(
            "translator.usage_characters",
            character.count,
            character.limit,
            format!("{:.2}", character.percentage())
        ));
    }
    if let Some(document) = usage.document {
        Logger::info(tf!(
            "translator.usage_documents",
            document.count,
            document.limit
        ));
    }
}

async fn read_document(path: &Path) -> TranslateResult<Document> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TranslateError::io(path, e))?;
    Document::from_json_str(&content).map_err(|e| TranslateError::parse(path, e))
}

async fn write_document(path: &Path, document: &Document) -> TranslateResult<()> {
    let content = document
        .to_pretty_json()
        .map_err(|e| TranslateError::parse(path, e))?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| TranslateError::io(parent, e))?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| TranslateError::io(path, e))
}
