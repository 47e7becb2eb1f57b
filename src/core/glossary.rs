// ============================================================================
// DotBuild - 本地术语表定义
// ============================================================================
//
// 文件: src/core/glossary.rs
// 职责: 读取本地术语表定义文件
// 边界:
//   - ✅ 术语表文件发现 ({dir}/*.json)
//   - ✅ 术语表文件解析
//   - ✅ 术语表命名约定
//   - ❌ 不应包含翻译服务调用
//   - ❌ 不应包含日志输出
//
// ============================================================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::error::{TranslateError, TranslateResult};

/// 一个本地术语表定义文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryDefinition {
    /// 目标语言，取自文件名
    pub language: String,
    pub path: PathBuf,
    /// 源术语 → 目标术语
    pub entries: BTreeMap<String, String>,
}

impl GlossaryDefinition {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 术语表名称：`{project}_{language}`
pub fn glossary_name(project: &str, language: &str) -> String {
    format!("{}_{}", project, language)
}

/// 读取目录下所有 `*.json` 术语表定义，按文件名排序
pub async fn load_definitions(dir: &Path) -> TranslateResult<Vec<GlossaryDefinition>> {
    let pattern = dir.join("*.json");
    let mut paths: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(Result::ok)
        .collect();
    paths.sort();

    let mut definitions = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(language) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| TranslateError::io(&path, e))?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|source| TranslateError::InvalidGlossary {
                path: path.clone(),
                source,
            })?;

        definitions.push(GlossaryDefinition {
            language,
            path,
            entries,
        });
    }

    Ok(definitions)
}
