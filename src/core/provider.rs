// ============================================================================
// DotBuild - 翻译服务接口
// ============================================================================
//
// 文件: src/core/provider.rs
// 职责: 机器翻译服务的抽象接口与数据结构
// 边界:
//   - ✅ 翻译服务 trait 定义
//   - ✅ 术语表、用量、翻译选项数据结构
//   - ❌ 不应包含具体 HTTP 实现
//   - ❌ 不应包含文档比对逻辑
//
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::core::error::TranslateResult;
use crate::core::placeholder::{ANNOTATION_TAG, PLACEHOLDER_TAG};

/// 翻译服务端保存的术语表
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Glossary {
    /// 服务端术语表 ID
    pub glossary_id: String,
    /// 术语表名称，约定为 `{project}_{language}`
    pub name: String,
    pub source_lang: String,
    pub target_lang: String,
    #[serde(default)]
    pub entry_count: usize,
}

/// 单项用量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageDetail {
    pub count: u64,
    pub limit: u64,
}

impl UsageDetail {
    pub fn limit_reached(&self) -> bool {
        self.limit > 0 && self.count >= self.limit
    }

    /// 已用百分比
    pub fn percentage(&self) -> f64 {
        if self.limit == 0 {
            0.0
        } else {
            self.count as f64 / self.limit as f64 * 100.0
        }
    }
}

/// 账户用量
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub character: Option<UsageDetail>,
    pub document: Option<UsageDetail>,
}

impl Usage {
    pub fn any_limit_reached(&self) -> bool {
        [self.character, self.document]
            .iter()
            .flatten()
            .any(UsageDetail::limit_reached)
    }
}

/// 翻译请求选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// 语气偏好，如 `prefer_less`
    pub formality: String,
    /// 不参与翻译的标签
    pub ignore_tags: Vec<String>,
    /// 标签处理方式
    pub tag_handling: String,
    pub glossary_id: Option<String>,
}

impl TranslateOptions {
    pub fn new(formality: &str) -> Self {
        Self {
            formality: formality.to_string(),
            ignore_tags: vec![ANNOTATION_TAG.to_string(), PLACEHOLDER_TAG.to_string()],
            tag_handling: "xml".to_string(),
            glossary_id: None,
        }
    }

    pub fn with_glossary(mut self, glossary: Option<&Glossary>) -> Self {
        self.glossary_id = glossary.map(|g| g.glossary_id.clone());
        self
    }
}

/// 单条翻译结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResult {
    pub text: String,
    pub detected_source_lang: Option<String>,
}

/// 机器翻译服务
///
/// `translate_text` 的结果必须与提交顺序一致。
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn list_glossaries(&self) -> TranslateResult<Vec<Glossary>>;

    async fn get_usage(&self) -> TranslateResult<Usage>;

    async fn translate_text(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        options: &TranslateOptions,
    ) -> TranslateResult<Vec<TextResult>>;

    async fn create_glossary(
        &self,
        name: &str,
        source_lang: &str,
        target_lang: &str,
        entries: &BTreeMap<String, String>,
    ) -> TranslateResult<Glossary>;

    async fn delete_glossary(&self, glossary: &Glossary) -> TranslateResult<()>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_limit_detection() {
        let usage = Usage {
            character: Some(UsageDetail {
                count: 500_000,
                limit: 500_000,
            }),
            document: None,
        };
        assert!(usage.any_limit_reached());

        let usage = Usage {
            character: Some(UsageDetail {
                count: 1_000,
                limit: 500_000,
            }),
            document: Some(UsageDetail { count: 0, limit: 0 }),
        };
        assert!(!usage.any_limit_reached());
        assert!(!Usage::default().any_limit_reached());
    }

    #[test]
    fn test_usage_percentage() {
        let detail = UsageDetail {
            count: 250,
            limit: 1_000,
        };
        assert!((detail.percentage() - 25.0).abs() < f64::EPSILON);
        assert_eq!(UsageDetail { count: 3, limit: 0 }.percentage(), 0.0);
    }

    #[test]
    fn test_translate_options_defaults() {
        let options = TranslateOptions::new("prefer_less");
        assert_eq!(options.ignore_tags, vec!["i", "x"]);
        assert_eq!(options.tag_handling, "xml");
        assert!(options.glossary_id.is_none());

        let glossary = fake::glossary("g-1", "dotbuild_de", "de");
        let options = options.with_glossary(Some(&glossary));
        assert_eq!(options.glossary_id.as_deref(), Some("g-1"));
    }
}
