// ============================================================================
// DotBuild - DeepL 翻译服务客户端
// ============================================================================
//
// 文件: src/core/deepl.rs
// 职责: 基于 DeepL REST API (v2) 的翻译服务实现
// 边界:
//   - ✅ HTTP 请求构建与鉴权
//   - ✅ 请求/响应结构映射
//   - ✅ 错误状态码转换
//   - ❌ 不应包含重试逻辑
//   - ❌ 不应包含文档比对逻辑
//   - ❌ 不应包含日志输出 (仅 tracing 调试信息)
//
// ============================================================================

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use crate::core::error::{TranslateError, TranslateResult};
use crate::core::provider::{
    Glossary, TextResult, TranslateOptions, TranslationProvider, Usage, UsageDetail,
};
use crate::utils::constants::CREDENTIAL_ENV;

/// 免费账户 API 地址
pub const FREE_API_URL: &str = "https://api-free.deepl.com";

/// 付费账户 API 地址
pub const PRO_API_URL: &str = "https://api.deepl.com";

/// DeepL 客户端
#[derive(Debug, Clone)]
pub struct DeeplClient {
    http: Client,
    api_url: String,
    auth_key: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a [String],
    source_lang: String,
    target_lang: String,
    formality: &'a str,
    tag_handling: &'a str,
    ignore_tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    glossary_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlossaryList {
    glossaries: Vec<Glossary>,
}

#[derive(Debug, Serialize)]
struct CreateGlossaryRequest<'a> {
    name: &'a str,
    source_lang: String,
    target_lang: String,
    entries: String,
    entries_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct UsageResponse {
    character_count: Option<u64>,
    character_limit: Option<u64>,
    document_count: Option<u64>,
    document_limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl From<UsageResponse> for Usage {
    fn from(response: UsageResponse) -> Self {
        let detail = |count: Option<u64>, limit: Option<u64>| match (count, limit) {
            (Some(count), Some(limit)) => Some(UsageDetail { count, limit }),
            _ => None,
        };
        Usage {
            character: detail(response.character_count, response.character_limit),
            document: detail(response.document_count, response.document_limit),
        }
    }
}

impl DeeplClient {
    /// 创建客户端，`api_url` 为空时根据密钥类型选择地址
    pub fn new(
        auth_key: String,
        api_url: Option<String>,
        timeout: Option<Duration>,
    ) -> TranslateResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let api_url = api_url
            .unwrap_or_else(|| Self::default_api_url(&auth_key).to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http: builder.build()?,
            api_url,
            auth_key,
        })
    }

    /// 从环境变量读取密钥，未设置时返回 None
    pub fn from_env(
        api_url: Option<String>,
        timeout: Option<Duration>,
    ) -> TranslateResult<Option<Self>> {
        match std::env::var(CREDENTIAL_ENV) {
            Ok(key) if !key.trim().is_empty() => {
                Self::new(key.trim().to_string(), api_url, timeout).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// 免费密钥以 `:fx` 结尾
    pub fn default_api_url(auth_key: &str) -> &'static str {
        if auth_key.ends_with(":fx") {
            FREE_API_URL
        } else {
            PRO_API_URL
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v2/{}", self.api_url, path)
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.auth_key)
    }

    /// 非成功状态码转换为错误
    async fn check(response: Response) -> TranslateResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);

        Err(TranslateError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

/// 翻译接口使用大写语言代码
fn translation_lang(code: &str) -> String {
    code.to_uppercase()
}

/// 术语表接口只接受小写的主语言代码，如 `en-GB` → `en`
fn glossary_lang(code: &str) -> String {
    code.split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_lowercase()
}

/// 术语表条目以 TSV 格式上传，制表符与换行会被替换为空格
fn entries_tsv(entries: &BTreeMap<String, String>) -> String {
    let clean = |s: &str| s.replace(['\t', '\n', '\r'], " ").trim().to_string();
    entries
        .iter()
        .map(|(source, target)| format!("{}\t{}", clean(source), clean(target)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl TranslationProvider for DeeplClient {
    async fn list_glossaries(&self) -> TranslateResult<Vec<Glossary>> {
        debug!(url = %self.url("glossaries"), "listing glossaries");
        let response = self
            .http
            .get(self.url("glossaries"))
            .header("Authorization", self.auth_header())
            .send()
            .await?;
        let list: GlossaryList = Self::check(response).await?.json().await?;
        Ok(list.glossaries)
    }

    async fn get_usage(&self) -> TranslateResult<Usage> {
        let response = self
            .http
            .get(self.url("usage"))
            .header("Authorization", self.auth_header())
            .send()
            .await?;
        let usage: UsageResponse = Self::check(response).await?.json().await?;
        Ok(usage.into())
    }

    async fn translate_text(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        options: &TranslateOptions,
    ) -> TranslateResult<Vec<TextResult>> {
        let request = TranslateRequest {
            text: texts,
            source_lang: translation_lang(source_lang),
            target_lang: translation_lang(target_lang),
            formality: &options.formality,
            tag_handling: &options.tag_handling,
            ignore_tags: &options.ignore_tags,
            glossary_id: options.glossary_id.as_deref(),
        };
        debug!(
            target_lang,
            texts = texts.len(),
            glossary = ?options.glossary_id,
            "submitting translation batch"
        );

        let response = self
            .http
            .post(self.url("translate"))
            .header("Authorization", self.auth_header())
            .json(&request)
            .send()
            .await?;
        let body: TranslateResponse = Self::check(response).await?.json().await?;

        Ok(body
            .translations
            .into_iter()
            .map(|t| TextResult {
                text: t.text,
                detected_source_lang: t.detected_source_language,
            })
            .collect())
    }

    async fn create_glossary(
        &self,
        name: &str,
        source_lang: &str,
        target_lang: &str,
        entries: &BTreeMap<String, String>,
    ) -> TranslateResult<Glossary> {
        let request = CreateGlossaryRequest {
            name,
            source_lang: glossary_lang(source_lang),
            target_lang: glossary_lang(target_lang),
            entries: entries_tsv(entries),
            entries_format: "tsv",
        };
        debug!(name, entries = entries.len(), "creating glossary");

        let response = self
            .http
            .post(self.url("glossaries"))
            .header("Authorization", self.auth_header())
            .json(&request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_glossary(&self, glossary: &Glossary) -> TranslateResult<()> {
        debug!(id = %glossary.glossary_id, "deleting glossary");
        let response = self
            .http
            .delete(self.url(&format!("glossaries/{}", glossary.glossary_id)))
            .header("Authorization", self.auth_header())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_by_key_type() {
        assert_eq!(DeeplClient::default_api_url("abc:fx"), FREE_API_URL);
        assert_eq!(DeeplClient::default_api_url("abc"), PRO_API_URL);
    }

    #[test]
    fn test_custom_api_url_is_trimmed() {
        let client = DeeplClient::new(
            "key".to_string(),
            Some("http://localhost:3000/".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(client.api_url(), "http://localhost:3000");
        assert_eq!(client.url("usage"), "http://localhost:3000/v2/usage");
        assert_eq!(client.auth_header(), "DeepL-Auth-Key key");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(translation_lang("de"), "DE");
        assert_eq!(translation_lang("en-gb"), "EN-GB");
        assert_eq!(glossary_lang("EN-GB"), "en");
        assert_eq!(glossary_lang("pt_BR"), "pt");
        assert_eq!(glossary_lang("nl"), "nl");
    }

    #[test]
    fn test_entries_tsv() {
        let mut entries = BTreeMap::new();
        entries.insert("warehouse".to_string(), "Lager".to_string());
        entries.insert("bottle\tsize".to_string(), "Flaschen\ngröße".to_string());
        assert_eq!(
            entries_tsv(&entries),
            "bottle size\tFlaschen größe\nwarehouse\tLager"
        );
    }

    #[test]
    fn test_translate_request_body() {
        let texts = vec!["Hello <x>name</x>".to_string()];
        let options = TranslateOptions::new("prefer_less");
        let request = TranslateRequest {
            text: &texts,
            source_lang: translation_lang("en"),
            target_lang: translation_lang("de"),
            formality: &options.formality,
            tag_handling: &options.tag_handling,
            ignore_tags: &options.ignore_tags,
            glossary_id: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "text": ["Hello <x>name</x>"],
                "source_lang": "EN",
                "target_lang": "DE",
                "formality": "prefer_less",
                "tag_handling": "xml",
                "ignore_tags": ["i", "x"],
            })
        );
    }

    #[test]
    fn test_usage_response_mapping() {
        let response: UsageResponse =
            serde_json::from_str(r#"{"character_count": 180, "character_limit": 500000}"#)
                .unwrap();
        let usage = Usage::from(response);
        assert_eq!(
            usage.character,
            Some(UsageDetail {
                count: 180,
                limit: 500_000
            })
        );
        assert!(usage.document.is_none());
    }

    #[test]
    fn test_glossary_list_parsing() {
        let list: GlossaryList = serde_json::from_str(
            r#"{"glossaries": [{"glossary_id": "def3a26b", "name": "dotbuild_de",
                "ready": true, "source_lang": "en", "target_lang": "de",
                "creation_time": "2021-08-03T14:16:18.329Z", "entry_count": 1}]}"#,
        )
        .unwrap();
        assert_eq!(list.glossaries.len(), 1);
        assert_eq!(list.glossaries[0].name, "dotbuild_de");
        assert_eq!(list.glossaries[0].entry_count, 1);
    }
}
