// ============================================================================
// DotBuild - 翻译错误类型
// ============================================================================
//
// 文件: src/core/error.rs
// 职责: 翻译同步过程中的领域错误定义
// 边界:
//   - ✅ 错误枚举与错误信息
//   - ❌ 不应包含错误处理策略
//   - ❌ 不应包含日志输出
//
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// 翻译同步过程中可能出现的错误
#[derive(Error, Debug)]
pub enum TranslateError {
    /// 需要调用翻译服务但没有配置密钥
    #[error("translator key required for auto-translate (set the {var} environment variable)")]
    MissingCredential { var: &'static str },

    /// 翻译服务返回非成功状态码
    #[error("translation provider responded with {status}: {message}")]
    Provider { status: u16, message: String },

    /// 网络请求失败
    #[error("translation provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 翻译结果数量与提交数量不一致
    #[error("translation provider returned {actual} results for {expected} texts")]
    ResultCountMismatch { expected: usize, actual: usize },

    /// 文件读写失败
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// i18n 文档解析失败
    #[error("failed to parse i18n document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 术语表文件不是扁平的字符串映射
    #[error("invalid glossary file {path}: {source}")]
    InvalidGlossary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 术语表文件匹配模式无效
    #[error("invalid glossary pattern: {0}")]
    GlossaryPattern(#[from] glob::PatternError),
}

impl TranslateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TranslateError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        TranslateError::Parse {
            path: path.into(),
            source,
        }
    }
}

pub type TranslateResult<T> = std::result::Result<T, TranslateError>;
