// ============================================================================
// DotBuild - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心业务逻辑模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含 UI 相关逻辑
//
// ============================================================================

pub mod deepl;
pub mod diff;
pub mod error;
pub mod glossary;
pub mod placeholder;
pub mod provider;
pub mod scheduler;
pub mod translator;

// 重新导出常用类型
pub use deepl::DeeplClient;
pub use error::TranslateError;
pub use provider::TranslationProvider;
pub use scheduler::SchedulerConfig;
pub use translator::Translator;
