// ============================================================================
// DotBuild - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用程序常量定义
//   - ✅ 文件名与环境变量约定
//   - ✅ 图标字符定义
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "DOTBUILD";

/// 源语言文件名，位于 i18n 目录下
pub const SOURCE_FILE: &str = "src.json";

/// 默认配置文件名
pub const CONFIG_FILE: &str = "dotbuild.toml";

/// 翻译服务凭据环境变量
pub const CREDENTIAL_ENV: &str = "DOTBUILD_TRANSLATOR_KEY";

/// 监听模式下源文件变化的防抖时间（毫秒）
pub const WATCH_DEBOUNCE_MS: u64 = 1000;

/// 像素风格图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 错误图标
    pub const ERROR: &str = "✗";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 超时图标
    pub const TIME: &str = "⧖";
    /// 汇总图标
    pub const SUMMARY: &str = "◈";
}
