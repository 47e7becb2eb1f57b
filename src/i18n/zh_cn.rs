// ============================================================================
// DotBuild - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文翻译内容定义
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ✅ 翻译键值对维护
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 翻译会话
    ("translator.initializing", "正在初始化翻译服务..."),
    ("translator.limit_exceeded", "翻译服务用量已达上限"),
    ("translator.usage_characters", "已用 {} / {} 字符 ({}%)"),
    ("translator.usage_documents", "已用 {} / {} 文档"),
    // 翻译命令
    ("translate.start", "开始同步语言: {}"),
    (
        "translate.no_languages",
        "没有目标语言：请在配置文件中设置 [i18n].languages 或使用 --target",
    ),
    (
        "translate.no_credential",
        "未设置 {}，只能同步无需翻译的语言",
    ),
    ("translate.read_source_failed", "读取源文件失败: {}"),
    ("translate.remove_obsolete", "[{}] 删除过期键: {}"),
    ("translate.updated_key", "[{}] {}: {}"),
    ("translate.failed_languages", "同步失败的语言: {}"),
    ("translate.watch_start", "正在监听 {} 的变化 (Ctrl-C 退出)"),
    ("translate.watch_changed", "源文件已变化: {}"),
    ("translate.watch_stopped", "已停止监听"),
    ("translate.watch_signal_failed", "无法监听中断信号"),
    ("translate.watch_failed", "无法监听 {}"),
    ("translate.watch_error", "文件监听出错: {}"),
    // 汇总
    ("summary.title", "翻译汇总"),
    (
        "summary.entries",
        "translate i18n entries: (update: {}/{}) (total: {} keys/{} chars)",
    ),
    ("summary.language_success", "已翻译 {} 个键 ({} 字符)，共 {} 个键"),
    ("summary.language_failed", "失败: {}"),
    ("summary.language_timeout", "超时"),
    ("summary.language_cancelled", "已取消"),
    // 术语表命令
    ("glossary.none_found", "在 {} 中没有找到术语表文件"),
    ("glossary.remove_stale", "删除术语表 {} ({})"),
    ("glossary.dry_run_remove", "将删除术语表 {} ({})"),
    ("glossary.skip_empty", "跳过空术语表: {}"),
    ("glossary.create", "创建术语表 {}，共 {} 条"),
    ("glossary.dry_run_create", "将创建术语表 {}，共 {} 条"),
    ("glossary.reloaded", "已加载术语表: {} 个"),
    ("glossary.dry_run", "预演模式：不会修改翻译服务中的术语表"),
    ("glossary.done", "术语表已更新：删除 {} 个，创建 {} 个，跳过 {} 个"),
    // 用量命令
    ("usage.no_glossaries", "没有已注册的术语表"),
    ("usage.glossary", "术语表 {} ({}): {} → {}，共 {} 条"),
    // 调度器
    ("scheduler.task_start", "[{}] 开始"),
    ("scheduler.task_success", "[{}] 完成，耗时 {}s"),
    ("scheduler.task_failed", "[{}] 失败，耗时 {}s: {}"),
    ("scheduler.task_timeout", "[{}] 超时，耗时 {}s"),
    ("scheduler.task_cancelled", "[{}] 已取消"),
    ("scheduler.task_join_error", "[{}] 任务中止: {}"),
    ("scheduler.batch_start", "开始执行 {} 个任务"),
    ("scheduler.batch_complete", "{}/{} 个任务成功"),
    // 配置
    ("config.load_failed", "加载配置文件失败: {}"),
    // 初始化命令
    ("init.start", "开始初始化 DotBuild 配置..."),
    ("init.config_exists", "配置文件已存在: {}"),
    ("init.use_force_hint", "使用 --force 覆盖已存在的配置文件"),
    ("init.config_created", "配置文件已创建: {}"),
    ("init.create_failed", "创建配置文件失败: {}"),
    (
        "init.next_steps",
        "编辑 [i18n].languages 并设置 DOTBUILD_TRANSLATOR_KEY，然后运行 `dotbuild translate`",
    ),
];
