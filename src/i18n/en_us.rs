// ============================================================================
// DotBuild - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English translation content definition
// 边界:
//   - ✅ English translation strings definition
//   - ✅ Translation key-value pairs maintenance
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Translator session
    ("translator.initializing", "Initializing translator..."),
    (
        "translator.limit_exceeded",
        "Translation provider usage limit reached",
    ),
    ("translator.usage_characters", "{} of {} characters ({}%)"),
    ("translator.usage_documents", "{} of {} documents"),
    // Translate command
    ("translate.start", "Syncing languages: {}"),
    (
        "translate.no_languages",
        "No target languages: set [i18n].languages in the config file or pass --target",
    ),
    (
        "translate.no_credential",
        "{} is not set, only languages without pending translations can be synced",
    ),
    ("translate.read_source_failed", "Failed to read source file: {}"),
    ("translate.remove_obsolete", "[{}] remove obsolete key: {}"),
    ("translate.updated_key", "[{}] {}: {}"),
    ("translate.failed_languages", "Failed languages: {}"),
    ("translate.watch_start", "Watching {} for changes (Ctrl-C to stop)"),
    ("translate.watch_changed", "Source changed: {}"),
    ("translate.watch_stopped", "Stopped watching"),
    (
        "translate.watch_signal_failed",
        "Failed to listen for the interrupt signal",
    ),
    ("translate.watch_failed", "Failed to watch {}"),
    ("translate.watch_error", "File watcher error: {}"),
    // Summary
    ("summary.title", "Translation summary"),
    (
        "summary.entries",
        "translate i18n entries: (update: {}/{}) (total: {} keys/{} chars)",
    ),
    ("summary.language_success", "updated {} keys ({} chars) of {}"),
    ("summary.language_failed", "failed: {}"),
    ("summary.language_timeout", "timed out"),
    ("summary.language_cancelled", "cancelled"),
    // Glossary command
    ("glossary.none_found", "No glossary files found in {}"),
    ("glossary.remove_stale", "Removing glossary {} ({})"),
    ("glossary.dry_run_remove", "Would remove glossary {} ({})"),
    ("glossary.skip_empty", "Skipping empty glossary: {}"),
    ("glossary.create", "Creating glossary {} with {} entries"),
    (
        "glossary.dry_run_create",
        "Would create glossary {} with {} entries",
    ),
    ("glossary.reloaded", "Glossaries loaded: {}"),
    ("glossary.dry_run", "Dry run: the provider is not modified"),
    (
        "glossary.done",
        "Glossaries updated: {} removed, {} created, {} skipped",
    ),
    // Usage command
    ("usage.no_glossaries", "No glossaries registered"),
    ("usage.glossary", "Glossary {} ({}): {} → {}, {} entries"),
    // Scheduler
    ("scheduler.task_start", "[{}] started"),
    ("scheduler.task_success", "[{}] finished in {}s"),
    ("scheduler.task_failed", "[{}] failed after {}s: {}"),
    ("scheduler.task_timeout", "[{}] timed out after {}s"),
    ("scheduler.task_cancelled", "[{}] cancelled"),
    ("scheduler.task_join_error", "[{}] task aborted: {}"),
    ("scheduler.batch_start", "Running {} tasks"),
    ("scheduler.batch_complete", "{}/{} tasks succeeded"),
    // Config
    ("config.load_failed", "Failed to load config file: {}"),
    // Init command
    ("init.start", "Initializing DotBuild configuration..."),
    ("init.config_exists", "Config file already exists: {}"),
    ("init.use_force_hint", "Use --force to overwrite it"),
    ("init.config_created", "Config file created: {}"),
    ("init.create_failed", "Failed to create config file: {}"),
    (
        "init.next_steps",
        "Edit [i18n].languages and export DOTBUILD_TRANSLATOR_KEY, then run `dotbuild translate`",
    ),
];
