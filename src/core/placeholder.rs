// ============================================================================
// DotBuild - 占位符保护与还原
// ============================================================================
//
// 文件: src/core/placeholder.rs
// 职责: 翻译前后的文本预处理与后处理
// 边界:
//   - ✅ {{name}} 占位符与 <x>name</x> 标签互转
//   - ✅ <i> 标签剥离
//   - ✅ HTML 实体解码
//   - ❌ 不应包含翻译服务调用
//   - ❌ 不应包含文档遍历逻辑
//
// ============================================================================

use regex::Regex;
use std::sync::LazyLock;

/// 翻译服务不翻译的占位符标签
pub const PLACEHOLDER_TAG: &str = "x";

/// 仅用于标注、翻译后剥离的标签
pub const ANNOTATION_TAG: &str = "i";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w*)\}\}").expect("valid placeholder pattern"));

static PLACEHOLDER_TAGGED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<x>(\w*)</x>").expect("valid placeholder tag pattern"));

static ANNOTATION_TAGGED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<i>([^<]*)</i>").expect("valid annotation tag pattern"));

/// 把 `{{name}}` 改写为 `<x>name</x>`，让翻译服务原样保留
pub fn protect(text: &str) -> String {
    PLACEHOLDER.replace_all(text, "<x>${1}</x>").into_owned()
}

/// 还原翻译结果：`<x>name</x>` 还原为 `{{name}}`，剥离 `<i>` 标签，
/// 并解码翻译服务转义出来的 HTML 实体
pub fn restore(text: &str) -> String {
    let text = PLACEHOLDER_TAGGED.replace_all(text, "{{${1}}}");
    let text = ANNOTATION_TAGGED.replace_all(&text, "${1}");
    html_escape::decode_html_entities(&text).into_owned()
}

/// 文本长度（按字符计），用于统计翻译量
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_wraps_placeholders() {
        assert_eq!(protect("Hello {{name}}!"), "Hello <x>name</x>!");
        assert_eq!(
            protect("{{count}} of {{total}}"),
            "<x>count</x> of <x>total</x>"
        );
        assert_eq!(protect("{{}}"), "<x></x>");
        assert_eq!(protect("no placeholders"), "no placeholders");
        assert_eq!(protect("{{with space}}"), "{{with space}}");
    }

    #[test]
    fn test_restore_placeholders_and_annotations() {
        assert_eq!(restore("Hallo <x>name</x>!"), "Hallo {{name}}!");
        assert_eq!(restore("<i>Bitstillery</i> rocks"), "Bitstillery rocks");
        assert_eq!(restore("<x></x>"), "{{}}");
    }

    #[test]
    fn test_restore_decodes_entities() {
        assert_eq!(restore("a &lt;b&gt; &amp; c"), "a <b> & c");
        assert_eq!(restore("it&#39;s"), "it's");
        assert_eq!(restore("&quot;<x>n</x>&quot;"), "\"{{n}}\"");
    }

    #[test]
    fn test_round_trip_keeps_placeholder() {
        let source = "Welcome back, {{user}}. You have {{count}} messages";
        assert_eq!(restore(&protect(source)), source);
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("ünï"), 3);
    }
}
