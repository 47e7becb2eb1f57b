// ============================================================================
// DotBuild - 本地化文档模型
// ============================================================================
//
// 文件: src/models/document.rs
// 职责: 嵌套 i18n 文档的数据结构与路径寻址
// 边界:
//   - ✅ 文档树定义 (叶子 / 子树)
//   - ✅ 深度优先遍历
//   - ✅ 键路径读取、创建、删除
//   - ✅ JSON 解析与有序格式化输出
//   - ❌ 不应包含差异比对逻辑
//   - ❌ 不应包含翻译服务调用
//   - ❌ 不应包含文件读写
//
// ============================================================================

use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 子树类型，键始终按字母序排列
pub type Tree = BTreeMap<String, Document>;

/// 键路径：从根节点到叶子父节点的键序列
pub type KeyPath = Vec<String>;

/// 本地化文档节点
///
/// 叶子是可翻译的字符串，内部节点是子树。JSON 中除字符串与对象以外的
/// 值都视为格式错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    /// 可翻译字符串
    Leaf(String),
    /// 子树
    Node(Tree),
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// 创建空子树
    pub fn empty() -> Self {
        Document::Node(Tree::new())
    }

    /// 从 JSON 文本解析文档，根节点必须是对象
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        let document: Document = serde_json::from_str(content)?;
        if document.is_leaf() {
            return Err(serde::de::Error::custom(
                "i18n document root must be a JSON object",
            ));
        }
        Ok(document)
    }

    /// 格式化为 4 空格缩进的 JSON 文本（键在每一层都已排序）
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;

        let mut text = String::from_utf8(buf).map_err(serde_json::Error::custom)?;
        text.push('\n');
        Ok(text)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Document::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Document::Leaf(text) => Some(text),
            Document::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Tree> {
        match self {
            Document::Node(tree) => Some(tree),
            Document::Leaf(_) => None,
        }
    }

    /// 深度优先遍历所有叶子
    ///
    /// 对每个叶子调用 `visit(父节点, 键, 键路径)`。键路径在遍历过程中原地
    /// 压入/弹出，调用方如需保留必须自行复制。
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Tree, &str, &[String]),
    {
        if let Document::Node(tree) = self {
            let mut path = KeyPath::new();
            walk_tree(tree, &mut path, &mut visit);
        }
    }

    /// 统计叶子数量
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_, _, _| count += 1);
        count
    }

    /// 按键路径读取节点，遇到缺失的键或提前遇到叶子时返回 None
    pub fn get_at_path(&self, path: &[String]) -> Option<&Document> {
        let mut current = self;
        for key in path {
            current = match current {
                Document::Node(tree) => tree.get(key)?,
                Document::Leaf(_) => return None,
            };
        }
        Some(current)
    }

    /// 读取 `path` 下名为 `key` 的叶子文本
    pub fn leaf_at(&self, path: &[String], key: &str) -> Option<&str> {
        self.get_at_path(path)?.as_node()?.get(key)?.as_leaf()
    }

    /// 按键路径获取可变子树
    ///
    /// `create` 为 true 时，缺失的中间节点会补成空子树，挡路的叶子也会被
    /// 替换为空子树；否则遇到缺失直接返回 None。
    pub fn node_at_path_mut(&mut self, path: &[String], create: bool) -> Option<&mut Tree> {
        if create && self.is_leaf() {
            *self = Document::empty();
        }

        let mut current: &mut Document = self;
        for key in path {
            let tree = match current {
                Document::Node(tree) => tree,
                Document::Leaf(_) => return None,
            };
            current = if create {
                let entry = tree.entry(key.clone()).or_insert_with(Document::empty);
                if entry.is_leaf() {
                    *entry = Document::empty();
                }
                entry
            } else {
                tree.get_mut(key)?
            };
        }

        match current {
            Document::Node(tree) => Some(tree),
            Document::Leaf(_) => None,
        }
    }

    /// 在 `path` 下写入叶子，必要时创建中间子树
    pub fn set_leaf(&mut self, path: &[String], key: &str, value: String) {
        if let Some(tree) = self.node_at_path_mut(path, true) {
            tree.insert(key.to_string(), Document::Leaf(value));
        }
    }

    /// 删除 `path` 下的 `key`，并剪除因此变空的子树
    pub fn remove_at(&mut self, path: &[String], key: &str) -> Option<Document> {
        match self {
            Document::Node(tree) => remove_from(tree, path, key),
            Document::Leaf(_) => None,
        }
    }
}

fn walk_tree<F>(tree: &Tree, path: &mut KeyPath, visit: &mut F)
where
    F: FnMut(&Tree, &str, &[String]),
{
    for (key, value) in tree {
        match value {
            Document::Node(child) => {
                path.push(key.clone());
                walk_tree(child, path, visit);
                path.pop();
            }
            Document::Leaf(_) => visit(tree, key, path),
        }
    }
}

fn remove_from(tree: &mut Tree, path: &[String], key: &str) -> Option<Document> {
    match path.split_first() {
        None => tree.remove(key),
        Some((head, rest)) => {
            let child = match tree.get_mut(head)? {
                Document::Node(child) => child,
                Document::Leaf(_) => return None,
            };
            let removed = remove_from(child, rest, key);
            if removed.is_some() && child.is_empty() {
                tree.remove(head);
            }
            removed
        }
    }
}

/// 以点号拼接键路径与键，用于日志输出
pub fn dotted(path: &[String], key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path.join("."), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(keys: &[&str]) -> KeyPath {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn doc(json: &str) -> Document {
        Document::from_json_str(json).unwrap()
    }

    #[test]
    fn test_walk_visits_leaves_with_parent_path() {
        let document = doc(r#"{"b": {"c": "1", "d": {"e": "2"}}, "a": "0"}"#);
        let mut visited = Vec::new();
        document.walk(|parent, key, key_path| {
            let value = parent[key].as_leaf().unwrap().to_string();
            visited.push((key_path.to_vec(), key.to_string(), value));
        });

        assert_eq!(
            visited,
            vec![
                (path(&[]), "a".to_string(), "0".to_string()),
                (path(&["b"]), "c".to_string(), "1".to_string()),
                (path(&["b", "d"]), "e".to_string(), "2".to_string()),
            ]
        );
        assert_eq!(document.leaf_count(), 3);
    }

    #[test]
    fn test_get_at_path_stops_at_missing_key() {
        let document = doc(r#"{"a": {"b": "x"}}"#);
        assert!(document.get_at_path(&path(&["a"])).unwrap().as_node().is_some());
        assert!(document.get_at_path(&path(&["missing", "b"])).is_none());
        assert!(document.get_at_path(&path(&["a", "b", "c"])).is_none());
        assert_eq!(document.leaf_at(&path(&["a"]), "b"), Some("x"));
        assert_eq!(document.leaf_at(&path(&[]), "a"), None);
    }

    #[test]
    fn test_node_at_path_mut_creates_intermediate_nodes() {
        let mut document = doc(r#"{"a": "leaf"}"#);
        assert!(document.node_at_path_mut(&path(&["x", "y"]), false).is_none());

        document.set_leaf(&path(&["x", "y"]), "z", "value".to_string());
        assert_eq!(document.leaf_at(&path(&["x", "y"]), "z"), Some("value"));

        // 挡路的叶子被替换成子树
        document.set_leaf(&path(&["a"]), "b", "nested".to_string());
        assert_eq!(document.leaf_at(&path(&["a"]), "b"), Some("nested"));
    }

    #[test]
    fn test_remove_at_prunes_empty_subtrees() {
        let mut document = doc(r#"{"g": {"h": {"k": "v"}}, "keep": "x"}"#);
        let removed = document.remove_at(&path(&["g", "h"]), "k");

        assert_eq!(removed, Some(Document::Leaf("v".to_string())));
        assert_eq!(document, doc(r#"{"keep": "x"}"#));
        assert!(document.remove_at(&path(&["g"]), "k").is_none());
    }

    #[test]
    fn test_pretty_json_is_sorted_and_indented() {
        let document = doc(r#"{"z": "1", "a": {"y": "2", "b": "3"}}"#);
        let text = document.to_pretty_json().unwrap();
        let expected = "{\n    \"a\": {\n        \"b\": \"3\",\n        \"y\": \"2\"\n    },\n    \"z\": \"1\"\n}\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_pretty_json_keeps_non_ascii_text() {
        let document = doc(r#"{"bye": "Tschüss", "hi": "こんにちは"}"#);
        let text = document.to_pretty_json().unwrap();
        assert!(text.contains("\"Tschüss\""));
        assert!(text.contains("\"こんにちは\""));
        assert_eq!(Document::from_json_str(&text).unwrap(), document);
    }

    #[test]
    fn test_parse_rejects_non_string_values() {
        assert!(Document::from_json_str(r#"{"a": 1}"#).is_err());
        assert!(Document::from_json_str(r#"{"a": ["x"]}"#).is_err());
        assert!(Document::from_json_str(r#""root""#).is_err());
        assert!(Document::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_dotted_key() {
        assert_eq!(dotted(&path(&[]), "a"), "a");
        assert_eq!(dotted(&path(&["a", "b"]), "c"), "a.b.c");
    }
}
