// ============================================================================
// DotBuild - 文档差异比对
// ============================================================================
//
// 文件: src/core/diff.rs
// 职责: 计算源文档与目标文档之间的待处理动作
// 边界:
//   - ✅ 过期键检测 (缺失 / 类型不一致)
//   - ✅ 待翻译键检测 (覆盖 / 缺失 / 缓存变化)
//   - ✅ 翻译量统计
//   - ✅ 过期键删除
//   - ❌ 不应包含翻译服务调用
//   - ❌ 不应包含文件读写
//   - ❌ 不应包含日志输出
//
// ============================================================================

use serde::Serialize;
use std::iter::Sum;
use std::ops::AddAssign;

use crate::core::placeholder;
use crate::models::document::{dotted, Document, KeyPath};

/// 待删除的过期键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveAction {
    pub path: KeyPath,
    pub key: String,
}

/// 待翻译的键，`prepared` 为已保护占位符的源文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAction {
    pub path: KeyPath,
    pub key: String,
    pub prepared: String,
}

impl RemoveAction {
    pub fn dotted(&self) -> String {
        dotted(&self.path, &self.key)
    }
}

impl UpdateAction {
    pub fn dotted(&self) -> String {
        dotted(&self.path, &self.key)
    }
}

/// 一次同步运行中的待处理动作集合
#[derive(Debug, Clone, Default)]
pub struct PendingActions {
    /// 过期键，按目标文档遍历顺序
    pub remove: Vec<RemoveAction>,
    /// 待翻译键，按源文档遍历顺序
    pub update: Vec<UpdateAction>,
}

impl PendingActions {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.update.is_empty()
    }
}

/// 键数与字符数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Volume {
    pub keys: usize,
    pub chars: usize,
}

impl Volume {
    fn count(&mut self, chars: usize) {
        self.keys += 1;
        self.chars += chars;
    }
}

impl AddAssign for Volume {
    fn add_assign(&mut self, other: Self) {
        self.keys += other.keys;
        self.chars += other.chars;
    }
}

/// 翻译量统计：`total` 为全部键，`costs` 为实际提交给翻译服务的键
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub total: Volume,
    pub costs: Volume,
}

impl AddAssign for SyncStats {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.costs += other.costs;
    }
}

impl Sum for SyncStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, stats| {
            acc += stats;
            acc
        })
    }
}

/// 比对结果
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    /// 已删除过期键的目标文档，翻译结果将写入其中
    pub target: Document,
    pub actions: PendingActions,
    pub stats: SyncStats,
}

/// 比对源文档、目标文档与缓存
///
/// 目标文档不存在或 `overwrite` 为 true 时，以源文档副本作为蓝本，跳过
/// 过期键检测；蓝本中的文本仍是源语言，所以此时所有叶子都需要翻译。
/// 目标中的空字符串视为缺失。
/// 过期键在返回前已经从目标文档中删除。
pub fn diff(
    source: &Document,
    target: Option<Document>,
    cache: &Document,
    overwrite: bool,
) -> DiffOutcome {
    let fresh = target.is_none();
    let (mut target, remove) = match target {
        Some(target) if !overwrite => {
            let remove = find_obsolete(source, &target);
            (target, remove)
        }
        _ => (source.clone(), Vec::new()),
    };

    let mut stats = SyncStats::default();
    let mut update = Vec::new();

    source.walk(|parent, key, path| {
        let Some(text) = parent.get(key).and_then(Document::as_leaf) else {
            return;
        };

        let prepared = placeholder::protect(text);
        let chars = placeholder::char_len(&prepared);
        stats.total.count(chars);

        let needs_translation = overwrite
            || fresh
            || target.leaf_at(path, key).map_or(true, str::is_empty)
            || cache.leaf_at(path, key) != Some(text);

        if needs_translation {
            stats.costs.count(chars);
            update.push(UpdateAction {
                path: path.to_vec(),
                key: key.to_string(),
                prepared,
            });
        }
    });

    for action in &remove {
        target.remove_at(&action.path, &action.key);
    }

    DiffOutcome {
        target,
        actions: PendingActions { remove, update },
        stats,
    }
}

/// 找出目标文档中在源文档里不存在、或类型不一致的叶子
fn find_obsolete(source: &Document, target: &Document) -> Vec<RemoveAction> {
    let mut remove = Vec::new();
    target.walk(|_, key, path| {
        let counterpart = source
            .get_at_path(path)
            .and_then(Document::as_node)
            .and_then(|tree| tree.get(key));

        if !matches!(counterpart, Some(Document::Leaf(_))) {
            remove.push(RemoveAction {
                path: path.to_vec(),
                key: key.to_string(),
            });
        }
    });
    remove
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        Document::from_json_str(json).unwrap()
    }

    fn dotted_updates(actions: &PendingActions) -> Vec<String> {
        actions.update.iter().map(UpdateAction::dotted).collect()
    }

    fn dotted_removals(actions: &PendingActions) -> Vec<String> {
        actions.remove.iter().map(RemoveAction::dotted).collect()
    }

    #[test]
    fn test_missing_target_uses_source_as_blueprint() {
        let source = doc(r#"{"a": "Hello", "b": {"c": "Bye {{name}}"}}"#);
        let outcome = diff(&source, None, &source, false);

        assert!(outcome.actions.remove.is_empty());
        assert_eq!(dotted_updates(&outcome.actions), vec!["a", "b.c"]);
        assert_eq!(outcome.target, source);
        assert_eq!(outcome.stats.total.keys, 2);
        assert_eq!(outcome.stats.costs, outcome.stats.total);
    }

    #[test]
    fn test_empty_cache_translates_everything_for_new_target() {
        let source = doc(r#"{"a": "Hello", "b": {"c": "Bye {{name}}"}}"#);
        let outcome = diff(&source, None, &Document::empty(), false);

        assert_eq!(dotted_updates(&outcome.actions), vec!["a", "b.c"]);
        assert_eq!(outcome.actions.update[1].prepared, "Bye <x>name</x>");
        assert_eq!(
            outcome.stats.costs,
            Volume {
                keys: 2,
                chars: 5 + 15
            }
        );
        assert_eq!(outcome.stats.total, outcome.stats.costs);
    }

    #[test]
    fn test_up_to_date_target_yields_no_actions() {
        let source = doc(r#"{"a": "Hello", "b": {"c": "Bye"}}"#);
        let target = doc(r#"{"a": "Hallo", "b": {"c": "Tschüss"}}"#);
        let outcome = diff(&source, Some(target.clone()), &source, false);

        assert!(outcome.actions.is_empty());
        assert_eq!(outcome.target, target);
        assert_eq!(outcome.stats.total.keys, 2);
        assert_eq!(outcome.stats.costs.keys, 0);
    }

    #[test]
    fn test_schema_drift_leaf_to_subtree_is_obsolete() {
        let source = doc(r#"{"a": {"b": "x"}}"#);
        let target = doc(r#"{"a": "y"}"#);
        let outcome = diff(&source, Some(target), &source, false);

        assert_eq!(dotted_removals(&outcome.actions), vec!["a"]);
        assert_eq!(dotted_updates(&outcome.actions), vec!["a.b"]);
        assert_eq!(outcome.target, Document::empty());
    }

    #[test]
    fn test_schema_drift_subtree_to_leaf_is_obsolete() {
        let source = doc(r#"{"a": "x"}"#);
        let target = doc(r#"{"a": {"b": "y"}}"#);
        let outcome = diff(&source, Some(target), &source, false);

        assert_eq!(dotted_removals(&outcome.actions), vec!["a.b"]);
        assert_eq!(dotted_updates(&outcome.actions), vec!["a"]);
    }

    #[test]
    fn test_obsolete_keys_are_removed_from_target() {
        let source = doc(r#"{"keep": "x"}"#);
        let target = doc(r#"{"keep": "X", "gone": "G", "group": {"old": "O"}}"#);
        let outcome = diff(&source, Some(target), &source, false);

        assert_eq!(dotted_removals(&outcome.actions), vec!["gone", "group.old"]);
        assert!(outcome.actions.update.is_empty());
        assert_eq!(outcome.target, doc(r#"{"keep": "X"}"#));
    }

    #[test]
    fn test_changed_source_value_is_retranslated() {
        let cache = doc(r#"{"p": "old", "q": "same"}"#);
        let source = doc(r#"{"p": "new", "q": "same"}"#);
        let target = doc(r#"{"p": "alt", "q": "gleich"}"#);
        let outcome = diff(&source, Some(target), &cache, false);

        assert_eq!(dotted_updates(&outcome.actions), vec!["p"]);
        assert_eq!(outcome.stats.costs, Volume { keys: 1, chars: 3 });
    }

    #[test]
    fn test_missing_target_leaf_is_translated() {
        let source = doc(r#"{"a": "x", "n": {"b": "y"}}"#);
        let target = doc(r#"{"a": "X"}"#);
        let outcome = diff(&source, Some(target), &source, false);

        assert!(outcome.actions.remove.is_empty());
        assert_eq!(dotted_updates(&outcome.actions), vec!["n.b"]);
    }

    #[test]
    fn test_empty_target_value_is_translated() {
        let source = doc(r#"{"a": "x", "n": {"b": "y"}}"#);
        let target = doc(r#"{"a": "", "n": {"b": "Y"}}"#);
        let outcome = diff(&source, Some(target), &source, false);

        assert!(outcome.actions.remove.is_empty());
        assert_eq!(dotted_updates(&outcome.actions), vec!["a"]);
        assert_eq!(outcome.stats.costs, Volume { keys: 1, chars: 1 });
    }

    #[test]
    fn test_overwrite_translates_all_and_skips_obsolete_scan() {
        let source = doc(r#"{"a": "x", "b": "y"}"#);
        let target = doc(r#"{"a": "X", "stale": "S"}"#);
        let outcome = diff(&source, Some(target), &source, true);

        assert!(outcome.actions.remove.is_empty());
        assert_eq!(dotted_updates(&outcome.actions), vec!["a", "b"]);
        assert_eq!(outcome.target, source);
    }

    #[test]
    fn test_deleted_source_key_in_cache_is_not_reported() {
        let cache = doc(r#"{"a": "x", "deleted": "d"}"#);
        let source = doc(r#"{"a": "x"}"#);
        let target = doc(r#"{"a": "X"}"#);
        let outcome = diff(&source, Some(target), &cache, false);

        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn test_stats_sum_field_by_field() {
        let first = SyncStats {
            total: Volume { keys: 3, chars: 30 },
            costs: Volume { keys: 1, chars: 10 },
        };
        let second = SyncStats {
            total: Volume { keys: 2, chars: 20 },
            costs: Volume { keys: 2, chars: 20 },
        };
        let sum: SyncStats = vec![first, second].into_iter().sum();
        assert_eq!(sum.total, Volume { keys: 5, chars: 50 });
        assert_eq!(sum.costs, Volume { keys: 3, chars: 30 });
    }
}
