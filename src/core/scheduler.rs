// ============================================================================
// DotBuild - 异步任务调度器
// ============================================================================
//
// 文件: src/core/scheduler.rs
// 职责: 通用异步任务调度和并发控制
// 边界:
//   - ✅ 异步任务调度和执行
//   - ✅ 并发数量控制
//   - ✅ 任务超时管理
//   - ✅ 执行结果聚合
//   - ❌ 不包含具体翻译逻辑
//   - ❌ 不包含 UI 显示逻辑
//   - ❌ 不包含配置管理
//
// ============================================================================

use crate::utils::logger::Logger;
use crate::tf;
use anyhow::Result;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

/// 任务执行结果枚举
#[derive(Debug, Clone)]
pub enum TaskResult<T> {
    /// 任务执行成功
    Success(T),
    /// 任务执行失败
    Failed(String),
    /// 任务执行超时
    Timeout,
    /// 任务被取消（panic 或运行时关闭）
    Cancelled,
}

impl<T> TaskResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskResult::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            TaskResult::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// 调度器配置
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// 最大并发任务数
    pub max_concurrency: usize,
    /// 任务超时时长（None 表示不限制）
    pub timeout: Option<Duration>,
    /// 是否显示详细日志
    pub verbose: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            timeout: None,
            verbose: false,
        }
    }
}

/// 异步任务调度器
#[derive(Debug, Clone)]
pub struct AsyncTaskScheduler {
    /// 调度器配置
    config: SchedulerConfig,
    /// 并发控制信号量
    semaphore: Arc<Semaphore>,
    /// 已完成任务计数
    completed_count: Arc<AtomicUsize>,
    /// 成功任务计数
    successful_count: Arc<AtomicUsize>,
}

impl AsyncTaskScheduler {
    /// 创建新的调度器
    pub fn new(config: SchedulerConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
        Self {
            config,
            semaphore,
            completed_count: Arc::new(AtomicUsize::new(0)),
            successful_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 执行单个异步任务
    pub async fn execute_task<T, F>(&self, task_id: &str, task: F) -> TaskResult<T>
    where
        F: Future<Output = Result<T>>,
    {
        // 获取信号量许可
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(_) => return TaskResult::Cancelled,
        };

        let start_time = Instant::now();
        if self.config.verbose {
            Logger::info(tf!("scheduler.task_start", task_id));
        }

        // 执行任务（可能有超时）
        let result = match self.config.timeout {
            Some(timeout_duration) => match timeout(timeout_duration, task).await {
                Ok(Ok(value)) => TaskResult::Success(value),
                Ok(Err(e)) => TaskResult::Failed(format!("{:#}", e)),
                Err(_) => TaskResult::Timeout,
            },
            None => match task.await {
                Ok(value) => TaskResult::Success(value),
                Err(e) => TaskResult::Failed(format!("{:#}", e)),
            },
        };

        self.completed_count.fetch_add(1, Ordering::SeqCst);
        if result.is_success() {
            self.successful_count.fetch_add(1, Ordering::SeqCst);
        }

        let elapsed = start_time.elapsed();
        debug!(task_id, elapsed_ms = elapsed.as_millis() as u64, "task finished");
        if self.config.verbose {
            match &result {
                TaskResult::Success(_) => {
                    Logger::info(tf!(
                        "scheduler.task_success",
                        task_id,
                        format!("{:.2}", elapsed.as_secs_f64())
                    ));
                }
                TaskResult::Failed(err) => {
                    Logger::error(tf!(
                        "scheduler.task_failed",
                        task_id,
                        format!("{:.2}", elapsed.as_secs_f64()),
                        err
                    ));
                }
                TaskResult::Timeout => {
                    Logger::warn(tf!(
                        "scheduler.task_timeout",
                        task_id,
                        format!("{:.2}", elapsed.as_secs_f64())
                    ));
                }
                TaskResult::Cancelled => {
                    Logger::warn(tf!("scheduler.task_cancelled", task_id));
                }
            }
        }

        result
    }

    /// 并发执行多个任务，按提交顺序返回每个任务的结果
    pub async fn execute_batch<T, F>(&self, tasks: Vec<(String, F)>) -> Vec<(String, TaskResult<T>)>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        if tasks.is_empty() {
            return Vec::new();
        }

        if self.config.verbose {
            Logger::info(tf!("scheduler.batch_start", tasks.len()));
        }

        self.completed_count.store(0, Ordering::SeqCst);
        self.successful_count.store(0, Ordering::SeqCst);

        // 创建任务句柄
        let mut handles: Vec<(String, JoinHandle<TaskResult<T>>)> = Vec::new();
        for (task_id, task) in tasks {
            let scheduler = self.clone();
            let id = task_id.clone();
            let handle = tokio::spawn(async move { scheduler.execute_task(&id, task).await });
            handles.push((task_id, handle));
        }

        // 等待所有任务完成
        let mut results = Vec::with_capacity(handles.len());
        for (task_id, handle) in handles {
            match handle.await {
                Ok(result) => results.push((task_id, result)),
                Err(e) => {
                    Logger::error(tf!("scheduler.task_join_error", &task_id, e));
                    results.push((task_id, TaskResult::Cancelled));
                }
            }
        }

        if self.config.verbose {
            let (completed, successful) = self.get_progress();
            Logger::info(tf!("scheduler.batch_complete", successful, completed));
        }

        results
    }

    /// 获取执行统计 (completed, successful)
    pub fn get_progress(&self) -> (usize, usize) {
        (
            self.completed_count.load(Ordering::SeqCst),
            self.successful_count.load(Ordering::SeqCst),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_batch_collects_results_in_order() {
        let scheduler = AsyncTaskScheduler::new(SchedulerConfig::default());
        let tasks: Vec<(String, _)> = (0..4)
            .map(|i| {
                let task = async move {
                    if i == 2 {
                        anyhow::bail!("task {} broke", i);
                    }
                    Ok::<_, anyhow::Error>(i * 10)
                };
                (format!("task-{}", i), task)
            })
            .collect();

        let results = scheduler.execute_batch(tasks).await;
        let ids: Vec<_> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["task-0", "task-1", "task-2", "task-3"]);
        assert_eq!(results[1].1.success(), Some(&10));
        assert!(matches!(&results[2].1, TaskResult::Failed(msg) if msg.contains("broke")));
        assert_eq!(scheduler.get_progress(), (4, 3));
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let scheduler = AsyncTaskScheduler::new(SchedulerConfig {
            timeout: Some(Duration::from_millis(10)),
            ..SchedulerConfig::default()
        });
        let result: TaskResult<()> = scheduler
            .execute_task("slow", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, anyhow::Error>(())
            })
            .await;
        assert!(matches!(result, TaskResult::Timeout));
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let scheduler = AsyncTaskScheduler::new(SchedulerConfig {
            max_concurrency: 2,
            ..SchedulerConfig::default()
        });
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<(String, _)> = (0..6)
            .map(|i| {
                let running = Arc::clone(&running);
                let peak = Arc::clone(&peak);
                let task = async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, anyhow::Error>(())
                };
                (format!("task-{}", i), task)
            })
            .collect();

        let results = scheduler.execute_batch(tasks).await;
        assert!(results.iter().all(|(_, r)| r.is_success()));
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
