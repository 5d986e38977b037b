use std::time::Instant;
use tracing::{error, info};

use crate::RemoveResult;
use crate::pip::PipCommand;

/// 移除器配置
#[derive(Debug, Clone, Default)]
pub struct RemoveConfig {
    /// 要使用的 pip 命令
    pub pip: PipCommand,
    /// 只报告将要移除的包，不实际调用 pip
    pub dry_run: bool,
}

/// 单个包的最终移除状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalStatus {
    Removed,
    Failed(String),
}

/// 移除进度信息
#[derive(Debug, Clone)]
pub struct RemoveProgress {
    pub package: String,
    /// 当前包在计划中的序号（从1开始）
    pub index: usize,
    pub total: usize,
    /// 到目前为止成功移除的数量
    pub removed_so_far: usize,
    pub status: RemovalStatus,
}

/// 包移除器
pub struct PackageRemover {
    config: RemoveConfig,
}

impl PackageRemover {
    /// 创建新的移除器
    pub fn new(config: RemoveConfig) -> Self {
        Self { config }
    }

    /// 按计划顺序移除包
    pub fn remove_packages(&self, packages: &[String]) -> RemoveResult {
        self.remove_packages_with_progress(packages, |_| {})
    }

    /// 按计划顺序移除包（带进度回调）
    ///
    /// 每个包单独调用一次 pip。单个包失败只记录该包的错误文本，
    /// 不会中断循环，剩余的包仍然会尝试移除。
    pub fn remove_packages_with_progress<F>(
        &self,
        packages: &[String],
        progress_callback: F,
    ) -> RemoveResult
    where
        F: Fn(RemoveProgress),
    {
        let start_time = Instant::now();
        let mut result = RemoveResult::new();

        info!("开始移除 {} 个包", packages.len());

        for (i, package) in packages.iter().enumerate() {
            let status = if self.config.dry_run {
                info!("DRY RUN: 将移除包 {}", package);
                RemovalStatus::Removed
            } else {
                match self.config.pip.uninstall(package) {
                    Ok(()) => RemovalStatus::Removed,
                    Err(e) => RemovalStatus::Failed(e.to_string()),
                }
            };

            match &status {
                RemovalStatus::Removed => {
                    result.add_success();
                    info!("成功移除包: {}", package);
                }
                RemovalStatus::Failed(detail) => {
                    result.add_failure(package.clone());
                    error!("移除包失败 {}: {}", package, detail);
                }
            }

            progress_callback(RemoveProgress {
                package: package.clone(),
                index: i + 1,
                total: packages.len(),
                removed_so_far: result.removed_packages,
                status,
            });
        }

        result.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "移除完成: 成功 {} 个，失败 {} 个，耗时 {}ms",
            result.removed_packages,
            result.failed_packages.len(),
            result.duration_ms
        );

        result
    }
}

impl Default for PackageRemover {
    fn default() -> Self {
        Self::new(RemoveConfig::default())
    }
}
