use serde::{Deserialize, Serialize};

pub mod keeplist;
pub mod pip;
pub mod planner;
pub mod remover;

pub use keeplist::{parse_package_lines, read_keep_list, sort_case_insensitive};
pub use pip::{PipCommand, PipError};
pub use planner::plan_removals;
pub use remover::{PackageRemover, RemovalStatus, RemoveProgress};

/// 移除结果统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveResult {
    pub removed_packages: usize,
    pub failed_packages: Vec<String>,
    pub duration_ms: u64,
}

/// 整体结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoveOutcome {
    /// 所有尝试的包都移除成功
    All,
    /// 部分成功，部分失败
    Some,
    /// 没有移除任何包
    Nothing,
}

impl Default for RemoveResult {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoveResult {
    pub fn new() -> Self {
        Self {
            removed_packages: 0,
            failed_packages: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn add_success(&mut self) {
        self.removed_packages += 1;
    }

    pub fn add_failure(&mut self, package: String) {
        self.failed_packages.push(package);
    }

    /// 尝试过的包总数
    pub fn attempted(&self) -> usize {
        self.removed_packages + self.failed_packages.len()
    }

    /// 分类整体结果。空计划不会进入移除流程，这里按全部成功处理
    pub fn outcome(&self) -> RemoveOutcome {
        if self.failed_packages.is_empty() {
            RemoveOutcome::All
        } else if self.removed_packages == 0 {
            RemoveOutcome::Nothing
        } else {
            RemoveOutcome::Some
        }
    }
}
