use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::keeplist::sort_case_insensitive;

/// 计算移除计划：已安装的包减去保留的包
///
/// 匹配不区分大小写，结果按不区分大小写排序且无重复，
/// 只取决于两个输入的集合内容，与输入顺序无关。
pub fn plan_removals(installed: &[String], keep: &[String]) -> Vec<String> {
    let keep_set: HashSet<String> = keep.iter().map(|name| name.to_lowercase()).collect();

    let mut plan: Vec<String> = installed
        .iter()
        .filter(|name| !keep_set.contains(&name.to_lowercase()))
        .cloned()
        .collect();

    // 先排序再去重，折叠后同名的包保留折叠序最小的写法
    sort_case_insensitive(&mut plan);
    plan.dedup_by(|a, b| a.to_lowercase() == b.to_lowercase());

    debug!(
        "已安装 {} 个包，保留 {} 个，计划移除 {} 个",
        installed.len(),
        keep.len(),
        plan.len()
    );

    plan
}

/// 把移除计划导出到文件，每行一个包名
///
/// 导出的文件可以直接交给 `pip uninstall --yes -r <file>` 使用
pub fn write_plan<P: AsRef<Path>>(path: P, packages: &[String]) -> Result<()> {
    let path = path.as_ref();

    let mut content = packages.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write removal plan to {path:?}"))?;

    info!("移除计划已导出到 {:?}", path);
    Ok(())
}
