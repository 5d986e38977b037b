use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Version separator in a package specifier line (`name==1.2.3`)
pub const VERSION_SEPARATOR: &str = "==";

/// Normalize raw specifier lines into package names.
///
/// Each line is split on the version separator, the first segment is kept
/// and trimmed, empty results are dropped. The output is sorted
/// case-insensitively with the original case preserved. Duplicate names are
/// kept as-is; deduplication happens later through set difference.
pub fn parse_package_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut packages: Vec<String> = lines
        .into_iter()
        .filter_map(|line| {
            let name = line
                .as_ref()
                .split(VERSION_SEPARATOR)
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            if name.is_empty() { None } else { Some(name) }
        })
        .collect();

    sort_case_insensitive(&mut packages);
    packages
}

/// Sort package names case-insensitively.
///
/// 折叠后相同的名字按原始字符串排序，保证结果确定
pub fn sort_case_insensitive(packages: &mut [String]) {
    packages.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}

/// Read the keep-list file and parse it into sorted package names.
///
/// A missing or unreadable file is a fatal startup error and propagates to
/// the caller with the path attached.
pub fn read_keep_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = expand_home(path.as_ref());
    debug!("读取保留列表: {:?}", path);

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read keep list at {path:?}"))?;

    let packages = parse_package_lines(content.lines());
    debug!("保留列表包含 {} 个包", packages.len());

    Ok(packages)
}

/// Expand a leading `~` to the user's home directory
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
