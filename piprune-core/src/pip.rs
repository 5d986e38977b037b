use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info};

use crate::keeplist::parse_package_lines;

/// Default pip command. This assumes pip is already on PATH; the CLI can
/// pass a different command name or a full path instead.
pub const DEFAULT_PIP_COMMAND: &str = "pip3";

/// Errors from invoking the pip executable
#[derive(Debug, Error)]
pub enum PipError {
    /// pip 可执行文件无法启动
    #[error("failed to run {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// `pip freeze` 在标准错误上有输出，整个运行中止
    #[error("pip freeze reported an error:\n{stderr}")]
    Freeze { stderr: String },
    /// 单个包卸载失败，不影响其余的包
    #[error("failed to uninstall {package}: {stderr}")]
    Uninstall { package: String, stderr: String },
}

/// Handle to a resolved pip executable.
///
/// The command is explicit configuration: whoever needs to talk to pip gets
/// handed one of these instead of reading a global.
#[derive(Debug, Clone)]
pub struct PipCommand {
    program: String,
}

impl PipCommand {
    /// Create a handle for the given command name or executable path
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Query installed packages via `pip freeze`.
    ///
    /// stdout and stderr are captured separately. Any stderr output is
    /// fatal: the error carries the captured text and the run aborts before
    /// any removal occurs. On success stdout is parsed with the same rules
    /// as the keep-list file and returned sorted.
    pub fn installed_packages(&self) -> Result<Vec<String>, PipError> {
        info!("查询已安装的包: {} freeze", self.program);

        let output = Command::new(&self.program)
            .arg("freeze")
            .output()
            .map_err(|source| PipError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!("pip freeze exit status: {}", output.status);

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(PipError::Freeze {
                stderr: stderr.trim_end().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_package_lines(stdout.lines()))
    }

    /// Uninstall exactly one package, non-interactively.
    ///
    /// One subprocess per package, never batched. stdout is discarded; a
    /// non-empty stderr marks this package as failed with the captured
    /// text. The exit status is only logged. The call blocks until the
    /// subprocess exits; no timeout is applied.
    pub fn uninstall(&self, package: &str) -> Result<(), PipError> {
        debug!("卸载包: {} uninstall --yes {}", self.program, package);

        let output = Command::new(&self.program)
            .args(["uninstall", "--yes", package])
            .stdout(Stdio::null())
            .output()
            .map_err(|source| PipError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!("pip uninstall {} exit status: {}", package, output.status);

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(PipError::Uninstall {
                package: package.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    /// Check whether the pip command is runnable
    pub fn check_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl Default for PipCommand {
    fn default() -> Self {
        Self::new(DEFAULT_PIP_COMMAND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_fake_pip(dir: &std::path::Path, script: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-pip");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_default_command() {
        let pip = PipCommand::default();
        assert_eq!(pip.program(), DEFAULT_PIP_COMMAND);
    }

    #[test]
    fn test_spawn_error_for_missing_executable() {
        let pip = PipCommand::new("/nonexistent/path/to/pip");
        let result = pip.installed_packages();
        assert!(matches!(result, Err(PipError::Spawn { .. })));
    }

    #[test]
    fn test_check_available_missing_executable() {
        let pip = PipCommand::new("/nonexistent/path/to/pip");
        assert!(!pip.check_available());
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_packages_parses_freeze_output() {
        let temp_dir = TempDir::new().unwrap();
        let script = "#!/bin/sh\nprintf 'requests==2.31.0\\nFlask==3.0.0\\n'\n";
        let pip = PipCommand::new(write_fake_pip(temp_dir.path(), script).to_string_lossy());

        let installed = pip.installed_packages().unwrap();
        assert_eq!(installed, vec!["Flask", "requests"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_packages_stderr_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        // freeze 在标准错误上输出，即使退出码为 0 也视为致命错误
        let script = "#!/bin/sh\necho 'something went wrong' >&2\n";
        let pip = PipCommand::new(write_fake_pip(temp_dir.path(), script).to_string_lossy());

        match pip.installed_packages() {
            Err(PipError::Freeze { stderr }) => {
                assert!(stderr.contains("something went wrong"));
            }
            other => panic!("Expected Freeze error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_uninstall_failure_keeps_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let script = "#!/bin/sh\necho 'not found' >&2\n";
        let pip = PipCommand::new(write_fake_pip(temp_dir.path(), script).to_string_lossy());

        match pip.uninstall("ghost-package") {
            Err(PipError::Uninstall { package, stderr }) => {
                assert_eq!(package, "ghost-package");
                assert_eq!(stderr, "not found");
            }
            other => panic!("Expected Uninstall error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_uninstall_success_on_empty_stderr() {
        let temp_dir = TempDir::new().unwrap();
        // 标准输出被丢弃，只有标准错误决定成败
        let script = "#!/bin/sh\necho 'Successfully uninstalled something'\n";
        let pip = PipCommand::new(write_fake_pip(temp_dir.path(), script).to_string_lossy());

        assert!(pip.uninstall("requests").is_ok());
    }
}
