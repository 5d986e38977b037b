use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use piprune_core::{
    PackageRemover, PipCommand, RemovalStatus, RemoveOutcome, RemoveResult,
    pip::DEFAULT_PIP_COMMAND, plan_removals, planner, read_keep_list, remover::RemoveConfig,
};

#[derive(Parser)]
#[command(name = "piprune")]
#[command(about = "Remove installed pip packages that are not in a keep list")]
#[command(version)]
pub struct Cli {
    /// File listing the packages to keep, one specifier per line
    pub keep_file: PathBuf,

    /// pip command to use instead of pip3 (a command name or a full path)
    pub pip_command: Option<String>,

    /// Dry run - show what would be removed without actually removing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write the removal plan to a file instead of removing
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // 设置日志级别
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("piprune={log_level}"))
        .init();

    let pip = PipCommand::new(cli.pip_command.as_deref().unwrap_or(DEFAULT_PIP_COMMAND));
    debug!("使用 pip 命令: {}", pip.program());

    // 读取保留列表，失败直接中止
    let keep = read_keep_list(&cli.keep_file)?;
    display_packages(&format!("Package(s) to keep ({})", keep.len()), &keep);

    // 查询已安装的包，freeze 报错时在任何移除发生前中止
    let installed = pip.installed_packages()?;
    display_packages(
        &format!("Package(s) installed ({})", installed.len()),
        &installed,
    );

    let plan = plan_removals(&installed, &keep);

    if plan.is_empty() {
        println!("\nDONE... nothing to remove!");
        return Ok(());
    }

    display_packages(&format!("Package(s) to remove ({})", plan.len()), &plan);

    // 导出计划时不执行移除
    if let Some(export_path) = &cli.export {
        planner::write_plan(export_path, &plan)?;
        println!("\nExported removal plan to {}", export_path.display());
        println!("Run the following command to finish uninstalling:");
        println!(
            "   $> {} uninstall --yes -r {}",
            pip.program(),
            export_path.display()
        );
        return Ok(());
    }

    // 确认移除
    if !cli.yes && !cli.dry_run && !confirm_removal(&plan)? {
        println!("Removal cancelled.");
        return Ok(());
    }

    println!("\nRemoving packages...");

    let remover = PackageRemover::new(RemoveConfig {
        pip,
        dry_run: cli.dry_run,
    });

    let result = remover.remove_packages_with_progress(&plan, |progress| match &progress.status {
        RemovalStatus::Removed => {
            println!(
                "--> ({}) {}...Removed",
                progress.removed_so_far, progress.package
            );
        }
        RemovalStatus::Failed(detail) => {
            println!(
                "--> ({}) {}...Failed: {}",
                progress.removed_so_far, progress.package, detail
            );
        }
    });

    display_remove_result(&result);

    Ok(())
}

fn display_packages(title: &str, packages: &[String]) {
    println!("\n{title}:");
    for package in packages {
        println!("  {package}");
    }
}

fn confirm_removal(packages: &[String]) -> Result<bool> {
    print!(
        "\nThis will remove {} package(s). Continue? [y/N]: ",
        packages.len()
    );

    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}

fn display_remove_result(result: &RemoveResult) {
    match result.outcome() {
        RemoveOutcome::All => {
            println!(
                "\nDONE... removed ALL {} package(s)",
                result.removed_packages
            );
        }
        RemoveOutcome::Some => {
            println!(
                "\nWARNING... removed SOME {} of {} package(s)",
                result.removed_packages,
                result.attempted()
            );
        }
        RemoveOutcome::Nothing => {
            println!("\nERROR... did NOT remove anything");
        }
    }

    if !result.failed_packages.is_empty() {
        println!(
            "\nFailed to remove {} package(s):",
            result.failed_packages.len()
        );
        for package in &result.failed_packages {
            println!("  - {package}");
        }
    }
}
