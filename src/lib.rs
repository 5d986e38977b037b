//! # piprune
//!
//! A tool for removing pip packages that are not in a keep list.
//!
//! This crate reads a plain-text keep list, asks pip for the currently
//! installed packages, computes the set difference and uninstalls everything
//! that is not kept, one `pip uninstall --yes` call per package.
//!
//! ## Usage
//!
//! ### Command Line
//!
//! ```bash
//! # Remove everything not listed in keep.txt (prompts before removing)
//! piprune keep.txt
//!
//! # Use the pip inside a virtualenv
//! piprune keep.txt /opt/venv/bin/pip
//!
//! # Dry run to see what would be removed
//! piprune keep.txt --dry-run
//!
//! # Write the removal plan to a file instead of removing
//! piprune keep.txt --export plan.txt
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use piprune_core::{parse_package_lines, plan_removals};
//!
//! // Parse specifier lines the way the keep list and `pip freeze` output
//! // are parsed, then compute what would be removed
//! let installed = parse_package_lines(["Flask==3.0.0", "numpy==1.26.4"]);
//! let keep = parse_package_lines(["flask"]);
//!
//! let plan = plan_removals(&installed, &keep);
//! assert_eq!(plan, vec!["numpy"]);
//! ```

// Re-export core functionality
pub use piprune_core::*;

// Re-export commonly used types
pub use piprune_core::{
    PackageRemover, PipCommand, PipError, RemoveOutcome, RemoveResult,
    remover::RemoveConfig,
};
