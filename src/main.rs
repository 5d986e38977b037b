use anyhow::Result;

fn main() -> Result<()> {
    piprune_cli::run_cli()
}
