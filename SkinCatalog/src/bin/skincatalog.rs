fn main() -> anyhow::Result<()> {
    skincatalog::cli::run_cli()
}
