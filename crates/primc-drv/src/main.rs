use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = primc_drv::Cli::parse();
    primc_drv::run(&cli)
}
