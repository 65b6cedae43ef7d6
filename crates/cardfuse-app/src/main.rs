use clap::Parser as _;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries only the summary line.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let args = cardfuse_app::Args::parse();

    let summary = cardfuse_app::run(&args)?;
    println!("{summary}");

    Ok(())
}
