use clap::Parser;
use tracing_subscriber::EnvFilter;

use omniwheel_sim::config::Options;

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug); logs go to stderr so the
    // headless JSON stream on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let opts = Options::parse();
    if let Err(e) = omniwheel_sim::runtime::run(opts).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
