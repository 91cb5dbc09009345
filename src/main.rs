//! shopcache - Browse a product catalogue with an offline copy
//!
//! Prints products fetched from a catalogue endpoint. The first successful fetch is
//! saved to disk and later runs are served from that copy.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopcache::cli::{Cli, CliError, Command, Config};
use shopcache::render;

/// Installs a stderr logger filtered by `RUST_LOG`
///
/// Defaults to `warn`, or `debug` with `--verbose`, so stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the configured command
async fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut cache = config.product_cache();

    match config.command {
        Command::List => {
            cache.subscribe(|products| {
                tracing::debug!(count = products.len(), "product list updated");
            });
            let result = cache.spawn_load().wait().await;
            cache.apply(result)?;
            print!("{}", render::render_list(cache.products()));
        }
        Command::Show { id } => {
            cache.load().await?;
            let product = cache.find(id).ok_or(CliError::UnknownProduct(id))?;
            print!("{}", render::render_product(product));
        }
        Command::Refresh => {
            cache.refresh().await?;
            println!("Fetched {} products", cache.products().len());
        }
        Command::Clear => {
            if cache.clear()? {
                println!("Removed cached products");
            } else {
                println!("No cached products to remove");
            }
        }
        Command::Status => {
            print!("{}", render::render_status(cache.loader()));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_cli(&cli);
    run(&config).await
}
