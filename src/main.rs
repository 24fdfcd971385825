use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use carteira::console::Console;
use carteira::credentials::TokenFile;
use carteira::repositories::wallet::WalletApi;
use carteira::services::resource::ResourceFactory;
use carteira::settings::Settings;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "carteira.toml")]
    config: String,
    #[arg(long, default_value = "log4rs.yaml")]
    log4rs: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(&args.config).expect("Failed to load settings.");

    init_logging(&args.log4rs).expect("Failed to initialize logging.");
    log::info!("Starting carteira wallet console.");

    let token_path = settings
        .auth
        .token_path
        .clone()
        .map(PathBuf::from)
        .or_else(TokenFile::default_path)
        .expect("Failed to resolve a token path.");
    let credentials = Arc::new(TokenFile::new(token_path));

    let api = WalletApi::new(credentials, settings.api.base_url.clone());
    let factory = ResourceFactory::new(api);

    let mut console = Console::new(factory, settings.api.wallet_id);
    console.run().await
}

fn init_logging(path: &str) -> Result<(), anyhow::Error> {
    if !Path::new("logs").exists() {
        fs::create_dir("logs")?;
    }

    match log4rs::init_file(path, Default::default()) {
        Ok(_) => {
            println!("[*] Logging initialized successfully.");
            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Failed to initialize logging: {}", e);
            Err(anyhow::anyhow!("Could not initialize logging: {}", e))
        }
    }
}
