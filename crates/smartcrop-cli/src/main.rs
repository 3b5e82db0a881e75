//! smartcrop binary.

use clap::Parser;
use tracing::{debug, error};

use smartcrop_cli::{commands, logging, Cli, CliConfig, Command};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    logging::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let engine = match &cli.command {
        Command::Crop(args) => &args.engine,
        Command::Info(args) => &args.engine,
    };
    let config = CliConfig::from_env().with_overrides(engine);
    debug!("Config: {:?}", config);

    let cropper = commands::build_cropper(&config)?;

    match &cli.command {
        Command::Crop(args) => commands::crop(&cropper, args).await,
        Command::Info(args) => {
            if let Some(info) = commands::info(&cropper, args).await? {
                println!("{}", commands::render_info(&info)?);
            }
            Ok(())
        }
    }
}
