use anyhow::Result;
use clap::{Parser, Subcommand};
use menugen_shared::constants::DEFAULT_API_URL;
use menugen_shared::telemetry::{init_telemetry, LogSettings};
use menugen_shared::UploadPolicy;
use std::path::PathBuf;
use tracing::info;

mod client;
mod gallery;
mod precheck;

use client::GatewayClient;
use gallery::render_gallery;
use precheck::prepare_upload;

#[derive(Parser, Debug)]
#[command(
    name = "menugen",
    version,
    about = "MenuGen - turn a menu photo into a dish gallery"
)]
struct Args {
    /// Base URL of the MenuGen gateway
    #[arg(long, env = "MENUGEN_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token forwarded to the gateway
    #[arg(long, env = "MENUGEN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a menu photo and print the generated gallery
    Process {
        /// PNG, JPEG or GIF menu photo
        image: PathBuf,

        /// OpenAI API key used for this request
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        openai_key: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Show the signed-in user
    Whoami,
    /// Check that the gateway is up
    Health,
    /// Print the sign-in URL
    Login,
    /// Print the sign-out URL
    Logout,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_telemetry("menugen-cli", "warn", &LogSettings::default()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let client = GatewayClient::new(&args.api_url, args.token)?;

    match args.command {
        Command::Process {
            image,
            openai_key,
            json,
        } => {
            let upload = prepare_upload(&image, &UploadPolicy::default())?;
            info!("Processing {} via {}", image.display(), args.api_url);

            let result = client.process_menu(upload, &openai_key).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_gallery(&result));
                if result.items.is_empty() {
                    println!();
                }
            }
        }
        Command::Whoami => {
            let identity = client.whoami().await?;
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
        Command::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Command::Login => println!("{}", client.auth_location(true).await?),
        Command::Logout => println!("{}", client.auth_location(false).await?),
    }

    Ok(())
}
