//! Deployment bootstrap CLI (operator tool).
//!
//! Deploys the reward-token and crowdfunding contracts and wires them
//! together, checkpointing after every confirmed step. Re-running after a
//! halt resumes from the first incomplete step.

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crowdfund_client::chain::Session;
use crowdfund_client::config::loader::load_or_default;
use crowdfund_client::deploy::Bootstrap;

#[derive(Parser)]
#[command(name = "crowdfund-deploy")]
#[command(about = "Deploy and link the crowdfunding contract pair", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "crowdfund.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crowdfund_client=info,crowdfund_deploy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_or_default(Path::new(&cli.config))?;

    let session = Session::connect(&config.network).await?;
    println!("Deployer: {}", session.account()?);

    let bootstrap = Bootstrap::new(session, &config);
    match bootstrap.run().await {
        Ok(deployment) => {
            println!("DONE");
            println!("REWARD_TOKEN_ADDRESS = {}", deployment.reward_token);
            println!("CROWDFUNDING_ADDRESS = {}", deployment.crowdfunding);
            Ok(())
        }
        Err(e) => {
            // The halt report names the failed step and every address
            // already obtained; the checkpoint keeps them for resumption.
            eprintln!("Deploy failed: {}", e);
            process::exit(1);
        }
    }
}
