//! Crowdfunding client CLI.
//!
//! Discover, create, fund, and finalize campaigns hosted by the deployed
//! contract pair. Mutating commands need `CROWDFUND_PRIVATE_KEY` in the
//! environment; listing campaigns does not.

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crowdfund_client::campaigns::types::Campaign;
use crowdfund_client::campaigns::CampaignService;
use crowdfund_client::chain::types::TxStatus;
use crowdfund_client::chain::Session;
use crowdfund_client::config::loader::load_or_default;
use crowdfund_client::config::ClientConfig;

#[derive(Parser)]
#[command(name = "crowdfund-client")]
#[command(about = "CLI for ledger-hosted crowdfunding campaigns", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "crowdfund.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the session account and network check
    Status,
    /// List campaigns
    Campaigns,
    /// Create a new campaign
    Create {
        #[arg(long)]
        title: String,
        /// Funding goal in ETH (e.g. 2)
        #[arg(long)]
        goal: String,
        /// Duration in days
        #[arg(long)]
        days: u64,
    },
    /// Contribute ETH to a campaign
    Contribute {
        #[arg(long)]
        id: u64,
        /// Amount in ETH (e.g. 0.5)
        #[arg(long)]
        amount: String,
    },
    /// Finalize a campaign past its deadline
    Finalize {
        #[arg(long)]
        id: u64,
    },
    /// Show native and reward token balances
    Balances,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crowdfund_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_or_default(Path::new(&cli.config))?;

    tracing::debug!(
        rpc_url = %config.network.rpc_url,
        chain_id = config.network.chain_id,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Status => {
            let session = Session::connect(&config.network).await?;
            let service = CampaignService::new(session, &config)?;
            let report = service.status().await?;

            println!("Account: {}", service.session().account()?);
            if report.ok {
                println!("Network: chain {} (matches expectation)", report.observed);
            } else {
                println!(
                    "Network: WRONG CHAIN {} (expected {}; switch networks before acting)",
                    report.observed, report.expected
                );
            }
        }
        Commands::Campaigns => {
            // Enumeration needs no signing identity.
            let session = Session::read_only(&config.network).await?;
            let service = CampaignService::new(session, &config)?;
            let campaigns = service.load_campaigns().await;

            if campaigns.is_empty() {
                println!("No campaigns found.");
            }
            for campaign in campaigns.iter() {
                print_campaign(campaign);
            }
        }
        Commands::Create { title, goal, days } => {
            let service = connected_service(&config).await?;
            let result = service.create_campaign(&title, &goal, days).await?;
            report_outcome(&result.outcome.record.hash.to_string(), &result.outcome.record.status);
            if let Some(id) = result.assigned_id {
                println!("Created campaign #{}", id);
            }
        }
        Commands::Contribute { id, amount } => {
            let service = connected_service(&config).await?;
            let result = service.contribute(id, &amount).await?;
            report_outcome(&result.outcome.record.hash.to_string(), &result.outcome.record.status);
            if result.outcome.is_confirmed() {
                // The projection was already rebuilt on confirmation.
                if let Some(campaign) = service.campaigns().iter().find(|c| c.id == id) {
                    print_campaign(campaign);
                }
            }
        }
        Commands::Finalize { id } => {
            let service = connected_service(&config).await?;
            let result = service.finalize(id).await?;
            report_outcome(&result.outcome.record.hash.to_string(), &result.outcome.record.status);
        }
        Commands::Balances => {
            let service = connected_service(&config).await?;
            let view = service.load_balances().await?;
            println!("Account:  {}", view.account);
            println!("ETH:      {}", view.native_eth());
            println!("Rewards:  {}", view.reward_display());
        }
    }

    Ok(())
}

async fn connected_service(
    config: &ClientConfig,
) -> Result<CampaignService, Box<dyn std::error::Error>> {
    let session = Session::connect(&config.network).await?;
    Ok(CampaignService::new(session, config)?)
}

fn print_campaign(campaign: &Campaign) {
    let state = if campaign.finalized { "FINALIZED" } else { "ACTIVE" };
    println!(
        "#{} {} [{}]\n    {} / {} ETH, deadline {}\n    creator {}",
        campaign.id,
        campaign.title,
        state,
        campaign.collected_eth(),
        campaign.goal_eth(),
        campaign.deadline_utc(),
        campaign.creator,
    );
}

fn report_outcome(hash: &str, status: &TxStatus) {
    match status {
        TxStatus::Confirmed { block_number } => {
            println!("Success: {} (block {})", hash, block_number);
        }
        TxStatus::Failed { reason } => {
            println!("Failed: {} ({})", hash, reason);
        }
        TxStatus::Submitted => {
            println!("Pending: {}", hash);
        }
    }
}
