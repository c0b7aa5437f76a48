use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpOrderService, Storefront, SubmitOutcome};
use shared::domain::CakeSize;
use tracing::{debug, info};

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Order a bespoke cake from the bakery")]
struct Cli {
    /// Overrides the backend url from settings and environment.
    #[arg(long, global = true)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the cake sizes on offer.
    Sizes,
    /// Place one order and print the confirmation.
    Order {
        #[arg(long)]
        size: CakeSize,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        description: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "storefront exiting with failure");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = load_settings();
    if let Some(url) = cli.backend_url {
        settings.backend_url = url;
    }

    match cli.command {
        Command::Sizes => {
            print!("{}", render::banner());
            print!("{}", render::size_menu(&CakeSize::ALL));
            Ok(())
        }
        Command::Order {
            size,
            image,
            description,
            name,
            contact,
        } => {
            let service = HttpOrderService::new(settings.service_config()?);
            info!(backend_url = service.config().base_url(), "order service configured");
            let mut storefront = Storefront::new(Arc::new(service));
            print!("{}", render::banner());

            storefront.selector().activate(size);
            let form = storefront
                .current_form()
                .cloned()
                .context("no order form opened for the selected size")?;

            form.acquire_image(Some(image.as_path())).await?;
            form.set_description(description).await;
            if let Some(name) = name {
                form.set_customer_name(name).await;
            }
            if let Some(contact) = contact {
                form.set_contact(contact).await;
            }

            let outcome = form.submit().await?;
            print!("{}", render::order_form(&form.snapshot().await));
            match outcome {
                SubmitOutcome::Submitted(_) => Ok(()),
                SubmitOutcome::Skipped(reason) => {
                    anyhow::bail!("order was not submitted: {reason}")
                }
            }
        }
    }
}
