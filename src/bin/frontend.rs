use std::{net::SocketAddr, path::PathBuf};

use anyhow::{anyhow, Context};
use catalog::{app::make_app, data::RestCourseClient};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Server-rendered front end for the course catalog service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the course service; `/courses` is appended to it
    #[arg(long, env = "CATALOG_API_URL")]
    api_url: Url,

    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Directory holding htmx and the stylesheet
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                [
                    "frontend=debug",        // code in this file
                    "catalog=debug",         // code in this crate (but not this file)
                    "tower_http=debug",      // http request/response pairs
                    "axum::rejection=trace", // extractor rejections (i.e. bad form input)
                ]
                .join(",")
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let client = RestCourseClient::new(args.api_url.clone())
        .with_context(|| anyhow!("unusable course service url {}", args.api_url))?;
    info!(api = %args.api_url, "using course service");

    let app = make_app(client, &args.assets);

    let listener = tokio::net::TcpListener::bind(&args.listen)
        .await
        .with_context(|| anyhow!("failed to bind listener to {}", args.listen))?;
    info!("listening on http://{}", &args.listen);

    axum::serve(listener, app)
        .await
        .context("error while serving app")?;

    Ok(())
}
