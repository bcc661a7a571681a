use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use radar_classify::{Pipeline, PipelineMetrics, ProtocolTables};
use radar_core::config::AppConfig;
use radar_core::dedupe::TxLedger;
use radar_core::modes::{FeedKind, OutputFormat};
use radar_core::utils::parse_address;
use radar_decode::{decode_multicall, InnerCall, SelectorTables};
use radar_lifecycle::group_with_summary;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "radar", version, about = "Offline LP history classifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one saved feed page.
    Classify {
        #[arg(short, long, default_value = "config/hyperevm.toml")]
        config: String,
        #[arg(long, default_value = "portfolio")]
        feed: String,
        #[arg(short, long)]
        file: String,
        #[arg(long, env = "RADAR_WALLET")]
        wallet: Option<String>,
        #[arg(long, default_value = "pretty")]
        format: String,
    },
    /// Classify and merge several pages, then group LP lifecycles.
    Group {
        #[arg(short, long, default_value = "config/hyperevm.toml")]
        config: String,
        #[arg(long, default_value = "portfolio")]
        feed: String,
        #[arg(long, env = "RADAR_WALLET")]
        wallet: Option<String>,
        #[arg(long, default_value = "pretty")]
        format: String,
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Print the sub-calls of a multicall (or a single call) as selectors and words.
    Decode {
        #[arg(long)]
        input: String,
    },
    PrintConfig {
        #[arg(short, long, default_value = "config/hyperevm.toml")]
        config: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Classify {
            config,
            feed,
            file,
            wallet,
            format,
        } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            let feed = FeedKind::parse(&feed)?;
            let format = OutputFormat::parse(&format)?;
            let (pipeline, metrics) = build_pipeline(&cfg, wallet.as_deref())?;

            let txs = pipeline.classify_page(feed, read_page(&file)?)?;
            print_json(&txs, format)?;
            report_metrics(metrics.as_deref());
        }
        Commands::Group {
            config,
            feed,
            wallet,
            format,
            files,
        } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            let feed = FeedKind::parse(&feed)?;
            let format = OutputFormat::parse(&format)?;
            let (pipeline, metrics) = build_pipeline(&cfg, wallet.as_deref())?;

            let mut ledger = TxLedger::new();
            for file in &files {
                let page = pipeline.classify_page(feed, read_page(file)?)?;
                pipeline.merge(&mut ledger, page);
            }
            info!(pages = files.len(), txs = ledger.len(), "pages merged");

            let (groups, summary) = group_with_summary(ledger.into_txs());
            print_json(&json!({ "summary": summary, "groups": groups }), format)?;
            report_metrics(metrics.as_deref());
        }
        Commands::Decode { input } => {
            init_tracing("info");
            let data = hex::decode(input.trim().trim_start_matches("0x"))?;
            let calls = match decode_multicall(&data)? {
                Some(calls) => calls,
                None => vec![InnerCall::from_bytes(&data)
                    .ok_or_else(|| anyhow!("input shorter than a selector"))?],
            };
            let tables = SelectorTables::uniswap_v3();
            let rendered: Vec<_> = calls
                .iter()
                .map(|call| {
                    let action = tables
                        .classify(std::slice::from_ref(&call.selector))
                        .map(|action| format!("{action:?}"));
                    json!({
                        "selector": call.selector_hex(),
                        "action": action,
                        "words": call.words().iter().map(ToString::to_string).collect::<Vec<_>>(),
                    })
                })
                .collect();
            print_json(&rendered, OutputFormat::Pretty)?;
        }
        Commands::PrintConfig { config } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            println!("{}", cfg.to_pretty_json()?);
        }
    }

    info!("done");
    Ok(())
}

fn build_pipeline(
    cfg: &AppConfig,
    wallet: Option<&str>,
) -> Result<(Pipeline, Option<Arc<PipelineMetrics>>)> {
    let tables = ProtocolTables::from_config(cfg)?;
    if tables.position_managers.is_empty() {
        warn!("no position managers configured; LP rules will never match");
    }
    let mut pipeline = Pipeline::new(tables);
    if let Some(wallet) = wallet {
        pipeline = pipeline.with_wallet(parse_address(wallet)?);
    }
    let metrics = if cfg.observability.metrics_enabled {
        let metrics = Arc::new(PipelineMetrics::new()?);
        pipeline = pipeline.with_metrics(metrics.clone());
        Some(metrics)
    } else {
        None
    };
    Ok((pipeline, metrics))
}

fn read_page(path: &str) -> Result<serde_json::Value> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    println!("{out}");
    Ok(())
}

fn report_metrics(metrics: Option<&PipelineMetrics>) {
    if let Some(metrics) = metrics {
        eprintln!("{}", metrics.gather());
    }
}

fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(value) => EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        Err(_) => EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
