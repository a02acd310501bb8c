//! Trustmesh simulation campaign runner.
//!
//! Runs one adversarial MANET campaign, trust-weighted (Proposed) or
//! hop-count (Baseline) routing against silently dropping blackholes,
//! and emits the drop summary and machine-readable result line on
//! stdout.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use trustmesh_sim::{run_campaign, SimConfig};

/// Trust-aware MANET routing simulator.
///
/// A mobile ad-hoc network under blackhole attack: per-link transmission
/// outcomes feed a reputation ledger, and least-cost routing couples
/// signal quality with trust.
#[derive(Parser, Debug)]
#[command(name = "trustmesh-node")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of nodes in the MANET
    #[arg(long, env = "TRUSTMESH_NUM_NODES", default_value_t = 30)]
    num_nodes: u32,

    /// Number of UDP traffic flows
    #[arg(long, env = "TRUSTMESH_NUM_FLOWS", default_value_t = 10)]
    num_flows: u32,

    /// Number of blackhole nodes
    #[arg(long, env = "TRUSTMESH_NUM_BLACKHOLES", default_value_t = 7)]
    num_blackholes: u32,

    /// Simulated duration in seconds
    #[arg(long, env = "TRUSTMESH_SIM_TIME", default_value_t = 60.0)]
    sim_time: f64,

    /// Maximum radio range in meters
    #[arg(long, env = "TRUSTMESH_MAX_RADIO_RANGE", default_value_t = 150.0)]
    max_radio_range: f64,

    /// Default SNR for new links in dB
    #[arg(long, env = "TRUSTMESH_DEFAULT_SNR", default_value_t = 20.0)]
    default_snr: f64,

    /// RNG seed
    #[arg(long, env = "TRUSTMESH_RNG_SEED", default_value_t = 1)]
    rng_seed: u64,

    /// RNG stream; also salts position, blackhole, and flow draws
    #[arg(long, env = "TRUSTMESH_RNG_RUN", default_value_t = 1)]
    rng_run: u64,

    /// Enable trust logic (true = Proposed, false = Baseline)
    #[arg(
        long,
        env = "TRUSTMESH_USE_BLOCKCHAIN",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    use_blockchain: bool,

    /// Weight of the signal-quality cost term
    #[arg(long, env = "TRUSTMESH_ALPHA", default_value_t = 1.0)]
    alpha: f64,

    /// Weight of the trust cost term
    #[arg(long, env = "TRUSTMESH_BETA", default_value_t = 500.0)]
    beta: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TRUSTMESH_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (plain, json)
    #[arg(long, env = "TRUSTMESH_LOG_FORMAT", default_value = "plain")]
    log_format: String,
}

fn setup_logging(log_level: &str, log_format: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    match log_format.to_lowercase().as_str() {
        "json" => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
        _ => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
    }

    Ok(())
}

fn build_config(args: &Args) -> SimConfig {
    SimConfig::builder()
        .with_num_nodes(args.num_nodes)
        .with_num_flows(args.num_flows)
        .with_num_blackholes(args.num_blackholes)
        .with_sim_time_secs(args.sim_time)
        .with_max_radio_range(args.max_radio_range)
        .with_default_snr(args.default_snr)
        .with_rng(args.rng_seed, args.rng_run)
        .with_use_blockchain(args.use_blockchain)
        .with_cost_weights(args.alpha, args.beta)
        .build()
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, &args.log_format)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = if args.use_blockchain { "Proposed" } else { "Baseline" },
        nodes = args.num_nodes,
        flows = args.num_flows,
        blackholes = args.num_blackholes,
        sim_time = args.sim_time,
        "Starting simulation campaign"
    );

    let config = build_config(&args);
    let summary = run_campaign(config).context("Simulation setup failed")?;

    info!(
        heartbeats = summary.heartbeats,
        tx = summary.metrics.tx_packets,
        rx = summary.metrics.rx_packets,
        "Simulation complete"
    );

    println!("{}", summary.drop_summary);
    println!("{}", summary.result_line);

    Ok(())
}
