//! 场景运行
//!
//! 读取场景 JSON，运行命令队列，可选导出命令历史、最终快照，并做回放一致性校验。

use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use timesim::codec;
use timesim::scenario::{self, ScenarioSpec};
use timesim::sim::SimTime;

#[derive(Debug, Parser)]
#[command(name = "sim-run", about = "Run a time-travel command scenario")]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Run until this time (ms); overrides the scenario default
    #[arg(long)]
    until_ms: Option<u64>,

    /// Write the applied command history (tagged JSON envelopes)
    #[arg(long)]
    history_json: Option<PathBuf>,

    /// Write the final snapshot of existing paths
    #[arg(long)]
    snapshot_json: Option<PathBuf>,

    /// Re-run the recorded history and check it reproduces the same state
    #[arg(long)]
    verify_replay: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let spec = ScenarioSpec::load(&args.scenario)?;
    let until = args.until_ms.map(SimTime::from_millis);

    let sim = spec.run(until)?;

    if let Some(path) = &args.history_json {
        fs::write(path, codec::encode_history(sim.cmd_history())?)?;
        eprintln!("wrote command history to {}", path.display());
    }
    if let Some(path) = &args.snapshot_json {
        let snap = sim.snapshot(sim.now());
        fs::write(path, serde_json::to_string_pretty(&snap)?)?;
        eprintln!("wrote snapshot to {}", path.display());
    }

    println!(
        "done @ {}, paths={}, units={}, commands={}, pending_events={}",
        sim.now(),
        sim.paths().len(),
        sim.units().count(),
        sim.cmd_history().len(),
        sim.events.len()
    );

    if args.verify_replay {
        let report = scenario::verify_replay(&spec, until)?;
        println!(
            "replay_ok commands={} paths={}",
            report.commands, report.paths
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
