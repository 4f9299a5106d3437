use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::ViewState;
use scenario::presets;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ControlSettings;
use workflow::runner::Runner;

mod gui_bridge;
mod scenario;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Interactive host for the AC power waveform core")]
struct Args {
    /// Render a single figure offline and write its JSON description
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load control settings from YAML
    #[arg(long)]
    controls: Option<PathBuf>,
    /// Start from a named scenario preset
    #[arg(long)]
    preset: Option<String>,
    #[arg(long, default_value_t = 1.0)]
    frequency_hz: f64,
    #[arg(long, default_value_t = 0.0)]
    voltage_phase_deg: f64,
    #[arg(long, default_value_t = 0.0)]
    current_phase_deg: f64,
    /// Keep the GUI bridge alive for incoming control changes
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = if let Some(name) = args.preset.as_deref() {
        presets::find(name)
            .with_context(|| format!("unknown preset {}", name))?
            .settings
    } else if let Some(path) = args.controls {
        ControlSettings::load(path)?
    } else {
        ControlSettings::from_args(
            args.frequency_hz,
            args.voltage_phase_deg,
            args.current_phase_deg,
        )
    };

    log::info!(
        "control settings: freq {} Hz, voltage phase {} degs, current phase {} degs",
        settings.frequency_hz,
        settings.voltage_phase_deg,
        settings.current_phase_deg
    );

    let runner = Runner::new();
    let bridge = GuiBridge::new(Arc::new(runner.clone()));

    if args.offline {
        let outcome = runner.execute(&settings)?;

        println!(
            "Offline render -> power factor {:.2}, phase delta {} degs, annotations {}",
            outcome.power_factor,
            outcome.phase_difference_deg,
            outcome.figure.annotations.len()
        );

        let model = ViewState {
            figure: Some(outcome.figure.clone()),
            settings: Some(settings.clone()),
            activity: runner.activity(),
        };
        bridge.publish(&model)?;
        bridge.publish_status("Offline figure ready.");

        let json = outcome.figure.to_json()?;
        let artifact_path = PathBuf::from("tools/data/offline_figure.json");
        if let Some(parent) = artifact_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&artifact_path, json)?;
    }
    if args.serve {
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
