//! Monitor command - track a location stream and raise dwell alerts.
//!
//! Input is one sample per line (`lat,lng` or `unavailable`) from a file or
//! stdin. Replay mode feeds lines synchronously, one nominal tick apart. Live
//! mode runs the async monitor until the input ends or Ctrl+C.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use console::style;
use tokio::sync::mpsc;
use zonewatch::dwell::format_dwell;
use zonewatch::monitor::{
    AlertEvent, LocationSample, MonitorEvents, MonitorSession, SafetyMonitor,
};
use zonewatch::zone::ZoneState;

use super::common::{countdown, next_sample, styled_zone};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the monitor command.
pub struct MonitorArgs {
    pub input: Option<PathBuf>,
    pub dataset: Option<PathBuf>,
    pub replay: bool,
    pub pace: Option<f64>,
}

/// Prints monitor events to the terminal.
struct ConsoleEvents;

impl MonitorEvents for ConsoleEvents {
    fn on_zone_change(&self, zone: ZoneState) {
        println!("Zone: {}", styled_zone(zone));
    }

    fn on_alert(&self, alert: &AlertEvent) {
        println!();
        println!(
            "{} in danger zone for {} at {}",
            style("EMERGENCY ALERT:").bold().red().reverse(),
            format_dwell(alert.dwell_secs),
            alert.location
        );
        println!(
            "  Triggered at {}",
            alert.triggered_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!();
    }
}

/// Run the monitor command.
pub fn run(args: MonitorArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("monitor");

    let config = runner.monitor_config();
    let index = runner.load_index(args.dataset.as_deref())?;

    println!("ZoneWatch Monitor v{}", zonewatch::VERSION);
    println!("=======================");
    println!();
    println!("Records:         {}", index.len());
    println!("Near radius:     {} km", config.classifier.near_radius_km);
    println!(
        "Alert threshold: {}",
        format_dwell(config.dwell.alert_threshold_secs)
    );
    println!();

    let reader = open_input(args.input.as_ref())?;

    if args.replay {
        let tick = config.tick_interval_secs();
        let threshold = config.dwell.alert_threshold_secs;
        replay(reader, MonitorSession::new(config, index), tick, threshold)
    } else {
        let pace = match args.pace {
            Some(secs) => Some(Duration::try_from_secs_f64(secs).map_err(|_| {
                CliError::Config(format!("pace must be a non-negative number, got {}", secs))
            })?),
            None => None,
        };
        live(reader, SafetyMonitor::new(config, index), pace)
    }
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead + Send>, CliError> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Feed every line through a synchronous session, one nominal tick apart.
fn replay(
    reader: Box<dyn BufRead + Send>,
    mut session: MonitorSession,
    tick: f64,
    threshold: f64,
) -> Result<(), CliError> {
    let events = ConsoleEvents;
    let mut samples = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let Some(sample) = next_sample(line_no, &line?) else {
            continue;
        };
        samples += 1;

        let report = session.process_sample(sample, tick, &events);
        if let Some(outcome) = report.tick {
            if outcome.state.is_danger() {
                let pending = countdown(&session.dwell(), threshold)
                    .map(|text| format!("  {}", style(text).yellow().bold()))
                    .unwrap_or_default();
                println!(
                    "{:>5}  dwell {} ({}){}",
                    line_no,
                    format_dwell(outcome.counter_secs),
                    outcome.state,
                    pending
                );
            }
        } else {
            println!("{:>5}  location unavailable", line_no);
        }
    }

    println!();
    println!(
        "Replayed {} samples; final state {}",
        samples,
        session.dwell().state()
    );
    Ok(())
}

/// Run the async monitor until the input ends or Ctrl+C.
fn live(
    reader: Box<dyn BufRead + Send>,
    mut monitor: SafetyMonitor,
    pace: Option<Duration>,
) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    println!("Press Ctrl+C to stop");
    println!();

    runtime.block_on(async move {
        let (sample_tx, sample_rx) = mpsc::unbounded_channel();
        monitor.start(sample_rx, Arc::new(ConsoleEvents))?;
        std::thread::spawn(move || read_samples(reader, sample_tx, pace));

        let interrupted = tokio::select! {
            _ = shutdown_rx.recv() => true,
            result = monitor.join() => {
                let session = result?;
                println!();
                println!("Input ended; final state {}", session.state());
                false
            }
        };

        if interrupted {
            println!();
            println!("Received shutdown signal, stopping monitor...");
            monitor.stop();
        }
        Ok::<(), CliError>(())
    })
}

/// Forward parsed input lines into the monitor channel.
fn read_samples(
    reader: Box<dyn BufRead + Send>,
    tx: mpsc::UnboundedSender<LocationSample>,
    pace: Option<Duration>,
) {
    for (i, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                break;
            }
        };
        let Some(sample) = next_sample(i + 1, &line) else {
            continue;
        };
        if tx.send(sample).is_err() {
            break;
        }
        if let Some(pace) = pace {
            std::thread::sleep(pace);
        }
    }
}
