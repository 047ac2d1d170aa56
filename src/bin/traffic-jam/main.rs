//! traffic-jam - timeline driver for grid MIDI controllers
//!
//! Run with: cargo run -- --timeline demos/timeline.yaml

mod app;
mod cli;
mod device;
mod logging;

use app::TrafficJam;
use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = cli::Cli::parse();
    logging::setup(cli.verbosity)?;

    TrafficJam::new()
        .tempo(cli.bpm, cli.ppq)
        .autostart(cli.autostart)
        .device(cli.device)
        .relay_port(cli.relay_port)
        .timeline(cli.timeline)
        .notes(cli.notes)
        .palette(cli.palette)
        .run()
}
