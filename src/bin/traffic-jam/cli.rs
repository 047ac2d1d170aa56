use std::path::PathBuf;

use clap::Parser;

/// Drive a grid MIDI controller from a timeline of lighting and relay directives
#[derive(Debug, Parser)]
#[command(name = "traffic-jam", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Timeline document (YAML)
    #[arg(long, short)]
    pub timeline: Option<PathBuf>,

    /// Note name table replacing the built-in one (YAML)
    #[arg(long, short)]
    pub notes: Option<PathBuf>,

    /// Color palette replacing the built-in one (YAML)
    #[arg(long, short)]
    pub palette: Option<PathBuf>,

    /// Name of the relay output port
    #[arg(long, short, default_value = "MJAM Out")]
    pub relay_port: String,

    /// Substring identifying the controller's input and output ports
    #[arg(long, short, default_value = "Maschine Jam")]
    pub device: String,

    #[arg(long, default_value_t = 120.0)]
    pub bpm: f64,

    /// Ticks per quarter note
    #[arg(long, default_value_t = 24)]
    pub ppq: u32,

    /// Start with the clock running instead of locked
    #[arg(long)]
    pub autostart: bool,
}
