//! TrafficJam - application builder and runner

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing::{info, warn};

use traffic_jam::{
    control::Palette,
    engine::Clock,
    io::Outputs,
    sequencing::{NoteDb, Tempo},
    surface::{Surface, INPUT_QUEUE_CAPACITY},
    timeline::Timeline,
};

use super::device;

/// Main application builder
pub struct TrafficJam {
    tempo: Tempo,
    autostart: bool,
    device: String,
    relay_port: String,
    timeline: Option<PathBuf>,
    notes: Option<PathBuf>,
    palette: Option<PathBuf>,
}

impl TrafficJam {
    pub fn new() -> Self {
        Self {
            tempo: Tempo::default(),
            autostart: false,
            device: "Maschine Jam".to_string(),
            relay_port: "MJAM Out".to_string(),
            timeline: None,
            notes: None,
            palette: None,
        }
    }

    pub fn tempo(mut self, bpm: f64, ppq: u32) -> Self {
        self.tempo = Tempo::new(bpm, ppq);
        if self.tempo.bpm() != bpm || self.tempo.ppq() != ppq {
            warn!(
                bpm,
                ppq,
                "Invalid tempo, using {} bpm / {} ppq",
                self.tempo.bpm(),
                self.tempo.ppq()
            );
        }
        self
    }

    /// Start with the clock running
    pub fn autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Substring matched against the controller's port names
    pub fn device(mut self, name: impl Into<String>) -> Self {
        self.device = name.into();
        self
    }

    pub fn relay_port(mut self, name: impl Into<String>) -> Self {
        self.relay_port = name.into();
        self
    }

    pub fn timeline(mut self, path: Option<PathBuf>) -> Self {
        self.timeline = path;
        self
    }

    pub fn notes(mut self, path: Option<PathBuf>) -> Self {
        self.notes = path;
        self
    }

    pub fn palette(mut self, path: Option<PathBuf>) -> Self {
        self.palette = path;
        self
    }

    fn load_timeline(&self) -> EyreResult<Option<Timeline>> {
        let Some(path) = &self.timeline else {
            warn!("No timeline given, only the default layout will run");
            return Ok(None);
        };

        let notes = match &self.notes {
            Some(path) => NoteDb::load(path)
                .wrap_err_with(|| format!("Failed to load notes from {}", path.display()))?,
            None => NoteDb::default(),
        };

        let timeline = Timeline::load(path, self.tempo, &notes)
            .wrap_err_with(|| format!("Failed to load timeline from {}", path.display()))?;
        info!(
            slices = timeline.len(),
            last_tick = ?timeline.last_tick(),
            "Loaded timeline"
        );
        Ok(Some(timeline))
    }

    fn load_palette(&self) -> EyreResult<Palette> {
        match &self.palette {
            Some(path) => Palette::load(path)
                .wrap_err_with(|| format!("Failed to load palette from {}", path.display())),
            None => Ok(Palette::default()),
        }
    }

    /// Run until Ctrl-C, then clear the controller and close its ports
    pub fn run(self) -> EyreResult<()> {
        // Everything that can fail is done before the first tick
        let timeline = self.load_timeline()?;
        let palette = self.load_palette()?;

        let outputs = Outputs::new(
            device::open_device(&self.device)?,
            device::open_relay(&self.relay_port)?,
        );
        let mut surface = Surface::new(outputs, palette);
        let queue = surface.connect_input(INPUT_QUEUE_CAPACITY);
        let input = device::listen(&self.device, queue)?;

        if let Some(timeline) = timeline {
            surface.activate_timeline(timeline);
        }

        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_ctrlc = stop.clone();
        ctrlc::set_handler(move || {
            stop_for_ctrlc.store(true, Ordering::SeqCst);
        })
        .wrap_err("Failed to set Ctrl-C handler")?;

        let mut clock = Clock::new(self.tempo).locked(!self.autostart);
        clock.register(surface);

        info!(
            bpm = self.tempo.bpm(),
            ppq = self.tempo.ppq(),
            locked = clock.is_locked(),
            "Running, press Ctrl+C to stop"
        );

        while !stop.load(Ordering::SeqCst) {
            clock.once();
        }

        info!("Shutting down");
        clock.shutdown();
        input.close();

        let stats = clock.stats();
        info!(
            ticks = stats.ticks,
            late = stats.late,
            catch_ups = stats.catch_ups,
            "Stopped at tick {}",
            clock.tick_no()
        );
        Ok(())
    }
}

impl Default for TrafficJam {
    fn default() -> Self {
        Self::new()
    }
}
