//! Musical timing: tempo math, warp step sizes and note names.

pub mod notes;
pub mod step;
pub mod tempo;

pub use notes::NoteDb;
pub use step::WarpStep;
pub use tempo::Tempo;
