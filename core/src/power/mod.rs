pub mod annotations;
pub mod waveform;

pub use annotations::{annotate, Annotation};
pub use waveform::{compute_waveform, PowerWaveform};
