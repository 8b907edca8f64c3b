mod celebration;
mod field;
mod progress;
mod random;
mod scheduler;

pub use celebration::{Celebration, Particle, BURST_SIZE, CLEAR_DELAY};
pub use field::{
    background_field, background_field_with, matrix_field, matrix_field_with, BackgroundParticle,
    MatrixColumn, FIELD_SIZE,
};
pub use progress::{ProgressPhase, ProgressSimulator, FINISH_DELAY, TICK_INTERVAL};
pub use random::{char_at, sample, MATRIX_CHARS};
pub use scheduler::{Scheduler, TimerId};
