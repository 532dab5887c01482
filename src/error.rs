use thiserror::Error;

/// Everything the tutor can refuse to do.
///
/// Configuration errors are raised while a pattern or exercise is being
/// resolved, before anything is scheduled. `NotReady` is the precondition
/// failure for playback requested before the backends were initialized.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("Unknown exercise '{0}'..!")]
    UnknownExercise(String),

    #[error("Unknown instrument '{0}'..!")]
    UnknownInstrument(String),

    #[error("Invalid musical time '{0}', expected bar:beat:subdivision..!")]
    InvalidTime(String),

    #[error("Velocity {0} is outside of 0.0..=1.0..!")]
    InvalidVelocity(f64),

    #[error("Beats per bar must be at least 1..!")]
    InvalidBeatsPerBar,

    #[error("Tempo {0} bpm is outside of 40..=240 bpm..!")]
    InvalidTempo(f64),

    #[error("Playback backend is not ready yet, initialize it first..!")]
    NotReady,

    #[error("Backend failed to initialize: {0}")]
    Backend(#[source] anyhow::Error),

    #[error("Progress I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Progress JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TutorError {
    /// True for the errors raised while authoring patterns or resolving exercises.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TutorError::UnknownExercise(_)
                | TutorError::UnknownInstrument(_)
                | TutorError::InvalidTime(_)
                | TutorError::InvalidVelocity(_)
                | TutorError::InvalidBeatsPerBar
                | TutorError::InvalidTempo(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;
