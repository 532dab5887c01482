use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "drum_tutor",
    about = "Demonstrate drumming exercises and track your practice!"
)]
pub struct Args {
    /// Exercise id to demonstrate, e.g. `single-stroke` or `rock-beat`.
    pub exercise: Option<String>,

    /// Tempo in bpm. Defaults to the exercise's target tempo.
    #[arg(short, long)]
    pub tempo: Option<f64>,

    /// Start at the exercise's minimum tempo.
    #[arg(long, conflicts_with_all = ["tempo", "recommended"])]
    pub slow: bool,

    /// Start halfway between the minimum and target tempo.
    #[arg(long, conflicts_with = "tempo")]
    pub recommended: bool,

    /// Play the pattern once instead of looping it.
    #[arg(short, long, default_value_t = false)]
    pub once: bool,

    /// Start with the metronome clicking.
    #[arg(short, long, default_value_t = false)]
    pub metronome: bool,

    /// Path to a custom pattern in JSON, played instead of an exercise.
    #[arg(short, long)]
    pub pattern: Option<PathBuf>,

    /// List the curriculum and exit.
    #[arg(short, long, default_value_t = false)]
    pub list: bool,

    /// Only list exercises of this grade.
    #[arg(short, long)]
    pub grade: Option<u8>,

    /// Keep running after the demonstration so the keyboard pads stay live.
    #[arg(long, default_value_t = false)]
    pub pads: bool,

    /// Record completed checklist items for the exercise, e.g. `1,3,4` (1-based).
    #[arg(long)]
    pub check: Option<String>,

    /// Print a progress summary and exit.
    #[arg(short, long, default_value_t = false)]
    pub summary: bool,

    /// Where progress files are kept. Defaults to the platform data directory.
    #[arg(long = "progress-dir")]
    pub progress_dir: Option<PathBuf>,

    /// Dry run (print the first dry_run_max hits with their timing and exit).
    #[arg(short, long, default_value_t = false)]
    pub dry_run: bool,

    /// Maximum hits to print in dry run.
    #[arg(long, default_value_t = 80)]
    pub dry_run_max: usize,

    /// Prints extra information to the terminal.
    #[arg(short, long)]
    pub verbose: bool,
}
