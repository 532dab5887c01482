use anyhow::{Context, Result, bail};
use clap::Parser;
use drum_tutor::{
    Args, ControlMsg, DEFAULT_TEMPO_BPM, JsonProgressStore, PAD_MAPPINGS, ParticleField,
    Pattern, PatternLibrary, Player, TerminalKit, choose_tempo, control_for_key,
    default_progress_dir, parse_checklist, to_seconds,
};
use log::{debug, info, warn};
use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

const FIELD_WIDTH: f64 = 800.0;
const FIELD_HEIGHT: f64 = 600.0;

fn list_exercises(library: &PatternLibrary, grade: Option<u8>) {
    for exercise in library.exercises() {
        if grade.is_some_and(|g| g != exercise.grade) {
            continue;
        }
        println!(
            "[grade {}] {:<18} {:<34} {:>3}-{:<3} bpm  {}",
            exercise.grade,
            exercise.id,
            exercise.name,
            exercise.min_tempo,
            exercise.target_tempo,
            exercise.sticking
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let library = PatternLibrary::new();

    if args.list {
        list_exercises(&library, args.grade);
        return Ok(());
    }

    let progress_dir = args.progress_dir.clone().unwrap_or_else(default_progress_dir);
    debug!("Progress directory: '{}'", progress_dir.display());
    let store = JsonProgressStore::new(progress_dir);

    let mut player = Player::new(
        TerminalKit::stdout(),
        ParticleField::new(FIELD_WIDTH, FIELD_HEIGHT),
        store,
        args.verbose,
    );

    if args.summary {
        let summary = player.progress_summary();
        println!(
            "{} exercises | {} started | {} completed",
            summary.total, summary.started, summary.completed
        );
        for entry in summary.exercises.iter().filter(|e| e.is_started()) {
            let when = entry
                .last_practiced
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".into());
            println!(
                "  {:<18} {:>2}/{:<2} {:>3}%  last practiced {}",
                entry.exercise_id, entry.completed_items, entry.total_items, entry.percentage, when
            );
        }
        return Ok(());
    }

    if let Some(items) = args.check.as_deref() {
        let Some(id) = args.exercise.as_deref() else {
            bail!("--check needs an exercise id..!");
        };
        let record = player.save_progress(id, parse_checklist(items))?;
        let exercise = library.require(id)?;
        for (n, item) in exercise.checklist_items.iter().enumerate() {
            let done = record.checklist_data.get(&n).copied().unwrap_or(false);
            println!("  [{}] {}. {}", if done { 'x' } else { ' ' }, n + 1, item);
        }
        return Ok(());
    }

    let (pattern, tempo) = if let Some(path) = args.pattern.as_ref() {
        info!("Loading custom pattern: '{}'...", path.display());
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern file '{}'..!", path.display()))?;
        (Pattern::from_json(&json)?, args.tempo.unwrap_or(DEFAULT_TEMPO_BPM))
    } else {
        let Some(id) = args.exercise.as_deref() else {
            bail!("No exercise given, try `--list` to see the curriculum..!");
        };
        let exercise = library.require(id)?;
        let tempo = choose_tempo(args.tempo, args.slow, args.recommended, exercise.tempo_range());

        println!("{} (grade {}) | {}", exercise.name, exercise.grade, exercise.sticking);
        for line in exercise.instructions {
            println!("  - {}", line);
        }
        (exercise.pattern()?, tempo)
    };

    if args.dry_run {
        info!("Previewing at most {} hits at {:.1} bpm..!", args.dry_run_max, tempo);
        for (i, hit) in pattern.in_time_order().iter().take(args.dry_run_max).enumerate() {
            println!(
                "Hit {:>3}: {:<11} at {:<8} = {:>8.3}s  velocity {:.2}",
                i,
                hit.instrument.name(),
                hit.time.to_string(),
                to_seconds(hit.time, tempo, pattern.beats_per_bar()),
                hit.velocity
            );
        }
        return Ok(());
    }

    player.initialize()?;
    if args.metronome {
        player.toggle_metronome()?;
    }

    match args.exercise.as_deref().filter(|_| args.pattern.is_none()) {
        Some(id) => player.play(id, Some(tempo), !args.once)?,
        None => player.play_pattern(pattern, tempo, !args.once)?,
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlMsg>();
    let ctrlc_tx = control_tx.clone();
    ctrlc::set_handler(move || {
        warn!("Ctrl-C received, stopping playback..!");
        let _ = ctrlc_tx.send(ControlMsg::Stop);
    })?;

    if args.pads {
        let keys: Vec<String> = PAD_MAPPINGS
            .iter()
            .map(|pad| format!("{}={}", pad.key, pad.label))
            .collect();
        println!("Pads: {} | m=metronome +/-=tempo q=quit (press Enter after keys)", keys.join(" "));

        let pad_tx = control_tx.clone();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                for key in line.chars() {
                    if let Some(msg) = control_for_key(key) {
                        if pad_tx.send(msg).is_err() {
                            return;
                        }
                    }
                }
            }
            debug!("Pad reader finished..!");
        });
    }
    drop(control_tx);

    player.run(&control_rx, args.pads)?;
    info!("Finished practice session..!");

    Ok(())
}
