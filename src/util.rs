use crate::library::TempoRange;
use crate::model::mappings::{
    METRONOME_KEY, QUIT_KEY, TEMPO_DOWN_KEY, TEMPO_NUDGE_BPM, TEMPO_UP_KEY, pad_for_key,
};
use crate::player::ControlMsg;
use crate::progress::ChecklistState;
use log::info;

/// Parses 1-based checklist item numbers like `1,3 4` into ticked items.
pub fn parse_checklist(input: &str) -> ChecklistState {
    let mut state = ChecklistState::new();

    for part in input.split(|c: char| c == ',' || c.is_whitespace()) {
        if part.is_empty() {
            continue;
        }
        match part.parse::<usize>() {
            Ok(n) if n >= 1 => {
                state.insert(n - 1, true);
            }
            _ => info!("Ignoring checklist item '{}', expected a number from 1..!", part),
        }
    }

    state
}

/// Picks the starting tempo: explicit first, then `--slow`, then `--recommended`, else target.
pub fn choose_tempo(explicit: Option<f64>, slow: bool, recommended: bool, range: TempoRange) -> f64 {
    if let Some(bpm) = explicit {
        return bpm;
    }
    if slow {
        range.min as f64
    } else if recommended {
        range.recommended as f64
    } else {
        range.target as f64
    }
}

/// Turns one typed character into a control message for the run loop.
pub fn control_for_key(key: char) -> Option<ControlMsg> {
    if let Some(pad) = pad_for_key(key) {
        return Some(ControlMsg::Pad(pad.instrument));
    }

    match key.to_ascii_lowercase() {
        k if k == QUIT_KEY => Some(ControlMsg::Stop),
        k if k == METRONOME_KEY => Some(ControlMsg::ToggleMetronome),
        k if k == TEMPO_UP_KEY || k == '=' => Some(ControlMsg::NudgeTempo(TEMPO_NUDGE_BPM)),
        k if k == TEMPO_DOWN_KEY || k == '_' => Some(ControlMsg::NudgeTempo(-TEMPO_NUDGE_BPM)),
        _ => None,
    }
}
