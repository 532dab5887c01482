use crate::model::pattern::InstrumentId;

/// A keyboard key that plays a drum.
#[derive(Debug, Clone, Copy)]
pub struct Pad {
    pub key: char,
    pub instrument: InstrumentId,
    pub label: &'static str,
}

pub const METRONOME_KEY: char = 'm';
pub const QUIT_KEY: char = 'q';
pub const TEMPO_UP_KEY: char = '+';
pub const TEMPO_DOWN_KEY: char = '-';
pub const TEMPO_NUDGE_BPM: f64 = 5.0;

pub const PAD_MAPPINGS: &[Pad] = &[
    Pad {
        key: 'a',
        instrument: InstrumentId::Snare,
        label: "Snare",
    },
    Pad {
        key: 's',
        instrument: InstrumentId::Bass,
        label: "Bass Drum",
    },
    Pad {
        key: 'd',
        instrument: InstrumentId::HiHat,
        label: "Hi-Hat",
    },
    Pad {
        key: 'f',
        instrument: InstrumentId::Tom,
        label: "Tom",
    },
    Pad {
        key: 'g',
        instrument: InstrumentId::Crash,
        label: "Crash",
    },
    Pad {
        key: 'j',
        instrument: InstrumentId::SnareRight,
        label: "Snare (Right Hand)",
    },
    Pad {
        key: 'k',
        instrument: InstrumentId::SnareLeft,
        label: "Snare (Left Hand)",
    },
];

/// Case-insensitive.
pub fn pad_for_key(key: char) -> Option<&'static Pad> {
    let key = key.to_ascii_lowercase();
    PAD_MAPPINGS.iter().find(|pad| pad.key == key)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn home_row_plays_the_kit() {
        assert_eq!(pad_for_key('a').map(|p| p.instrument), Some(InstrumentId::Snare));
        assert_eq!(pad_for_key('S').map(|p| p.instrument), Some(InstrumentId::Bass));
        assert_eq!(pad_for_key('d').map(|p| p.instrument), Some(InstrumentId::HiHat));
        assert!(pad_for_key(METRONOME_KEY).is_none());
        assert!(pad_for_key('z').is_none());
    }

    #[test]
    fn keys_are_unique() {
        for (i, pad) in PAD_MAPPINGS.iter().enumerate() {
            assert!(PAD_MAPPINGS[i + 1..].iter().all(|other| other.key != pad.key));
        }
    }
}
