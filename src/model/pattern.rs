use crate::error::{Result, TutorError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BEATS_PER_BAR: u32 = 4;
pub const SUBDIVISIONS_PER_BEAT: f64 = 4.0;

/// The closed set of sounds the tutor knows how to trigger.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstrumentId {
    /// Snare without a sticking hand, sounds like the right hand.
    #[serde(rename = "snare")]
    Snare,
    #[serde(rename = "snare-right")]
    SnareRight,
    #[serde(rename = "snare-left")]
    SnareLeft,
    #[serde(rename = "bass")]
    Bass,
    #[serde(rename = "hihat")]
    HiHat,
    #[serde(rename = "tom")]
    Tom,
    #[serde(rename = "crash")]
    Crash,
    /// Metronome click, never part of an exercise pattern.
    #[serde(rename = "click")]
    Click,
}

impl InstrumentId {
    pub const ALL: [InstrumentId; 8] = [
        InstrumentId::Snare,
        InstrumentId::SnareRight,
        InstrumentId::SnareLeft,
        InstrumentId::Bass,
        InstrumentId::HiHat,
        InstrumentId::Tom,
        InstrumentId::Crash,
        InstrumentId::Click,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InstrumentId::Snare => "snare",
            InstrumentId::SnareRight => "snare-right",
            InstrumentId::SnareLeft => "snare-left",
            InstrumentId::Bass => "bass",
            InstrumentId::HiHat => "hihat",
            InstrumentId::Tom => "tom",
            InstrumentId::Crash => "crash",
            InstrumentId::Click => "click",
        }
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InstrumentId {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self> {
        InstrumentId::ALL
            .iter()
            .copied()
            .find(|i| i.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TutorError::UnknownInstrument(s.to_owned()))
    }
}

/// A bar:beat:subdivision position relative to the start of a pattern.
///
/// Subdivisions are sixteenths (four per beat) and may be fractional for
/// grace notes and triplets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MusicalTime {
    pub bar: u32,
    pub beat: u32,
    pub subdivision: f64,
}

impl MusicalTime {
    pub const ZERO: MusicalTime = MusicalTime { bar: 0, beat: 0, subdivision: 0.0 };

    pub fn new(bar: u32, beat: u32, subdivision: f64) -> Self {
        Self { bar, beat, subdivision }
    }

    /// Position in beats from pattern start.
    pub fn to_beats(&self, beats_per_bar: u32) -> f64 {
        (self.bar as f64) * (beats_per_bar as f64)
            + self.beat as f64
            + self.subdivision / SUBDIVISIONS_PER_BEAT
    }
}

impl fmt::Display for MusicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.bar, self.beat, self.subdivision)
    }
}

impl FromStr for MusicalTime {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TutorError::InvalidTime(s.to_owned());
        let mut parts = s.trim().split(':');

        let (Some(bar), Some(beat), Some(sub), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let bar = bar.trim().parse::<u32>().map_err(|_| invalid())?;
        let beat = beat.trim().parse::<u32>().map_err(|_| invalid())?;
        let subdivision = sub.trim().parse::<f64>().map_err(|_| invalid())?;

        if !subdivision.is_finite() || subdivision < 0.0 {
            return Err(invalid());
        }

        Ok(MusicalTime { bar, beat, subdivision })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub instrument: InstrumentId,
    pub time: MusicalTime,
    pub velocity: f64,
}

impl HitEvent {
    pub fn new(instrument: InstrumentId, time: MusicalTime, velocity: f64) -> Self {
        Self { instrument, time, velocity }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.velocity) {
            return Err(TutorError::InvalidVelocity(self.velocity));
        }
        if !self.time.subdivision.is_finite() || self.time.subdivision < 0.0 {
            return Err(TutorError::InvalidTime(self.time.to_string()));
        }
        Ok(())
    }
}

/// A validated, immutable rhythm.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    events: Vec<HitEvent>,
    beats_per_bar: u32,
}

impl Pattern {
    /// Validates every event up front so a pattern is either fully playable or rejected.
    pub fn new(events: Vec<HitEvent>, beats_per_bar: u32) -> Result<Self> {
        if beats_per_bar == 0 {
            return Err(TutorError::InvalidBeatsPerBar);
        }
        for event in &events {
            event.validate()?;
        }
        Ok(Self { events, beats_per_bar })
    }

    /// Builds a pattern from `(instrument, "bar:beat:sub", velocity)` rows.
    pub fn from_table(rows: &[(&str, &str, f64)], beats_per_bar: u32) -> Result<Self> {
        let events = rows
            .iter()
            .map(|&(instrument, time, velocity)| {
                Ok(HitEvent::new(instrument.parse()?, time.parse()?, velocity))
            })
            .collect::<Result<Vec<_>>>()?;

        Pattern::new(events, beats_per_bar)
    }

    pub fn empty() -> Self {
        Self { events: Vec::new(), beats_per_bar: DEFAULT_BEATS_PER_BAR }
    }

    pub fn events(&self) -> &[HitEvent] {
        &self.events
    }

    pub fn beats_per_bar(&self) -> u32 {
        self.beats_per_bar
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in playback order; ties keep their storage order.
    pub fn in_time_order(&self) -> Vec<HitEvent> {
        let mut ordered = self.events.clone();
        let bpb = self.beats_per_bar;
        ordered.sort_by(|a, b| a.time.to_beats(bpb).total_cmp(&b.time.to_beats(bpb)));
        ordered
    }

    /// Beat position of the latest event, 0.0 for an empty pattern.
    pub fn last_beat(&self) -> f64 {
        self.events
            .iter()
            .map(|e| e.time.to_beats(self.beats_per_bar))
            .fold(0.0, f64::max)
    }

    /// Loop period in beats: the whole bars covering the latest event, at least one bar.
    pub fn loop_length_beats(&self) -> f64 {
        let bpb = self.beats_per_bar as f64;
        let bars = (self.last_beat() / bpb).floor() + 1.0;
        bars * bpb
    }
}

/// Serialized form of a user-authored pattern, checked through [`Pattern::new`].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawPattern {
    #[serde(default = "default_beats_per_bar")]
    pub beats_per_bar: u32,
    pub events: Vec<RawHit>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawHit {
    pub instrument: String,
    pub time: String,
    #[serde(default = "default_velocity")]
    pub velocity: f64,
}

fn default_beats_per_bar() -> u32 {
    DEFAULT_BEATS_PER_BAR
}

fn default_velocity() -> f64 {
    1.0
}

impl TryFrom<RawPattern> for Pattern {
    type Error = TutorError;

    fn try_from(raw: RawPattern) -> Result<Self> {
        let events = raw
            .events
            .into_iter()
            .map(|hit| Ok(HitEvent::new(hit.instrument.parse()?, hit.time.parse()?, hit.velocity)))
            .collect::<Result<Vec<_>>>()?;

        Pattern::new(events, raw.beats_per_bar)
    }
}

impl Pattern {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPattern = serde_json::from_str(json)?;
        Pattern::try_from(raw)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_musical_time_with_fractional_subdivision() {
        let t: MusicalTime = "0:2:1.33".parse().unwrap();
        assert_eq!(t, MusicalTime::new(0, 2, 1.33));
        assert!((t.to_beats(4) - 2.3325).abs() < 1e-9);

        assert!("0:1".parse::<MusicalTime>().is_err());
        assert!("0:1:2:3".parse::<MusicalTime>().is_err());
        assert!("a:1:2".parse::<MusicalTime>().is_err());
        assert!("0:1:-1".parse::<MusicalTime>().is_err());
    }

    #[test]
    fn instrument_names_are_case_insensitive() {
        assert_eq!("Snare-Left".parse::<InstrumentId>().unwrap(), InstrumentId::SnareLeft);
        assert_eq!("hihat".parse::<InstrumentId>().unwrap(), InstrumentId::HiHat);

        let err = "cowbell".parse::<InstrumentId>().unwrap_err();
        assert!(matches!(err, TutorError::UnknownInstrument(ref s) if s == "cowbell"));
        assert!(err.is_configuration());
    }

    #[test]
    fn table_with_unknown_instrument_is_rejected_whole() {
        let rows = [("snare", "0:0:0", 1.0), ("gong", "0:1:0", 1.0)];
        let err = Pattern::from_table(&rows, 4).unwrap_err();
        assert!(matches!(err, TutorError::UnknownInstrument(_)));
    }

    #[test]
    fn velocity_outside_range_is_rejected() {
        let rows = [("snare", "0:0:0", 1.2)];
        assert!(matches!(
            Pattern::from_table(&rows, 4),
            Err(TutorError::InvalidVelocity(_))
        ));
    }

    #[test]
    fn time_order_is_stable_for_ties() {
        let rows = [
            ("hihat", "0:1:0", 0.8),
            ("bass", "0:0:0", 1.0),
            ("hihat", "0:0:0", 0.8),
            ("snare", "0:1:0", 1.0),
        ];
        let pattern = Pattern::from_table(&rows, 4).unwrap();
        let order: Vec<_> = pattern.in_time_order().iter().map(|e| e.instrument).collect();

        assert_eq!(
            order,
            vec![InstrumentId::Bass, InstrumentId::HiHat, InstrumentId::HiHat, InstrumentId::Snare]
        );
    }

    #[test]
    fn loop_length_rounds_up_to_whole_bars() {
        let one_bar = Pattern::from_table(&[("snare", "0:3:2", 1.0)], 4).unwrap();
        assert_eq!(one_bar.loop_length_beats(), 4.0);

        let two_bars = Pattern::from_table(&[("snare", "1:0:0", 1.0)], 4).unwrap();
        assert_eq!(two_bars.loop_length_beats(), 8.0);

        let waltz = Pattern::from_table(&[("snare", "0:2:0", 1.0)], 3).unwrap();
        assert_eq!(waltz.loop_length_beats(), 3.0);

        assert_eq!(Pattern::empty().loop_length_beats(), 4.0);
    }

    #[test]
    fn json_patterns_go_through_validation() {
        let json = r#"{"events": [
            {"instrument": "snare-right", "time": "0:0:0"},
            {"instrument": "snare-left", "time": "0:0:2", "velocity": 0.5}
        ]}"#;
        let pattern = Pattern::from_json(json).unwrap();
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.beats_per_bar(), 4);
        assert_eq!(pattern.events()[0].velocity, 1.0);

        let bad = r#"{"events": [{"instrument": "kazoo", "time": "0:0:0"}]}"#;
        assert!(matches!(Pattern::from_json(bad), Err(TutorError::UnknownInstrument(_))));
    }
}
