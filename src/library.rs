//! The curriculum: exercise metadata and the rhythm each one demonstrates.
//!
//! Patterns are produced fresh by pure generator functions on every lookup,
//! so no two playback sessions ever share pattern state.

use crate::error::{Result, TutorError};
use crate::model::pattern::{HitEvent, InstrumentId, MusicalTime, Pattern};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoRange {
    pub min: u32,
    pub target: u32,
    pub recommended: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub grade: u8,
    pub difficulty: Difficulty,
    pub target_tempo: u32,
    pub min_tempo: u32,
    /// Sticking or notation summary, e.g. `R L R R  L R L L`.
    pub sticking: &'static str,
    pub focus_areas: &'static [&'static str],
    pub instructions: &'static [&'static str],
    pub checklist_items: &'static [&'static str],
    pub common_mistakes: &'static [&'static str],
    pub grade2_extension: Option<&'static str>,
    generator: fn() -> Result<Pattern>,
}

impl Exercise {
    pub fn tempo_range(&self) -> TempoRange {
        TempoRange {
            min: self.min_tempo,
            target: self.target_tempo,
            recommended: (self.min_tempo + self.target_tempo) / 2,
        }
    }

    pub fn pattern(&self) -> Result<Pattern> {
        (self.generator)()
    }
}

/// Read-only lookup over the built-in curriculum.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternLibrary;

impl PatternLibrary {
    pub fn new() -> Self {
        Self
    }

    /// Every exercise in curriculum order.
    pub fn exercises(&self) -> &'static [Exercise] {
        EXERCISES
    }

    pub fn get_exercise(&self, id: &str) -> Option<&'static Exercise> {
        let id = match id.trim() {
            "quarter-eighth-transition" => "quarter-eighth",
            "waltz-pattern" => "waltz",
            other => other,
        };
        EXERCISES.iter().find(|ex| ex.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&'static Exercise> {
        self.get_exercise(id)
            .ok_or_else(|| TutorError::UnknownExercise(id.to_owned()))
    }

    pub fn generate_pattern(&self, id: &str) -> Result<Pattern> {
        self.require(id)?.pattern()
    }

    pub fn tempo_range(&self, id: &str) -> Result<TempoRange> {
        Ok(self.require(id)?.tempo_range())
    }

    pub fn by_grade(&self, grade: u8) -> impl Iterator<Item = &'static Exercise> {
        EXERCISES.iter().filter(move |ex| ex.grade == grade)
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &'static Exercise> {
        EXERCISES.iter().filter(move |ex| ex.difficulty == difficulty)
    }
}

// -----------------------------------------------------------------------------
// Pattern generators
// -----------------------------------------------------------------------------

use InstrumentId::{Bass, HiHat, Snare, SnareLeft, SnareRight};

fn hit(instrument: InstrumentId, bar: u32, beat: u32, sub: f64, velocity: f64) -> HitEvent {
    HitEvent::new(instrument, MusicalTime::new(bar, beat, sub), velocity)
}

/// Eight eighth notes across one bar, starting at `bar`.
fn eighths(instrument: InstrumentId, bar: u32, velocity: f64) -> impl Iterator<Item = HitEvent> {
    (0..8u32).map(move |i| hit(instrument, bar, i / 2, ((i % 2) * 2) as f64, velocity))
}

fn single_stroke() -> Result<Pattern> {
    Pattern::from_table(
        &[
            ("snare-right", "0:0:0", 1.0),
            ("snare-left", "0:0:2", 1.0),
            ("snare-right", "0:1:0", 1.0),
            ("snare-left", "0:1:2", 1.0),
            ("snare-right", "0:2:0", 1.0),
            ("snare-left", "0:2:2", 1.0),
            ("snare-right", "0:3:0", 1.0),
            ("snare-left", "0:3:2", 1.0),
        ],
        4,
    )
}

fn double_stroke() -> Result<Pattern> {
    // second stroke of each pair is the rebound
    Pattern::from_table(
        &[
            ("snare-right", "0:0:0", 1.0),
            ("snare-right", "0:0:1", 0.9),
            ("snare-left", "0:0:2", 1.0),
            ("snare-left", "0:0:3", 0.9),
            ("snare-right", "0:1:0", 1.0),
            ("snare-right", "0:1:1", 0.9),
            ("snare-left", "0:1:2", 1.0),
            ("snare-left", "0:1:3", 0.9),
        ],
        4,
    )
}

fn paradiddle() -> Result<Pattern> {
    Pattern::from_table(
        &[
            ("snare-right", "0:0:0", 1.0),
            ("snare-left", "0:0:2", 1.0),
            ("snare-right", "0:1:0", 1.0),
            ("snare-right", "0:1:2", 1.0),
            ("snare-left", "0:2:0", 1.0),
            ("snare-right", "0:2:2", 1.0),
            ("snare-left", "0:3:0", 1.0),
            ("snare-left", "0:3:2", 1.0),
        ],
        4,
    )
}

fn quarter_notes() -> Result<Pattern> {
    Pattern::new((0..4).map(|beat| hit(Bass, 0, beat, 0.0, 1.0)).collect(), 4)
}

fn eighth_notes() -> Result<Pattern> {
    Pattern::new(eighths(HiHat, 0, 1.0).collect(), 4)
}

fn rock_beat() -> Result<Pattern> {
    let mut events: Vec<HitEvent> = eighths(HiHat, 0, 0.8).collect();
    events.push(hit(Bass, 0, 0, 0.0, 1.0));
    events.push(hit(Bass, 0, 2, 0.0, 1.0));
    // backbeat
    events.push(hit(Snare, 0, 1, 0.0, 1.0));
    events.push(hit(Snare, 0, 3, 0.0, 1.0));
    Pattern::new(events, 4)
}

fn waltz() -> Result<Pattern> {
    Pattern::from_table(
        &[("bass", "0:0:0", 1.0), ("snare", "0:1:0", 0.8), ("snare", "0:2:0", 0.8)],
        3,
    )
}

fn quarter_eighth() -> Result<Pattern> {
    let mut events: Vec<HitEvent> = (0..4).map(|beat| hit(Snare, 0, beat, 0.0, 1.0)).collect();
    events.extend(eighths(Bass, 1, 0.9));
    Pattern::new(events, 4)
}

/// Alternating flams: soft grace note a tenth of a sixteenth ahead of the main stroke.
fn flam() -> Result<Pattern> {
    let mut events = Vec::with_capacity(8);
    for beat in 0..4 {
        let (grace, main) = if beat % 2 == 0 { (SnareLeft, SnareRight) } else { (SnareRight, SnareLeft) };
        events.push(hit(grace, 0, beat, 0.0, 0.4));
        events.push(hit(main, 0, beat, 0.1, 1.0));
    }
    Pattern::new(events, 4)
}

fn triplets() -> Result<Pattern> {
    let mut events = Vec::with_capacity(12);
    for beat in 0..4 {
        let (lead, other) = if beat % 2 == 0 { (SnareRight, SnareLeft) } else { (SnareLeft, SnareRight) };
        events.push(hit(lead, 0, beat, 0.0, 1.0));
        events.push(hit(other, 0, beat, 1.33, 0.9));
        events.push(hit(lead, 0, beat, 2.66, 0.9));
    }
    Pattern::new(events, 4)
}

fn sixteenth_notes() -> Result<Pattern> {
    let events = (0..16u32)
        .map(|i| {
            let accent = if i % 4 == 0 { 1.0 } else { 0.8 };
            hit(HiHat, 0, i / 4, (i % 4) as f64, accent)
        })
        .collect();
    Pattern::new(events, 4)
}

fn double_paradiddle() -> Result<Pattern> {
    Pattern::from_table(
        &[
            ("snare-right", "0:0:0", 1.0),
            ("snare-left", "0:0:2", 1.0),
            ("snare-right", "0:1:0", 1.0),
            ("snare-left", "0:1:2", 1.0),
            ("snare-right", "0:2:0", 1.0),
            ("snare-right", "0:2:2", 1.0),
            ("snare-left", "0:3:0", 1.0),
            ("snare-right", "0:3:2", 1.0),
            ("snare-left", "1:0:0", 1.0),
            ("snare-right", "1:0:2", 1.0),
            ("snare-left", "1:1:0", 1.0),
            ("snare-left", "1:1:2", 1.0),
        ],
        4,
    )
}

/// Two grace notes bounced into a main stroke, lead hand alternating per beat.
fn drag() -> Result<Pattern> {
    let mut events = Vec::with_capacity(12);
    for beat in 0..4 {
        let (grace, main) = if beat % 2 == 0 { (SnareLeft, SnareRight) } else { (SnareRight, SnareLeft) };
        events.push(hit(grace, 0, beat, 0.0, 0.5));
        events.push(hit(grace, 0, beat, 0.3, 0.5));
        events.push(hit(main, 0, beat, 1.0, 1.0));
    }
    Pattern::new(events, 4)
}

fn accents() -> Result<Pattern> {
    let events = (0..8u32)
        .map(|i| {
            let (hand, velocity) = if i % 2 == 0 { (SnareRight, 1.0) } else { (SnareLeft, 0.6) };
            hit(hand, 0, i / 2, ((i % 2) * 2) as f64, velocity)
        })
        .collect();
    Pattern::new(events, 4)
}

fn sixteenth_coord() -> Result<Pattern> {
    let mut events: Vec<HitEvent> = (0..16u32)
        .map(|i| {
            let hand = if i % 2 == 0 { SnareRight } else { SnareLeft };
            hit(hand, 0, i / 4, (i % 4) as f64, 0.8)
        })
        .collect();
    events.extend((0..4).map(|beat| hit(Bass, 0, beat, 0.0, 1.0)));
    Pattern::new(events, 4)
}

fn syncopation() -> Result<Pattern> {
    let events = (0..8u32)
        .map(|i| {
            let velocity = if i % 2 == 0 { 0.6 } else { 1.0 };
            hit(Snare, 0, i / 2, ((i % 2) * 2) as f64, velocity)
        })
        .collect();
    Pattern::new(events, 4)
}

// -----------------------------------------------------------------------------
// Curriculum
// -----------------------------------------------------------------------------

pub static EXERCISES: &[Exercise] = &[
    // Grade 1 rudiments
    Exercise {
        id: "single-stroke",
        name: "Single Stroke Roll",
        grade: 1,
        difficulty: Difficulty::Beginner,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "R L R L R L R L",
        focus_areas: &[
            "Even spacing between hits",
            "Equal volume (dynamics) between both hands",
            "Steady pulse maintenance",
            "Foundation for all other rudiments",
        ],
        instructions: &[
            "Start with your hands on the drum, sticks ready",
            "Play alternating hands: Right, Left, Right, Left",
            "Focus on making both hands sound exactly the same",
            "Watch the particles - they should be evenly spaced",
            "Start at 60 bpm, gradually increase to 80 bpm",
        ],
        checklist_items: &[
            "Both hands sound equal in volume",
            "Spacing between hits is perfectly even",
            "Can maintain 80 bpm for 30 seconds without speeding up/slowing down",
            "Grip remains relaxed throughout",
        ],
        common_mistakes: &[
            "One hand playing louder than the other (usually the dominant hand)",
            "Rushing (speeding up gradually without noticing)",
            "Tensing up arms/shoulders - stay relaxed!",
        ],
        grade2_extension: Some("Increase speed to 100+ bpm, add accents on specific beats"),
        generator: single_stroke,
    },
    Exercise {
        id: "double-stroke",
        name: "Double Stroke Roll",
        grade: 1,
        difficulty: Difficulty::Beginner,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "RR LL RR LL",
        focus_areas: &[
            "Stick rebound control",
            "Paired hits (RR LL)",
            "Second stroke uses natural bounce",
            "Even volume across all four strokes in the pattern",
        ],
        instructions: &[
            "Play two hits with the right hand, then two with the left",
            "The FIRST hit is a full stroke, the SECOND uses the stick's natural rebound",
            "Don't force the second hit - let the stick bounce",
            "All four notes should sound even and controlled",
            "Watch for pairs of particles",
        ],
        checklist_items: &[
            "Can clearly hear pairs of hits (RR LL)",
            "Second stroke in each pair sounds as clear as the first",
            "No \"crushing\" or muffling of the second hit",
            "Pattern sounds smooth and flowing, not choppy",
        ],
        common_mistakes: &[
            "Forcing the second hit instead of using rebound",
            "Second hit too soft or barely audible",
            "Gripping stick too tightly (prevents natural bounce)",
        ],
        grade2_extension: Some("Use double strokes in rudiments like the \"Five Stroke Roll\""),
        generator: double_stroke,
    },
    Exercise {
        id: "paradiddle",
        name: "Single Paradiddle",
        grade: 1,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "R L R R  L R L L",
        focus_areas: &[
            "Combination of single and double strokes",
            "Hand-to-hand coordination",
            "Foundation for complex drum beats",
            "Smooth transitions between sticking patterns",
        ],
        instructions: &[
            "The pattern is: Single, Single, Double (RLRR), then switch hands (LRLL)",
            "Think of it as \"Pa-ra-did-dle\"",
            "The accent naturally falls on the first note of each group",
            "This builds the coordination needed for full drum kit playing",
            "Watch how the particles form asymmetric patterns",
        ],
        checklist_items: &[
            "Can clearly distinguish the single-single-double pattern",
            "Smooth transition when switching lead hands",
            "Pattern remains steady without hesitation",
            "Can repeat continuously for at least 1 minute",
        ],
        common_mistakes: &[
            "Rushing through the double stroke",
            "Hesitating when switching lead hands",
            "Accenting incorrectly (accent should be on first note)",
        ],
        grade2_extension: Some("Paradiddle-diddle, Double Paradiddle, variations with accents"),
        generator: paradiddle,
    },
    // Grade 1 rhythm
    Exercise {
        id: "quarter-notes",
        name: "Quarter Notes (4/4)",
        grade: 1,
        difficulty: Difficulty::Beginner,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "♩ ♩ ♩ ♩",
        focus_areas: &[
            "Understanding quarter note duration",
            "Steady pulse (one note per beat)",
            "Foundation of all rhythm reading",
            "Counting: 1, 2, 3, 4",
        ],
        instructions: &[
            "In 4/4 time, play one note on each beat",
            "Count out loud: \"1, 2, 3, 4\"",
            "Each note gets one full beat",
            "This is the foundation - master this first!",
            "Particles should be widely and evenly spaced",
        ],
        checklist_items: &[
            "Can count steadily: 1, 2, 3, 4",
            "Each note lands exactly on the beat",
            "No rushing between beats",
            "Can maintain pattern with metronome for 2 minutes",
        ],
        common_mistakes: &[
            "Rushing (notes getting closer together)",
            "Uneven spacing between beats",
        ],
        grade2_extension: Some("Combine with eighth notes and rests"),
        generator: quarter_notes,
    },
    Exercise {
        id: "eighth-notes",
        name: "Eighth Notes (4/4)",
        grade: 1,
        difficulty: Difficulty::Beginner,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "♫ ♫ ♫ ♫",
        focus_areas: &[
            "Understanding eighth note duration",
            "Playing twice as fast as quarter notes",
            "Counting: 1 & 2 & 3 & 4 &",
            "Transition control",
        ],
        instructions: &[
            "In 4/4 time, play TWO notes per beat",
            "Count: \"1 and 2 and 3 and 4 and\"",
            "Each eighth note is exactly half a quarter note",
            "Common in hi-hat patterns",
            "Particles will be closer together than quarters",
        ],
        checklist_items: &[
            "Can count: \"1 & 2 & 3 & 4 &\" steadily",
            "Eighth notes are exactly twice as fast as quarters",
            "All eighth notes are evenly spaced",
            "Can switch smoothly between quarters and eighths",
        ],
        common_mistakes: &[
            "Eighth notes not exactly twice as fast",
            "Hesitation when switching between quarters and eighths",
        ],
        grade2_extension: Some("Sixteenth notes, syncopation"),
        generator: eighth_notes,
    },
    Exercise {
        id: "quarter-eighth",
        name: "Quarter & Eighth Note Transitions",
        grade: 1,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "Quarter notes | Eighth notes | Repeat",
        focus_areas: &[
            "Smooth transitions between note values",
            "Maintaining steady pulse during changes",
            "Essential skill for sight reading",
            "Rhythm flexibility",
        ],
        instructions: &[
            "Play a measure of quarter notes (1, 2, 3, 4)",
            "Then switch to a measure of eighth notes (1 & 2 & 3 & 4 &)",
            "The PULSE stays the same - only the subdivision changes",
            "Focus on the transition point - no hesitation!",
            "Watch the particle spacing change smoothly",
        ],
        checklist_items: &[
            "Quarter notes section is steady",
            "Eighth notes section is steady",
            "Transition is smooth with no hesitation",
            "Can repeat pattern 4 times continuously",
        ],
        common_mistakes: &[
            "Speeding up during eighth notes",
            "Pausing at the transition point",
            "Losing the underlying pulse",
        ],
        grade2_extension: Some("Add triplets, sixteenth notes, mixed patterns"),
        generator: quarter_eighth,
    },
    // Grade 1 full kit
    Exercise {
        id: "rock-beat",
        name: "Basic Rock Beat",
        grade: 1,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "Bass 1 & 3 | Snare 2 & 4 | Hi-hat eighths",
        focus_areas: &[
            "Multi-limb coordination",
            "Bass drum on beats 1 and 3",
            "Snare on backbeat (2 and 4)",
            "Hi-hat steady eighth notes",
            "Essential groove for rock music",
        ],
        instructions: &[
            "STEP 1: Practice each part separately first",
            "  - Bass drum alone: 1, _, 3, _",
            "  - Snare alone: _, 2, _, 4",
            "  - Hi-hat alone: 1 & 2 & 3 & 4 &",
            "STEP 2: Combine bass + snare",
            "STEP 3: Add hi-hat last",
            "Listen to the demonstration to hear how parts lock together",
        ],
        checklist_items: &[
            "Each part maintains steady pulse independently",
            "Bass and Snare land precisely on correct beats",
            "Hi-hat eighth notes remain even throughout",
            "Can play continuously for 1 minute without stopping",
            "Body remains relaxed (no tension in shoulders/arms)",
        ],
        common_mistakes: &[
            "Hi-hat rushing or slowing down",
            "Missing the backbeat (snare on 2 & 4)",
            "Tensing up when adding limbs",
            "Losing independence between hands and feet",
        ],
        grade2_extension: Some("Add bass drum variations, 16th note hi-hats, fills"),
        generator: rock_beat,
    },
    Exercise {
        id: "waltz",
        name: "3/4 Waltz Pattern",
        grade: 1,
        difficulty: Difficulty::Beginner,
        target_tempo: 90,
        min_tempo: 70,
        sticking: "♩ ♩ ♩ (1, 2, 3)",
        focus_areas: &[
            "Understanding 3/4 time signature",
            "Three beats per measure",
            "Emphasis on beat 1",
            "Different feel from 4/4",
        ],
        instructions: &[
            "In 3/4 time, there are only THREE beats per measure",
            "Count: \"1, 2, 3, 1, 2, 3\"",
            "Beat 1 is usually emphasized (slightly louder)",
            "Common in classical and folk music",
        ],
        checklist_items: &[
            "Can count \"1, 2, 3\" steadily",
            "Beat 1 is slightly emphasized",
            "No accidental fourth beat!",
            "Feel the \"waltz\" swing",
        ],
        common_mistakes: &[
            "Adding a fourth beat (falling back into 4/4)",
            "Not emphasizing beat 1",
            "Counting too fast or too slow",
        ],
        grade2_extension: Some("Compound time signatures (6/8, 9/8)"),
        generator: waltz,
    },
    // Grade 2
    Exercise {
        id: "flam",
        name: "Flam",
        grade: 2,
        difficulty: Difficulty::Intermediate,
        target_tempo: 90,
        min_tempo: 70,
        sticking: "lR rL lR rL",
        focus_areas: &[
            "Grace note vs main note",
            "Consistency of \"thickness\" in sound",
            "Alternating lead hand",
        ],
        instructions: &[
            "The flam consists of a soft \"grace note\" followed by a strong \"main note\"",
            "The two hits should be very close together but not simultaneous",
            "Keep the grace note hand low (near the drum) and the main note hand higher",
            "Think of the sound \"flam\" itself",
        ],
        checklist_items: &[
            "Can clearly hear two distinct notes in each flam",
            "Grace note is consistently softer than the main note",
            "Can play flams starting with both right and left hands",
            "Consistent timing between grace and main notes",
        ],
        common_mistakes: &[],
        grade2_extension: None,
        generator: flam,
    },
    Exercise {
        id: "triplets",
        name: "Triplets (3:2)",
        grade: 2,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "RLR LRL RLR LRL",
        focus_areas: &[
            "Dividing the beat into three equal parts",
            "Alternating sticking (RLR LRL)",
            "Emphasis on the first note of each triplet",
        ],
        instructions: &[
            "Divide each beat into three even strokes",
            "Use alternating hands: R L R, then L R L",
            "The lead hand changes with every beat",
            "Think of the word \"Trip-le-let\" for counting",
        ],
        checklist_items: &[
            "All three notes in each triplet are evenly spaced",
            "Can count \"1-trip-let, 2-trip-let\" steadily",
            "Lead hand switches correctly on each beat",
            "First note of each triplet is slightly emphasized",
        ],
        common_mistakes: &[],
        grade2_extension: None,
        generator: triplets,
    },
    Exercise {
        id: "sixteenth-notes",
        name: "Sixteenth Notes",
        grade: 2,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "RLRL RLRL RLRL RLRL",
        focus_areas: &[
            "Dividing the beat into four equal parts",
            "Speed and precision",
            "Stamina development",
        ],
        instructions: &[
            "Divide each beat into four even strokes",
            "Count as \"1 e & a, 2 e & a...\"",
            "Focus on extreme evenness between all 16 notes in a bar",
            "Keep the strokes small and relaxed for speed",
        ],
        checklist_items: &[
            "Can maintain steady speed for 30 seconds",
            "All 16 notes sound identical in volume",
            "Notes are perfectly evenly spaced",
            "Arms and shoulders remain relaxed",
        ],
        common_mistakes: &[],
        grade2_extension: None,
        generator: sixteenth_notes,
    },
    Exercise {
        id: "double-paradiddle",
        name: "Double Paradiddle",
        grade: 2,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "RLRLRR LRLRLL",
        focus_areas: &[
            "Six-note grouping across the bar line",
            "Lead hand switching every group",
            "Extension of the single paradiddle",
        ],
        instructions: &[
            "Play two singles before the paradiddle: R L R L R R",
            "Switch hands for the second group: L R L R L L",
            "The group crosses the bar line - keep counting through it",
        ],
        checklist_items: &[
            "Both six-note groups sound even",
            "The double at the end of each group is not rushed",
            "Can loop the pattern without losing the bar line",
        ],
        common_mistakes: &[],
        grade2_extension: None,
        generator: double_paradiddle,
    },
    Exercise {
        id: "drag",
        name: "Drag (Ruff)",
        grade: 2,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "llR rrL llR rrL",
        focus_areas: &[
            "Two soft grace notes bounced from one hand",
            "Strong main stroke from the other hand",
            "Alternating lead hand",
        ],
        instructions: &[
            "Drop one stick and let it bounce twice, softly",
            "Follow with a full stroke from the other hand",
            "Alternate which hand plays the grace notes every beat",
        ],
        checklist_items: &[
            "Both grace notes are audible and soft",
            "Main stroke is clearly louder than the grace notes",
            "Can lead with either hand",
        ],
        common_mistakes: &[],
        grade2_extension: None,
        generator: drag,
    },
    Exercise {
        id: "accents",
        name: "Accent Control",
        grade: 2,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: ">R L >R L >R L >R L",
        focus_areas: &[
            "Loud versus soft strokes",
            "Stick height controls volume",
        ],
        instructions: &[
            "Accented strokes start high, unaccented strokes start low",
            "Keep the timing even while the volume changes",
        ],
        checklist_items: &[
            "Accents are clearly louder than the soft strokes",
            "Soft strokes stay soft after each accent",
            "Timing stays even between loud and soft notes",
        ],
        common_mistakes: &[],
        grade2_extension: None,
        generator: accents,
    },
    Exercise {
        id: "sixteenth-coord",
        name: "16th Note Coordination",
        grade: 2,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "Hands RLRL sixteenths | Bass quarters",
        focus_areas: &[
            "Independence between hands and feet",
            "Different rhythms played simultaneously",
        ],
        instructions: &[
            "Play steady quarter notes on the bass drum first",
            "Add alternating sixteenths with the hands on top",
            "Every fourth hand stroke lines up with the bass drum",
        ],
        checklist_items: &[
            "Bass drum stays locked to the beat",
            "Hand sixteenths stay even over the bass drum",
            "Can play the pattern for 1 minute",
        ],
        common_mistakes: &[],
        grade2_extension: None,
        generator: sixteenth_coord,
    },
    Exercise {
        id: "syncopation",
        name: "Syncopation",
        grade: 2,
        difficulty: Difficulty::Intermediate,
        target_tempo: 80,
        min_tempo: 60,
        sticking: "1 >& 2 >& 3 >& 4 >&",
        focus_areas: &[
            "Strong notes on weak beats",
            "Feeling the \"&\" of each beat",
        ],
        instructions: &[
            "Play eighth notes, soft on the beat and loud on the \"&\"",
            "Keep counting the beat out loud while the accents move",
        ],
        checklist_items: &[
            "Accents land on the \"&\" every time",
            "On-beat notes stay soft",
            "The pulse does not shift toward the accents",
        ],
        common_mistakes: &[],
        grade2_extension: None,
        generator: syncopation,
    },
];
