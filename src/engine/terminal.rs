use crate::engine::{SoundTrigger, velocity_to_volume_db};
use crate::model::pattern::InstrumentId;
use anyhow::Context;
use log::debug;
use std::io::{self, Stdout, Write};
use std::time::Instant;

/// Column order of the lane display.
const LANES: &[(&str, &[InstrumentId])] = &[
    ("SN", &[InstrumentId::Snare, InstrumentId::SnareRight, InstrumentId::SnareLeft]),
    ("BD", &[InstrumentId::Bass]),
    ("HH", &[InstrumentId::HiHat]),
    ("TM", &[InstrumentId::Tom]),
    ("CR", &[InstrumentId::Crash]),
    ("CL", &[InstrumentId::Click]),
];

/// Stands in for a drum kit by printing one lane row per hit.
#[derive(Debug)]
pub struct TerminalKit<W: Write = Stdout> {
    out: W,
    started: Option<Instant>,
    show_header: bool,
}

impl TerminalKit<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalKit<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: None,
            show_header: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn marker(velocity: f64) -> char {
        match velocity {
            v if v >= 0.9 => 'X',
            v if v >= 0.6 => 'x',
            _ => 'o',
        }
    }

    fn hand(instrument: InstrumentId) -> char {
        match instrument {
            InstrumentId::SnareRight => 'R',
            InstrumentId::SnareLeft => 'L',
            _ => ' ',
        }
    }

    /// Renders a hit row, `elapsed_s` is shown in the left margin.
    pub fn format_hit(instrument: InstrumentId, velocity: f64, elapsed_s: f64) -> String {
        let mut row = format!("{:>9.3}s |", elapsed_s);
        for (_, members) in LANES {
            if members.contains(&instrument) {
                row.push_str(&format!(" {}{} ", Self::marker(velocity), Self::hand(instrument)));
            } else {
                row.push_str(" .  ");
            }
        }
        row.push_str(&format!("| {:<11} {:>6.1} dB", instrument.name(), velocity_to_volume_db(velocity)));
        row
    }

    fn header() -> String {
        let mut row = format!("{:>10} |", "time");
        for (label, _) in LANES {
            row.push_str(&format!(" {}  ", label));
        }
        row.push_str("| instrument");
        row
    }
}

impl<W: Write> SoundTrigger for TerminalKit<W> {
    fn initialize(&mut self) -> anyhow::Result<()> {
        self.started = Some(Instant::now());
        if self.show_header {
            writeln!(self.out, "{}", Self::header()).context("Failed to write lane header..!")?;
            self.show_header = false;
        }
        debug!("Terminal kit ready..!");
        Ok(())
    }

    fn trigger(&mut self, instrument: InstrumentId, velocity: f64) -> anyhow::Result<()> {
        let started = *self.started.get_or_insert_with(Instant::now);
        let row = Self::format_hit(instrument, velocity, started.elapsed().as_secs_f64());

        writeln!(self.out, "{}", row).context("Failed to write hit row..!")?;
        self.out.flush().context("Failed to flush terminal..!")?;
        Ok(())
    }
}
