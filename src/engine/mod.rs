use crate::model::pattern::InstrumentId;

pub mod particles;
pub mod terminal;

pub const MIN_VOLUME_DB: f64 = -20.0;
pub const MAX_VOLUME_DB: f64 = 0.0;

/// Maps a 0.0..=1.0 velocity linearly onto -20dB..=0dB.
pub fn velocity_to_volume_db(velocity: f64) -> f64 {
    let velocity = if velocity.is_nan() { 0.0 } else { velocity.clamp(0.0, 1.0) };
    MIN_VOLUME_DB + velocity * (MAX_VOLUME_DB - MIN_VOLUME_DB)
}

/// Something that makes a drum sound.
pub trait SoundTrigger {
    /// Prepare the backend, called once before anything is triggered.
    fn initialize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Must return promptly, the scheduler calls this from its dispatch loop.
    fn trigger(&mut self, instrument: InstrumentId, velocity: f64) -> anyhow::Result<()>;
}

/// Something that shows a drum hit.
pub trait VisualFeedback {
    fn initialize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_hit(&mut self, instrument: InstrumentId, velocity: f64) -> anyhow::Result<()>;

    /// Moves any animation forward by `dt` seconds.
    fn advance(&mut self, _dt: f64) {}
}

/// Backend that ignores every hit.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundTrigger for Silent {
    fn trigger(&mut self, _instrument: InstrumentId, _velocity: f64) -> anyhow::Result<()> {
        Ok(())
    }
}

impl VisualFeedback for Silent {
    fn on_hit(&mut self, _instrument: InstrumentId, _velocity: f64) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn velocity_maps_onto_twenty_db_range() {
        assert_eq!(velocity_to_volume_db(0.0), -20.0);
        assert_eq!(velocity_to_volume_db(1.0), 0.0);
        assert_eq!(velocity_to_volume_db(0.5), -10.0);

        let mut last = f64::NEG_INFINITY;
        for step in 0..=100 {
            let db = velocity_to_volume_db(step as f64 / 100.0);
            assert!(db >= last);
            last = db;
        }
    }

    #[test]
    fn out_of_range_velocity_is_clamped() {
        assert_eq!(velocity_to_volume_db(-1.0), -20.0);
        assert_eq!(velocity_to_volume_db(3.0), 0.0);
        assert_eq!(velocity_to_volume_db(f64::NAN), -20.0);
    }
}
