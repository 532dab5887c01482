//! Zero-gravity particle field: every hit launches a particle that keeps
//! moving and bouncing, so even rhythms leave evenly spaced trails.

use crate::engine::VisualFeedback;
use crate::model::pattern::InstrumentId;
use log::trace;

pub const MAX_PARTICLES: usize = 100;
pub const MAX_AGE_S: f64 = 30.0;
/// Launch speed of a full-velocity hit in pixels per physics step.
const BASE_SPEED_PER_STEP: f64 = 3.0;
const STEPS_PER_SECOND: f64 = 60.0;
pub const BASE_SPEED_PX_PER_S: f64 = BASE_SPEED_PER_STEP * STEPS_PER_SECOND;
const SPAWN_MARGIN: f64 = 50.0;
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;
const GOLDEN_RATIO_FRAC: f64 = 0.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleStyle {
    pub radius: f64,
    pub mass: f64,
}

pub fn style_for(instrument: InstrumentId) -> Option<ParticleStyle> {
    match instrument {
        InstrumentId::Snare | InstrumentId::SnareRight | InstrumentId::SnareLeft => {
            Some(ParticleStyle { radius: 15.0, mass: 1.0 })
        }
        InstrumentId::Bass => Some(ParticleStyle { radius: 20.0, mass: 1.5 }),
        InstrumentId::HiHat => Some(ParticleStyle { radius: 12.0, mass: 0.8 }),
        InstrumentId::Tom => Some(ParticleStyle { radius: 18.0, mass: 1.2 }),
        InstrumentId::Crash => Some(ParticleStyle { radius: 24.0, mass: 1.0 }),
        InstrumentId::Click => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub instrument: InstrumentId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub born_at: f64,
}

#[derive(Debug)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    spawned: u64,
    sim_time: f64,
    enabled: bool,
}

impl ParticleField {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            particles: Vec::new(),
            spawned: 0,
            sim_time: 0.0,
            enabled: true,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawns a particle for `instrument`, faster for louder hits (up to [`BASE_SPEED_PX_PER_S`]).
    pub fn add_particle(&mut self, instrument: InstrumentId, velocity: f64) -> bool {
        let Some(style) = style_for(instrument) else {
            return false;
        };

        // low-discrepancy placement keeps the field deterministic
        let n = self.spawned as f64;
        let fx = (n * GOLDEN_RATIO_FRAC).fract();
        let fy = ((n + 0.5) * GOLDEN_RATIO_FRAC * GOLDEN_RATIO_FRAC).fract();
        let span_x = (self.width - 2.0 * SPAWN_MARGIN).max(0.0);
        let span_y = (self.height - 2.0 * SPAWN_MARGIN).max(0.0);

        let angle = n * GOLDEN_ANGLE;
        let speed = BASE_SPEED_PX_PER_S * velocity.clamp(0.0, 1.0);

        self.particles.push(Particle {
            instrument,
            x: SPAWN_MARGIN + fx * span_x,
            y: SPAWN_MARGIN + fy * span_y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            radius: style.radius,
            born_at: self.sim_time,
        });
        self.spawned += 1;

        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }

        true
    }

    /// Advances the simulation by `dt` seconds and expires particles older than [`MAX_AGE_S`].
    pub fn step(&mut self, dt: f64) {
        self.sim_time += dt;
        let (w, h) = (self.width, self.height);

        for p in self.particles.iter_mut() {
            p.x += p.vx * dt;
            p.y += p.vy * dt;

            // perfectly elastic walls
            if p.x - p.radius < 0.0 || p.x + p.radius > w {
                p.vx = -p.vx;
                p.x = p.x.clamp(p.radius, (w - p.radius).max(p.radius));
            }
            if p.y - p.radius < 0.0 || p.y + p.radius > h {
                p.vy = -p.vy;
                p.y = p.y.clamp(p.radius, (h - p.radius).max(p.radius));
            }
        }

        let now = self.sim_time;
        self.particles.retain(|p| now - p.born_at <= MAX_AGE_S);
    }
}

impl VisualFeedback for ParticleField {
    fn on_hit(&mut self, instrument: InstrumentId, velocity: f64) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.add_particle(instrument, velocity) {
            trace!("Particle for {} ({} alive)", instrument, self.particles.len());
        }
        Ok(())
    }

    fn advance(&mut self, dt: f64) {
        self.step(dt);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn louder_hits_move_faster() {
        let mut field = ParticleField::new(800.0, 600.0);
        field.add_particle(InstrumentId::Snare, 1.0);
        field.add_particle(InstrumentId::Snare, 0.5);

        let speed = |p: &Particle| (p.vx * p.vx + p.vy * p.vy).sqrt();
        let ps = field.particles();
        assert!((speed(&ps[0]) - 180.0).abs() < 1e-9);
        assert!((speed(&ps[1]) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn one_second_covers_sixty_steps_of_travel() {
        let mut field = ParticleField::new(10_000.0, 10_000.0);
        field.add_particle(InstrumentId::Crash, 1.0);
        let before = field.particles()[0].clone();
        field.step(1.0);
        let after = &field.particles()[0];

        let moved = ((after.x - before.x).powi(2) + (after.y - before.y).powi(2)).sqrt();
        assert!((moved - 180.0).abs() < 1e-6, "moved {}", moved);
    }

    #[test]
    fn keeps_at_most_max_particles() {
        let mut field = ParticleField::new(800.0, 600.0);
        for _ in 0..(MAX_PARTICLES + 20) {
            field.on_hit(InstrumentId::HiHat, 0.8).unwrap();
        }
        assert_eq!(field.particles().len(), MAX_PARTICLES);
    }

    #[test]
    fn old_particles_expire() {
        let mut field = ParticleField::new(800.0, 600.0);
        field.on_hit(InstrumentId::Bass, 1.0).unwrap();
        field.step(10.0);
        field.on_hit(InstrumentId::Bass, 1.0).unwrap();
        field.step(25.0);
        assert_eq!(field.particles().len(), 1);
    }

    #[test]
    fn clicks_and_disabled_field_spawn_nothing() {
        let mut field = ParticleField::new(800.0, 600.0);
        field.on_hit(InstrumentId::Click, 1.0).unwrap();
        field.set_enabled(false);
        field.on_hit(InstrumentId::Crash, 1.0).unwrap();
        assert!(field.particles().is_empty());
    }

    #[test]
    fn particles_stay_inside_the_walls() {
        let mut field = ParticleField::new(200.0, 150.0);
        for _ in 0..10 {
            field.on_hit(InstrumentId::Tom, 1.0).unwrap();
        }
        for _ in 0..500 {
            field.step(1.0);
        }
        assert!(field.particles().is_empty());

        field.on_hit(InstrumentId::Tom, 1.0).unwrap();
        for _ in 0..25 {
            field.step(1.0);
            for p in field.particles() {
                assert!(p.x >= p.radius && p.x <= 200.0 - p.radius);
                assert!(p.y >= p.radius && p.y <= 150.0 - p.radius);
            }
        }
    }
}
