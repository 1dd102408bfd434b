//! Cosmetic particles (food burst)

use glam::Vec2;
use rand::Rng;

/// Maximum particles the renderer can upload
pub const MAX_PARTICLES: usize = 256;

/// A short-lived spark
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per 16 ms
    pub vel: Vec2,
    pub age_ms: f32,
    pub life_ms: f32,
    pub color: [u8; 3],
}

impl Particle {
    /// Random direction, speed 1-4, lifetime 400-900 ms
    pub fn spawn<R: Rng>(origin: Vec2, color: [u8; 3], rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(1.0..4.0);
        Self {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            age_ms: 0.0,
            life_ms: rng.random_range(400.0..900.0),
            color,
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        self.age_ms += dt_ms;
        self.pos += self.vel * (dt_ms / 16.0);
    }

    pub fn is_alive(&self) -> bool {
        self.age_ms < self.life_ms
    }

    /// Remaining life fraction, 1 at birth and 0 at death
    pub fn fade(&self) -> f32 {
        (1.0 - self.age_ms / self.life_ms).max(0.0)
    }

    /// Draw radius shrinks with age, never below one pixel
    pub fn radius(&self) -> f32 {
        (3.0 * self.fade()).max(1.0)
    }
}

/// Bounded particle pool
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    cap: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::new(),
            cap: cap.min(MAX_PARTICLES),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Change the cap, dropping the oldest particles if over
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap.min(MAX_PARTICLES);
        self.trim();
    }

    /// Emit `count` particles at `origin`
    ///
    /// All particles are rolled even when capped so the RNG stream does not
    /// depend on the quality preset.
    pub fn burst<R: Rng>(&mut self, origin: Vec2, color: [u8; 3], count: usize, rng: &mut R) {
        for _ in 0..count {
            self.particles.push(Particle::spawn(origin, color, rng));
        }
        self.trim();
    }

    /// Age and move every particle, discarding the dead
    pub fn update(&mut self, dt_ms: f32) {
        for p in self.particles.iter_mut() {
            p.update(dt_ms);
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn trim(&mut self) {
        if self.particles.len() > self.cap {
            let excess = self.particles.len() - self.cap;
            self.particles.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let p = Particle::spawn(Vec2::ZERO, [255, 200, 50], &mut rng);
            let speed = p.vel.length();
            assert!((1.0 - 1e-4..=4.0 + 1e-4).contains(&speed));
            assert!((400.0..900.0).contains(&p.life_ms));
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::default();
        system.burst(Vec2::new(10.0, 10.0), [255, 200, 50], 18, &mut rng);
        assert_eq!(system.len(), 18);

        system.update(300.0);
        assert_eq!(system.len(), 18);

        system.update(600.0);
        assert!(system.is_empty());
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut system = ParticleSystem::new(10);
        system.burst(Vec2::ZERO, [0, 0, 0], 18, &mut rng);
        assert_eq!(system.len(), 10);

        system.set_cap(4);
        assert_eq!(system.len(), 4);
    }

    #[test]
    fn test_fade_and_radius() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = Particle::spawn(Vec2::ZERO, [0, 0, 0], &mut rng);
        assert!((p.fade() - 1.0).abs() < f32::EPSILON);
        assert!((p.radius() - 3.0).abs() < f32::EPSILON);
        p.age_ms = p.life_ms * 2.0;
        assert_eq!(p.fade(), 0.0);
        assert_eq!(p.radius(), 1.0);
    }
}
