use rand::Rng;

pub const PARTICLE_COUNT: usize = 20;

/// One floating background dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub size_px: f64,
    pub left_pct: f64,
    pub delay_s: f64,
    pub duration_s: f64,
}

impl Particle {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            size_px: rng.random::<f64>() * 10.0 + 5.0,
            left_pct: rng.random::<f64>() * 100.0,
            delay_s: rng.random::<f64>() * 15.0,
            duration_s: rng.random::<f64>() * 10.0 + 10.0,
        }
    }

    /// Inline style for the particle element.
    pub fn css(&self) -> String {
        format!(
            "width: {size}px; height: {size}px; left: {left}%; animation-delay: {delay}s; animation-duration: {duration}s;",
            size = self.size_px,
            left = self.left_pct,
            delay = self.delay_s,
            duration = self.duration_s,
        )
    }
}

pub fn scatter<R: Rng>(rng: &mut R, count: usize) -> Vec<Particle> {
    (0..count).map(|_| Particle::random(&mut *rng)).collect()
}
