//! Deterministic seed-noise generation for the terrain height texture.
//!
//! The renderer seeds its procedural texture once at bootstrap from a byte
//! buffer produced here. The generator is a pure function of `(size, seed)`:
//! octave value noise over a seeded permutation lattice, quantised to `u8`
//! and packed as RGBA8 with the height in the red channel and the remaining
//! channels reserved as zero.

use rand::prelude::*;

/// Seed used by the bundled terrain demo.
pub const DEFAULT_SEED: u64 = 123_456;

/// Octaves accumulated per sample.
const OCTAVES: u32 = 4;

/// Base lattice frequency relative to the texture resolution.
const BASE_FREQUENCY: f32 = 8.0;

const LATTICE_SIZE: usize = 256;
const LATTICE_MASK: usize = LATTICE_SIZE - 1;

/// Seeded value-noise lattice.
///
/// A shuffled permutation table indexes a fixed set of lattice values; both
/// are derived from the seed, so samples are reproducible across runs and
/// platforms.
pub struct NoiseField {
    permutation: [u8; LATTICE_SIZE],
    values: [f32; LATTICE_SIZE],
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut permutation = [0u8; LATTICE_SIZE];
        for (index, slot) in permutation.iter_mut().enumerate() {
            *slot = index as u8;
        }
        permutation.shuffle(&mut rng);

        let mut values = [0f32; LATTICE_SIZE];
        for slot in values.iter_mut() {
            *slot = rng.gen_range(0.0..=1.0);
        }

        Self {
            permutation,
            values,
        }
    }

    fn lattice(&self, x: i32, y: i32) -> f32 {
        let px = self.permutation[(x as usize) & LATTICE_MASK] as usize;
        let py = (y as usize) & LATTICE_MASK;
        let index = self.permutation[(px + py) & LATTICE_MASK] as usize;
        self.values[index]
    }

    /// Single-octave value noise in `[0, 1]`.
    fn sample(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = smoothstep(x - x0);
        let ty = smoothstep(y - y0);
        let (ix, iy) = (x0 as i32, y0 as i32);

        let top = lerp(self.lattice(ix, iy), self.lattice(ix + 1, iy), tx);
        let bottom = lerp(
            self.lattice(ix, iy + 1),
            self.lattice(ix + 1, iy + 1),
            tx,
        );
        lerp(top, bottom, ty)
    }

    /// Fractal sum of [`OCTAVES`] octaves, normalised back to `[0, 1]`.
    pub fn octave_sample(&self, x: f32, y: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut range = 0.0;
        for _ in 0..OCTAVES {
            total += amplitude * self.sample(x * frequency, y * frequency);
            range += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        total / range
    }
}

/// Produces the RGBA8 seed buffer for a `size` x `size` height texture.
///
/// The buffer is exactly `size * size * 4` bytes in row-major order. Channel
/// 0 carries the quantised height; channels 1-3 are zero.
pub fn height_map(size: u32, seed: u64) -> Vec<u8> {
    let field = NoiseField::new(seed);
    let frequency = BASE_FREQUENCY / size as f32;

    let mut bytes = Vec::with_capacity(size as usize * size as usize * 4);
    for row in 0..size {
        for column in 0..size {
            let sample = field.octave_sample(column as f32 * frequency, row as f32 * frequency);
            bytes.push((sample.clamp(0.0, 1.0) * 255.0) as u8);
            bytes.push(0);
            bytes.push(0);
            bytes.push(0);
        }
    }
    bytes
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_has_rgba8_layout() {
        let size = 64;
        let bytes = height_map(size, DEFAULT_SEED);
        assert_eq!(bytes.len(), (size * size * 4) as usize);
        for pixel in bytes.chunks_exact(4) {
            assert_eq!(&pixel[1..], &[0, 0, 0]);
        }
    }

    #[test]
    fn same_seed_is_deterministic() {
        assert_eq!(height_map(32, DEFAULT_SEED), height_map(32, DEFAULT_SEED));
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(height_map(32, 1), height_map(32, 2));
    }

    #[test]
    fn octave_samples_stay_normalised() {
        let field = NoiseField::new(DEFAULT_SEED);
        for row in 0..40 {
            for column in 0..40 {
                let sample = field.octave_sample(column as f32 * 0.37, row as f32 * 0.37);
                assert!((0.0..=1.0).contains(&sample), "sample {sample} out of range");
            }
        }
    }

    #[test]
    fn negative_coordinates_sample_cleanly() {
        let field = NoiseField::new(DEFAULT_SEED);
        for row in -20..0 {
            for column in -20..0 {
                let sample = field.octave_sample(column as f32 * 0.37, row as f32 * 0.37);
                assert!((0.0..=1.0).contains(&sample), "sample {sample} out of range");
            }
        }
    }

    #[test]
    fn field_is_not_constant() {
        let bytes = height_map(64, DEFAULT_SEED);
        let first = bytes[0];
        assert!(bytes.iter().step_by(4).any(|&value| value != first));
    }
}
