//! Seeded coherent gradient noise for occupation seeding
//!
//! Classic two-dimensional gradient noise over a shuffled permutation table.
//! Samples are normalized to `[0, 1]` so occupation thresholds can be read
//! directly against them.

use num_traits::Float;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const TABLE_SIZE: usize = 256;
const TABLE_MASK: usize = TABLE_SIZE - 1;

/// Quintic smoothstep used to blend between lattice gradients
fn fade<F: Float>(t: F) -> F {
    let six = F::from(6.0).unwrap_or_else(F::one);
    let fifteen = F::from(15.0).unwrap_or_else(F::one);
    let ten = F::from(10.0).unwrap_or_else(F::one);
    t * t * t * t.mul_add(six, -fifteen).mul_add(t, ten)
}

/// Linear interpolation between two values
fn lerp<F: Float>(a: F, b: F, t: F) -> F {
    (b - a).mul_add(t, a)
}

/// Gradient contribution for one lattice corner
///
/// The low bits of the hash select one of eight fixed directions.
const fn grad(hash: usize, dx: f64, dy: f64) -> f64 {
    match hash & 7 {
        0 => dx + dy,
        1 => dx - dy,
        2 => -dx + dy,
        3 => -dx - dy,
        4 => dx,
        5 => -dx,
        6 => dy,
        _ => -dy,
    }
}

/// Two-dimensional coherent noise with a seeded permutation table
///
/// Two tables built from the same random stream produce identical fields;
/// variation between seeding attempts comes from the sample offsets, not
/// from rebuilding the table.
#[derive(Debug, Clone)]
pub struct GradientNoise {
    permutation: Vec<usize>,
}

impl GradientNoise {
    /// Build a noise field from the given random stream
    pub fn seeded(rng: &mut StdRng) -> Self {
        let mut permutation: Vec<usize> = (0..TABLE_SIZE).collect();
        permutation.shuffle(rng);
        Self { permutation }
    }

    fn table(&self, index: usize) -> usize {
        self.permutation.get(index & TABLE_MASK).copied().unwrap_or(0)
    }

    fn corner_hash(&self, x: usize, y: usize) -> usize {
        self.table(self.table(x).wrapping_add(y))
    }

    /// Sample the field at a point, normalized and clamped to `[0, 1]`
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let cell_x = x.floor();
        let cell_y = y.floor();
        let lattice_x = (cell_x as i64).rem_euclid(TABLE_SIZE as i64) as usize;
        let lattice_y = (cell_y as i64).rem_euclid(TABLE_SIZE as i64) as usize;

        let dx = x - cell_x;
        let dy = y - cell_y;
        let u = fade(dx);
        let v = fade(dy);

        let g00 = grad(self.corner_hash(lattice_x, lattice_y), dx, dy);
        let g10 = grad(self.corner_hash(lattice_x + 1, lattice_y), dx - 1.0, dy);
        let g01 = grad(self.corner_hash(lattice_x, lattice_y + 1), dx, dy - 1.0);
        let g11 = grad(
            self.corner_hash(lattice_x + 1, lattice_y + 1),
            dx - 1.0,
            dy - 1.0,
        );

        let raw = lerp(lerp(g00, g10, u), lerp(g01, g11, u), v);

        // Diagonal gradients push the raw range slightly past ±1/√2
        (raw.mul_add(std::f64::consts::FRAC_1_SQRT_2, 1.0) / 2.0).clamp(0.0, 1.0)
    }
}
