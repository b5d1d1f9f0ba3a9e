//! Seeded randomness for the scramble step.
//!
//! The board scramble has to be reproducible from a single `u32` seed so a
//! session can be replayed and tests can pin exact arrangements. Everything
//! here is a stateless function of `(seed, salt)`.

/// Chance for each transform coin flip to come up tails (no transform).
/// Each tile gets three independent trials: rotate left, rotate right,
/// flip. The trials are not mutually exclusive, so a tile can net a 180
/// degree turn plus a flip, or come through untouched.
pub const TRANSFORM_SKIP_CHANCE: f32 = 0.33;

const ORDER_SALT: u32 = 0xC0DE;
const ROTATE_LEFT_SALT: u32 = 0x1E_F7;
const ROTATE_RIGHT_SALT: u32 = 0x41_6847;
const FLIP_SALT: u32 = 0xF11F_5EED;

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

/// Uniform value in `[0, 1)` derived from the seed and a salt.
pub fn rand_unit(seed: u32, salt: u32) -> f32 {
    let mixed = splitmix32(seed ^ salt);
    let top = mixed >> 8;
    top as f32 / ((1u32 << 24) as f32)
}

/// Fisher-Yates over the slice, deterministic per seed.
pub fn shuffle_in_place<T>(seed: u32, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let salt = ORDER_SALT + i as u32;
        let j = (rand_unit(seed, salt) * (i as f32 + 1.0)) as usize;
        items.swap(i, j);
    }
}

/// The permutation `shuffle_in_place` applies for this seed, as indices.
pub fn shuffle_order(seed: u32, total: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..total).collect();
    shuffle_in_place(seed, &mut order);
    order
}

/// The three independent transform coin flips for one tile:
/// `(rotate_left, rotate_right, flip)`.
pub fn transform_trials(seed: u32, id: usize) -> (bool, bool, bool) {
    let salt = (id as u32).wrapping_mul(3);
    (
        rand_unit(seed, ROTATE_LEFT_SALT.wrapping_add(salt)) > TRANSFORM_SKIP_CHANCE,
        rand_unit(seed, ROTATE_RIGHT_SALT.wrapping_add(salt)) > TRANSFORM_SKIP_CHANCE,
        rand_unit(seed, FLIP_SALT.wrapping_add(salt)) > TRANSFORM_SKIP_CHANCE,
    )
}
