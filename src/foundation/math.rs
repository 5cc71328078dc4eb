/// Small deterministic RNG used for per-instance jitter (eye wander, shake
/// noise, wobble phase). Seeds are captured explicitly at construction or
/// trigger time so simulations replay bit-for-bit.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seeded constructor.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform float in `[-1, 1)`.
    pub fn next_f64_signed(&mut self) -> f64 {
        self.next_f64_01() * 2.0 - 1.0
    }
}

/// Hashed lattice noise in `[0, 1)` for integer coordinate `x` under `seed`.
///
/// Stateless: the same `(seed, x)` pair always yields the same value, which
/// lets time-indexed jitter be sampled as a pure function of elapsed time.
pub(crate) fn noise01(seed: u64, x: u64) -> f64 {
    let mut rng = Rng64::new(seed ^ x.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01()
}

/// Signed variant of [`noise01`] in `[-1, 1)`.
pub(crate) fn noise_signed(seed: u64, x: u64) -> f64 {
    noise01(seed, x) * 2.0 - 1.0
}
