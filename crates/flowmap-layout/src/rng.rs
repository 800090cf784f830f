/// Seeded xorshift64* generator.
///
/// Layout runs never touch global randomness: the seed is part of the options so that identical
/// inputs always reproduce identical coordinates.
#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform sample in `[0, 1)` with 53 bits of precision.
    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// Uniform sample in `[-0.5, 0.5)`.
    pub(crate) fn next_f64_centered(&mut self) -> f64 {
        self.next_f64_unit() - 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::XorShift64Star;

    #[test]
    fn next_f64_unit_matches_reference_sequence_for_seed_one() {
        let mut rng = XorShift64Star::new(1);
        let expected = [
            0.28083505005035947,
            0.6711372530266764,
            0.7258461452833668,
            0.303529299965799,
            0.056176763098259475,
        ];
        for (i, &e) in expected.iter().enumerate() {
            let v = rng.next_f64_unit();
            assert!(
                (v - e).abs() < 1e-15,
                "unexpected rng value at {i}: got {v}, expected {e}"
            );
        }
    }

    #[test]
    fn zero_seed_behaves_like_seed_one() {
        let mut a = XorShift64Star::new(0);
        let mut b = XorShift64Star::new(1);
        for _ in 0..8 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn centered_samples_stay_in_half_open_band() {
        let mut rng = XorShift64Star::new(42);
        for _ in 0..1_000 {
            let v = rng.next_f64_centered();
            assert!((-0.5..0.5).contains(&v), "out of band: {v}");
        }
    }
}
