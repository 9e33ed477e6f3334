use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::dice::{MAX_FACE_VALUE, MIN_FACE_VALUE};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform face value in 1..=6.
    pub fn face_value(&mut self) -> u8 {
        self.rng.gen_range(MIN_FACE_VALUE..=MAX_FACE_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_values_stay_in_range() {
        let mut rng = RngState::from_seed(7);
        for _ in 0..1000 {
            let face = rng.face_value();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngState::from_seed(99);
        let mut b = RngState::from_seed(99);
        let faces_a: Vec<u8> = (0..20).map(|_| a.face_value()).collect();
        let faces_b: Vec<u8> = (0..20).map(|_| b.face_value()).collect();
        assert_eq!(faces_a, faces_b);
    }
}
