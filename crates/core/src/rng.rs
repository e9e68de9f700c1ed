//! RNG module - uniform piece generation with a one-piece preview
//!
//! Every draw picks one of the seven kinds uniformly at random; there is no
//! bag, so repeats are possible. A small LCG keeps games reproducible from a
//! seed, which the tests rely on.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of an LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }
}

/// Uniform piece source holding exactly one piece of lookahead.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    next: PieceKind,
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::roll(&mut rng);
        Self { next, rng, seed }
    }

    fn roll(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// The piece the next draw will return.
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the queued piece and refill the preview.
    pub fn draw(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = Self::roll(&mut self.rng);
        kind
    }

    /// Seed the queue was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_draw_returns_peeked_piece() {
        let mut queue = PieceQueue::new(42);
        for _ in 0..50 {
            let peeked = queue.peek();
            assert_eq!(queue.draw(), peeked);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceQueue::new(99);
        let mut b = PieceQueue::new(99);
        for _ in 0..30 {
            assert_eq!(a.draw(), b.draw());
        }
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn test_all_kinds_appear() {
        let mut queue = PieceQueue::new(2024);
        let mut seen = [false; 7];
        for _ in 0..700 {
            seen[(queue.draw().id() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every kind should show up: {:?}", seen);
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        let mut queue = PieceQueue::new(1);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            counts[(queue.draw().id() - 1) as usize] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            assert!((700..=1300).contains(&c), "kind {} drawn {} times", i + 1, c);
        }
    }
}
