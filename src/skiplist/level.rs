use rand::{self, Rng, XorShiftRng};

/// Default number of levels a skip list may use.
pub const MAX_LEVEL: usize = 16;

/// Default probability that a node is promoted to the next level.
pub const PROMOTION_PROBABILITY: f64 = 0.25;

/// Decides how many levels a newly inserted node participates in.
///
/// The height of a node is drawn once, when it is inserted, and never changes afterwards.
pub trait LevelGenerator {
    /// The maximum height this generator will ever return. The header of a skip list is sized
    /// from this value.
    fn max_level(&self) -> usize;

    /// Draws a height in `1..=self.max_level()`.
    fn random_level(&mut self) -> usize;
}

/// A level generator producing geometrically distributed heights.
///
/// Starting at a height of one, the height is extended with probability `p` per independent
/// coin flip until a flip fails or `max_level` is reached. With the defaults this gives
/// `P(height = k) = 0.75 * 0.25^(k - 1)` for `k < 16`, with the remaining mass on `16`.
///
/// # Examples
/// ```
/// extern crate rand;
/// extern crate sorted_set;
///
/// use rand::{SeedableRng, XorShiftRng};
/// use sorted_set::skiplist::{GeometricLevelGenerator, LevelGenerator};
///
/// let rng: XorShiftRng = SeedableRng::from_seed([1, 2, 3, 4]);
/// let mut generator = GeometricLevelGenerator::with_rng(4, 0.5, rng);
///
/// let level = generator.random_level();
/// assert!(level >= 1 && level <= 4);
/// ```
pub struct GeometricLevelGenerator<R = XorShiftRng>
where R: Rng
{
    max_level: usize,
    p: f64,
    rng: R,
}

impl GeometricLevelGenerator {
    /// Constructs a generator with `max_level` levels and promotion probability `p`, seeded from
    /// the thread-local generator.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero or `p` is not strictly between 0 and 1.
    pub fn new(max_level: usize, p: f64) -> Self {
        Self::with_rng(max_level, p, rand::weak_rng())
    }
}

impl<R> GeometricLevelGenerator<R>
where R: Rng
{
    /// Constructs a generator that draws from `rng`. A seeded `rng` yields a reproducible
    /// sequence of heights.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero or `p` is not strictly between 0 and 1.
    pub fn with_rng(max_level: usize, p: f64, rng: R) -> Self {
        assert!(max_level > 0, "max_level must be non-zero.");
        assert!(p > 0.0 && p < 1.0, "p must be in (0, 1).");
        GeometricLevelGenerator { max_level, p, rng }
    }
}

impl Default for GeometricLevelGenerator {
    fn default() -> Self {
        Self::new(MAX_LEVEL, PROMOTION_PROBABILITY)
    }
}

impl<R> LevelGenerator for GeometricLevelGenerator<R>
where R: Rng
{
    fn max_level(&self) -> usize {
        self.max_level
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.max_level && self.rng.gen::<f64>() < self.p {
            level += 1;
        }
        level
    }
}
