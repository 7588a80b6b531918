//! Rank-augmented skip list ordering (member, score) pairs.

mod level;
mod list;
mod node;

pub use self::level::{GeometricLevelGenerator, LevelGenerator, MAX_LEVEL, PROMOTION_PROBABILITY};
pub use self::list::{SkipList, SkipListIter};
pub use self::node::Element;
