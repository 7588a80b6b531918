//! Ordered index backing the sorted-set value type of a key-value store.
//!
//! The core is `skiplist::SkipList`, a rank-augmented skip list over (member, score) pairs that
//! supports logarithmic insertion, rank lookup, score range lookup and ranked bulk removal.
//! `SortedSet` is the owning value type that pairs it with a member lookup table.

extern crate rand;
extern crate serde;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod arena;
mod border;
mod error;
pub mod skiplist;
mod sorted_set;

pub use crate::border::ScoreBorder;
pub use crate::error::{Error, Result};
pub use crate::skiplist::Element;
pub use crate::sorted_set::SortedSet;
