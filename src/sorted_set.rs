//! Sorted-set value pairing a member lookup table with a skip list.

use crate::border::ScoreBorder;
use crate::error::{Error, Result};
use crate::skiplist::{Element, SkipList, SkipListIter};
use std::collections::HashMap;

/// A set of unique members ordered by score.
///
/// The member table answers point queries and keeps duplicate keys out of the skip list, while the
/// skip list answers every ordered query. Both are updated together by each mutating operation.
///
/// A `SortedSet` does no locking of its own. A store sharing one between threads must hold an
/// exclusive lock for every mutation and keep readers out while it runs, for example by keeping
/// each set behind its own `Mutex` or `RwLock`.
///
/// # Examples
/// ```
/// use sorted_set::{ScoreBorder, SortedSet};
///
/// let mut set = SortedSet::new();
/// assert_eq!(set.add("alice", 3.0), Ok(true));
/// assert_eq!(set.add("bob", 1.0), Ok(true));
/// assert_eq!(set.add("alice", 0.5), Ok(false));
///
/// assert_eq!(set.rank("alice"), Some(0));
/// assert_eq!(set.score("bob"), Some(1.0));
/// assert_eq!(set.count(ScoreBorder::NegativeInfinity, ScoreBorder::inclusive(1.0)), 2);
/// assert!(set.add("carol", std::f64::NAN).is_err());
/// ```
pub struct SortedSet {
    dict: HashMap<String, f64>,
    list: SkipList,
}

impl SortedSet {
    /// Constructs a new, empty `SortedSet`.
    pub fn new() -> Self {
        SortedSet {
            dict: HashMap::new(),
            list: SkipList::new(),
        }
    }

    /// Constructs a `SortedSet` over an existing, empty skip list, such as one with a seeded level
    /// generator.
    ///
    /// # Panics
    ///
    /// Panics if `list` is not empty.
    pub fn with_list(list: SkipList) -> Self {
        assert!(list.is_empty(), "list must be empty.");
        SortedSet {
            dict: HashMap::new(),
            list,
        }
    }

    /// Adds a member with a score, or moves an existing member to a new score. Returns `true` if
    /// the member was not in the set before.
    ///
    /// Returns `Error::InvalidScore` without touching the set if `score` is `NaN`.
    pub fn add<S>(&mut self, member: S, score: f64) -> Result<bool>
    where S: Into<String>
    {
        if score.is_nan() {
            debug!("rejecting NaN score");
            return Err(Error::InvalidScore(score));
        }

        let member = member.into();
        match self.dict.get(&member).cloned() {
            Some(old_score) if old_score == score => Ok(false),
            Some(old_score) => {
                self.list.remove(&member, old_score);
                self.list.insert(member.clone(), score);
                self.dict.insert(member, score);
                Ok(false)
            }
            None => {
                self.list.insert(member.clone(), score);
                self.dict.insert(member, score);
                Ok(true)
            }
        }
    }

    /// Returns the score of a member.
    pub fn score(&self, member: &str) -> Option<f64> {
        self.dict.get(member).cloned()
    }

    /// Returns `true` if the member is in the set.
    pub fn contains(&self, member: &str) -> bool {
        self.dict.contains_key(member)
    }

    /// Removes a member and returns its element, or `None` if the member is not in the set.
    pub fn remove(&mut self, member: &str) -> Option<Element> {
        let score = self.dict.remove(member)?;
        self.list.remove(member, score)
    }

    /// Returns the 0-based rank of a member in ascending score order.
    pub fn rank(&self, member: &str) -> Option<usize> {
        let score = self.score(member)?;
        self.list.get_rank(member, score)
    }

    /// Returns the element at a 0-based rank.
    pub fn get_by_rank(&self, rank: usize) -> Option<&Element> {
        self.list.get_by_rank(rank)
    }

    /// Returns the elements whose 0-based ranks lie in `[start, stop)`, in ascending order.
    pub fn range_by_rank(&self, start: usize, stop: usize) -> Vec<&Element> {
        if start >= stop {
            return Vec::new();
        }
        self.list.iter_from_rank(start).take(stop - start).collect()
    }

    /// Returns the smallest element whose score lies within the two borders.
    pub fn first_in_score_range(&self, min: ScoreBorder, max: ScoreBorder) -> Option<&Element> {
        self.list.get_first_in_score_range(min, max)
    }

    /// Returns the number of elements whose scores lie within the two borders.
    pub fn count(&self, min: ScoreBorder, max: ScoreBorder) -> usize {
        let first = match self.list.get_first_in_score_range(min, max) {
            Some(element) => element,
            None => return 0,
        };
        let last = match self.list.get_last_in_score_range(min, max) {
            Some(element) => element,
            None => return 0,
        };
        match (
            self.list.get_rank(&first.member, first.score),
            self.list.get_rank(&last.member, last.score),
        ) {
            (Some(start), Some(end)) => end - start + 1,
            _ => 0,
        }
    }

    /// Removes the elements whose 0-based ranks lie in `[start, stop)` and returns them in
    /// ascending order.
    pub fn remove_range_by_rank(&mut self, start: usize, stop: usize) -> Vec<Element> {
        if start >= stop {
            return Vec::new();
        }
        let removed = self.list.remove_range_by_rank(start + 1, stop.saturating_add(1));
        self.forget(&removed);
        removed
    }

    /// Removes the elements whose scores lie within the two borders and returns them in ascending
    /// order.
    pub fn remove_range_by_score(&mut self, min: ScoreBorder, max: ScoreBorder) -> Vec<Element> {
        let removed = self.list.remove_range_by_score(min, max);
        self.forget(&removed);
        removed
    }

    fn forget(&mut self, removed: &[Element]) {
        for element in removed {
            self.dict.remove(&element.member);
        }
        trace!("removed {} members, {} left", removed.len(), self.len());
    }

    /// Returns the number of members in the set.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns an iterator over the set in ascending order.
    pub fn iter(&self) -> SkipListIter<'_> {
        self.list.iter()
    }
}

impl Default for SortedSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SortedSet;
    use crate::border::ScoreBorder;
    use crate::error::Error;
    use crate::skiplist::{Element, GeometricLevelGenerator, SkipList};
    use rand::{SeedableRng, XorShiftRng};
    use std::f64;

    fn seeded() -> SortedSet {
        let rng: XorShiftRng = SeedableRng::from_seed([4, 3, 2, 1]);
        SortedSet::with_list(SkipList::with_generator(GeometricLevelGenerator::with_rng(
            16, 0.25, rng,
        )))
    }

    fn members(set: &SortedSet) -> Vec<&str> {
        set.iter().map(|e| e.member.as_str()).collect()
    }

    #[test]
    fn test_add() {
        let mut set = seeded();
        assert_eq!(set.add("a", 1.0), Ok(true));
        assert_eq!(set.add("a", 1.0), Ok(false));
        assert_eq!(set.len(), 1);
        assert!(set.contains("a"));
        assert_eq!(set.score("a"), Some(1.0));
    }

    #[test]
    fn test_add_moves_member() {
        let mut set = seeded();
        set.add("a", 1.0).unwrap();
        set.add("b", 2.0).unwrap();
        assert_eq!(set.add("a", 3.0), Ok(false));
        assert_eq!(set.len(), 2);
        assert_eq!(members(&set), vec!["b", "a"]);
        assert_eq!(set.rank("a"), Some(1));
    }

    #[test]
    fn test_add_nan() {
        let mut set = seeded();
        match set.add("a", f64::NAN) {
            Err(Error::InvalidScore(score)) => assert!(score.is_nan()),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut set = seeded();
        set.add("a", 1.0).unwrap();
        set.add("b", 2.0).unwrap();
        assert_eq!(set.remove("a"), Some(Element::new("a", 1.0)));
        assert_eq!(set.remove("a"), None);
        assert!(!set.contains("a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_range_by_rank() {
        let mut set = seeded();
        for (i, member) in ["a", "b", "c", "d"].iter().enumerate() {
            set.add(*member, i as f64).unwrap();
        }
        let range: Vec<&str> = set
            .range_by_rank(1, 3)
            .into_iter()
            .map(|e| e.member.as_str())
            .collect();
        assert_eq!(range, vec!["b", "c"]);
        assert_eq!(set.range_by_rank(3, 10).len(), 1);
        assert!(set.range_by_rank(2, 1).is_empty());
        assert!(set.range_by_rank(10, 20).is_empty());
        assert_eq!(set.get_by_rank(3), Some(&Element::new("d", 3.0)));
    }

    #[test]
    fn test_count() {
        let mut set = seeded();
        for i in 0..10i32 {
            set.add(format!("m{}", i), f64::from(i)).unwrap();
        }
        assert_eq!(set.count(ScoreBorder::NegativeInfinity, ScoreBorder::PositiveInfinity), 10);
        assert_eq!(set.count(ScoreBorder::exclusive(2.0), ScoreBorder::inclusive(5.0)), 3);
        assert_eq!(set.count(ScoreBorder::inclusive(2.5), ScoreBorder::exclusive(3.0)), 0);
        assert_eq!(set.count(ScoreBorder::inclusive(20.0), ScoreBorder::PositiveInfinity), 0);
        assert_eq!(
            set.first_in_score_range(ScoreBorder::exclusive(2.0), ScoreBorder::PositiveInfinity),
            Some(&Element::new("m3", 3.0)),
        );
    }

    #[test]
    fn test_remove_range_by_rank() {
        let mut set = seeded();
        for i in 0..5i32 {
            set.add(format!("m{}", i), f64::from(i)).unwrap();
        }
        let removed = set.remove_range_by_rank(0, 2);
        assert_eq!(removed, vec![Element::new("m0", 0.0), Element::new("m1", 1.0)]);
        assert!(!set.contains("m0"));
        assert!(!set.contains("m1"));
        assert_eq!(set.len(), 3);
        assert_eq!(set.rank("m2"), Some(0));
    }

    #[test]
    fn test_remove_range_by_score() {
        let mut set = seeded();
        for i in 0..5i32 {
            set.add(format!("m{}", i), f64::from(i)).unwrap();
        }
        let removed = set.remove_range_by_score(ScoreBorder::inclusive(3.0), ScoreBorder::PositiveInfinity);
        assert_eq!(removed.len(), 2);
        assert_eq!(set.score("m3"), None);
        assert_eq!(members(&set), vec!["m0", "m1", "m2"]);
    }
}
