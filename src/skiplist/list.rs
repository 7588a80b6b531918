use crate::arena::{Arena, Handle};
use crate::border::ScoreBorder;
use crate::skiplist::level::{GeometricLevelGenerator, LevelGenerator};
use crate::skiplist::node::{Element, Link, Node};

// `None` stands for the header wherever a node position is expected.
type Position = Option<Handle>;

/// An ordered index of (member, score) pairs implemented by a rank-augmented skip list.
///
/// A skiplist is a probabilistic data structure that maintains a linked hierarchy of
/// subsequences. Level 0 is a doubly linked list of every element in ascending (score, member)
/// order, and each level above it contains a random subset of the level below. Every link also
/// stores its span, the number of level 0 hops it skips over, which allows ranks to be computed
/// while descending and makes rank lookup and ranged removal run in logarithmic time.
///
/// Nodes live in an arena owned by the list. Forward links and back references are handles into
/// that arena, and only removal from the list ever frees a node.
///
/// The list performs no validation of its input. Scores must not be `NaN` and a (score, member)
/// key must not be inserted twice; both are the caller's responsibility. It does no internal
/// locking either, so a caller sharing a list between threads must serialize every mutation
/// against all other access.
///
/// # Examples
/// ```
/// use sorted_set::skiplist::SkipList;
/// use sorted_set::ScoreBorder;
///
/// let mut list = SkipList::new();
/// list.insert("m1", 1.0);
/// list.insert("m3", 3.0);
/// list.insert("m2", 2.0);
///
/// assert_eq!(list.get_by_rank(1).map(|e| e.member.as_str()), Some("m2"));
/// assert_eq!(list.get_by_rank(3), None);
///
/// let first = list.get_first_in_score_range(
///     ScoreBorder::exclusive(1.0),
///     ScoreBorder::PositiveInfinity,
/// );
/// assert_eq!(first.map(|e| e.score), Some(2.0));
///
/// let removed = list.remove_range_by_rank(1, 3);
/// assert_eq!(removed.len(), 2);
/// assert_eq!(list.len(), 1);
/// ```
pub struct SkipList<G = GeometricLevelGenerator>
where G: LevelGenerator
{
    nodes: Arena<Node>,
    head: Vec<Link>,
    tail: Option<Handle>,
    len: usize,
    level: usize,
    generator: G,
}

impl SkipList {
    /// Constructs a new, empty `SkipList` with 16 levels and a promotion probability of 1/4.
    ///
    /// # Examples
    /// ```
    /// use sorted_set::skiplist::SkipList;
    ///
    /// let list = SkipList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.level(), 1);
    /// ```
    pub fn new() -> Self {
        Self::with_generator(GeometricLevelGenerator::default())
    }
}

impl<G> SkipList<G>
where G: LevelGenerator
{
    /// Constructs a new, empty `SkipList` whose node heights are drawn from `generator`.
    pub fn with_generator(generator: G) -> Self {
        let max_level = generator.max_level();
        assert!(max_level > 0, "max_level must be non-zero.");
        SkipList {
            nodes: Arena::new(),
            head: vec![Link::default(); max_level],
            tail: None,
            len: 0,
            level: 1,
            generator,
        }
    }

    fn link(&self, position: Position, level: usize) -> &Link {
        match position {
            None => &self.head[level],
            Some(handle) => &self.nodes[handle].links[level],
        }
    }

    fn link_mut(&mut self, position: Position, level: usize) -> &mut Link {
        match position {
            None => &mut self.head[level],
            Some(handle) => &mut self.nodes[handle].links[level],
        }
    }

    // Returns, for every active level, the last position whose key sorts strictly before
    // `(score, member)`, together with that position's 1-based rank.
    fn find_predecessors(&self, score: f64, member: &str) -> (Vec<Position>, Vec<usize>) {
        let max_level = self.head.len();
        let mut update = vec![None; max_level];
        let mut rank = vec![0; max_level];
        let mut curr = None;

        for i in (0..self.level).rev() {
            if i + 1 < self.level {
                rank[i] = rank[i + 1];
            }
            while let Some(next) = self.link(curr, i).forward {
                if !self.nodes[next].element.precedes(score, member) {
                    break;
                }
                rank[i] += self.link(curr, i).span;
                curr = Some(next);
            }
            update[i] = curr;
        }
        (update, rank)
    }

    /// Inserts a member with a score and returns the stored element.
    ///
    /// The (score, member) key must not already be in the list; duplicates are not detected and
    /// would silently break the ordering. The score must not be `NaN`.
    ///
    /// # Examples
    /// ```
    /// use sorted_set::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert("b", 5.0);
    /// list.insert("a", 5.0);
    /// assert_eq!(list.get_by_rank(0).map(|e| e.member.as_str()), Some("a"));
    /// ```
    pub fn insert<S>(&mut self, member: S, score: f64) -> &Element
    where S: Into<String>
    {
        let member = member.into();
        let (mut update, mut rank) = self.find_predecessors(score, &member);

        let height = self.generator.random_level();
        if height > self.level {
            for i in self.level..height {
                rank[i] = 0;
                update[i] = None;
                self.head[i].span = self.len;
            }
            trace!("skiplist level raised from {} to {}", self.level, height);
            self.level = height;
        }

        let handle = self.nodes.allocate(Node::new(Element { member, score }, height));
        for i in 0..height {
            let pred = *self.link(update[i], i);
            let gap = rank[0] - rank[i];
            self.nodes[handle].links[i] = Link {
                forward: pred.forward,
                span: pred.span - gap,
            };
            *self.link_mut(update[i], i) = Link {
                forward: Some(handle),
                span: gap + 1,
            };
        }

        // Links passing over the new node now cover one more hop.
        for i in height..self.level {
            self.link_mut(update[i], i).span += 1;
        }

        self.nodes[handle].backward = update[0];
        match self.nodes[handle].links[0].forward {
            Some(next) => self.nodes[next].backward = Some(handle),
            None => self.tail = Some(handle),
        }
        self.len += 1;
        &self.nodes[handle].element
    }

    // Descends to the node with the given 0-based rank.
    fn find_by_rank(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }
        let target = rank + 1;
        let mut traversed = 0;
        let mut curr = None;
        for i in (0..self.level).rev() {
            while let Some(next) = self.link(curr, i).forward {
                let span = self.link(curr, i).span;
                if traversed + span > target {
                    break;
                }
                traversed += span;
                curr = Some(next);
            }
            if traversed == target {
                return curr;
            }
        }
        None
    }

    /// Returns the element at a 0-based rank, or `None` if the rank is out of bounds.
    ///
    /// # Examples
    /// ```
    /// use sorted_set::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert("x", 1.0);
    /// assert_eq!(list.get_by_rank(0).map(|e| e.score), Some(1.0));
    /// assert_eq!(list.get_by_rank(100), None);
    /// ```
    pub fn get_by_rank(&self, rank: usize) -> Option<&Element> {
        self.find_by_rank(rank)
            .map(|handle| &self.nodes[handle].element)
    }

    /// Returns the 0-based rank of the element with key `(score, member)`, or `None` if the list
    /// does not contain it.
    pub fn get_rank(&self, member: &str, score: f64) -> Option<usize> {
        let mut traversed = 0;
        let mut curr = None;
        for i in (0..self.level).rev() {
            while let Some(next) = self.link(curr, i).forward {
                let element = &self.nodes[next].element;
                if !element.precedes(score, member)
                    && !(element.score == score && element.member == member)
                {
                    break;
                }
                traversed += self.link(curr, i).span;
                curr = Some(next);
            }
            if let Some(handle) = curr {
                let element = &self.nodes[handle].element;
                if element.score == score && element.member == member {
                    return Some(traversed - 1);
                }
            }
        }
        None
    }

    fn has_in_range(&self, min: &ScoreBorder, max: &ScoreBorder) -> bool {
        if min.value() > max.value()
            || (min.value() == max.value() && (min.is_exclusive() || max.is_exclusive()))
        {
            return false;
        }
        match self.tail {
            Some(tail) if min.is_lower_bound_satisfied_by(self.nodes[tail].element.score) => {}
            _ => return false,
        }
        match self.head[0].forward {
            Some(first) => max.is_upper_bound_satisfied_by(self.nodes[first].element.score),
            None => false,
        }
    }

    /// Returns the smallest element whose score lies within `[min, max]`, honoring the
    /// exclusivity of each border, or `None` if no element does.
    ///
    /// # Examples
    /// ```
    /// use sorted_set::skiplist::SkipList;
    /// use sorted_set::ScoreBorder;
    ///
    /// let mut list = SkipList::new();
    /// list.insert("x", 1.0);
    /// list.insert("y", 2.0);
    /// list.insert("z", 3.0);
    ///
    /// let found = list.get_first_in_score_range(ScoreBorder::inclusive(2.0), ScoreBorder::exclusive(3.0));
    /// assert_eq!(found.map(|e| e.member.as_str()), Some("y"));
    /// ```
    pub fn get_first_in_score_range(&self, min: ScoreBorder, max: ScoreBorder) -> Option<&Element> {
        self.find_first_in_score_range(&min, &max)
            .map(|handle| &self.nodes[handle].element)
    }

    fn find_first_in_score_range(&self, min: &ScoreBorder, max: &ScoreBorder) -> Option<Handle> {
        if !self.has_in_range(min, max) {
            return None;
        }
        let mut curr = None;
        for i in (0..self.level).rev() {
            while let Some(next) = self.link(curr, i).forward {
                if min.is_lower_bound_satisfied_by(self.nodes[next].element.score) {
                    break;
                }
                curr = Some(next);
            }
        }
        let candidate = self.link(curr, 0).forward?;
        if max.is_upper_bound_satisfied_by(self.nodes[candidate].element.score) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Returns the largest element whose score lies within `[min, max]`, honoring the
    /// exclusivity of each border, or `None` if no element does.
    pub fn get_last_in_score_range(&self, min: ScoreBorder, max: ScoreBorder) -> Option<&Element> {
        if !self.has_in_range(&min, &max) {
            return None;
        }
        let mut curr = None;
        for i in (0..self.level).rev() {
            while let Some(next) = self.link(curr, i).forward {
                if !max.is_upper_bound_satisfied_by(self.nodes[next].element.score) {
                    break;
                }
                curr = Some(next);
            }
        }
        let candidate = curr?;
        let element = &self.nodes[candidate].element;
        if min.is_lower_bound_satisfied_by(element.score) {
            Some(element)
        } else {
            None
        }
    }

    // Unlinks `handle` at every level, given the predecessor of its key on each active level,
    // and releases it.
    fn remove_node(&mut self, handle: Handle, update: &[Position]) -> Element {
        for i in 0..self.level {
            if self.link(update[i], i).forward == Some(handle) {
                let removed = self.nodes[handle].links[i];
                let pred = self.link_mut(update[i], i);
                pred.span = pred.span + removed.span - 1;
                pred.forward = removed.forward;
            } else {
                self.link_mut(update[i], i).span -= 1;
            }
        }

        let Node {
            element,
            backward,
            links,
        } = self.nodes.free(handle);
        match links[0].forward {
            Some(next) => self.nodes[next].backward = backward,
            None => self.tail = backward,
        }

        while self.level > 1 && self.head[self.level - 1].forward.is_none() {
            self.level -= 1;
            trace!("skiplist level lowered to {}", self.level);
        }
        self.len -= 1;
        element
    }

    /// Removes the element with key `(score, member)` and returns it, or `None` if the list does
    /// not contain it.
    pub fn remove(&mut self, member: &str, score: f64) -> Option<Element> {
        let (update, _) = self.find_predecessors(score, member);
        let target = self.link(update[0], 0).forward?;
        let element = &self.nodes[target].element;
        if element.score == score && element.member == member {
            Some(self.remove_node(target, &update))
        } else {
            None
        }
    }

    /// Removes the elements whose 1-based ranks lie in `[start, stop)` and returns them in
    /// ascending order.
    ///
    /// An empty or inverted interval, or one that starts past the end of the list, removes
    /// nothing and returns an empty vector.
    ///
    /// # Examples
    /// ```
    /// use sorted_set::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// for (member, score) in &[("a", 1.0), ("b", 2.0), ("c", 3.0)] {
    ///     list.insert(*member, *score);
    /// }
    ///
    /// let removed = list.remove_range_by_rank(1, 3);
    /// assert_eq!(
    ///     removed.iter().map(|e| e.member.as_str()).collect::<Vec<&str>>(),
    ///     vec!["a", "b"],
    /// );
    /// assert!(list.remove_range_by_rank(4, 2).is_empty());
    /// ```
    pub fn remove_range_by_rank(&mut self, start: usize, stop: usize) -> Vec<Element> {
        let mut removed = Vec::new();
        if start >= stop {
            return removed;
        }

        let mut update = vec![None; self.head.len()];
        let mut traversed = 0;
        let mut curr = None;
        for i in (0..self.level).rev() {
            while let Some(next) = self.link(curr, i).forward {
                let span = self.link(curr, i).span;
                if traversed + span >= start {
                    break;
                }
                traversed += span;
                curr = Some(next);
            }
            update[i] = curr;
        }

        let mut rank = traversed + 1;
        let mut next = self.link(curr, 0).forward;
        while let Some(handle) = next {
            if rank >= stop {
                break;
            }
            next = self.nodes[handle].links[0].forward;
            removed.push(self.remove_node(handle, &update));
            rank += 1;
        }
        removed
    }

    /// Removes the elements whose scores lie within `[min, max]`, honoring the exclusivity of each
    /// border, and returns them in ascending order.
    pub fn remove_range_by_score(&mut self, min: ScoreBorder, max: ScoreBorder) -> Vec<Element> {
        let mut removed = Vec::new();
        let mut update = vec![None; self.head.len()];
        let mut curr = None;
        for i in (0..self.level).rev() {
            while let Some(next) = self.link(curr, i).forward {
                if min.is_lower_bound_satisfied_by(self.nodes[next].element.score) {
                    break;
                }
                curr = Some(next);
            }
            update[i] = curr;
        }

        let mut next = self.link(curr, 0).forward;
        while let Some(handle) = next {
            if !max.is_upper_bound_satisfied_by(self.nodes[handle].element.score) {
                break;
            }
            next = self.nodes[handle].links[0].forward;
            removed.push(self.remove_node(handle, &update));
        }
        removed
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the highest level any element currently participates in. An empty list reports 1.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the smallest element in the list.
    pub fn first(&self) -> Option<&Element> {
        self.head[0].forward.map(|handle| &self.nodes[handle].element)
    }

    /// Returns the largest element in the list.
    pub fn last(&self) -> Option<&Element> {
        self.tail.map(|handle| &self.nodes[handle].element)
    }

    /// Removes every element, returning the list to its freshly constructed state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        for link in &mut self.head {
            *link = Link::default();
        }
        self.tail = None;
        self.len = 0;
        self.level = 1;
    }

    /// Returns an iterator over the list in ascending order. The iterator is double ended; walking
    /// it from the back follows the level 0 back references.
    ///
    /// # Examples
    /// ```
    /// use sorted_set::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert("b", 2.0);
    /// list.insert("a", 1.0);
    ///
    /// assert_eq!(
    ///     list.iter().rev().map(|e| e.member.as_str()).collect::<Vec<&str>>(),
    ///     vec!["b", "a"],
    /// );
    /// ```
    pub fn iter(&self) -> SkipListIter<'_, G> {
        SkipListIter {
            list: self,
            front: self.head[0].forward,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Returns an iterator over the elements from a 0-based rank to the end of the list.
    pub fn iter_from_rank(&self, rank: usize) -> SkipListIter<'_, G> {
        let front = self.find_by_rank(rank);
        SkipListIter {
            list: self,
            front,
            back: front.and(self.tail),
            remaining: front.map_or(0, |_| self.len - rank),
        }
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator for `SkipList<G>`.
///
/// This iterator traverses the elements of a list in ascending order and yields immutable
/// references.
pub struct SkipListIter<'a, G = GeometricLevelGenerator>
where G: 'a + LevelGenerator
{
    list: &'a SkipList<G>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, G> Iterator for SkipListIter<'a, G>
where G: 'a + LevelGenerator
{
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        let node = &self.list.nodes[handle];
        self.front = node.links[0].forward;
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, G> DoubleEndedIterator for SkipListIter<'a, G>
where G: 'a + LevelGenerator
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        let node = &self.list.nodes[handle];
        self.back = node.backward;
        self.remaining -= 1;
        Some(&node.element)
    }
}

impl<'a, G> ExactSizeIterator for SkipListIter<'a, G> where G: 'a + LevelGenerator {}

impl<'a, G> IntoIterator for &'a SkipList<G>
where G: 'a + LevelGenerator
{
    type Item = &'a Element;
    type IntoIter = SkipListIter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
