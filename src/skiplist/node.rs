use crate::arena::Handle;

/// A (member, score) pair stored in a skip list.
///
/// Elements are ordered by score first and by member on ties. A skip list never holds two
/// elements with the same (score, member) key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub member: String,
    pub score: f64,
}

impl Element {
    pub fn new<S>(member: S, score: f64) -> Self
    where S: Into<String>
    {
        Element {
            member: member.into(),
            score,
        }
    }

    /// Returns `true` if this element sorts strictly before the key `(score, member)`.
    pub fn precedes(&self, score: f64, member: &str) -> bool {
        self.score < score || (self.score == score && self.member.as_str() < member)
    }
}

/// A forward link at one level, with the number of level 0 hops it covers.
///
/// When `forward` is `None` the span counts the nodes left between the owner and the end of the
/// list.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Link {
    pub forward: Option<Handle>,
    pub span: usize,
}

pub struct Node {
    pub element: Element,
    // Level 0 predecessor; `None` when the predecessor is the header.
    pub backward: Option<Handle>,
    pub links: Vec<Link>,
}

impl Node {
    pub fn new(element: Element, height: usize) -> Self {
        Node {
            element,
            backward: None,
            links: vec![Link::default(); height],
        }
    }
}
