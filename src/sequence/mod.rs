//! A `Sequence` stores an ordered list of elements that can be
//! edited concurrently on many replicas.
//!
//! Each element is bound to a `Position` that is allocated once,
//! when the element is inserted, and never changes. Positions are
//! totally ordered, so every replica sorts the same elements the
//! same way regardless of the order in which it received them.
//! The backing array is kept sorted by position at all times.
//!
//! An *N*-element Sequence's performance characteristics are:
//!
//!   * [`insert`](struct.Sequence.html#method.insert) is *O(N)* (the array shift)
//!   * [`remove`](struct.Sequence.html#method.remove) is *O(N)*
//!   * [`apply`](struct.Sequence.html#method.apply) is *O(log N)* to locate, *O(N)* to shift
//!   * [`difference_ops`](struct.Sequence.html#method.difference_ops) is *O(N + M)*
//!   * [`get`](struct.Sequence.html#method.get) and [`len`](struct.Sequence.html#method.len) are *O(1)*
//!
//! The sequence keeps no tombstones. Removing a position that is
//! not present is a no-op, so an insert delivered *after* the
//! removal of the same position brings the element back. Callers
//! that need removals to win under reordering must deliver each
//! element's insert before its removal.

mod element;
mod op;

pub use self::element::Element;
pub use self::op::{Op, LocalOp};

use Error;
use num_traits::NumCast;
use position::{self, Position};
use replica::Replica;
use serde::{Deserialize, Deserializer};
use serde::de;
use std::cmp::Ordering;
use std::ops::Index;
use std::slice;
use traits::Crdt;
use width::FixedWidth;

/// The largest id step taken when allocating inside a gap,
/// unless a sequence is built with a different boundary.
pub const DEFAULT_BOUNDARY: u8 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: ::serde::Deserialize<'de>"))]
pub struct Sequence<T, I: FixedWidth = u16, S: FixedWidth = u16, C: FixedWidth = u64> {
    boundary: I,
    replica: Replica<S, C>,
    #[serde(skip, default = "Position::start")]
    start: Position<I, S, C>,
    #[serde(skip, default = "Position::end")]
    end: Position<I, S, C>,
    #[serde(deserialize_with = "deserialize_elements")]
    elements: Vec<Element<T, I, S, C>>,
}

pub struct Iter<'a, T: 'a, I: FixedWidth + 'a, S: FixedWidth + 'a, C: FixedWidth + 'a> {
    inner: slice::Iter<'a, Element<T, I, S, C>>,
}

impl<T: Clone, I: FixedWidth, S: FixedWidth, C: FixedWidth> Sequence<T, I, S, C> {

    /// Constructs an empty sequence owned by replica `source`,
    /// whose allocation clock starts at `clock`.
    pub fn new(source: S, clock: C) -> Self {
        Sequence::from_replica(Replica::new(source, clock))
    }

    pub fn from_replica(replica: Replica<S, C>) -> Self {
        let boundary = <I as NumCast>::from(DEFAULT_BOUNDARY).unwrap_or_else(I::max_value);
        Sequence::with_replica_and_boundary(replica, boundary)
    }

    /// Constructs an empty sequence that never moves more than
    /// `boundary` ids away from a neighbour when it allocates.
    ///
    /// # Panics
    ///
    /// Panics if `boundary` is zero.
    pub fn with_boundary(source: S, clock: C, boundary: I) -> Self {
        Sequence::with_replica_and_boundary(Replica::new(source, clock), boundary)
    }

    fn with_replica_and_boundary(replica: Replica<S, C>, boundary: I) -> Self {
        assert!(boundary > I::zero(), "allocation boundary must be positive");
        Sequence{
            boundary,
            replica,
            start: Position::start(),
            end: Position::end(),
            elements: vec![],
        }
    }

    pub fn boundary(&self) -> I {
        self.boundary
    }

    pub fn source(&self) -> S {
        self.replica.source
    }

    /// Returns the allocation clock. It advances once per local insert.
    pub fn clock(&self) -> C {
        self.replica.clock
    }

    pub fn replica(&self) -> &Replica<S, C> {
        &self.replica
    }

    pub fn start(&self) -> &Position<I, S, C> {
        &self.start
    }

    pub fn end(&self) -> &Position<I, S, C> {
        &self.end
    }

    /// Returns the stored elements in position order.
    pub fn elements(&self) -> &[Element<T, I, S, C>] {
        &self.elements
    }

    /// Returns the number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns a reference to the element at `index`.
    /// Returns None if the index is out-of-bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index).map(|element| &element.value)
    }

    pub fn iter(&self) -> Iter<T, I, S, C> {
        Iter{inner: self.elements.iter()}
    }

    /// Returns the values in order as a plain `Vec`.
    pub fn local_value(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.elements.reserve(additional);
    }

    /// Returns the index of the element at `position`. If a matching
    /// element is found, it returns `Ok` containing the element index.
    /// If no matching element is found, it returns `Err` containing
    /// the index where an element with the position may be inserted.
    pub fn find_index(&self, position: &Position<I, S, C>) -> Result<usize, usize> {
        self.elements.binary_search_by(|element| element.position.cmp(position))
    }

    /// Inserts an element at position `index` within the sequence,
    /// shifting all elements after it to the right, and returns the
    /// op to send to other replicas.
    ///
    /// Elements that share one segment path and differ only by clock
    /// leave no room between them. If `index` falls inside such a
    /// run, the element is placed right after the run instead.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Op<T, I, S, C> {
        let len = self.elements.len();
        assert!(index <= len, "insertion index (is {}) should be <= len (is {})", index, len);

        let index = self.allocation_index(index);
        let position = self.allocate_position(index);
        let element = Element::new(position, value);
        self.elements.insert(index, element.clone());
        Op::Insert(element)
    }

    /// Appends an element to the back of the sequence.
    pub fn push(&mut self, value: T) -> Op<T, I, S, C> {
        let len = self.elements.len();
        self.insert(len, value)
    }

    /// Removes the element at position `index`, shifting all
    /// elements after it to the left. Returns the removed value
    /// and the op to send to other replicas.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> (T, Op<T, I, S, C>) {
        let len = self.elements.len();
        assert!(index < len, "removal index (is {}) should be < len (is {})", index, len);

        let Element{position, value} = self.elements.remove(index);
        (value, Op::Remove(position))
    }

    /// Updates the sequence and returns the equivalent local op.
    /// If the op is a duplicate insert, removes a position that is
    /// not present, or targets a position no local insert could
    /// allocate around (see `is_admissible`), returns `None`.
    pub fn apply(&mut self, op: &Op<T, I, S, C>) -> Option<LocalOp<T>> {
        let position = op.position();
        if !is_admissible(position, &self.start, &self.end) {
            warn!(%position, "ignored op with an inadmissible position");
            return None
        }

        match *op {
            Op::Insert(ref element) => {
                let index = match self.find_index(position) {
                    Ok(_) => {
                        trace!(%position, "ignored duplicate insert");
                        return None
                    }
                    Err(index) => index,
                };
                self.elements.insert(index, element.clone());
                Some(LocalOp::Insert{index, value: element.value.clone()})
            }
            Op::Remove(_) => {
                let index = try_opt!(self.find_index(position).ok());
                self.elements.remove(index);
                Some(LocalOp::Remove{index})
            }
        }
    }

    /// Returns the ops that turn `baseline` into a copy of this
    /// sequence's elements: an insert for every position only this
    /// sequence has and a removal for every position only `baseline`
    /// has, in ascending position order.
    pub fn difference_ops(&self, baseline: &Self) -> Vec<Op<T, I, S, C>> {
        let mut ops = vec![];
        let mut ours = self.elements.iter().peekable();
        let mut theirs = baseline.elements.iter().peekable();

        loop {
            let ordering = match (ours.peek(), theirs.peek()) {
                (Some(a), Some(b)) => a.position.cmp(&b.position),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };

            match ordering {
                Ordering::Equal => {
                    ours.next();
                    theirs.next();
                }
                Ordering::Less => {
                    if let Some(element) = ours.next() {
                        ops.push(Op::Insert(element.clone()));
                    }
                }
                Ordering::Greater => {
                    if let Some(element) = theirs.next() {
                        ops.push(Op::Remove(element.position.clone()));
                    }
                }
            }
        }

        debug!(ops = ops.len(), "computed difference from baseline");
        ops
    }

    fn allocation_index(&self, index: usize) -> usize {
        let mut shifted = index;
        while shifted > 0 && shifted < self.elements.len()
            && self.elements[shifted-1].position.segments() == self.elements[shifted].position.segments()
        {
            shifted += 1;
        }
        if shifted != index {
            debug!(index, shifted, "moved insert past a run of equal paths");
        }
        shifted
    }

    fn allocate_position(&mut self, index: usize) -> Position<I, S, C> {
        let segments = {
            let p = if index == 0 { &self.start } else { &self.elements[index-1].position };
            let q = if index == self.elements.len() { &self.end } else { &self.elements[index].position };
            position::allocate_between(p, q, self.boundary, self.replica.source)
        };

        Position::new(segments, self.replica.tick())
    }
}

impl<T: Clone, I: FixedWidth, S: FixedWidth, C: FixedWidth> Crdt for Sequence<T, I, S, C> {
    type Op = Op<T, I, S, C>;
    type LocalOp = LocalOp<T>;

    fn apply(&mut self, op: &Self::Op) -> Option<Self::LocalOp> {
        Sequence::apply(self, op)
    }

    fn difference_ops(&self, baseline: &Self) -> Vec<Self::Op> {
        Sequence::difference_ops(self, baseline)
    }
}

impl<T, I: FixedWidth, S: FixedWidth, C: FixedWidth> Index<usize> for Sequence<T, I, S, C> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index].value
    }
}

impl<'a, T: Clone, I: FixedWidth, S: FixedWidth, C: FixedWidth> IntoIterator for &'a Sequence<T, I, S, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, I, S, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, I: FixedWidth, S: FixedWidth, C: FixedWidth> Iterator for Iter<'a, T, I, S, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|element| &element.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T, I: FixedWidth, S: FixedWidth, C: FixedWidth> DoubleEndedIterator for Iter<'a, T, I, S, C> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back().map(|element| &element.value)
    }
}

impl<'a, T, I: FixedWidth, S: FixedWidth, C: FixedWidth> ExactSizeIterator for Iter<'a, T, I, S, C> {}

/// Whether a local insert can always allocate around `position`: it
/// lies strictly between the sentinels, shares neither sentinel's
/// path, and does not end in the minimum id, which no allocation
/// produces.
fn is_admissible<I, S, C>(position: &Position<I, S, C>, start: &Position<I, S, C>, end: &Position<I, S, C>) -> bool
    where I: FixedWidth, S: FixedWidth, C: FixedWidth
{
    position > start && position < end
        && position.segments() != start.segments()
        && position.segments() != end.segments()
        && position.segments().last().map_or(false, |segment| segment.id != I::min_value())
}

/// Snapshots from other replicas must already be sorted by position
/// and hold only admissible positions.
fn deserialize_elements<'de, D, T, I, S, C>(deserializer: D) -> Result<Vec<Element<T, I, S, C>>, D::Error>
    where D: Deserializer<'de>, T: Deserialize<'de>, I: FixedWidth, S: FixedWidth, C: FixedWidth
{
    let elements: Vec<Element<T, I, S, C>> = Vec::deserialize(deserializer)?;
    let sorted = elements.windows(2).all(|pair| pair[0].position < pair[1].position);
    let (start, end) = (Position::start(), Position::end());
    let bounded = elements.iter().all(|element| is_admissible(&element.position, &start, &end));

    if !sorted || !bounded {
        return Err(de::Error::custom(Error::UnsortedElements))
    }
    Ok(elements)
}
