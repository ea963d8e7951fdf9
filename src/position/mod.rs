//! A Position is the permanent, globally comparable location of
//! one sequence element. It is a path from the root of an
//! unbounded identifier tree down to a leaf, plus the clock of
//! the replica that allocated it.
//!
//! Positions compare segment by segment. When one path is a
//! strict prefix of the other, the shorter path sorts first;
//! identical paths fall back to the clock.

mod allocator;
mod segment;

pub use self::allocator::{allocate_between, allocate_between_with};
pub use self::segment::Segment;

use base64;
use Error;
use serde::{Serialize, Serializer, Deserialize, Deserializer};
use serde::de::{self, Visitor, SeqAccess};
use std::cmp::{self, Ordering};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use vlq;
use width::FixedWidth;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position<I: FixedWidth = u16, S: FixedWidth = u16, C: FixedWidth = u64> {
    segments: Vec<Segment<I, S>>,
    clock: C,
}

/// Positions with 32-bit segment ids. Wider ids leave more room
/// at each depth before the tree has to grow deeper.
pub type Position32 = Position<u32, u16, u64>;

impl<I: FixedWidth, S: FixedWidth, C: FixedWidth> Position<I, S, C> {
    pub fn new(segments: Vec<Segment<I, S>>, clock: C) -> Self {
        Position{segments, clock}
    }

    /// The sentinel that sorts before every allocated position.
    pub fn start() -> Self {
        Position::new(vec![Segment::min()], C::zero())
    }

    /// The sentinel that sorts after every allocated position.
    pub fn end() -> Self {
        Position::new(vec![Segment::max()], C::zero())
    }

    pub fn segments(&self) -> &[Segment<I, S>] {
        &self.segments
    }

    pub fn clock(&self) -> C {
        self.clock
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn to_vlq(&self) -> Vec<u8> {
        let mut vlq = vlq::encode_u64(self.segments.len() as u64);
        for segment in &self.segments {
            vlq.append(&mut vlq::encode(segment.id));
            vlq.append(&mut vlq::encode(segment.source));
        }
        vlq.append(&mut vlq::encode(self.clock));
        vlq
    }

    pub fn from_vlq(vlq: &[u8]) -> Result<Self, Error> {
        let (count, mut rest) = vlq::decode_u64(vlq)?;
        if count == 0 { return Err(Error::EmptyPosition) }

        let mut segments = Vec::with_capacity(cmp::min(count as usize, rest.len() / 2));
        for _ in 0..count {
            let (id, rest1) = vlq::decode(rest)?;
            let (source, rest2) = vlq::decode(rest1)?;
            segments.push(Segment::new(id, source));
            rest = rest2;
        }

        let (clock, rest) = vlq::decode(rest)?;
        if !rest.is_empty() { return Err(Error::TrailingBytes) }
        Ok(Position{segments, clock})
    }
}

impl<I: FixedWidth, S: FixedWidth, C: FixedWidth> PartialOrd for Position<I, S, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: FixedWidth, S: FixedWidth, C: FixedWidth> Ord for Position<I, S, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Slice ordering is lexicographic and sorts a strict prefix first.
        self.segments.cmp(&other.segments)
            .then_with(|| self.clock.cmp(&other.clock))
    }
}

impl<I: FixedWidth, S: FixedWidth, C: FixedWidth> fmt::Display for Position<I, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&base64::encode_config(&self.to_vlq(), base64::URL_SAFE_NO_PAD))
    }
}

impl<I: FixedWidth, S: FixedWidth, C: FixedWidth> FromStr for Position<I, S, C> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vlq = base64::decode_config(s, base64::URL_SAFE_NO_PAD).map_err(|_| Error::DeserializePosition)?;
        Position::from_vlq(&vlq)
    }
}

impl<I: FixedWidth, S: FixedWidth, C: FixedWidth> Serialize for Position<I, S, C> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> where Ser: Serializer {
        serializer.serialize_bytes(&self.to_vlq())
    }
}

impl<'de, I: FixedWidth, S: FixedWidth, C: FixedWidth> Deserialize<'de> for Position<I, S, C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        struct PositionVisitor<I, S, C>(PhantomData<(I, S, C)>);

        impl<'de, I: FixedWidth, S: FixedWidth, C: FixedWidth> Visitor<'de> for PositionVisitor<I, S, C> {
            type Value = Position<I, S, C>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a VLQ-encoded position")
            }

            fn visit_seq<V>(self, mut visitor: V) -> Result<Self::Value, V::Error> where V: SeqAccess<'de> {
                let mut vec = Vec::with_capacity(cmp::min(visitor.size_hint().unwrap_or(0), 4096));
                while let Some(byte) = visitor.next_element::<u8>()? { vec.push(byte); }
                Position::from_vlq(&vec).map_err(de::Error::custom)
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E> where E: de::Error {
                Position::from_vlq(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(PositionVisitor(PhantomData))
    }
}
