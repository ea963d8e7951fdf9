use position::Position;
use width::FixedWidth;

/// A value bound to its permanent position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: ::serde::Deserialize<'de>"))]
pub struct Element<T, I: FixedWidth = u16, S: FixedWidth = u16, C: FixedWidth = u64> {
    pub position: Position<I, S, C>,
    pub value: T,
}

impl<T, I: FixedWidth, S: FixedWidth, C: FixedWidth> Element<T, I, S, C> {
    pub fn new(position: Position<I, S, C>, value: T) -> Self {
        Element{position, value}
    }
}
