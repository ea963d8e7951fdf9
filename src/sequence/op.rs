use position::Position;
use sequence::Element;
use width::FixedWidth;

/// An edit made on one replica, ready to be sent to the others.
/// Ops may be delivered any number of times and in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: ::serde::Deserialize<'de>"))]
pub enum Op<T, I: FixedWidth = u16, S: FixedWidth = u16, C: FixedWidth = u64> {
    Insert(Element<T, I, S, C>),
    Remove(Position<I, S, C>),
}

/// The index-level effect an applied `Op` had on the local
/// replica, for updating views that mirror the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalOp<T> {
    Insert { index: usize, value: T },
    Remove { index: usize },
}

impl<T, I: FixedWidth, S: FixedWidth, C: FixedWidth> Op<T, I, S, C> {
    /// The position the op inserts or removes.
    pub fn position(&self) -> &Position<I, S, C> {
        match *self {
            Op::Insert(ref element) => &element.position,
            Op::Remove(ref position) => position,
        }
    }

    pub fn inserted_element(&self) -> Option<&Element<T, I, S, C>> {
        match *self {
            Op::Insert(ref element) => Some(element),
            Op::Remove(_) => None,
        }
    }

    pub fn removed_position(&self) -> Option<&Position<I, S, C>> {
        match *self {
            Op::Insert(_) => None,
            Op::Remove(ref position) => Some(position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use position::Segment;

    #[test]
    fn test_accessors() {
        let position: Position = Position::new(vec![Segment::new(4, 1)], 2);
        let insert = Op::Insert(Element::new(position.clone(), 'a'));
        let remove: Op<char> = Op::Remove(position.clone());

        assert_eq!(insert.position(), &position);
        assert_eq!(remove.position(), &position);
        assert_eq!(insert.inserted_element(), Some(&Element::new(position.clone(), 'a')));
        assert_eq!(insert.removed_position(), None);
        assert_eq!(remove.inserted_element(), None);
        assert_eq!(remove.removed_position(), Some(&position));
    }
}
