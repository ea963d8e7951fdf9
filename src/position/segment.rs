use width::FixedWidth;

/// One level of a position's path through the identifier tree.
///
/// Segments order by `id`, then by `source`. The source only
/// matters when two replicas independently pick the same id
/// at the same depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Segment<I, S> {
    pub id: I,
    pub source: S,
}

impl<I: FixedWidth, S: FixedWidth> Segment<I, S> {
    pub fn new(id: I, source: S) -> Self {
        Segment{id, source}
    }

    /// The smallest segment: minimum id and minimum source.
    pub fn min() -> Self {
        Segment::new(I::min_value(), S::min_value())
    }

    /// The largest segment: maximum id and maximum source.
    pub fn max() -> Self {
        Segment::new(I::max_value(), S::max_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ord_by_id_then_source() {
        let a: Segment<u16, u16> = Segment::new(3, 900);
        let b = Segment::new(4, 1);
        let c = Segment::new(4, 2);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
        assert_eq!(b, Segment::new(4, 1));
    }

    #[test]
    fn test_min_max() {
        let min: Segment<u16, u16> = Segment::min();
        let max: Segment<u16, u16> = Segment::max();
        assert_eq!(min, Segment::new(0, 0));
        assert_eq!(max, Segment::new(65535, 65535));
        assert!(min < max);
    }
}
