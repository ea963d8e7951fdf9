//! Allocates new positions between two existing ones.
//!
//! ## Implementation Notes
//!
//! The allocator walks down the identifier tree one depth at a
//! time. At every depth the result is bounded below by `p` while
//! it still shares all of `p`'s segments, and bounded above by
//! `q` while it still shares all of `q`'s segments. A bound whose
//! path has run out stops constraining the result.
//!
//! As soon as a depth leaves more than one free id between its
//! bounds, a random id at most `boundary` away from one of them is
//! chosen and the walk ends. Which bound it grows from alternates
//! by depth (boundary+ on even depths, boundary- on odd depths), so
//! a gap that keeps getting split does not pile every new level
//! against the same edge of the id space. Otherwise the walk copies
//! a bridging segment and descends.
//!
//! The walk never goes deeper than the longer of the two paths:
//! once both bounds have stopped constraining the result, the whole
//! id range is free.

use position::{Position, Segment};
use rand::{self, Rng};
use std::cmp;
use width::FixedWidth;

/// Returns the segments of a new position strictly between `p`
/// and `q`, whatever clock the new position is given. The final
/// segment carries `source`; its offset from the bound it grows
/// from is random and never larger than `boundary`.
///
/// # Panics
///
/// Panics if `p >= q`, if `boundary` is zero, or if `q` ends in a
/// path that no allocated position can sort below (`q`'s last
/// segment has the minimum id and `p` is its parent path).
pub fn allocate_between<I, S, C>(p: &Position<I, S, C>, q: &Position<I, S, C>, boundary: I, source: S) -> Vec<Segment<I, S>>
    where I: FixedWidth, S: FixedWidth, C: FixedWidth
{
    allocate_between_with(p, q, boundary, source, &mut rand::thread_rng())
}

/// Like [`allocate_between`](fn.allocate_between.html), drawing
/// offsets from `rng`.
pub fn allocate_between_with<I, S, C, R>(p: &Position<I, S, C>, q: &Position<I, S, C>, boundary: I, source: S, rng: &mut R) -> Vec<Segment<I, S>>
    where I: FixedWidth, S: FixedWidth, C: FixedWidth, R: Rng + ?Sized
{
    assert!(p < q, "cannot allocate between {:?} and {:?}: not in ascending order", p, q);
    assert!(boundary > I::zero(), "allocation boundary must be positive");

    let p_segments = p.segments();
    let q_segments = q.segments();
    let max_depth = cmp::max(p_segments.len(), q_segments.len());

    let mut segments = Vec::with_capacity(max_depth + 1);
    let mut p_bound = true;
    let mut q_bound = true;
    let mut boundary_plus = true;

    for depth in 0..max_depth + 1 {
        let lower = if p_bound { p_segments.get(depth) } else { None };
        let upper = if q_bound { q_segments.get(depth) } else { None };

        if q_bound && upper.is_none() {
            panic!("no position fits between {:?} and {:?}", p, q);
        }

        let lo = lower.map_or(I::min_value(), |segment| segment.id);
        let hi = upper.map_or(I::max_value(), |segment| segment.id);
        let interval = hi - lo;

        if interval > I::one() {
            let step = cmp::min(boundary, interval - I::one());
            let offset = rng.gen_range(I::one()..=step);
            let id = if boundary_plus { lo + offset } else { hi - offset };
            segments.push(Segment::new(id, source));

            if depth > 0 {
                debug!(depth, "allocated below the root level");
            }
            return segments;
        }

        let next = match (lower, upper) {
            // Stay under p; the result is already below q at this depth
            // unless the two segments are identical.
            (Some(lower), Some(_)) => *lower,
            (Some(lower), None) => {
                if interval == I::one() && !boundary_plus {
                    Segment::new(I::max_value(), source)
                } else {
                    *lower
                }
            }
            (None, Some(upper)) => {
                if interval == I::zero() {
                    *upper
                } else {
                    Segment::new(I::min_value(), source)
                }
            }
            (None, None) => unreachable!("an unbounded depth always has room"),
        };

        trace!(depth, interval = ?interval, "descending");
        p_bound = lower == Some(&next);
        q_bound = upper == Some(&next);
        segments.push(next);
        boundary_plus = !boundary_plus;
    }

    unreachable!("allocation deeper than both bounding paths")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDARY: u16 = 10;
    const SAME: u16 = 9;
    const MAX: u16 = 65535;

    fn pos(ids: &[u16]) -> Position {
        let segments = ids.iter().map(|&id| Segment::new(id, 0)).collect();
        Position::new(segments, 0)
    }

    fn between(p: &Position, q: &Position) -> Vec<Segment<u16, u16>> {
        let segments = allocate_between(p, q, BOUNDARY, 7);
        let r = Position::new(segments.clone(), 99);
        assert!(p < &r, "{:?} >= {:?}", p, r);
        assert!(&r < q, "{:?} >= {:?}", r, q);
        segments
    }

    #[test]
    fn test_between_sentinels() {
        let r = between(&Position::start(), &Position::end());
        assert_eq!(r.len(), 1);
        assert!(r[0].id >= 1 && r[0].id <= BOUNDARY);
        assert_eq!(r[0].source, 7);
    }

    #[test]
    fn test_between_wide_gap_level0() {
        let r = between(&pos(&[0]), &pos(&[MAX]));
        assert_eq!(r.len(), 1);
        assert!(0 < r[0].id && r[0].id <= BOUNDARY);
    }

    #[test]
    fn test_between_wide_gap_level1() {
        let r = between(&pos(&[SAME, 0]), &pos(&[SAME, MAX]));
        assert_eq!(r.len(), 2);
        assert_eq!(r[0], Segment::new(SAME, 0));
        assert!(MAX - BOUNDARY <= r[1].id && r[1].id < MAX);
    }

    #[test]
    fn test_between_wide_gap_level2() {
        let r = between(&pos(&[SAME, SAME, 0]), &pos(&[SAME, SAME, MAX]));
        assert_eq!(r.len(), 3);
        assert!(0 < r[2].id && r[2].id <= BOUNDARY);
    }

    #[test]
    fn test_between_narrow_gap() {
        let r = between(&pos(&[SAME, 2]), &pos(&[SAME, 5]));
        assert_eq!(r.len(), 2);
        assert!(2 < r[1].id && r[1].id < 5);
    }

    #[test]
    fn test_between_adjacent_level0() {
        let r = between(&pos(&[2]), &pos(&[3]));
        assert_eq!(r.len(), 2);
        assert_eq!(r[0], Segment::new(2, 0));
        assert!(MAX - BOUNDARY <= r[1].id && r[1].id < MAX);
    }

    #[test]
    fn test_between_adjacent_level1() {
        let r = between(&pos(&[SAME, 2]), &pos(&[SAME, 3]));
        assert_eq!(r.len(), 3);
        assert_eq!(&r[..2], &[Segment::new(SAME, 0), Segment::new(2, 0)]);
        assert!(0 < r[2].id && r[2].id <= BOUNDARY);
    }

    #[test]
    fn test_between_adjacent_at_min() {
        let r = between(&pos(&[0]), &pos(&[1]));
        assert_eq!(r.len(), 2);
        assert!(MAX - BOUNDARY <= r[1].id && r[1].id < MAX);
    }

    #[test]
    fn test_between_adjacent_at_max() {
        let r = between(&pos(&[SAME, MAX - 1]), &pos(&[SAME, MAX]));
        assert_eq!(r.len(), 3);
        assert_eq!(r[1], Segment::new(MAX - 1, 0));
        assert!(0 < r[2].id && r[2].id <= BOUNDARY);
    }

    #[test]
    fn test_between_same_id_different_source() {
        let p = Position::new(vec![Segment::new(SAME, 1)], 0);
        let q = Position::new(vec![Segment::new(SAME, 2)], 0);
        let r = between(&p, &q);
        assert_eq!(r[0], Segment::new(SAME, 1));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_between_p_shorter_wide_gap() {
        let r = between(&pos(&[SAME]), &pos(&[SAME, BOUNDARY]));
        assert_eq!(r.len(), 2);
        assert!(r[1].id < BOUNDARY);
    }

    #[test]
    fn test_between_p_shorter_q_at_max() {
        let r = between(&pos(&[SAME]), &pos(&[SAME, MAX]));
        assert_eq!(r.len(), 2);
        assert!(MAX - BOUNDARY <= r[1].id && r[1].id < MAX);
    }

    #[test]
    fn test_between_p_shorter_q_at_min_plus_one() {
        let r = between(&pos(&[SAME]), &pos(&[SAME, 1]));
        assert_eq!(r.len(), 3);
        assert_eq!(r[1], Segment::new(0, 7));
        assert!(0 < r[2].id && r[2].id <= BOUNDARY);
    }

    #[test]
    fn test_between_p_shorter_q_follows_min_path() {
        let r = between(&pos(&[SAME]), &pos(&[SAME, 0, 0, 5]));
        assert_eq!(r.len(), 4);
        assert_eq!(&r[..3], &[Segment::new(SAME, 0), Segment::new(0, 0), Segment::new(0, 0)]);
        assert!(r[3].id < 5);
    }

    #[test]
    fn test_between_q_shorter() {
        let r = between(&pos(&[SAME, 400]), &pos(&[SAME + 1]));
        assert_eq!(r[0], Segment::new(SAME, 0));
        assert_eq!(r.len(), 2);
        assert!(400 < r[1].id);
    }

    #[test]
    fn test_between_four_descents() {
        let p = pos(&[2, MAX, MAX - 1, MAX]);
        let q = pos(&[3]);
        let r = between(&p, &q);
        assert_eq!(&r[..4], p.segments());
        assert_eq!(r.len(), 5);
        assert!(0 < r[4].id && r[4].id <= BOUNDARY);
    }

    #[test]
    fn test_between_bridges_to_max() {
        // Depth 1 is a boundary- depth, so it jumps to a fresh max
        // segment instead of following p down.
        let r = between(&pos(&[2, MAX - 1, 5]), &pos(&[3]));
        assert_eq!(&r[..2], &[Segment::new(2, 0), Segment::new(MAX, 7)]);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_between_is_deterministic_with_seeded_rng() {
        let p = pos(&[SAME]);
        let q = pos(&[SAME + 100]);
        let r1 = allocate_between_with(&p, &q, BOUNDARY, 7, &mut StdRng::seed_from_u64(11));
        let r2 = allocate_between_with(&p, &q, BOUNDARY, 7, &mut StdRng::seed_from_u64(11));
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_between_repeated_squeeze() {
        let mut rng = StdRng::seed_from_u64(3);
        let p: Position = Position::start();
        let mut q: Position = Position::end();
        for clock in 1..2000 {
            let segments = allocate_between_with(&p, &q, BOUNDARY, 1, &mut rng);
            let r = Position::new(segments, clock);
            assert!(p < r && r < q);
            q = r;
        }
    }

    #[test]
    #[should_panic]
    fn test_between_unordered() {
        allocate_between(&pos(&[5]), &pos(&[4]), BOUNDARY, 0);
    }

    #[test]
    #[should_panic]
    fn test_between_equal() {
        allocate_between(&pos(&[5]), &pos(&[5]), BOUNDARY, 0);
    }

    #[test]
    #[should_panic]
    fn test_between_zero_boundary() {
        allocate_between(&pos(&[5]), &pos(&[500]), 0, 0);
    }
}
