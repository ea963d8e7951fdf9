//! An LSEQ sequence CRDT.
//!
//! A [`Sequence`](struct.Sequence.html) is an ordered list that any
//! number of replicas can edit concurrently without coordination.
//! Every element is bound to a dense, totally ordered
//! [`Position`](struct.Position.html); replicas that have executed
//! the same set of ops hold the same elements in the same order,
//! whatever order the ops arrived in.
//!
//! ```
//! use lseq::Sequence;
//!
//! let mut alice: Sequence<char> = Sequence::new(1, 0);
//! let mut bob: Sequence<char> = Sequence::new(2, 0);
//!
//! let op1 = alice.insert(0, 'a');
//! let op2 = bob.insert(0, 'b');
//!
//! alice.apply(&op2);
//! bob.apply(&op1);
//! assert_eq!(alice.local_value(), bob.local_value());
//! ```

extern crate base64;
#[macro_use] extern crate failure;
extern crate num_traits;
extern crate rand;
extern crate serde;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate tracing;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
extern crate serde_json;

#[cfg(test)]
extern crate rmp_serde;

#[macro_use] mod macros;

mod error;
mod position;
mod replica;
mod sequence;
mod traits;
mod vlq;
mod width;

pub use error::Error;
pub use position::{Position, Position32, Segment, allocate_between, allocate_between_with};
pub use replica::Replica;
pub use sequence::{Sequence, Element, Op, LocalOp, Iter, DEFAULT_BOUNDARY};
pub use traits::Crdt;
pub use width::FixedWidth;
