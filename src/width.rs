use num_traits::{PrimInt, Unsigned};
use rand::distributions::uniform::SampleUniform;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::hash::Hash;

/// Unsigned fixed-width integers usable as segment ids,
/// segment sources and position clocks.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. Every
/// replica sharing a sequence must use the same widths;
/// positions of different widths are not comparable.
pub trait FixedWidth: PrimInt + Unsigned + Into<u64> + SampleUniform + Hash + Debug + Serialize + DeserializeOwned {}

impl<T> FixedWidth for T
    where T: PrimInt + Unsigned + Into<u64> + SampleUniform + Hash + Debug + Serialize + DeserializeOwned {}
