use width::FixedWidth;

/// The identity of one replica: the `source` stamped on every
/// segment it allocates, and the clock stamped on every position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Replica<S, C> {
    pub source: S,
    pub clock: C,
}

impl<S: FixedWidth, C: FixedWidth> Replica<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Replica{source, clock}
    }

    /// Advances the clock and returns its new value.
    ///
    /// # Panics
    ///
    /// Panics if the clock is exhausted; reusing a clock value
    /// could mint two equal positions.
    pub fn tick(&mut self) -> C {
        self.clock = match self.clock.checked_add(&C::one()) {
            Some(clock) => clock,
            None => panic!("replica {:?} exhausted its allocation clock", self.source),
        };
        self.clock
    }
}
