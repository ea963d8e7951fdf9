/// Required functions for replicated data types.
///
/// A replica changes either by executing ops produced on other
/// replicas, or by replaying the difference between its state and
/// a snapshot of another replica.
pub trait Crdt {
    type Op;
    type LocalOp;

    /// Executes an op from any replica, including this one. Ops
    /// that change nothing (duplicates, removals of absent
    /// elements) return `None`; executing an op never fails.
    fn apply(&mut self, op: &Self::Op) -> Option<Self::LocalOp>;

    /// Returns the ops that turn `baseline` into `self` when
    /// applied to `baseline`.
    fn difference_ops(&self, baseline: &Self) -> Vec<Self::Op>;

    /// Executes every op in `ops` and returns the changes that
    /// were not no-ops.
    fn apply_all<'a, It>(&mut self, ops: It) -> Vec<Self::LocalOp>
        where It: IntoIterator<Item = &'a Self::Op>, Self::Op: 'a
    {
        ops.into_iter().filter_map(|op| self.apply(op)).collect()
    }
}
