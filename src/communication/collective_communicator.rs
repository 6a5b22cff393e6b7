use super::Count;

/// Collective operations over every rank of a world. All ranks must
/// call the same operation at the same point of their lockstep.
pub trait CollectiveCommunicator<T> {
    /// Distributes the coordinator's value to all ranks.
    fn broadcast(&mut self, value: &mut T);
    /// Splits `elements` into per-rank slices of the given counts and
    /// returns this rank's slice. `elements` is only read on the
    /// coordinator; `counts` must be identical on all ranks.
    fn scatter_varcount(&mut self, elements: &[T], counts: &[Count]) -> Vec<T>;
}

/// Reduction to the maximum over every rank of a world.
pub trait MaxCommunicator<T> {
    /// Reduces each rank's value with the maximum operator. The result
    /// is `Some` on the coordinator and `None` elsewhere.
    fn collective_max(&mut self, send: &T) -> Option<T>;
}
