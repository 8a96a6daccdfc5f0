use rayon::prelude::*;

/// Performs map reduce operations in parallel.
///
/// The reduction order is unspecified, so the result is deterministic only
/// when `reduce_op` is associative and commutative, e.g. a minimum under a
/// total order.
pub fn map_reduce<'a, T, S, FM, FR, FD, R>(source: &'a S, map_op: FM, default_op: FD, reduce_op: FR) -> R
where
    T: Send + Sync,
    S: IntoParallelRefIterator<'a, Item = T> + ?Sized,
    FM: Fn(T) -> R + Sync + Send,
    FR: Fn(R, R) -> R + Sync + Send,
    FD: Fn() -> R + Sync + Send,
    R: Send,
{
    source.par_iter().map(map_op).reduce(default_op, reduce_op)
}
