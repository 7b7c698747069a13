//! Visitor lifecycle protocol.
//!
//! A visitor is constructed once with its algorithm parameters, then driven
//! through `reset` / `apply` / `result` any number of times. Every `apply`
//! reprocesses the full range it is given; there is no incremental mode.

use crate::error::VisitorResult;

/// Stateful algorithm over one index/column pair.
///
/// `T` is the column element type. The index element type `I` of `apply`
/// only takes part in length bookkeeping.
pub trait ColumnVisitor<T> {
    /// Published result view.
    type Output: ?Sized;

    /// Clear accumulated state so the visitor can be reused.
    fn reset(&mut self);

    /// Run the whole algorithm once over `index` and `column`.
    ///
    /// Each call starts from a clean state, even without a preceding
    /// [`reset`](ColumnVisitor::reset).
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InsufficientData` when the algorithm cannot run
    /// on the supplied column at all.
    fn apply<I>(&mut self, index: &[I], column: &[T]) -> VisitorResult<()>;

    /// Result of the last successful `apply`.
    fn result(&self) -> &Self::Output;

    /// Reset, apply and return the result in one call.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `apply`.
    fn visit<I>(&mut self, index: &[I], column: &[T]) -> VisitorResult<&Self::Output> {
        self.reset();
        self.apply(index, column)?;
        Ok(self.result())
    }
}
