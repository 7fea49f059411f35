//! Resolve-once cells for derived bundle fields.

use once_cell::sync::OnceCell;

/// A value that is either unresolved or resolved exactly once.
///
/// Concurrent callers of [`Memo::get_or_try_resolve`] block until the first
/// resolution finishes; a failed resolution leaves the cell unresolved.
#[derive(Debug)]
pub(crate) struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    pub(crate) const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }

    pub(crate) fn get_or_resolve(&self, resolve: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(resolve)
    }

    pub(crate) fn get_or_try_resolve<E>(
        &self,
        resolve: impl FnOnce() -> Result<T, E>,
    ) -> Result<&T, E> {
        self.cell.get_or_try_init(resolve)
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}
