use std::sync::{Mutex, MutexGuard};

/// Implemented by both transaction kinds so that lookups can run under
/// either one
pub trait Transaction {}

/// Handle for reading the store. The in-memory backing has no snapshot to
/// release, so reset/renew only account for how often the handle was
/// recycled; callers still drive them as if a real snapshot were held.
pub struct ReadTransaction {
    refreshes: u64,
}

impl ReadTransaction {
    pub(crate) fn new() -> Self {
        Self { refreshes: 0 }
    }

    /// Releases the transaction. Must be called before a write transaction
    /// is started on the same thread.
    pub fn reset(&mut self) {}

    /// Acquires the transaction again after a reset
    pub fn renew(&mut self) {
        self.refreshes += 1;
    }

    pub fn refresh(&mut self) {
        self.reset();
        self.renew();
    }

    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }
}

impl Transaction for ReadTransaction {}

/// Exclusive handle for mutating the store. Holds the store's writer lock;
/// changes become visible as they are applied and the lock is released on
/// commit or drop.
pub struct WriteTransaction<'a> {
    lock: &'a Mutex<()>,
    guard: Option<MutexGuard<'a, ()>>,
    commits: u64,
}

impl<'a> WriteTransaction<'a> {
    pub(crate) fn new(lock: &'a Mutex<()>) -> Self {
        Self {
            guard: Some(lock.lock().unwrap()),
            lock,
            commits: 0,
        }
    }

    pub fn commit(&mut self) {
        if self.guard.take().is_some() {
            self.commits += 1;
        }
    }

    pub fn renew(&mut self) {
        if self.guard.is_none() {
            self.guard = Some(self.lock.lock().unwrap());
        }
    }

    /// Commit and start over. Lets other writers in between long batches.
    pub fn refresh(&mut self) {
        self.commit();
        self.renew();
    }

    pub fn commit_count(&self) -> u64 {
        self.commits
    }
}

impl Transaction for WriteTransaction<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_refresh_counts_commits() {
        let lock = Mutex::new(());
        let mut txn = WriteTransaction::new(&lock);
        assert_eq!(txn.commit_count(), 0);
        txn.refresh();
        txn.refresh();
        assert_eq!(txn.commit_count(), 2);
        txn.commit();
        txn.commit();
        assert_eq!(txn.commit_count(), 3);
    }

    #[test]
    fn read_renew_counts_refreshes() {
        let mut txn = ReadTransaction::new();
        txn.refresh();
        txn.reset();
        txn.renew();
        assert_eq!(txn.refresh_count(), 2);
    }
}
