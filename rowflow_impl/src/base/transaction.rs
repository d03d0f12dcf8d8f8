use crate::RfResult;

/// Transaction control of a connection.
pub trait Transactional {
    /// Starts a transaction.
    fn begin(&mut self) -> RfResult<()>;

    /// Commits the current transaction.
    fn commit(&mut self) -> RfResult<()>;

    /// Rolls the current transaction back.
    fn rollback(&mut self) -> RfResult<()>;
}

/// The result of [`run_in_transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome<T> {
    /// `true` if the transaction was committed.
    pub committed: bool,
    /// The value produced by the transaction block.
    pub value: T,
}

/// Runs `block` within a transaction on `conn`.
///
/// The block returns whether its work is to be committed, together with a value.
/// The transaction is committed only if the block returns `Ok((true, _))`;
/// it is rolled back if the block returns `Ok((false, _))` or an error, and also
/// if the block panics.
///
/// # Errors
///
/// The error of the block, or of `begin`, `commit` or `rollback`.
/// If the block fails and the rollback fails as well, the block's error is returned.
pub fn run_in_transaction<C, T, F>(conn: &mut C, block: F) -> RfResult<TransactionOutcome<T>>
where
    C: Transactional + ?Sized,
    F: FnOnce(&mut C) -> RfResult<(bool, T)>,
{
    conn.begin()?;
    let mut guard = RollbackGuard { conn, armed: true };
    match block(&mut *guard.conn) {
        Ok((true, value)) => {
            guard.conn.commit()?;
            guard.armed = false;
            Ok(TransactionOutcome {
                committed: true,
                value,
            })
        }
        Ok((false, value)) => {
            guard.armed = false;
            guard.conn.rollback()?;
            Ok(TransactionOutcome {
                committed: false,
                value,
            })
        }
        Err(e) => {
            guard.armed = false;
            if let Err(rollback_error) = guard.conn.rollback() {
                warn!("run_in_transaction(): rollback after \"{e}\" failed with {rollback_error}");
            }
            Err(e)
        }
    }
}

// rolls back if the transaction was neither committed nor rolled back explicitly
struct RollbackGuard<'a, C: Transactional + ?Sized> {
    conn: &'a mut C,
    armed: bool,
}

impl<'a, C: Transactional + ?Sized> Drop for RollbackGuard<'a, C> {
    fn drop(&mut self) {
        if self.armed {
            debug!("RollbackGuard::drop(): rolling back");
            if let Err(e) = self.conn.rollback() {
                warn!("RollbackGuard::drop(): rollback failed with {e}");
            }
        }
    }
}
