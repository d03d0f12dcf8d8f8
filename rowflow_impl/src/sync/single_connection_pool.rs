use crate::{RfError, RfResult};
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, TryLockError};

/// A pool that holds exactly one connection.
///
/// The connection can be taken by one user at a time;
/// it goes back to the pool when the returned guard is dropped.
#[derive(Debug)]
pub struct SingleConnectionPool<C> {
    connection: Mutex<C>,
}

impl<C> SingleConnectionPool<C> {
    /// Creates a pool for the given connection.
    pub fn new(connection: C) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    /// Takes the connection.
    ///
    /// # Errors
    ///
    /// `RfError::ConcurrentUse` if the connection is currently taken.
    ///
    /// `RfError::Poison` if a previous user panicked while holding the connection.
    pub fn take(&self) -> RfResult<PooledConnection<'_, C>> {
        match self.connection.try_lock() {
            Ok(guard) => Ok(PooledConnection { guard }),
            Err(TryLockError::WouldBlock) => {
                warn!("SingleConnectionPool::take(): connection is already in use");
                Err(RfError::ConcurrentUse)
            }
            Err(TryLockError::Poisoned(_)) => Err(RfError::Poison),
        }
    }

    /// Returns the connection, consuming the pool.
    ///
    /// # Errors
    ///
    /// `RfError::Poison` if a previous user panicked while holding the connection.
    pub fn into_inner(self) -> RfResult<C> {
        Ok(self.connection.into_inner()?)
    }
}

/// The connection of a [`SingleConnectionPool`], while it is taken.
#[derive(Debug)]
pub struct PooledConnection<'a, C> {
    guard: MutexGuard<'a, C>,
}

impl<'a, C> Deref for PooledConnection<'a, C> {
    type Target = C;
    fn deref(&self) -> &C {
        &self.guard
    }
}

impl<'a, C> DerefMut for PooledConnection<'a, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.guard
    }
}
