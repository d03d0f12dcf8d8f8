use std::sync::atomic::{AtomicU64, Ordering};

// docu is written at re-exports of frontend crates (rowflow/lib.rs, rowflow_async/lib.rs)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStatistics {
    rents: u64,
    returns: u64,
    allocations: u64,
    discards: u64,
}

impl PoolStatistics {
    /// Number of buffers that were rented.
    pub fn rents(&self) -> u64 {
        self.rents
    }
    /// Number of buffers that were given back.
    pub fn returns(&self) -> u64 {
        self.returns
    }
    /// Number of rents that had to allocate a fresh buffer.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }
    /// Number of given-back buffers that were dropped rather than pooled,
    /// because their bucket was full or they were not poolable.
    pub fn discards(&self) -> u64 {
        self.discards
    }
    /// Number of buffers that are rented and not yet given back.
    pub fn outstanding(&self) -> u64 {
        self.rents.saturating_sub(self.returns)
    }
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Buffer pool statistics:")?;
        writeln!(f, "  rents:       {}", self.rents)?;
        writeln!(f, "  returns:     {}", self.returns)?;
        writeln!(f, "  allocations: {}", self.allocations)?;
        writeln!(f, "  discards:    {}", self.discards)?;
        writeln!(f, "  outstanding: {}", self.outstanding())
    }
}

// lock-free counters, updated from concurrent renters
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    rents: AtomicU64,
    returns: AtomicU64,
    allocations: AtomicU64,
    discards: AtomicU64,
}
impl PoolCounters {
    pub(crate) fn add_rent(&self, allocated: bool) {
        self.rents.fetch_add(1, Ordering::Relaxed);
        if allocated {
            self.allocations.fetch_add(1, Ordering::Relaxed);
        }
    }
    pub(crate) fn add_return(&self, discarded: bool) {
        self.returns.fetch_add(1, Ordering::Relaxed);
        if discarded {
            self.discards.fetch_add(1, Ordering::Relaxed);
        }
    }
    pub(crate) fn snapshot(&self) -> PoolStatistics {
        PoolStatistics {
            rents: self.rents.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
            discards: self.discards.load(Ordering::Relaxed),
        }
    }
}
