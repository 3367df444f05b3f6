//! Handoff of implementor tables from artifact producers to a display consumer.
//!
//! Generated artifacts and the viewer that displays them load in arbitrary
//! order. The registry bridges the two: a table submitted before the consumer
//! exists is parked in a pending queue; once the consumer is installed it
//! receives everything parked, in submission order, then future submissions
//! directly.

use crate::types::ImplementorTable;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Consumer side of the handoff. Receives each submitted table exactly once.
pub trait ImplementorSink: Send + Sync {
    fn register(&self, table: ImplementorTable);
}

impl<F> ImplementorSink for F
where
    F: Fn(ImplementorTable) + Send + Sync,
{
    fn register(&self, table: ImplementorTable) {
        self(table);
    }
}

/// What [`ImplementorRegistry::submit`] did with a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// The installed sink was invoked synchronously with the table.
    Delivered,
    /// No sink is installed; the table was parked in the pending queue.
    Parked,
}

/// Returned by [`ImplementorRegistry::install`] when a sink is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("an implementor sink is already installed")]
pub struct InstallError;

struct RegistryState {
    sink: Option<Arc<dyn ImplementorSink>>,
    pending: VecDeque<ImplementorTable>,
}

/// Shared registration point between artifact producers and one consumer.
///
/// `submit` takes exactly one of two actions: deliver to the installed sink,
/// or park the table. There is deliberately no double-submission guard; each
/// call hands its table off exactly once, and submitting twice hands off
/// twice.
pub struct ImplementorRegistry {
    state: Mutex<RegistryState>,
}

impl ImplementorRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                sink: None,
                pending: VecDeque::new(),
            }),
        }
    }

    /// Hand a table to the consumer, or park it until one is installed.
    ///
    /// The sink runs outside the registry lock, so a sink may itself submit
    /// further tables.
    pub fn submit(&self, table: ImplementorTable) -> Handoff {
        let sink = {
            let mut state = self.lock();
            match &state.sink {
                Some(sink) => Arc::clone(sink),
                None => {
                    state.pending.push_back(table);
                    return Handoff::Parked;
                }
            }
        };
        sink.register(table);
        Handoff::Delivered
    }

    /// Install the consumer and flush parked tables to it in submission order.
    ///
    /// Returns how many parked tables were flushed. Fails if a sink is
    /// already installed: replacing a consumer silently would hide a
    /// load-order mistake.
    pub fn install(&self, sink: Arc<dyn ImplementorSink>) -> Result<usize, InstallError> {
        let parked = {
            let mut state = self.lock();
            if state.sink.is_some() {
                return Err(InstallError);
            }
            state.sink = Some(Arc::clone(&sink));
            std::mem::take(&mut state.pending)
        };
        let flushed = parked.len();
        for table in parked {
            sink.register(table);
        }
        Ok(flushed)
    }

    /// Install a closure as the consumer.
    pub fn install_fn<F>(&self, f: F) -> Result<usize, InstallError>
    where
        F: Fn(ImplementorTable) + Send + Sync + 'static,
    {
        self.install(Arc::new(f))
    }

    /// Drain the pending queue without installing a sink, oldest first.
    ///
    /// For consumers that collect on their own schedule instead of
    /// registering a callback.
    pub fn take_pending(&self) -> Vec<ImplementorTable> {
        self.lock().pending.drain(..).collect()
    }

    pub fn has_sink(&self) -> bool {
        self.lock().sink.is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // Nothing under the lock can panic, so a poisoned guard still holds
        // consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ImplementorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ImplementorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("ImplementorRegistry")
            .field("has_sink", &state.sink.is_some())
            .field("pending", &state.pending.len())
            .finish()
    }
}
