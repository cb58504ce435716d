//! Shared fakes for the integration tests.

use std::collections::HashMap;

use keysafe_secrets::{FetchedValue, MemoryProvider, ProviderStatus, Query, SecretProvider, SyncMatch};
use parking_lot::Mutex;

/// Provider primitive, as seen by [`FakeProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Update,
    Fetch,
    Delete,
}

/// Whether a call used permissive (`SyncMatch::Any`) matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Strict,
    Permissive,
}

impl Mode {
    fn of(query: &Query) -> Self {
        if query.sync == SyncMatch::Any {
            Mode::Permissive
        } else {
            Mode::Strict
        }
    }
}

/// An in-memory provider whose answers can be forced per (op, mode).
///
/// Calls without a forced status go to a real [`MemoryProvider`], so state
/// carries over between operations. Every call is recorded.
#[derive(Default)]
pub struct FakeProvider {
    inner: MemoryProvider,
    forced: Mutex<HashMap<(Op, Mode), ProviderStatus>>,
    calls: Mutex<Vec<(Op, Mode)>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `op` in `mode` with `status` instead of consulting the store.
    pub fn force(&self, op: Op, mode: Mode, status: ProviderStatus) {
        self.forced.lock().insert((op, mode), status);
    }

    pub fn calls(&self) -> Vec<(Op, Mode)> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Whether any call used permissive matching.
    pub fn saw_permissive(&self) -> bool {
        self.calls
            .lock()
            .iter()
            .any(|(_, mode)| *mode == Mode::Permissive)
    }

    pub fn stored_items(&self) -> usize {
        self.inner.len()
    }

    fn intercept(&self, op: Op, query: &Query) -> Option<ProviderStatus> {
        let mode = Mode::of(query);
        self.calls.lock().push((op, mode));
        self.forced.lock().get(&(op, mode)).copied()
    }
}

impl SecretProvider for FakeProvider {
    fn add(&self, query: &Query) -> ProviderStatus {
        self.intercept(Op::Add, query)
            .unwrap_or_else(|| self.inner.add(query))
    }

    fn update(&self, query: &Query, payload: &[u8]) -> ProviderStatus {
        self.intercept(Op::Update, query)
            .unwrap_or_else(|| self.inner.update(query, payload))
    }

    fn copy_matching(&self, query: &Query) -> (ProviderStatus, Option<FetchedValue>) {
        match self.intercept(Op::Fetch, query) {
            Some(status) => (status, None),
            None => self.inner.copy_matching(query),
        }
    }

    fn delete(&self, query: &Query) -> ProviderStatus {
        self.intercept(Op::Delete, query)
            .unwrap_or_else(|| self.inner.delete(query))
    }
}
