//! Loading/error/data state for the case endpoints.
//!
//! The hooks are framework-agnostic: they write through a [`StateCell`],
//! which the app backs with a reactive signal and tests back with a plain
//! `Rc<RefCell<_>>`. Each hook owns an [`ActionGuard`] that rejects
//! overlapping invocations and discards results that arrive after the
//! consumer went away.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use shared_types::{ApiOperation, AppError, Case, CaseId, CreateCaseRequest, CreateCaseResult};
use tokio_util::sync::CancellationToken;

use crate::api::CaseClient;

/// Observable state of one hook.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: T,
}

impl<T> FetchState<T> {
    pub fn idle(data: T) -> Self {
        Self {
            loading: false,
            error: None,
            data,
        }
    }

    /// State of a hook that starts fetching as soon as it is mounted.
    pub fn pending(data: T) -> Self {
        Self {
            loading: true,
            error: None,
            data,
        }
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = data;
        self.loading = false;
    }

    /// Record a failure. Previously loaded data is kept.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }
}

impl<T: Default> Default for FetchState<T> {
    fn default() -> Self {
        Self::idle(T::default())
    }
}

/// A shared, mutable cell the hooks publish their state through.
pub trait StateCell<T> {
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    fn update(&self, f: impl FnOnce(&mut T));

    fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }
}

impl<T> StateCell<T> for Rc<RefCell<T>> {
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.borrow_mut())
    }
}

/// In-flight flag plus cancellation for one hook instance.
#[derive(Debug, Clone, Default)]
pub struct ActionGuard {
    busy: Rc<Cell<bool>>,
    cancel: CancellationToken,
}

/// Held for the duration of one action; clears the in-flight flag on drop.
#[derive(Debug)]
pub struct InFlight {
    busy: Rc<Cell<bool>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

impl ActionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the guard, or `None` if an action is pending or the owner is gone.
    pub fn try_begin(&self) -> Option<InFlight> {
        if self.cancel.is_cancelled() || self.busy.get() {
            return None;
        }
        self.busy.set(true);
        Some(InFlight {
            busy: self.busy.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Called when the consumer is torn down. Irreversible.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` unless cancellation wins first.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            out = fut => Some(out),
        }
    }

    fn rejection(&self, op: ApiOperation) -> AppError {
        if self.is_cancelled() {
            AppError::cancelled(op)
        } else {
            AppError::in_flight(op)
        }
    }
}

/// The case list. Created in the loading state; the owner triggers the
/// first `refetch` on mount.
#[derive(Debug, Clone)]
pub struct CaseListHook<S> {
    client: CaseClient,
    state: S,
    guard: ActionGuard,
    stale: Rc<Cell<bool>>,
}

impl<S: StateCell<FetchState<Vec<Case>>>> CaseListHook<S> {
    pub fn new(client: CaseClient, state: S) -> Self {
        Self {
            client,
            state,
            guard: ActionGuard::new(),
            stale: Rc::new(Cell::new(false)),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn guard(&self) -> &ActionGuard {
        &self.guard
    }

    /// Reload the list.
    ///
    /// At most one request is in flight. A refetch issued while one is
    /// pending marks it stale: the pending call then discards its response
    /// and fetches again, so the last refetch always commits fresh data.
    pub async fn refetch(&self) {
        if self.guard.is_cancelled() {
            tracing::debug!("Case list refetch skipped, hook disposed");
            return;
        }
        let Some(_in_flight) = self.guard.try_begin() else {
            tracing::debug!("Case list refetch queued behind the pending one");
            self.stale.set(true);
            return;
        };

        self.state.update(FetchState::begin);
        loop {
            self.stale.set(false);
            let outcome = self.guard.run(self.client.list_cases()).await;
            if outcome.is_some() && self.stale.get() {
                tracing::debug!("Case list went stale while loading, fetching again");
                continue;
            }
            match outcome {
                Some(Ok(cases)) => self.state.update(|s| s.succeed(cases)),
                Some(Err(e)) => self.state.update(|s| s.fail(e.friendly_message())),
                None => tracing::debug!("Case list result discarded after cancellation"),
            }
            return;
        }
    }
}

/// Case creation. Does not navigate; the caller decides what happens next.
#[derive(Debug, Clone)]
pub struct CreateCaseHook<S> {
    client: CaseClient,
    state: S,
    guard: ActionGuard,
}

impl<S: StateCell<FetchState<Option<CreateCaseResult>>>> CreateCaseHook<S> {
    pub fn new(client: CaseClient, state: S) -> Self {
        Self {
            client,
            state,
            guard: ActionGuard::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn guard(&self) -> &ActionGuard {
        &self.guard
    }

    pub async fn create_case(
        &self,
        request: &CreateCaseRequest,
    ) -> Result<CreateCaseResult, AppError> {
        let op = ApiOperation::CreateCase;
        let Some(_in_flight) = self.guard.try_begin() else {
            return Err(self.guard.rejection(op));
        };

        self.state.update(FetchState::begin);
        match self.guard.run(self.client.create_case(request)).await {
            Some(Ok(result)) => {
                self.state.update(|s| s.succeed(Some(result.clone())));
                Ok(result)
            }
            Some(Err(e)) => {
                self.state.update(|s| s.fail(e.friendly_message()));
                Err(e)
            }
            None => Err(AppError::cancelled(op)),
        }
    }
}

/// Case deletion. Failures land in `error`; callers only see a bool.
#[derive(Debug, Clone)]
pub struct DeleteCaseHook<S> {
    client: CaseClient,
    state: S,
    guard: ActionGuard,
}

impl<S: StateCell<FetchState<()>>> DeleteCaseHook<S> {
    pub fn new(client: CaseClient, state: S) -> Self {
        Self {
            client,
            state,
            guard: ActionGuard::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn guard(&self) -> &ActionGuard {
        &self.guard
    }

    pub async fn delete_case_by_id(&self, case_id: CaseId) -> bool {
        let Some(_in_flight) = self.guard.try_begin() else {
            tracing::debug!(case_id, "Delete rejected, another delete is pending");
            return false;
        };

        self.state.update(FetchState::begin);
        match self.guard.run(self.client.delete_case(case_id)).await {
            Some(Ok(_)) => {
                self.state.update(|s| s.succeed(()));
                true
            }
            Some(Err(e)) => {
                self.state.update(|s| s.fail(e.friendly_message()));
                false
            }
            None => false,
        }
    }
}
