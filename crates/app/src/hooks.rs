//! Dioxus bindings for the client hooks: state lives in a `Signal`, the
//! first list fetch runs on mount and pending work is cancelled when the
//! owning component is dropped.

use client::{
    may_load_data, CaseClient, CaseListHook, CreateCaseHook, DeleteCaseHook, FetchState, StateCell,
};
use dioxus::prelude::*;
use shared_types::{Case, CreateCaseResult};

use crate::auth::use_auth;

/// A `Signal` as a hook state cell. Writes notify readers; hook-internal
/// reads use `peek` so they never subscribe the caller.
pub struct SignalCell<T: 'static>(Signal<T>);

impl<T: 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SignalCell<T> {}

impl<T: 'static> SignalCell<T> {
    pub fn signal(&self) -> Signal<T> {
        self.0
    }
}

impl<T: 'static> StateCell<T> for SignalCell<T> {
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.0.peek())
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        let mut signal = self.0;
        signal.with_mut(f);
    }
}

pub type CaseList = CaseListHook<SignalCell<FetchState<Vec<Case>>>>;
pub type CreateCase = CreateCaseHook<SignalCell<FetchState<Option<CreateCaseResult>>>>;
pub type DeleteCase = DeleteCaseHook<SignalCell<FetchState<()>>>;

/// The case list, loading from the moment it is mounted. Refetches when
/// the signed-in user changes, but not while signed out with
/// authentication enabled.
pub fn use_case_list() -> CaseList {
    let client = use_context::<CaseClient>();
    let auth = use_auth();
    let state = use_signal(|| FetchState::pending(Vec::new()));
    let hook = use_hook(move || CaseListHook::new(client, SignalCell(state)));
    use_cancel_on_drop(hook.guard().clone());

    let list = hook.clone();
    use_effect(move || {
        let identity = auth.identity.read().clone();
        if !may_load_data(auth.kind, &identity) {
            tracing::debug!("Not signed in, not loading cases");
            return;
        }
        tracing::debug!(user_id = ?identity.user_id, "Loading cases");
        let list = list.clone();
        spawn(async move {
            list.refetch().await;
        });
    });

    hook
}

pub fn use_create_case() -> CreateCase {
    let client = use_context::<CaseClient>();
    let state = use_signal(FetchState::default);
    let hook = use_hook(move || CreateCaseHook::new(client, SignalCell(state)));
    use_cancel_on_drop(hook.guard().clone());
    hook
}

pub fn use_delete_case() -> DeleteCase {
    let client = use_context::<CaseClient>();
    let state = use_signal(FetchState::default);
    let hook = use_hook(move || DeleteCaseHook::new(client, SignalCell(state)));
    use_cancel_on_drop(hook.guard().clone());
    hook
}

fn use_cancel_on_drop(guard: client::ActionGuard) {
    use_drop(move || guard.cancel());
}
