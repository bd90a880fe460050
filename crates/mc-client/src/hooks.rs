//! Resource hooks: per-resource fetch state machines.
//!
//! A hook owns a resource descriptor and the state of its last fetch. It
//! starts in the loading state with no data, fetches once per [`mount`],
//! [`refetch`] or value-changing [`set_resource`], and settles into either a
//! success or an error state. Failures never escape as `Err`: they become a
//! display-ready message in [`ListState::error`] / [`SingleState::error`].
//!
//! Each fetch takes a generation ticket. A response that lands after a newer
//! fetch has started is discarded, so rapid parameter changes cannot leave
//! stale data on screen.
//!
//! [`mount`]: ListHook::mount
//! [`refetch`]: ListHook::refetch
//! [`set_resource`]: ListHook::set_resource

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use mc_model::PaginationMeta;

use crate::client::{ApiClient, FetchError};
use crate::resources::{ListResource, SingleResource};

/// Shown when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Erro desconhecido";

/// Observable state of a [`ListHook`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub data: Vec<T>,
    pub pagination: Option<PaginationMeta>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> ListState<T> {
    fn initial() -> Self {
        Self {
            data: Vec::new(),
            pagination: None,
            loading: true,
            error: None,
        }
    }
}

/// Observable state of a [`SingleHook`].
#[derive(Debug, Clone, PartialEq)]
pub struct SingleState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> SingleState<T> {
    fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

#[derive(Default)]
struct Generation(AtomicU64);

impl Generation {
    fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn describe(err: &FetchError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Hook over a paginated collection.
pub struct ListHook<R: ListResource> {
    client: ApiClient,
    resource: Mutex<R>,
    state: Mutex<ListState<R::Item>>,
    generation: Generation,
}

impl<R: ListResource> ListHook<R> {
    /// Create a hook in the initial loading state. No request is issued yet.
    pub fn new(client: ApiClient, resource: R) -> Self {
        Self {
            client,
            resource: Mutex::new(resource),
            state: Mutex::new(ListState::initial()),
            generation: Generation::default(),
        }
    }

    /// Create a hook and perform its first fetch.
    pub async fn mounted(client: ApiClient, resource: R) -> Self {
        let hook = Self::new(client, resource);
        hook.mount().await;
        hook
    }

    pub async fn mount(&self) {
        self.fetch().await;
    }

    /// Fetch again with the current resource.
    pub async fn refetch(&self) {
        self.fetch().await;
    }

    /// Replace the resource; fetches only if it differs by value.
    pub async fn set_resource(&self, resource: R) {
        {
            let mut current = lock(&self.resource);
            if *current == resource {
                return;
            }
            *current = resource;
        }
        self.fetch().await;
    }

    #[must_use]
    pub fn resource(&self) -> R {
        lock(&self.resource).clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> ListState<R::Item> {
        lock(&self.state).clone()
    }

    async fn fetch(&self) {
        let resource = self.resource();
        let ticket = self.generation.begin();

        let Some(request) = resource.request() else {
            let mut state = lock(&self.state);
            state.data.clear();
            state.pagination = None;
            state.loading = false;
            state.error = None;
            return;
        };

        lock(&self.state).loading = true;
        let outcome = self
            .client
            .fetch_page::<R::Item>(&request, R::ERROR_PREFIX)
            .await;

        if !self.generation.is_current(ticket) {
            tracing::debug!(path = %request.path, ticket, "discarding stale response");
            return;
        }

        let mut state = lock(&self.state);
        state.loading = false;
        match outcome {
            Ok(page) => {
                state.data = page.data;
                state.pagination = page.pagination;
                state.error = None;
            }
            Err(err) => {
                state.data.clear();
                state.pagination = None;
                state.error = Some(describe(&err));
            }
        }
    }
}

/// Hook over a single resource.
pub struct SingleHook<R: SingleResource> {
    client: ApiClient,
    resource: Mutex<R>,
    state: Mutex<SingleState<R::Item>>,
    generation: Generation,
}

impl<R: SingleResource> SingleHook<R> {
    pub fn new(client: ApiClient, resource: R) -> Self {
        Self {
            client,
            resource: Mutex::new(resource),
            state: Mutex::new(SingleState::initial()),
            generation: Generation::default(),
        }
    }

    pub async fn mounted(client: ApiClient, resource: R) -> Self {
        let hook = Self::new(client, resource);
        hook.mount().await;
        hook
    }

    pub async fn mount(&self) {
        self.fetch().await;
    }

    pub async fn refetch(&self) {
        self.fetch().await;
    }

    pub async fn set_resource(&self, resource: R) {
        {
            let mut current = lock(&self.resource);
            if *current == resource {
                return;
            }
            *current = resource;
        }
        self.fetch().await;
    }

    #[must_use]
    pub fn resource(&self) -> R {
        lock(&self.resource).clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SingleState<R::Item> {
        lock(&self.state).clone()
    }

    async fn fetch(&self) {
        let resource = self.resource();
        let ticket = self.generation.begin();

        let Some(request) = resource.request() else {
            let mut state = lock(&self.state);
            state.data = None;
            state.loading = false;
            state.error = None;
            return;
        };

        lock(&self.state).loading = true;
        let outcome = self
            .client
            .fetch_one::<R::Item>(&request, R::ERROR_PREFIX)
            .await;

        if !self.generation.is_current(ticket) {
            tracing::debug!(path = %request.path, ticket, "discarding stale response");
            return;
        }

        let mut state = lock(&self.state);
        state.loading = false;
        match outcome {
            Ok(item) => {
                state.data = item;
                state.error = None;
            }
            Err(FetchError::NotFound) => {
                state.data = None;
                state.error = Some(R::NOT_FOUND_MESSAGE.to_string());
            }
            Err(err) => {
                state.data = None;
                state.error = Some(describe(&err));
            }
        }
    }
}
