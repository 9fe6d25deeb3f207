// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Single-flight module loader
//!
//! A [`ModuleLoader`] owns one module identifier and the state of loading
//! it. However many callers ask for the module at once, the source runs at
//! most once at a time: the first caller starts the load and everyone else
//! awaits the same shared future.
//!
//! Each attempt runs on its own Tokio task, so once started it runs to
//! completion and settles the state even if every waiter goes away. Loads
//! must therefore be started from within a Tokio runtime.
//!
//! ## States
//!
//! - `NotStarted` → `Loading` on the first [`ModuleLoader::ensure_loaded`]
//! - `Loading` → `Loaded` on success; terminal for the instance
//! - `Loading` → `Failed` on failure; the next call starts a new attempt
//!   unless [`LoaderOptions::poison_on_failure`] is set

use crate::config::LoaderOptions;
use crate::error::{BoxError, ModuleError, Result};
use crate::module::{Exports, Module, ModuleId};
use crate::source::{FnSource, ModuleSource};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// The in-flight attempt every waiter awaits
type PendingLoad = Shared<BoxFuture<'static, Result<Arc<Module>>>>;

/// Observable load state of a [`ModuleLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// No attempt has been made yet
    NotStarted,
    /// An attempt is in flight
    Loading,
    /// The module is loaded
    Loaded,
    /// The last attempt failed
    Failed,
}

enum Slot {
    NotStarted,
    Loading { attempt: u64, pending: PendingLoad },
    Loaded(Arc<Module>),
    Failed(ModuleError),
}

struct Inner {
    slot: Slot,
    /// Attempts started so far; also identifies the current attempt
    attempts: u64,
}

impl Inner {
    /// Record the outcome of `attempt`, unless it was already recorded
    fn settle(&mut self, id: &ModuleId, attempt: u64, outcome: &Result<Arc<Module>>) {
        let current = matches!(&self.slot, Slot::Loading { attempt: a, .. } if *a == attempt);
        if !current {
            return;
        }

        self.slot = match outcome {
            Ok(module) => {
                debug!("Loaded module '{}' with {} member(s)", id, module.len());
                Slot::Loaded(Arc::clone(module))
            }
            Err(err) => {
                debug!("Loading module '{}' failed: {}", id, err);
                Slot::Failed(err.clone())
            }
        };
    }
}

enum Step {
    Ready(Arc<Module>),
    Wait { attempt: u64, pending: PendingLoad },
}

/// Loads one module on demand, at most once at a time
pub struct ModuleLoader {
    /// The module identifier
    id: ModuleId,
    /// Where the exports come from
    source: Arc<dyn ModuleSource>,
    /// Loader options
    options: LoaderOptions,
    /// Load state, shared with the task driving the current attempt; never
    /// held across an await
    inner: Arc<Mutex<Inner>>,
}

impl ModuleLoader {
    /// Create a loader with default options
    pub fn new(id: impl AsRef<str>, source: impl ModuleSource + 'static) -> Result<Self> {
        Self::with_options(id, source, LoaderOptions::default())
    }

    /// Create a loader with explicit options
    pub fn with_options(
        id: impl AsRef<str>,
        source: impl ModuleSource + 'static,
        options: LoaderOptions,
    ) -> Result<Self> {
        let id = ModuleId::new(id)?;
        Ok(Self::from_parts(id, Arc::new(source), options))
    }

    /// Create a loader from a closure returning a future of the exports
    pub fn from_fn<F, Fut>(id: impl AsRef<str>, load: F) -> Result<Self>
    where
        F: Fn(ModuleId) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<Exports, BoxError>> + Send + 'static,
    {
        Self::new(id, FnSource::new(load))
    }

    /// Create a loader from an already validated identifier and a shared source
    pub fn from_parts(id: ModuleId, source: Arc<dyn ModuleSource>, options: LoaderOptions) -> Self {
        Self {
            id,
            source,
            options,
            inner: Arc::new(Mutex::new(Inner {
                slot: Slot::NotStarted,
                attempts: 0,
            })),
        }
    }

    /// The module identifier
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// The loader options
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Current load state
    pub fn state(&self) -> LoadState {
        match self.inner.lock().slot {
            Slot::NotStarted => LoadState::NotStarted,
            Slot::Loading { .. } => LoadState::Loading,
            Slot::Loaded(_) => LoadState::Loaded,
            Slot::Failed(_) => LoadState::Failed,
        }
    }

    /// Whether the module is loaded
    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// The loaded module, without waiting or starting a load
    pub fn loaded(&self) -> Option<Arc<Module>> {
        match &self.inner.lock().slot {
            Slot::Loaded(module) => Some(Arc::clone(module)),
            _ => None,
        }
    }

    /// Number of load attempts started so far
    pub fn attempts(&self) -> u64 {
        self.inner.lock().attempts
    }

    /// Load the module if needed and return it.
    ///
    /// Concurrent callers share one attempt and all receive its outcome.
    /// A failure is returned as [`ModuleError::LoadFailed`].
    ///
    /// # Panics
    ///
    /// Panics if a new attempt has to start outside a Tokio runtime.
    pub async fn ensure_loaded(&self) -> Result<Arc<Module>> {
        let (attempt, pending) = match self.begin()? {
            Step::Ready(module) => return Ok(module),
            Step::Wait { attempt, pending } => (attempt, pending),
        };

        let outcome = pending.await;
        self.inner.lock().settle(&self.id, attempt, &outcome);
        outcome
    }

    /// Like [`ensure_loaded`](Self::ensure_loaded), but stop waiting with
    /// [`ModuleError::Cancelled`] once `cancel` fires.
    ///
    /// Only this caller gives up. An attempt already in flight keeps
    /// running and settles the state on its own.
    pub async fn ensure_loaded_until_cancelled(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Arc<Module>> {
        if let Some(module) = self.loaded() {
            return Ok(module);
        }
        if cancel.is_cancelled() {
            return Err(self.cancelled());
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                trace!("Stopped waiting for module '{}'", self.id);
                Err(self.cancelled())
            }
            outcome = self.ensure_loaded() => outcome,
        }
    }

    fn begin(&self) -> Result<Step> {
        let mut inner = self.inner.lock();

        match &inner.slot {
            Slot::Loaded(module) => {
                trace!("Module '{}' already loaded", self.id);
                return Ok(Step::Ready(Arc::clone(module)));
            }
            Slot::Loading { attempt, pending } => {
                trace!("Joining in-flight load of module '{}'", self.id);
                return Ok(Step::Wait {
                    attempt: *attempt,
                    pending: pending.clone(),
                });
            }
            Slot::Failed(err) if self.options.poison_on_failure => {
                trace!("Module '{}' is poisoned by an earlier failure", self.id);
                return Err(err.clone());
            }
            Slot::NotStarted | Slot::Failed(_) => {}
        }

        inner.attempts += 1;
        let attempt = inner.attempts;
        let pending = self.start(attempt);
        inner.slot = Slot::Loading {
            attempt,
            pending: pending.clone(),
        };
        Ok(Step::Wait { attempt, pending })
    }

    fn start(&self, attempt: u64) -> PendingLoad {
        debug!("Loading module '{}' (attempt {})", self.id, attempt);

        let source = Arc::clone(&self.source);
        let inner = Arc::clone(&self.inner);
        let id = self.id.clone();
        let task = tokio::spawn(async move {
            let outcome = match source.load(&id).await {
                Ok(exports) => Ok(Arc::new(Module::new(id.clone(), exports))),
                Err(err) => Err(ModuleError::load_failed(id.as_str(), err)),
            };
            inner.lock().settle(&id, attempt, &outcome);
            outcome
        });

        let id = self.id.clone();
        async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(err) => Err(ModuleError::load_failed(id.as_str(), Box::new(err))),
            }
        }
        .boxed()
        .shared()
    }

    fn cancelled(&self) -> ModuleError {
        ModuleError::Cancelled {
            module: self.id.to_string(),
        }
    }
}

impl fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("options", &self.options)
            .finish()
    }
}
