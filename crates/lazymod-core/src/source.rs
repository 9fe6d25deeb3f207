// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The loading collaborator.

use crate::error::BoxError;
use crate::module::{Exports, ModuleId};
use async_trait::async_trait;
use std::future::Future;

/// Produces a module's exports from its identifier.
///
/// How the module is located and parsed is entirely up to the
/// implementation; any failure is reported as an opaque error and the
/// loader wraps it with the identifier.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    /// Load the module named by `id`.
    async fn load(&self, id: &ModuleId) -> Result<Exports, BoxError>;
}

/// Adapts a closure returning a future into a [`ModuleSource`].
pub struct FnSource<F>(F);

impl<F> FnSource<F> {
    /// Wrap a closure.
    pub fn new<Fut>(f: F) -> Self
    where
        F: Fn(ModuleId) -> Fut + Send + Sync,
        Fut: Future<Output = Result<Exports, BoxError>> + Send + 'static,
    {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> ModuleSource for FnSource<F>
where
    F: Fn(ModuleId) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Exports, BoxError>> + Send + 'static,
{
    async fn load(&self, id: &ModuleId) -> Result<Exports, BoxError> {
        (self.0)(id.clone()).await
    }
}
