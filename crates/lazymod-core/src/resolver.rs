// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Member resolution - fetches named and nested members of a loaded module

use crate::classifier::{classify, MemberKind};
use crate::error::{ModuleError, Result};
use crate::loader::ModuleLoader;
use crate::module::{Module, ModuleId};
use crate::value::Value;
use std::sync::Arc;
use tracing::trace;

/// Resolves members of the module behind a [`ModuleLoader`]
///
/// Stateless apart from the shared loader; clones are cheap and share the
/// same loaded module.
#[derive(Debug, Clone)]
pub struct MemberResolver {
    loader: Arc<ModuleLoader>,
}

impl MemberResolver {
    /// Create a resolver over a loader
    pub fn new(loader: Arc<ModuleLoader>) -> Self {
        Self { loader }
    }

    /// The underlying loader
    pub fn loader(&self) -> &Arc<ModuleLoader> {
        &self.loader
    }

    /// The module identifier
    pub fn module_id(&self) -> &ModuleId {
        self.loader.id()
    }

    /// Resolve a top-level member, loading the module if needed
    pub async fn resolve_member(&self, name: &str) -> Result<Value> {
        self.require_name(name)?;
        let module = self.loader.ensure_loaded().await?;
        self.lookup(&module, name)
    }

    /// Resolve `name`, then project each segment of `path` in order.
    ///
    /// Stops at the first absent segment with
    /// [`ModuleError::PropertyNotFound`] naming the dotted path walked so
    /// far, including the missing segment.
    pub async fn resolve_nested_member<S: AsRef<str>>(
        &self,
        name: &str,
        path: &[S],
    ) -> Result<Value> {
        self.require_name(name)?;
        for segment in path {
            self.require_name(segment.as_ref())?;
        }

        let mut current = self.resolve_member(name).await?;
        let mut walked = name.to_string();
        for segment in path {
            let segment = segment.as_ref();
            walked.push('.');
            walked.push_str(segment);

            current = current
                .get(segment)
                .ok_or_else(|| ModuleError::PropertyNotFound {
                    module: self.module_id().to_string(),
                    path: walked.clone(),
                })?;
        }

        trace!("Resolved '{}' in module '{}'", walked, self.module_id());
        Ok(current)
    }

    /// Resolve a dotted path such as `"config.server.port"`
    pub async fn resolve_path(&self, dotted: &str) -> Result<Value> {
        let mut segments = dotted.split('.');
        let name = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();
        self.resolve_nested_member(name, &rest).await
    }

    /// Check if the module has a member, loading it if needed
    pub async fn has_member(&self, name: &str) -> Result<bool> {
        self.require_name(name)?;
        let module = self.loader.ensure_loaded().await?;
        Ok(module.has(name))
    }

    /// Names of the module's members, loading it if needed
    pub async fn member_names(&self) -> Result<Vec<String>> {
        let module = self.loader.ensure_loaded().await?;
        Ok(module.member_names())
    }

    /// Classify a top-level member
    pub async fn classify_member(&self, name: &str) -> Result<MemberKind> {
        let value = self.resolve_member(name).await?;
        Ok(classify(&value))
    }

    fn lookup(&self, module: &Module, name: &str) -> Result<Value> {
        match module.get(name) {
            Some(value) => {
                trace!("Resolved '{}' in module '{}'", name, module.id());
                Ok(value.clone())
            }
            None => Err(ModuleError::MemberNotFound {
                module: module.id().to_string(),
                member: name.to_string(),
            }),
        }
    }

    pub(crate) fn require_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ModuleError::MemberNameRequired {
                module: self.module_id().to_string(),
            });
        }
        Ok(())
    }
}
