// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module identifiers, export tables and loaded modules

use crate::error::{ModuleError, Result};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Opaque, validated module identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId(Arc<str>);

impl ModuleId {
    /// Validate and wrap an identifier. Only the empty identifier is
    /// rejected; anything else is opaque.
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(ModuleError::IdentifierRequired);
        }
        Ok(Self(Arc::from(id)))
    }

    /// The identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Name-to-value table produced by a module source
#[derive(Debug, Clone, Default)]
pub struct Exports {
    members: BTreeMap<String, Value>,
}

impl Exports {
    /// Create an empty export table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member, consuming and returning the table
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a member
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.members.insert(name.into(), value.into());
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Exports {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A successfully loaded module
///
/// Immutable once created and shared by `Arc` between every resolver and
/// invoker built on the same loader.
#[derive(Debug)]
pub struct Module {
    /// The module's identifier
    id: ModuleId,
    /// The module's exports
    exports: BTreeMap<String, Value>,
}

impl Module {
    /// Create a module from its identifier and export table
    pub fn new(id: ModuleId, exports: Exports) -> Self {
        Self {
            id,
            exports: exports.members,
        }
    }

    /// The module's identifier
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Get a member. Falsy members (`undefined`, `null`, `false`, `0`,
    /// `NaN`, `""`) count as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.exports.get(name).filter(|v| v.to_boolean())
    }

    /// Check if a member is present
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of present members, sorted
    pub fn member_names(&self) -> Vec<String> {
        self.exports
            .iter()
            .filter(|(_, v)| v.to_boolean())
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Number of exported entries
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    /// Whether the module exports nothing
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}
