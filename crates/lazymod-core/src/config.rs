// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Loader configuration.

use serde::{Deserialize, Serialize};

/// Options for a [`ModuleLoader`](crate::ModuleLoader).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Keep a failed load's error and return it to every later caller
    /// instead of attempting the load again.
    pub poison_on_failure: bool,
}

impl LoaderOptions {
    /// Set `poison_on_failure`.
    pub fn poison_on_failure(mut self, poison: bool) -> Self {
        self.poison_on_failure = poison;
        self
    }
}
