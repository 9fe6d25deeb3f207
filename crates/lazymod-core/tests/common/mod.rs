// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Shared helpers for integration tests

#![allow(dead_code)]

use lazymod_core::{BoxError, Exports, FnSource, LoaderOptions, ModuleLoader, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once; `RUST_LOG=lazymod_core=trace`
/// shows the loader's state transitions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A loader whose source sleeps for `delay`, counts its invocations, and
/// fails its first `failures` attempts.
pub fn slow_loader(
    id: &str,
    delay: Duration,
    failures: usize,
    options: LoaderOptions,
) -> (Arc<ModuleLoader>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let source = FnSource::new(move |_id| {
        let counter = Arc::clone(&counter);
        async move {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(delay).await;
            if attempt <= failures {
                Err::<Exports, BoxError>(format!("attempt {} failed", attempt).into())
            } else {
                Ok(Exports::new().with("attempt", Value::Number(attempt as f64)))
            }
        }
    });

    let loader = ModuleLoader::with_options(id, source, options).unwrap();
    (Arc::new(loader), calls)
}
