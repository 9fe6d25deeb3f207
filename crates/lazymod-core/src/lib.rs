// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # lazymod-core
//!
//! Lazy, single-flight module loading with typed member resolution and
//! invocation.
//!
//! A module is a named table of exports (functions, classes, plain objects
//! and primitives) produced on demand by a [`ModuleSource`]. This crate
//! provides three layers on top of that source:
//!
//! - [`ModuleLoader`] - loads the module at most once, however many callers
//!   ask for it concurrently
//! - [`MemberResolver`] - fetches top-level and nested members with
//!   existence checks
//! - [`Invoker`] - calls functions, constructs classes and calls methods,
//!   optionally checking arity first
//!
//! ## Quick Start
//!
//! ```rust
//! use lazymod_core::{BoxError, Exports, Function, Invoker, ModuleLoader, Value};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> lazymod_core::Result<()> {
//! let loader = ModuleLoader::from_fn("mathutils", |_id| async {
//!     let add = Function::new("add", &["a", "b"], |args| {
//!         let a = args.first().and_then(Value::as_number).unwrap_or(f64::NAN);
//!         let b = args.get(1).and_then(Value::as_number).unwrap_or(f64::NAN);
//!         Ok(Value::Number(a + b))
//!     });
//!     Ok::<_, BoxError>(Exports::new().with("add", add))
//! })?;
//!
//! let invoker = Invoker::new(Arc::new(loader));
//! let sum = invoker.call_function("add", &[2.into(), 3.into()]).await?;
//! assert_eq!(sum, Value::from(5));
//!
//! let missing = invoker.call_function("add", &[]).await?;
//! assert!(missing.as_number().is_some_and(f64::is_nan));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod function;
pub mod invoker;
pub mod loader;
pub mod module;
pub mod resolver;
pub mod source;
pub mod value;

// Re-exports
pub use classifier::{classify, declared_arity, is_callable, is_constructible, MemberKind};
pub use config::LoaderOptions;
pub use error::{BoxError, ErrorKind, ModuleError, Result};
pub use function::{Class, Function, NativeConstructor, NativeFunction};
pub use invoker::Invoker;
pub use loader::{LoadState, ModuleLoader};
pub use module::{Exports, Module, ModuleId};
pub use resolver::MemberResolver;
pub use source::{FnSource, ModuleSource};
pub use value::{Object, Value};

/// Re-exported so callers can build cancellation tokens without a direct
/// `tokio-util` dependency
pub use tokio_util::sync::CancellationToken;
