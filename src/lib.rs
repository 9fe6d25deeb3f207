// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! lazymod - lazy, single-flight module loading
//!
//! This crate bundles [`lazymod_core`] (loader, resolver, invoker and the
//! value model) with the export-building macros from [`lazymod_macros`].
//!
//! ## Example
//!
//! ```rust
//! use lazymod::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> lazymod::Result<()> {
//! let loader = ModuleLoader::from_fn("mathutils", |_id| async {
//!     Ok::<_, BoxError>(exports! {
//!         "add" => function!(add(a, b) => {
//!             Ok(Value::Number(a.as_number().unwrap_or(f64::NAN) + b.as_number().unwrap_or(f64::NAN)))
//!         }),
//!     })
//! })?;
//!
//! let invoker = Invoker::new(Arc::new(loader));
//! assert_eq!(invoker.call_function("add", &[2.into(), 3.into()]).await?, Value::from(5));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use lazymod_core::*;
pub use lazymod_macros::{assert_module_error, class, exports, function, method, object, throw};

/// Everything needed to define and consume a module
pub mod prelude {
    pub use lazymod_core::{
        BoxError, CancellationToken, Class, ErrorKind, Exports, FnSource, Function, Invoker,
        LoadState, LoaderOptions, MemberKind, MemberResolver, ModuleError, ModuleId,
        ModuleLoader, ModuleSource, Object, Result, Value,
    };
    pub use lazymod_macros::{assert_module_error, class, exports, function, method, object, throw};
}
