//! Declarative macros for building lazymod module exports.
//!
//! Writing native members by hand means unpacking argument slices and
//! repeating parameter names twice. These macros take care of both.
//!
//! # Macros Overview
//!
//! ## Building exports
//! - [`object!`] - Create an `Object` literal
//! - [`exports!`] - Create an `Exports` table
//! - [`function!`] - Define a native function with named parameters
//! - [`method!`] - Define a native function that reads its receiver
//! - [`class!`] - Define a native class with named constructor parameters
//!
//! ## Error handling
//! - [`throw!`] - Return a thrown value from a native member
//!
//! ## Testing
//! - [`assert_module_error!`] - Assert a result failed with a given error kind
//!
//! # Examples
//!
//! ```
//! use lazymod_core::Value;
//! use lazymod_macros::*;
//!
//! let exports = exports! {
//!     "add" => function!(add(a, b) => {
//!         let a = a.as_number().unwrap_or(f64::NAN);
//!         let b = b.as_number().unwrap_or(f64::NAN);
//!         Ok(Value::Number(a + b))
//!     }),
//!     "Vector" => class!(Vector(x) => Ok(object! { "x" => x })),
//!     "version" => "1.2.0",
//! };
//! assert_eq!(exports.len(), 3);
//! ```
//!
//! ## Throwing from native members
//!
//! ```
//! use lazymod_core::Value;
//! use lazymod_macros::*;
//!
//! let sqrt = function!(sqrt(n) => {
//!     let n = n.as_number().unwrap_or(f64::NAN);
//!     if n < 0.0 {
//!         throw!("RangeError: {} is negative", n);
//!     }
//!     Ok(Value::Number(n.sqrt()))
//! });
//!
//! assert_eq!(sqrt.call(&Value::Undefined, &[Value::from(9)]).unwrap(), Value::from(3));
//! assert_module_error!(sqrt.call(&Value::Undefined, &[Value::from(-1)]), Thrown);
//! ```

#![warn(clippy::all)]

mod exports;
mod testing;
