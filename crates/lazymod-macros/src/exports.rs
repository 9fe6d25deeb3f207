// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Macros for building module exports and native members.

/// Create an `Object` literal.
///
/// Values go through `Into<Value>`, so primitives, nested objects,
/// functions and classes can be mixed freely.
///
/// # Example
///
/// ```
/// use lazymod_core::Value;
/// use lazymod_macros::object;
///
/// let server = object! {
///     "host" => "localhost",
///     "port" => 8080,
///     "tls" => object! { "enabled" => false },
/// };
///
/// assert_eq!(server.len(), 3);
/// assert_eq!(server.get("port"), Some(&Value::from(8080)));
/// ```
#[macro_export]
macro_rules! object {
    () => {
        ::lazymod_core::Object::new()
    };
    ($($key:literal => $value:expr),+ $(,)?) => {
        ::lazymod_core::Object::new()$(.with($key, $value))+
    };
}

/// Create an `Exports` table.
///
/// # Example
///
/// ```
/// use lazymod_macros::exports;
///
/// let exports = exports! {
///     "name" => "mathutils",
///     "version" => 2,
/// };
/// assert_eq!(exports.len(), 2);
///
/// let empty = exports! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! exports {
    () => {
        ::lazymod_core::Exports::new()
    };
    ($($name:literal => $value:expr),+ $(,)?) => {
        ::lazymod_core::Exports::new()$(.with($name, $value))+
    };
}

/// Define a native `Function`.
///
/// Each parameter name becomes both a declared parameter (so the
/// function's arity is the number of names) and a local `Value` binding
/// inside the body. Missing arguments bind to `Undefined`; extra ones are
/// ignored. The body must evaluate to `lazymod_core::Result<Value>`.
///
/// # Example
///
/// ```
/// use lazymod_core::Value;
/// use lazymod_macros::function;
///
/// let greet = function!(greet(name) => {
///     Ok(Value::from(format!("hello, {}", name)))
/// });
///
/// assert_eq!(greet.arity(), 1);
/// assert_eq!(
///     greet.call(&Value::Undefined, &["ada".into()]).unwrap(),
///     Value::from("hello, ada")
/// );
/// ```
#[macro_export]
macro_rules! function {
    ($name:ident ( $($param:ident),* $(,)? ) => $body:expr) => {
        ::lazymod_core::Function::new(
            stringify!($name),
            &[$(stringify!($param)),*],
            move |args: &[::lazymod_core::Value]| {
                #[allow(unused_mut, unused_variables)]
                let mut rest = args.iter();
                $(
                    let $param: ::lazymod_core::Value = rest.next().cloned().unwrap_or_default();
                )*
                $body
            },
        )
    };
}

/// Define a native `Function` that reads the receiver it was called on.
///
/// The identifier between the bars binds to the receiver, which is the
/// owning object when the function is reached through
/// `Invoker::call_method`.
///
/// # Example
///
/// ```
/// use lazymod_core::Value;
/// use lazymod_macros::{method, object};
///
/// let next = method!(|this| next(step) => {
///     let start = this.get("start").and_then(|v| v.as_number()).unwrap_or(0.0);
///     let step = step.as_number().unwrap_or(1.0);
///     Ok(Value::Number(start + step))
/// });
///
/// let counter = Value::from(object! { "start" => 10 });
/// assert_eq!(next.call(&counter, &[2.into()]).unwrap(), Value::from(12));
/// ```
#[macro_export]
macro_rules! method {
    (|$this:ident| $name:ident ( $($param:ident),* $(,)? ) => $body:expr) => {
        ::lazymod_core::Function::method(
            stringify!($name),
            &[$(stringify!($param)),*],
            move |$this: &::lazymod_core::Value, args: &[::lazymod_core::Value]| {
                #[allow(unused_mut, unused_variables)]
                let mut rest = args.iter();
                $(
                    let $param: ::lazymod_core::Value = rest.next().cloned().unwrap_or_default();
                )*
                $body
            },
        )
    };
}

/// Define a native `Class`.
///
/// Parameters bind the same way as in [`function!`]. The body must
/// evaluate to `lazymod_core::Result<Object>`; the constructed instance is
/// tagged with the class name.
///
/// # Example
///
/// ```
/// use lazymod_core::Value;
/// use lazymod_macros::{class, object};
///
/// let point = class!(Point(x, y) => Ok(object! { "x" => x, "y" => y }))
///     .with_static("DIMENSIONS", 2);
///
/// let p = point.construct(&[1.into(), 2.into()]).unwrap();
/// assert_eq!(point.arity(), 2);
/// assert_eq!(p.get("y"), Some(Value::from(2)));
/// assert_eq!(p.to_string(), "[object Point]");
/// ```
#[macro_export]
macro_rules! class {
    ($name:ident ( $($param:ident),* $(,)? ) => $body:expr) => {
        ::lazymod_core::Class::new(
            stringify!($name),
            &[$(stringify!($param)),*],
            move |args: &[::lazymod_core::Value]| {
                #[allow(unused_mut, unused_variables)]
                let mut rest = args.iter();
                $(
                    let $param: ::lazymod_core::Value = rest.next().cloned().unwrap_or_default();
                )*
                $body
            },
        )
    };
}

/// Return early from a native member with a thrown value.
///
/// A single expression is thrown as-is; a format string is formatted and
/// thrown as a string.
///
/// # Example
///
/// ```
/// use lazymod_core::{Result, Value};
/// use lazymod_macros::throw;
///
/// fn checked_div(a: f64, b: f64) -> Result<Value> {
///     if b == 0.0 {
///         throw!("RangeError: cannot divide {} by zero", a);
///     }
///     Ok(Value::Number(a / b))
/// }
///
/// let err = checked_div(1.0, 0.0).unwrap_err();
/// assert_eq!(err.to_string(), "Uncaught RangeError: cannot divide 1 by zero");
/// assert!(checked_div(1.0, 2.0).is_ok());
/// ```
#[macro_export]
macro_rules! throw {
    ($fmt:literal, $($arg:tt)*) => {
        return Err(::lazymod_core::ModuleError::thrown(format!($fmt, $($arg)*)))
    };
    ($value:expr $(,)?) => {
        return Err(::lazymod_core::ModuleError::thrown($value))
    };
}
