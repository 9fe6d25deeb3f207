// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Testing helper macros.

/// Assert that a result failed with the given `ErrorKind` variant.
///
/// An optional guard can inspect the error, bound as `err`.
///
/// # Example
///
/// ```
/// use lazymod_core::{ModuleError, ModuleId};
/// use lazymod_macros::assert_module_error;
///
/// assert_module_error!(ModuleId::new(""), IdentifierRequired);
///
/// let result: lazymod_core::Result<()> = Err(ModuleError::MemberNotFound {
///     module: "mathutils".into(),
///     member: "sub".into(),
/// });
/// assert_module_error!(result, MemberNotFound, |err| err.to_string().contains("sub"));
/// ```
#[macro_export]
macro_rules! assert_module_error {
    ($expr:expr, $kind:ident) => {
        match $expr {
            Err(ref err) if err.kind() == ::lazymod_core::ErrorKind::$kind => {}
            ref other => panic!(
                "assertion failed: `{}` is not Err({})\n  value: {:?}",
                stringify!($expr),
                stringify!($kind),
                other
            ),
        }
    };
    ($expr:expr, $kind:ident, |$err:ident| $guard:expr) => {
        match $expr {
            Err(ref $err) if $err.kind() == ::lazymod_core::ErrorKind::$kind && $guard => {}
            ref other => panic!(
                "assertion failed: `{}` is not Err({}) with `{}`\n  value: {:?}",
                stringify!($expr),
                stringify!($kind),
                stringify!($guard),
                other
            ),
        }
    };
}
