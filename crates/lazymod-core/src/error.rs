// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for module loading, resolution and invocation

use crate::value::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for lazymod operations
pub type Result<T> = std::result::Result<T, ModuleError>;

/// Boxed error returned by a [`ModuleSource`](crate::ModuleSource)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while loading a module or using its members
///
/// Cloneable so a single failed load can be handed to every caller that
/// was waiting on it.
#[derive(Debug, Clone, Error)]
pub enum ModuleError {
    /// Module identifier missing or empty
    #[error("A module identifier is required")]
    IdentifierRequired,

    /// The module source failed
    #[error("Failed to load module '{module}': {source}")]
    LoadFailed {
        /// Module identifier
        module: String,
        /// The source's own error
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// Member, class, object or path segment name missing
    #[error("A member name is required (module '{module}')")]
    MemberNameRequired {
        /// Module identifier
        module: String,
    },

    /// Top-level member absent
    #[error("Member '{member}' not found in module '{module}'")]
    MemberNotFound {
        /// Module identifier
        module: String,
        /// Member name
        member: String,
    },

    /// Nested property absent
    #[error("Property '{path}' not found in module '{module}'")]
    PropertyNotFound {
        /// Module identifier
        module: String,
        /// Dotted path up to and including the missing segment
        path: String,
    },

    /// Target is not callable
    #[error("TypeError: '{path}' in module '{module}' is not a function (found {found})")]
    NotAFunction {
        /// Module identifier
        module: String,
        /// Dotted member path
        path: String,
        /// Type of the value that was found
        found: &'static str,
    },

    /// Target is not constructible
    #[error("TypeError: '{path}' in module '{module}' is not a class (found {found})")]
    NotAClass {
        /// Module identifier
        module: String,
        /// Dotted member path
        path: String,
        /// Type of the value that was found
        found: &'static str,
    },

    /// Declared parameter count differs from the supplied argument count
    #[error(
        "'{path}' in module '{module}' expects {expected} argument(s) but {actual} were supplied"
    )]
    ArityMismatch {
        /// Module identifier
        module: String,
        /// Dotted member path
        path: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// The caller stopped waiting for the load
    #[error("Waiting for module '{module}' was cancelled")]
    Cancelled {
        /// Module identifier
        module: String,
    },

    /// A member's own failure, passed through unmodified
    #[error("Uncaught {0}")]
    Thrown(Value),
}

/// Fieldless discriminant of [`ModuleError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ModuleError::IdentifierRequired`]
    IdentifierRequired,
    /// See [`ModuleError::LoadFailed`]
    LoadFailed,
    /// See [`ModuleError::MemberNameRequired`]
    MemberNameRequired,
    /// See [`ModuleError::MemberNotFound`]
    MemberNotFound,
    /// See [`ModuleError::PropertyNotFound`]
    PropertyNotFound,
    /// See [`ModuleError::NotAFunction`]
    NotAFunction,
    /// See [`ModuleError::NotAClass`]
    NotAClass,
    /// See [`ModuleError::ArityMismatch`]
    ArityMismatch,
    /// See [`ModuleError::Cancelled`]
    Cancelled,
    /// See [`ModuleError::Thrown`]
    Thrown,
}

impl ModuleError {
    /// Create an error carrying a member's thrown value
    pub fn thrown(value: impl Into<Value>) -> Self {
        Self::Thrown(value.into())
    }

    /// Wrap a source failure with the module identifier
    pub fn load_failed(module: impl Into<String>, source: BoxError) -> Self {
        Self::LoadFailed {
            module: module.into(),
            source: Arc::from(source),
        }
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IdentifierRequired => ErrorKind::IdentifierRequired,
            Self::LoadFailed { .. } => ErrorKind::LoadFailed,
            Self::MemberNameRequired { .. } => ErrorKind::MemberNameRequired,
            Self::MemberNotFound { .. } => ErrorKind::MemberNotFound,
            Self::PropertyNotFound { .. } => ErrorKind::PropertyNotFound,
            Self::NotAFunction { .. } => ErrorKind::NotAFunction,
            Self::NotAClass { .. } => ErrorKind::NotAClass,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Thrown(_) => ErrorKind::Thrown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_load_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ModuleError::load_failed("mathutils", Box::new(io));

        assert_eq!(err.kind(), ErrorKind::LoadFailed);
        assert_eq!(
            err.to_string(),
            "Failed to load module 'mathutils': no such file"
        );
        assert_eq!(err.source().unwrap().to_string(), "no such file");
    }

    #[test]
    fn test_clones_share_the_source() {
        let err = ModuleError::load_failed("m", "broken".into());
        let cloned = err.clone();
        match (&err, &cloned) {
            (
                ModuleError::LoadFailed { source: a, .. },
                ModuleError::LoadFailed { source: b, .. },
            ) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("Expected LoadFailed"),
        }
    }

    #[test]
    fn test_messages_name_module_and_path() {
        let err = ModuleError::PropertyNotFound {
            module: "m".into(),
            path: "a.b.c".into(),
        };
        assert_eq!(err.to_string(), "Property 'a.b.c' not found in module 'm'");

        let err = ModuleError::ArityMismatch {
            module: "m".into(),
            path: "f".into(),
            expected: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("expects 3 argument(s) but 2 were supplied"));
    }

    #[test]
    fn test_thrown_display() {
        assert_eq!(ModuleError::thrown("boom").to_string(), "Uncaught boom");
        assert_eq!(ModuleError::thrown("boom").kind(), ErrorKind::Thrown);
    }
}
