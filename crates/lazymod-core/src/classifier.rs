// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Member classification.
//!
//! Every exported value carries an explicit tag, so classification is a
//! total, pure function of the value.

use crate::value::Value;

/// Capability of an exported member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Callable but not constructible
    Function,
    /// Constructible (and therefore also callable)
    Constructor,
    /// Plain data
    Value,
}

/// Returns true if the value can be invoked, constructors included.
pub fn is_callable(value: &Value) -> bool {
    matches!(value, Value::Function(_) | Value::Class(_))
}

/// Returns true if the value is a class. Plain functions are callable but
/// not constructible.
pub fn is_constructible(value: &Value) -> bool {
    matches!(value, Value::Class(_))
}

/// Classifies a value.
pub fn classify(value: &Value) -> MemberKind {
    match value {
        Value::Class(_) => MemberKind::Constructor,
        Value::Function(_) => MemberKind::Function,
        _ => MemberKind::Value,
    }
}

/// Declared parameter count of a function or class constructor.
pub fn declared_arity(value: &Value) -> Option<usize> {
    match value {
        Value::Function(func) => Some(func.arity()),
        Value::Class(class) => Some(class.arity()),
        _ => None,
    }
}
