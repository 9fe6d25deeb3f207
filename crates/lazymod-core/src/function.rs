// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Callable and constructible members.

use crate::error::Result;
use crate::value::{Object, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A native function body.
///
/// Receives the receiver (`this`, `Undefined` for plain calls) and the
/// arguments exactly as the caller supplied them.
pub type NativeFunction = Arc<dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync>;

/// A native constructor body, producing the new instance's properties.
pub type NativeConstructor = Arc<dyn Fn(&[Value]) -> Result<Object> + Send + Sync>;

/// A callable member.
#[derive(Clone)]
pub struct Function {
    /// The function name
    name: String,
    /// The declared parameter names
    params: Vec<String>,
    /// The native body
    func: NativeFunction,
}

impl Function {
    /// Creates a function that ignores its receiver.
    pub fn new<F>(name: impl Into<String>, params: &[&str], func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::method(name, params, move |_this, args| func(args))
    }

    /// Creates a function that reads its receiver, for use as an object method.
    pub fn method<F>(name: impl Into<String>, params: &[&str], func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
            func: Arc::new(func),
        }
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the arity (number of parameters).
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Invokes the function. The result, success or failure, is the
    /// body's own.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        (self.func)(this, args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({}/{})", self.name, self.arity())
    }
}

/// A constructible member.
#[derive(Clone)]
pub struct Class {
    name: String,
    params: Vec<String>,
    construct: NativeConstructor,
    statics: BTreeMap<String, Value>,
}

impl Class {
    /// Creates a class whose constructor declares `params`.
    pub fn new<F>(name: impl Into<String>, params: &[&str], construct: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Object> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
            construct: Arc::new(construct),
            statics: BTreeMap::new(),
        }
    }

    /// Adds a static member.
    pub fn with_static(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.statics.insert(key.into(), value.into());
        self
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The constructor's declared parameter names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the constructor arity.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Gets a static member.
    pub fn get_static(&self, key: &str) -> Option<&Value> {
        self.statics.get(key)
    }

    /// Runs the constructor and tags the instance with this class's name.
    pub fn construct(&self, args: &[Value]) -> Result<Value> {
        let instance = (self.construct)(args)?;
        Ok(Value::Object(Arc::new(instance.tag_class(&self.name))))
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({}/{})", self.name, self.arity())
    }
}
