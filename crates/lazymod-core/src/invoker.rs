// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Function calls, instantiation and method calls on module members
//!
//! Every operation comes in two forms. The plain form checks that the
//! target is callable (or constructible) and invokes it. The `safe_` form
//! also requires the supplied argument count to equal the declared
//! parameter count, and checks it before anything runs.
//!
//! Arguments are passed through untouched, and whatever the member returns,
//! including its own errors, is returned as-is.

use crate::classifier::{declared_arity, is_callable, is_constructible};
use crate::error::{ModuleError, Result};
use crate::loader::ModuleLoader;
use crate::module::ModuleId;
use crate::resolver::MemberResolver;
use crate::value::Value;
use std::sync::Arc;
use tracing::debug;

/// Invokes members of the module behind a [`ModuleLoader`]
#[derive(Debug, Clone)]
pub struct Invoker {
    resolver: MemberResolver,
}

impl Invoker {
    /// Create an invoker over a loader
    pub fn new(loader: Arc<ModuleLoader>) -> Self {
        Self::from_resolver(MemberResolver::new(loader))
    }

    /// Create an invoker over an existing resolver
    pub fn from_resolver(resolver: MemberResolver) -> Self {
        Self { resolver }
    }

    /// The underlying resolver
    pub fn resolver(&self) -> &MemberResolver {
        &self.resolver
    }

    /// The module identifier
    pub fn module_id(&self) -> &ModuleId {
        self.resolver.module_id()
    }

    /// Call the function exported as `name`
    pub async fn call_function(&self, name: &str, args: &[Value]) -> Result<Value> {
        let target = self.resolver.resolve_member(name).await?;
        self.call_target(name, &target, &Value::Undefined, args, false)
    }

    /// [`call_function`](Self::call_function) with an arity check
    pub async fn safe_call_function(&self, name: &str, args: &[Value]) -> Result<Value> {
        let target = self.resolver.resolve_member(name).await?;
        self.call_target(name, &target, &Value::Undefined, args, true)
    }

    /// Construct an instance of the class exported as `class_name`
    pub async fn instantiate(&self, class_name: &str, args: &[Value]) -> Result<Value> {
        let target = self.resolver.resolve_member(class_name).await?;
        self.construct_target(class_name, &target, args, false)
    }

    /// [`instantiate`](Self::instantiate) with an arity check
    pub async fn safe_instantiate(&self, class_name: &str, args: &[Value]) -> Result<Value> {
        let target = self.resolver.resolve_member(class_name).await?;
        self.construct_target(class_name, &target, args, true)
    }

    /// Call `object_name.method_name` with the object as receiver
    pub async fn call_method(
        &self,
        object_name: &str,
        method_name: &str,
        args: &[Value],
    ) -> Result<Value> {
        self.method(object_name, method_name, args, false).await
    }

    /// [`call_method`](Self::call_method) with an arity check
    pub async fn safe_call_method(
        &self,
        object_name: &str,
        method_name: &str,
        args: &[Value],
    ) -> Result<Value> {
        self.method(object_name, method_name, args, true).await
    }

    async fn method(
        &self,
        object_name: &str,
        method_name: &str,
        args: &[Value],
        checked: bool,
    ) -> Result<Value> {
        self.resolver.require_name(object_name)?;
        self.resolver.require_name(method_name)?;

        let receiver = self.resolver.resolve_member(object_name).await?;
        let path = format!("{}.{}", object_name, method_name);
        let target = receiver
            .get(method_name)
            .ok_or_else(|| ModuleError::PropertyNotFound {
                module: self.module_id().to_string(),
                path: path.clone(),
            })?;
        self.call_target(&path, &target, &receiver, args, checked)
    }

    fn call_target(
        &self,
        path: &str,
        target: &Value,
        this: &Value,
        args: &[Value],
        checked: bool,
    ) -> Result<Value> {
        if !is_callable(target) {
            return Err(self.not_a_function(path, target));
        }
        if checked {
            self.check_arity(path, target, args.len())?;
        }

        debug!(
            "Calling '{}' in module '{}' with {} argument(s)",
            path,
            self.module_id(),
            args.len()
        );
        match target {
            Value::Function(func) => func.call(this, args),
            Value::Class(class) => Err(ModuleError::thrown(format!(
                "TypeError: Class constructor {} cannot be invoked without 'new'",
                class.name()
            ))),
            _ => Err(self.not_a_function(path, target)),
        }
    }

    fn construct_target(
        &self,
        path: &str,
        target: &Value,
        args: &[Value],
        checked: bool,
    ) -> Result<Value> {
        let class = match target {
            Value::Class(class) if is_constructible(target) => class,
            _ => {
                return Err(ModuleError::NotAClass {
                    module: self.module_id().to_string(),
                    path: path.to_string(),
                    found: target.type_of(),
                });
            }
        };
        if checked {
            self.check_arity(path, target, args.len())?;
        }

        debug!(
            "Constructing '{}' in module '{}' with {} argument(s)",
            path,
            self.module_id(),
            args.len()
        );
        class.construct(args)
    }

    fn check_arity(&self, path: &str, target: &Value, actual: usize) -> Result<()> {
        match declared_arity(target) {
            Some(expected) if expected != actual => Err(ModuleError::ArityMismatch {
                module: self.module_id().to_string(),
                path: path.to_string(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }

    fn not_a_function(&self, path: &str, target: &Value) -> ModuleError {
        ModuleError::NotAFunction {
            module: self.module_id().to_string(),
            path: path.to_string(),
            found: target.type_of(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoxError, ErrorKind};
    use crate::function::{Class, Function};
    use crate::module::Exports;
    use crate::value::Object;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn invoker(side_effects: Arc<AtomicUsize>) -> Invoker {
        let loader = ModuleLoader::from_fn("geometry", move |_id| {
            let side_effects = Arc::clone(&side_effects);
            async move {
                let volume = Function::new("volume", &["w", "h", "d"], move |args| {
                    side_effects.fetch_add(1, Ordering::SeqCst);
                    let product = args.iter().filter_map(Value::as_number).product::<f64>();
                    Ok(Value::Number(product))
                });
                let counter = Object::new()
                    .with("start", 10)
                    .with(
                        "next",
                        Function::method("next", &["step"], |this, args| {
                            let start = this.get("start").and_then(|v| v.as_number()).unwrap_or(0.0);
                            let step = args.first().and_then(Value::as_number).unwrap_or(1.0);
                            Ok(Value::Number(start + step))
                        }),
                    )
                    .with("itself", Function::method("itself", &[], |this, _| Ok(this.clone())));
                let square = Class::new("Square", &["side"], |args| {
                    Ok(Object::new().with("side", args.first().cloned().unwrap_or_default()))
                });
                let explode = Function::new("explode", &[], |_| Err(ModuleError::thrown("kaboom")));

                Ok::<_, BoxError>(
                    Exports::new()
                        .with("volume", volume)
                        .with("counter", counter)
                        .with("Square", square)
                        .with("explode", explode)
                        .with("ratio", 2.5),
                )
            }
        })
        .unwrap();
        Invoker::new(Arc::new(loader))
    }

    #[tokio::test]
    async fn test_call_function() {
        let calls = Arc::new(AtomicUsize::new(0));
        let invoker = invoker(Arc::clone(&calls));

        let result = invoker
            .call_function("volume", &[2.into(), 3.into(), 4.into()])
            .await
            .unwrap();
        assert_eq!(result, Value::from(24));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_plain_call_skips_arity_check() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let result = invoker
            .call_function("volume", &[2.into(), 3.into()])
            .await
            .unwrap();
        assert_eq!(result, Value::from(6));
    }

    #[tokio::test]
    async fn test_arity_check_precedes_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let invoker = invoker(Arc::clone(&calls));

        let err = invoker
            .safe_call_function("volume", &[1.into(), 2.into()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::ArityMismatch { expected: 3, actual: 2, ref path, .. } if path == "volume"
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let ok = invoker
            .safe_call_function("volume", &[1.into(), 2.into(), 3.into()])
            .await
            .unwrap();
        assert_eq!(ok, Value::from(6));
    }

    #[tokio::test]
    async fn test_not_a_function() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let err = invoker.call_function("ratio", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            ModuleError::NotAFunction { found: "number", ref path, .. } if path == "ratio"
        ));
    }

    #[tokio::test]
    async fn test_calling_a_class_throws() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let err = invoker.call_function("Square", &[1.into()]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Thrown);
        assert!(err.to_string().contains("cannot be invoked without 'new'"));
    }

    #[tokio::test]
    async fn test_callee_errors_are_not_wrapped() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let err = invoker.call_function("explode", &[]).await.unwrap_err();
        assert!(matches!(err, ModuleError::Thrown(Value::String(ref s)) if s == "kaboom"));
    }

    #[tokio::test]
    async fn test_instantiate() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let square = invoker.instantiate("Square", &[5.into()]).await.unwrap();
        let obj = square.as_object().unwrap();
        assert_eq!(obj.class_name(), Some("Square"));
        assert_eq!(square.get("side"), Some(Value::from(5)));

        let err = invoker.instantiate("volume", &[]).await.unwrap_err();
        assert!(matches!(err, ModuleError::NotAClass { found: "function", .. }));

        let err = invoker.safe_instantiate("Square", &[]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArityMismatch);
    }

    #[tokio::test]
    async fn test_call_method_binds_receiver() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let next = invoker
            .call_method("counter", "next", &[5.into()])
            .await
            .unwrap();
        assert_eq!(next, Value::from(15));

        let err = invoker
            .safe_call_method("counter", "next", &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModuleError::ArityMismatch { ref path, .. } if path == "counter.next"
        ));
    }

    #[tokio::test]
    async fn test_call_method_receiver_is_the_exported_object() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let receiver = invoker.call_method("counter", "itself", &[]).await.unwrap();
        let counter = invoker.resolver().resolve_member("counter").await.unwrap();
        assert_eq!(receiver, counter);
        assert_eq!(invoker.resolver().loader().attempts(), 1);
    }

    #[tokio::test]
    async fn test_call_method_validates_names_before_loading() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let err = invoker.call_method("counter", "", &[]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemberNameRequired);
        let err = invoker.safe_call_method("", "next", &[]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemberNameRequired);
        assert_eq!(invoker.resolver().loader().attempts(), 0);
    }

    #[tokio::test]
    async fn test_call_method_errors() {
        let invoker = invoker(Arc::new(AtomicUsize::new(0)));

        let err = invoker.call_method("counter", "reset", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            ModuleError::PropertyNotFound { ref path, .. } if path == "counter.reset"
        ));

        let err = invoker.call_method("counter", "start", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            ModuleError::NotAFunction { ref path, .. } if path == "counter.start"
        ));

        let err = invoker.call_method("nothing", "next", &[]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemberNotFound);

        let err = invoker.call_method("counter", "", &[]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemberNameRequired);
    }
}
