// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! End-to-end use of a lazily loaded `mathutils` module.

use futures::future::join_all;
use lazymod::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn mathutils() -> (Arc<ModuleLoader>, Arc<AtomicUsize>) {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);

    let loader = ModuleLoader::from_fn("mathutils", move |_id| {
        counter.fetch_add(1, Ordering::SeqCst);
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, BoxError>(exports! {
                "add" => function!(add(a, b) => {
                    let a = a.as_number().unwrap_or(f64::NAN);
                    let b = b.as_number().unwrap_or(f64::NAN);
                    Ok(Value::Number(a + b))
                }),
                "Vector" => class!(Vector(x) => Ok(object! { "x" => x })),
            })
        }
    })
    .unwrap();
    (Arc::new(loader), loads)
}

#[tokio::test]
async fn test_call_and_instantiate() {
    let (loader, loads) = mathutils();
    let invoker = Invoker::new(Arc::clone(&loader));
    assert_eq!(loader.state(), LoadState::NotStarted);

    let sum = invoker
        .call_function("add", &[2.into(), 3.into()])
        .await
        .unwrap();
    assert_eq!(sum, Value::from(5));

    let vector = invoker.instantiate("Vector", &[7.into()]).await.unwrap();
    assert_eq!(vector.get("x"), Some(Value::from(7)));
    assert_eq!(vector.as_object().and_then(|o| o.class_name()), Some("Vector"));

    assert_eq!(loader.state(), LoadState::Loaded);
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_lookup_failures() {
    let (loader, _) = mathutils();
    let invoker = Invoker::new(loader);

    let err = invoker.call_function("missing", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        ModuleError::MemberNotFound { ref module, ref member } if module == "mathutils" && member == "missing"
    ));
    assert_eq!(
        err.to_string(),
        "Member 'missing' not found in module 'mathutils'"
    );

    assert_module_error!(invoker.instantiate("add", &[]).await, NotAClass);
    assert_module_error!(invoker.safe_call_function("add", &[1.into()]).await, ArityMismatch);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_first_use_loads_once() {
    let (loader, loads) = mathutils();
    let invoker = Invoker::new(loader);

    let calls = (0..8i32).map(|i| {
        let invoker = invoker.clone();
        async move { invoker.call_function("add", &[i.into(), 1.into()]).await }
    });
    let results = join_all(calls).await;

    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap(), Value::from(i as i32 + 1));
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}
