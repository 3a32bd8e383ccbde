//! Provider results are cached per provider, or per test method for
//! method-aware providers. Same-named providers and inline rows never share
//! cached data.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dataprovider::{
    DataProvider, Expander, ParamType, ProviderData, ProviderOptions, TestMethod,
    cache_miss_count, cached_provider_count, clear_provider_cache, reset_cache_miss_count,
};
use rstest::{fixture, rstest};
use serial_test::serial;

#[fixture]
fn counted() -> Arc<AtomicUsize> {
    clear_provider_cache();
    reset_cache_miss_count();
    Arc::new(AtomicUsize::new(0))
}

fn method(name: &str) -> TestMethod {
    TestMethod::new("cache", name).param("n", ParamType::of::<i32>())
}

fn options() -> ProviderOptions {
    ProviderOptions::default().format("%m[%i]")
}

#[rstest]
#[serial]
fn cached_providers_run_once(counted: Arc<AtomicUsize>) {
    let calls = Arc::clone(&counted);
    let provider = DataProvider::new("shared", move || {
        calls.fetch_add(1, Ordering::SeqCst);
        ProviderData::array([1, 2, 3])
    })
    .with_options(options());
    let expander = Expander::new();
    for name in ["first", "second", "third"] {
        let Ok(expansion) = expander.expand(&method(name), &provider) else {
            panic!("`{name}` expands");
        };
        assert_eq!(expansion.len(), 3);
    }
    assert_eq!(counted.load(Ordering::SeqCst), 1);
    assert_eq!(cache_miss_count(), 1);
    assert_eq!(cached_provider_count(), 1);
}

#[rstest]
#[serial]
fn uncached_providers_run_every_time(counted: Arc<AtomicUsize>) {
    let calls = Arc::clone(&counted);
    let provider = DataProvider::new("fresh", move || {
        calls.fetch_add(1, Ordering::SeqCst);
        ProviderData::array([1])
    })
    .with_options(options().cache(false));
    for _ in 0..2 {
        assert!(Expander::new().expand(&method("fresh"), &provider).is_ok());
    }
    assert_eq!(counted.load(Ordering::SeqCst), 2);
    assert_eq!(cached_provider_count(), 0);
}

#[rstest]
#[serial]
fn method_aware_providers_cache_per_method(counted: Arc<AtomicUsize>) {
    let calls = Arc::clone(&counted);
    let provider = DataProvider::for_method("per-method", move |method: &TestMethod| {
        calls.fetch_add(1, Ordering::SeqCst);
        let size = i32::try_from(method.name().len()).unwrap_or(i32::MAX);
        ProviderData::array([size])
    })
    .with_options(options());
    let expander = Expander::new();
    for name in ["a", "bb", "a"] {
        let Ok(expansion) = expander.expand(&method(name), &provider) else {
            panic!("`{name}` expands");
        };
        let Some(invocation) = expansion.invocations().first() else {
            panic!("one invocation");
        };
        assert_eq!(
            invocation.arg::<i32>(0).ok().and_then(|n| usize::try_from(n).ok()),
            Some(name.len())
        );
    }
    assert_eq!(counted.load(Ordering::SeqCst), 2);
    assert_eq!(cached_provider_count(), 2);
}

#[rstest]
#[serial]
fn clearing_the_cache_reloads(counted: Arc<AtomicUsize>) {
    let calls = Arc::clone(&counted);
    let provider = DataProvider::new("reloaded", move || {
        calls.fetch_add(1, Ordering::SeqCst);
        ProviderData::array([1])
    })
    .with_options(options());
    assert!(Expander::new().expand(&method("reload"), &provider).is_ok());
    clear_provider_cache();
    assert!(Expander::new().expand(&method("reload"), &provider).is_ok());
    assert_eq!(counted.load(Ordering::SeqCst), 2);
}

#[rstest]
#[serial]
fn same_named_providers_keep_their_own_data(counted: Arc<AtomicUsize>) {
    let first_calls = Arc::clone(&counted);
    let first = DataProvider::new("data", move || {
        first_calls.fetch_add(1, Ordering::SeqCst);
        ProviderData::array([1, 2])
    })
    .with_options(options());
    let second_calls = Arc::clone(&counted);
    let second = DataProvider::new("data", move || {
        second_calls.fetch_add(1, Ordering::SeqCst);
        ProviderData::array([7, 8, 9])
    })
    .with_options(options());
    let expander = Expander::new();
    let (Ok(small), Ok(large)) = (
        expander.expand(&method("small"), &first),
        expander.expand(&method("large"), &second),
    ) else {
        panic!("both providers expand");
    };
    assert_eq!(small.len(), 2);
    assert_eq!(large.len(), 3);
    assert_eq!(counted.load(Ordering::SeqCst), 2);
    assert_eq!(cached_provider_count(), 2);

    let Ok(again) = expander.expand(&method("again"), &first.clone()) else {
        panic!("a clone expands");
    };
    assert_eq!(again.len(), 2);
    assert_eq!(counted.load(Ordering::SeqCst), 2);
}

#[rstest]
#[serial]
fn same_named_inline_providers_convert_independently() {
    clear_provider_cache();
    let words = TestMethod::new("mod_a::tests", "words").param("w", ParamType::of::<String>());
    let numbers =
        TestMethod::new("mod_b::tests", "numbers").param("n", ParamType::of::<i32>());
    let expander = Expander::new();

    let Ok(first) = expander.expand(
        &words,
        &DataProvider::inline("values", ["alpha", "beta"]).with_options(options()),
    ) else {
        panic!("words expand");
    };
    let Ok(second) = expander.expand(
        &numbers,
        &DataProvider::inline("values", ["1", "2", "3"]).with_options(options()),
    ) else {
        panic!("numbers expand");
    };

    assert_eq!(first.len(), 2);
    let parsed: Vec<_> = second
        .invocations()
        .iter()
        .map(|invocation| invocation.arg::<i32>(0).ok())
        .collect();
    assert_eq!(parsed, [Some(1), Some(2), Some(3)]);
    assert_eq!(cached_provider_count(), 0);
}
