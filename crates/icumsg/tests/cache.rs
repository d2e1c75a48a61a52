//! Tests for formatter memoization.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use icumsg::intl::{NumberFormatOptions, NumberStyleKind, PluralRulesOptions};
use icumsg::{FormatOptions, FormatterCache, MessageFormat, PluralKind, values};

mod common;

use common::CountingIntl;

fn counting_cache(capacity: Option<usize>) -> (Arc<FormatterCache>, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let provider = Arc::new(CountingIntl::new(Arc::clone(&counter)));
    let cache = match capacity {
        Some(capacity) => FormatterCache::bounded(provider, capacity),
        None => FormatterCache::with_provider(provider),
    };
    (Arc::new(cache), counter)
}

// =========================================================================
// Direct cache access
// =========================================================================

#[test]
fn equal_arguments_construct_once() {
    let (cache, counter) = counting_cache(None);
    let options = NumberFormatOptions::default();
    let first = cache.number_format("en", &options);
    let second = cache.number_format("en", &options);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn different_locales_or_options_construct_separately() {
    let (cache, counter) = counting_cache(None);
    let percent = NumberFormatOptions {
        style: Some(NumberStyleKind::Percent),
        ..NumberFormatOptions::default()
    };
    cache.number_format("en", &NumberFormatOptions::default());
    cache.number_format("fr", &NumberFormatOptions::default());
    cache.number_format("en", &percent);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[test]
fn plural_rules_are_cached_per_kind() {
    let (cache, counter) = counting_cache(None);
    let cardinal = PluralRulesOptions {
        kind: PluralKind::Cardinal,
    };
    let ordinal = PluralRulesOptions {
        kind: PluralKind::Ordinal,
    };
    assert!(cache.plural_rules("en", &cardinal).is_some());
    assert!(cache.plural_rules("en", &cardinal).is_some());
    assert!(cache.plural_rules("en", &ordinal).is_some());
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn bounded_cache_rebuilds_evicted_entries() {
    let (cache, counter) = counting_cache(Some(1));
    let options = NumberFormatOptions::default();
    cache.number_format("en", &options);
    cache.number_format("de", &options);
    cache.number_format("en", &options);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

// =========================================================================
// Through MessageFormat
// =========================================================================

#[test]
fn repeated_formatting_reuses_formatters() {
    let (cache, counter) = counting_cache(None);
    let options = FormatOptions::builder().cache(cache).build();
    let message = MessageFormat::with_options(
        "{n, plural, one{# item} other{# items}} on {d, date, short}",
        "en",
        &options,
    )
    .unwrap();
    for n in 0..10 {
        message.format(&values! { "n" => n, "d" => 0 }).unwrap();
    }
    // pound number format, plural rules, date format
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[test]
fn clones_share_the_cache() {
    let (cache, counter) = counting_cache(None);
    let options = FormatOptions::builder().cache(cache).build();
    let message = MessageFormat::with_options("{n, number}", "en", &options).unwrap();
    let copy = message.clone();
    message.format(&values! { "n" => 1 }).unwrap();
    copy.format(&values! { "n" => 2 }).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(message.cache(), copy.cache()));
}
