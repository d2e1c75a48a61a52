//! Shared helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use icumsg::BasicIntl;
use icumsg::IntlProvider;
use icumsg::intl::{
    DateTimeFormat, DateTimeFormatOptions, NumberFormat, NumberFormatOptions, PluralRulesOptions,
    PluralSelector,
};

/// Delegates to [`BasicIntl`] and counts every formatter it constructs.
pub struct CountingIntl {
    constructed: Arc<AtomicUsize>,
}

impl CountingIntl {
    pub fn new(constructed: Arc<AtomicUsize>) -> Self {
        CountingIntl { constructed }
    }

    fn count(&self) {
        self.constructed.fetch_add(1, Ordering::SeqCst);
    }
}

impl IntlProvider for CountingIntl {
    fn number_format(&self, locale: &str, options: &NumberFormatOptions) -> Arc<dyn NumberFormat> {
        self.count();
        BasicIntl.number_format(locale, options)
    }

    fn date_time_format(
        &self,
        locale: &str,
        options: &DateTimeFormatOptions,
    ) -> Arc<dyn DateTimeFormat> {
        self.count();
        BasicIntl.date_time_format(locale, options)
    }

    fn plural_rules(
        &self,
        locale: &str,
        options: &PluralRulesOptions,
    ) -> Option<Arc<dyn PluralSelector>> {
        self.count();
        BasicIntl.plural_rules(locale, options)
    }
}
