use std::sync::Arc;

use crate::intl::datetime::BasicDateTimeFormat;
use crate::intl::number::BasicNumberFormat;
use crate::intl::options::{DateTimeFormatOptions, NumberFormatOptions, PluralRulesOptions};
use crate::intl::plural::IcuPluralSelector;
use crate::intl::provider::{
    DateTimeFormat, IntlProvider, NumberFormat, PluralSelector,
};

/// The built-in provider.
///
/// Plural rules come from ICU4X CLDR data for any locale. Number and
/// date/time formatting use fixed English conventions regardless of locale;
/// hosts that need localized digits or month names supply their own
/// [`IntlProvider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicIntl;

impl IntlProvider for BasicIntl {
    fn number_format(&self, _locale: &str, options: &NumberFormatOptions) -> Arc<dyn NumberFormat> {
        Arc::new(BasicNumberFormat::new(options.clone()))
    }

    fn date_time_format(
        &self,
        _locale: &str,
        options: &DateTimeFormatOptions,
    ) -> Arc<dyn DateTimeFormat> {
        Arc::new(BasicDateTimeFormat::new(options.clone()))
    }

    fn plural_rules(
        &self,
        locale: &str,
        options: &PluralRulesOptions,
    ) -> Option<Arc<dyn PluralSelector>> {
        let selector = IcuPluralSelector::try_new(locale, options.kind)?;
        Some(Arc::new(selector))
    }
}
