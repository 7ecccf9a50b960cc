//! Locale-aware string comparison.
//!
//! Column sorts compare with an ICU collator rather than by code point, so
//! "Álvaro" lands next to "Alvaro" instead of after "Zoe".

use crate::{error::Result, Error};
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;
use std::cmp::Ordering;
use std::fmt;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "es";

/// A collator bound to one locale.
pub struct Collation {
    locale: Locale,
    collator: Collator,
}

impl Collation {
    /// Build a collator for a BCP-47 locale tag such as `es` or `en-US`.
    pub fn new(tag: &str) -> Result<Self> {
        let locale: Locale = tag
            .parse()
            .map_err(|e| Error::InvalidLocale(format!("{tag}: {e:?}")))?;

        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);

        let collator = Collator::try_new(&(&locale).into(), options)
            .map_err(|e| Error::Collation(format!("{e:?}")))?;

        Ok(Self { locale, collator })
    }

    /// The locale this collator was built for.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Compare two strings under the locale's collation rules.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("locale", &self.locale.to_string())
            .finish_non_exhaustive()
    }
}
