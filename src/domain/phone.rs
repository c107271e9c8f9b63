//! PhoneNumber value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static ID_ID_MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\+?62|0)8(1[123456789]|2[1238]|3[1238]|5[12356789]|7[78]|9[56789]|8[123456789])([\s?|\d]{5,11})$",
    )
    .unwrap()
});

static EN_US_MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((\+1|1)?( |-)?)?(\([2-9][0-9]{2}\)|[2-9][0-9]{2})( |-)?([2-9][0-9]{2}( |-)?[0-9]{4})$",
    )
    .unwrap()
});

static EN_GB_MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+?44|0)7\d{9}$").unwrap());

/// Locale whose mobile numbering plan phone numbers are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MobileLocale {
    /// Indonesia: `08xx` or `+628xx` prefixes.
    #[default]
    IdId,
    /// United States.
    EnUs,
    /// United Kingdom: `07` or `+447` prefixes.
    EnGb,
}

impl MobileLocale {
    /// The locale tag, e.g. `id-ID`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::IdId => "id-ID",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::IdId => &ID_ID_MOBILE,
            Self::EnUs => &EN_US_MOBILE,
            Self::EnGb => &EN_GB_MOBILE,
        }
    }
}

impl FromStr for MobileLocale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id-ID" => Ok(Self::IdId),
            "en-US" => Ok(Self::EnUs),
            "en-GB" => Ok(Self::EnGb),
            other => Err(ValidationError::UnsupportedLocale(other.to_string())),
        }
    }
}

impl fmt::Display for MobileLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A phone number known to be a mobile number in some locale.
///
/// The text is kept as entered; no normalization is applied.
///
/// # Example
///
/// ```
/// use contact_app::domain::{MobileLocale, PhoneNumber};
///
/// let phone = PhoneNumber::mobile("081234567890", MobileLocale::IdId).unwrap();
/// assert_eq!(phone.as_str(), "081234567890");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate `phone` against the mobile numbering plan of `locale`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the number does not match.
    pub fn mobile(phone: impl Into<String>, locale: MobileLocale) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if !locale.pattern().is_match(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
