use std::hash::{Hash, Hasher};

use readium_css::layout::primary_subtag;
use readium_css::Metadata;

/// Speech rates offered by the settings dialog.
pub const AVAILABLE_RATES: [f64; 7] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// A speakable locale, identified by its BCP 47 tag.
///
/// Equality and hashing only consider the tag.
#[derive(Clone, Debug)]
pub struct Locale {
    pub tag: String,
    /// Name shown to the user; resolved by the host.
    pub display_name: String,
}

impl Locale {
    pub fn new(tag: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            display_name: display_name.into(),
        }
    }

    /// Primary language subtag (`pt` for `pt-BR`).
    pub fn language(&self) -> &str {
        primary_subtag(&self.tag)
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for Locale {}

impl Hash for Locale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

/// Speech engine configuration edited by the panel.
#[derive(Clone, Debug, PartialEq)]
pub struct TtsConfig {
    /// Speech rate multiplier, `1.0` being normal speed.
    pub rate: f64,
    /// Locale used when the content does not declare one.
    pub default_locale: Option<Locale>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            default_locale: None,
        }
    }
}

impl TtsConfig {
    /// Configuration defaulting to the publication's language, when it
    /// declares exactly one.
    pub fn for_publication(metadata: &Metadata) -> Self {
        let default_locale = match metadata.languages.as_slice() {
            [tag] => Some(Locale::new(tag.as_str(), tag.as_str())),
            _ => None,
        };
        Self {
            default_locale,
            ..Self::default()
        }
    }

    pub fn with_rate(&self, rate: f64) -> Self {
        Self {
            rate,
            ..self.clone()
        }
    }

    pub fn with_default_locale(&self, locale: Locale) -> Self {
        Self {
            default_locale: Some(locale),
            ..self.clone()
        }
    }
}

/// Title of a rate entry: `x` followed by at most two decimals, trailing
/// zeros dropped (`x1`, `x0.25`, `x1.5`).
pub fn format_rate(rate: f64) -> String {
    let hundredths = (rate * 100.0).round() as i64;
    let whole = hundredths / 100;
    let frac = (hundredths % 100).abs();
    let sign = if hundredths < 0 && whole == 0 { "-" } else { "" };
    match frac {
        0 => format!("x{}{}", sign, whole),
        f if f % 10 == 0 => format!("x{}{}.{}", sign, whole, f / 10),
        f => format!("x{}{}.{:02}", sign, whole, f),
    }
}
