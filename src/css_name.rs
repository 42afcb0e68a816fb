//! Readium CSS user custom property names.
//!
//! Readium CSS exposes reading preferences as `--USER__*` custom properties
//! set on the root element of each rendered document. The same names double
//! as the storage keys for persisted user settings.

extern crate alloc;

use core::fmt;
use core::str::FromStr;

use crate::error::ReadiumError;

/// Prefix shared by every user custom property.
pub const USER_PREFIX: &str = "--USER__";

pub const FONT_SIZE_REF: &str = "fontSize";
pub const FONT_FAMILY_REF: &str = "fontFamily";
pub const FONT_OVERRIDE_REF: &str = "fontOverride";
pub const APPEARANCE_REF: &str = "appearance";
pub const SCROLL_REF: &str = "scroll";
pub const PUBLISHER_DEFAULT_REF: &str = "advancedSettings";
pub const TEXT_ALIGNMENT_REF: &str = "textAlign";
pub const COLUMN_COUNT_REF: &str = "colCount";
pub const WORD_SPACING_REF: &str = "wordSpacing";
pub const LETTER_SPACING_REF: &str = "letterSpacing";
pub const PAGE_MARGINS_REF: &str = "pageMargins";
pub const LINE_HEIGHT_REF: &str = "lineHeight";

pub const FONT_SIZE_NAME: &str = "--USER__fontSize";
pub const FONT_FAMILY_NAME: &str = "--USER__fontFamily";
pub const FONT_OVERRIDE_NAME: &str = "--USER__fontOverride";
pub const APPEARANCE_NAME: &str = "--USER__appearance";
pub const SCROLL_NAME: &str = "--USER__scroll";
pub const PUBLISHER_DEFAULT_NAME: &str = "--USER__advancedSettings";
pub const TEXT_ALIGNMENT_NAME: &str = "--USER__textAlign";
pub const COLUMN_COUNT_NAME: &str = "--USER__colCount";
pub const WORD_SPACING_NAME: &str = "--USER__wordSpacing";
pub const LETTER_SPACING_NAME: &str = "--USER__letterSpacing";
pub const PAGE_MARGINS_NAME: &str = "--USER__pageMargins";
pub const LINE_HEIGHT_NAME: &str = "--USER__lineHeight";

/// A Readium CSS user custom property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReadiumCssName {
    FontSize,
    FontFamily,
    FontOverride,
    Appearance,
    Scroll,
    PublisherDefault,
    TextAlignment,
    ColumnCount,
    WordSpacing,
    LetterSpacing,
    PageMargins,
    LineHeight,
    ParaIndent,
    Hyphens,
    Ligatures,
}

impl ReadiumCssName {
    /// Every property, in declaration order.
    pub const ALL: [ReadiumCssName; 15] = [
        Self::FontSize,
        Self::FontFamily,
        Self::FontOverride,
        Self::Appearance,
        Self::Scroll,
        Self::PublisherDefault,
        Self::TextAlignment,
        Self::ColumnCount,
        Self::WordSpacing,
        Self::LetterSpacing,
        Self::PageMargins,
        Self::LineHeight,
        Self::ParaIndent,
        Self::Hyphens,
        Self::Ligatures,
    ];

    /// Full custom property name, e.g. `--USER__fontSize`.
    pub const fn css_ref(self) -> &'static str {
        match self {
            Self::FontSize => FONT_SIZE_NAME,
            Self::FontFamily => FONT_FAMILY_NAME,
            Self::FontOverride => FONT_OVERRIDE_NAME,
            Self::Appearance => APPEARANCE_NAME,
            Self::Scroll => SCROLL_NAME,
            Self::PublisherDefault => PUBLISHER_DEFAULT_NAME,
            Self::TextAlignment => TEXT_ALIGNMENT_NAME,
            Self::ColumnCount => COLUMN_COUNT_NAME,
            Self::WordSpacing => WORD_SPACING_NAME,
            Self::LetterSpacing => LETTER_SPACING_NAME,
            Self::PageMargins => PAGE_MARGINS_NAME,
            Self::LineHeight => LINE_HEIGHT_NAME,
            Self::ParaIndent => "--USER__paraIndent",
            Self::Hyphens => "--USER__bodyHyphens",
            Self::Ligatures => "--USER__ligatures",
        }
    }

    /// Stable variant name (`fontSize`, `publisherDefault`, ...).
    ///
    /// Differs from the property suffix for a few entries: `publisherDefault`
    /// maps to `--USER__advancedSettings` and `hyphens` to
    /// `--USER__bodyHyphens`.
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::FontSize => "fontSize",
            Self::FontFamily => "fontFamily",
            Self::FontOverride => "fontOverride",
            Self::Appearance => "appearance",
            Self::Scroll => "scroll",
            Self::PublisherDefault => "publisherDefault",
            Self::TextAlignment => "textAlignment",
            Self::ColumnCount => "columnCount",
            Self::WordSpacing => "wordSpacing",
            Self::LetterSpacing => "letterSpacing",
            Self::PageMargins => "pageMargins",
            Self::LineHeight => "lineHeight",
            Self::ParaIndent => "paraIndent",
            Self::Hyphens => "hyphens",
            Self::Ligatures => "ligatures",
        }
    }

    /// Look up a property by its variant name.
    pub fn from_variant_name(name: &str) -> Result<Self, ReadiumError> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.variant_name() == name)
            .ok_or_else(|| {
                ReadiumError::Parse(alloc::format!("unknown Readium CSS name '{}'", name))
            })
    }

    /// Look up a property by its full custom property name.
    pub fn from_css_ref(css_ref: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.css_ref() == css_ref)
    }
}

impl fmt::Display for ReadiumCssName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_ref())
    }
}

impl FromStr for ReadiumCssName {
    type Err = ReadiumError;

    /// Accepts either the variant name or the full `--USER__` property name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with(USER_PREFIX) {
            return Self::from_css_ref(s).ok_or_else(|| {
                ReadiumError::Parse(alloc::format!("unknown Readium CSS property '{}'", s))
            });
        }
        Self::from_variant_name(s)
    }
}
