//! Reading progression and Readium CSS layout selection.
//!
//! Readium CSS ships one stylesheet set per layout family. The family is
//! picked from the publication languages and its reading progression:
//!
//! ```rust
//! use readium_css::layout::{ReadingProgression, ReadiumCssLayout};
//!
//! let layout = ReadiumCssLayout::from_languages(&["ja"], ReadingProgression::Rtl);
//! assert_eq!(layout, ReadiumCssLayout::CjkVertical);
//! assert_eq!(layout.readium_css_path(), "cjk-vertical/");
//! ```

extern crate alloc;

use core::fmt;
use core::str::FromStr;

use crate::error::ReadiumError;
use crate::metadata::Metadata;

/// Direction in which the publication content advances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReadingProgression {
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
    /// Top to bottom.
    Ttb,
    /// Bottom to top.
    Btt,
    /// Left to the reading system.
    #[default]
    Auto,
}

impl ReadingProgression {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
            Self::Ttb => "ttb",
            Self::Btt => "btt",
            Self::Auto => "auto",
        }
    }

    /// Whether the content advances right to left or bottom to top.
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Rtl | Self::Btt)
    }
}

impl fmt::Display for ReadingProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingProgression {
    type Err = ReadiumError;

    /// Parses Readium keywords and the EPUB `page-progression-direction`
    /// values (where `default` means [`ReadingProgression::Auto`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("ltr") {
            Ok(Self::Ltr)
        } else if value.eq_ignore_ascii_case("rtl") {
            Ok(Self::Rtl)
        } else if value.eq_ignore_ascii_case("ttb") {
            Ok(Self::Ttb)
        } else if value.eq_ignore_ascii_case("btt") {
            Ok(Self::Btt)
        } else if value.eq_ignore_ascii_case("auto") || value.eq_ignore_ascii_case("default") {
            Ok(Self::Auto)
        } else {
            Err(ReadiumError::Parse(alloc::format!(
                "unknown reading progression '{}'",
                s
            )))
        }
    }
}

/// Languages whose scripts get the CJK stylesheets.
const CJK_LANGUAGES: [&str; 3] = ["zh", "ja", "ko"];

/// Primary language subtag of a BCP 47 tag (the region and script are dropped).
pub fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Readium CSS stylesheet family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReadiumCssLayout {
    /// Right to left.
    Rtl,
    /// Left to right.
    #[default]
    Ltr,
    /// Asian language, laid out vertically.
    CjkVertical,
    /// Asian language, laid out horizontally.
    CjkHorizontal,
}

impl ReadiumCssLayout {
    pub const ALL: [ReadiumCssLayout; 4] = [
        Self::Rtl,
        Self::Ltr,
        Self::CjkVertical,
        Self::CjkHorizontal,
    ];

    pub const fn css_id(self) -> &'static str {
        match self {
            Self::Rtl => "rtl",
            Self::Ltr => "ltr",
            Self::CjkVertical => "cjk-vertical",
            Self::CjkHorizontal => "cjk-horizontal",
        }
    }

    /// Sub-directory of the Readium CSS assets holding this layout's
    /// stylesheets. The LTR set lives at the root.
    pub const fn readium_css_path(self) -> &'static str {
        match self {
            Self::Ltr => "",
            Self::Rtl => "rtl/",
            Self::CjkVertical => "cjk-vertical/",
            Self::CjkHorizontal => "cjk-horizontal/",
        }
    }

    /// Value for the root element `dir` attribute, when one is needed.
    pub const fn dir_attribute(self) -> Option<&'static str> {
        match self {
            Self::Rtl => Some("rtl"),
            _ => None,
        }
    }

    /// Determine the layout for BCP 47 `languages` and `progression`.
    ///
    /// A publication only counts as CJK when it declares exactly one
    /// language whose primary subtag is `zh`, `ja` or `ko`. The subtag is
    /// compared ASCII case-insensitively, so `JA` counts as CJK too.
    /// Defaults to [`ReadiumCssLayout::Ltr`].
    pub fn from_languages<S: AsRef<str>>(languages: &[S], progression: ReadingProgression) -> Self {
        let is_cjk = match languages {
            [language] => {
                let primary = primary_subtag(language.as_ref());
                CJK_LANGUAGES
                    .iter()
                    .any(|cjk| primary.eq_ignore_ascii_case(cjk))
            }
            _ => false,
        };

        let layout = match (progression.is_reversed(), is_cjk) {
            (true, true) => Self::CjkVertical,
            (true, false) => Self::Rtl,
            (false, true) => Self::CjkHorizontal,
            (false, false) => Self::Ltr,
        };
        log::debug!(
            "Readium CSS layout {} for {} language(s), progression {}",
            layout,
            languages.len(),
            progression
        );
        layout
    }

    /// Determine the layout from publication metadata, using its effective
    /// reading progression.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self::from_languages(
            metadata.languages.as_slice(),
            metadata.effective_reading_progression(),
        )
    }
}

impl fmt::Display for ReadiumCssLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_id())
    }
}

impl FromStr for ReadiumCssLayout {
    type Err = ReadiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|layout| layout.css_id() == s)
            .ok_or_else(|| ReadiumError::Parse(alloc::format!("unknown Readium CSS layout '{}'", s)))
    }
}
