//! User reading preferences expressed as Readium CSS user properties.
//!
//! [`UserSettings`] holds typed values for every adjustable preference,
//! turns them into `--USER__*` declarations for injection, and persists
//! them through a [`PreferenceStore`] keyed by property name.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::css_name::ReadiumCssName;
use crate::error::ReadiumError;

pub const FONT_FAMILY_VALUES: [&str; 8] = [
    "Original",
    "PT Serif",
    "Roboto",
    "Source Sans Pro",
    "Vollkorn",
    "OpenDyslexic",
    "AccessibleDfA",
    "IA Writer Duospace",
];
pub const APPEARANCE_VALUES: [&str; 3] =
    ["readium-default-on", "readium-sepia-on", "readium-night-on"];
pub const TEXT_ALIGNMENT_VALUES: [&str; 2] = ["justify", "start"];
pub const COLUMN_COUNT_VALUES: [&str; 3] = ["auto", "1", "2"];

/// Bounds and step of a numeric preference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IncrementalRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// CSS unit appended to the value.
    pub suffix: &'static str,
}

impl IncrementalRange {
    const fn new(min: f32, max: f32, step: f32, suffix: &'static str) -> Self {
        Self {
            min,
            max,
            step,
            suffix,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const FONT_SIZE_RANGE: IncrementalRange = IncrementalRange::new(100.0, 300.0, 25.0, "%");
pub const WORD_SPACING_RANGE: IncrementalRange = IncrementalRange::new(0.0, 0.5, 0.25, "rem");
pub const LETTER_SPACING_RANGE: IncrementalRange = IncrementalRange::new(0.0, 0.5, 0.0625, "em");
pub const PAGE_MARGINS_RANGE: IncrementalRange = IncrementalRange::new(0.5, 4.0, 0.25, "");
pub const LINE_HEIGHT_RANGE: IncrementalRange = IncrementalRange::new(1.0, 2.0, 0.25, "");

/// Value model of a single user property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Two-state flag rendered as one of two keywords.
    Switchable {
        on: &'static str,
        off: &'static str,
        enabled: bool,
    },
    /// Number moved by fixed steps within a range.
    Incremental { value: f32, range: IncrementalRange },
    /// Index into a fixed list of keywords.
    Enumerable {
        index: usize,
        values: &'static [&'static str],
    },
}

/// A named user property and its current value.
#[derive(Clone, Debug, PartialEq)]
pub struct UserProperty {
    pub name: ReadiumCssName,
    pub value: PropertyValue,
}

impl UserProperty {
    /// CSS value of this property.
    pub fn css_value(&self) -> String {
        match &self.value {
            PropertyValue::Switchable { on, off, enabled } => {
                let keyword = if *enabled { on } else { off };
                keyword.to_string()
            }
            PropertyValue::Incremental { value, range } => {
                let mut out = format_decimal(*value);
                out.push_str(range.suffix);
                out
            }
            PropertyValue::Enumerable { index, values } => {
                let Some(last) = values.len().checked_sub(1) else {
                    return String::new();
                };
                if *index > last {
                    log::warn!(
                        "{} index {} out of range, clamping to {}",
                        self.name,
                        index,
                        last
                    );
                }
                values[(*index).min(last)].to_string()
            }
        }
    }

    /// `name: value;` declaration.
    pub fn declaration(&self) -> String {
        let value = self.css_value();
        let value = match (&self.value, value.contains(' ')) {
            (PropertyValue::Enumerable { .. }, true) => format!("\"{}\"", value),
            _ => value,
        };
        format!("{}: {};", self.name.css_ref(), value)
    }

    /// Step an incremental value up. Returns whether it changed.
    pub fn increment(&mut self) -> bool {
        self.step_by(1.0)
    }

    /// Step an incremental value down. Returns whether it changed.
    pub fn decrement(&mut self) -> bool {
        self.step_by(-1.0)
    }

    fn step_by(&mut self, direction: f32) -> bool {
        let PropertyValue::Incremental { value, range } = &mut self.value else {
            return false;
        };
        let next = range.clamp(*value + direction * range.step);
        let changed = (next - *value).abs() > f32::EPSILON;
        *value = next;
        changed
    }
}

/// Format a number with at most four decimals and no trailing zeros.
fn format_decimal(value: f32) -> String {
    let mut out = format!("{:.4}", value);
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    if out == "-0" {
        out.remove(0);
    }
    out
}

/// Key/value persistence for user settings.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory [`PreferenceStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Typed user reading preferences.
#[derive(Clone, Debug, PartialEq)]
pub struct UserSettings {
    /// Font size in percent.
    pub font_size: f32,
    /// Index into [`FONT_FAMILY_VALUES`].
    pub font_family: usize,
    pub font_override: bool,
    /// Index into [`APPEARANCE_VALUES`].
    pub appearance: usize,
    pub scroll: bool,
    /// Keep the publisher's typography (disables advanced settings).
    pub publisher_default: bool,
    /// Index into [`TEXT_ALIGNMENT_VALUES`].
    pub text_alignment: usize,
    /// Index into [`COLUMN_COUNT_VALUES`].
    pub column_count: usize,
    /// Word spacing in rem.
    pub word_spacing: f32,
    /// Letter spacing in em.
    pub letter_spacing: f32,
    pub page_margins: f32,
    pub line_height: f32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            font_size: 100.0,
            font_family: 0,
            font_override: false,
            appearance: 0,
            scroll: false,
            publisher_default: true,
            text_alignment: 0,
            column_count: 0,
            word_spacing: 0.0,
            letter_spacing: 0.0,
            page_margins: 1.0,
            line_height: 1.0,
        }
    }
}

impl UserSettings {
    /// Settings loaded from `store`, falling back to defaults per entry.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let mut settings = Self::default();
        for name in ReadiumCssName::ALL {
            let Some(raw) = store.get(name.css_ref()) else {
                continue;
            };
            if let Err(err) = settings.apply_stored(name, &raw) {
                log::warn!("Ignoring stored setting: {}", err);
            }
        }
        settings
    }

    /// Persist every setting into `store`.
    pub fn save(&self, store: &mut dyn PreferenceStore) {
        for property in self.properties() {
            let raw = match property.value {
                PropertyValue::Switchable { .. } if property.name == ReadiumCssName::FontOverride => {
                    self.font_override.to_string()
                }
                PropertyValue::Switchable { enabled, .. } => enabled.to_string(),
                PropertyValue::Incremental { value, .. } => format_decimal(value),
                PropertyValue::Enumerable { index, .. } => index.to_string(),
            };
            store.set(property.name.css_ref(), raw);
        }
    }

    /// Apply one stored raw value.
    pub fn apply_stored(&mut self, name: ReadiumCssName, raw: &str) -> Result<(), ReadiumError> {
        let raw = raw.trim();
        let invalid = || {
            ReadiumError::Settings(format!("invalid value '{}' for {}", raw, name.css_ref()))
        };
        let parse_bool = || raw.parse::<bool>().map_err(|_| invalid());
        let parse_index = |len: usize| match raw.parse::<usize>() {
            Ok(index) if index < len => Ok(index),
            _ => Err(invalid()),
        };
        let parse_number = |range: &IncrementalRange| match raw.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(range.clamp(value)),
            _ => Err(invalid()),
        };

        match name {
            ReadiumCssName::FontSize => self.font_size = parse_number(&FONT_SIZE_RANGE)?,
            ReadiumCssName::FontFamily => {
                self.font_family = parse_index(FONT_FAMILY_VALUES.len())?
            }
            ReadiumCssName::FontOverride => self.font_override = parse_bool()?,
            ReadiumCssName::Appearance => self.appearance = parse_index(APPEARANCE_VALUES.len())?,
            ReadiumCssName::Scroll => self.scroll = parse_bool()?,
            ReadiumCssName::PublisherDefault => self.publisher_default = parse_bool()?,
            ReadiumCssName::TextAlignment => {
                self.text_alignment = parse_index(TEXT_ALIGNMENT_VALUES.len())?
            }
            ReadiumCssName::ColumnCount => {
                self.column_count = parse_index(COLUMN_COUNT_VALUES.len())?
            }
            ReadiumCssName::WordSpacing => {
                self.word_spacing = parse_number(&WORD_SPACING_RANGE)?
            }
            ReadiumCssName::LetterSpacing => {
                self.letter_spacing = parse_number(&LETTER_SPACING_RANGE)?
            }
            ReadiumCssName::PageMargins => {
                self.page_margins = parse_number(&PAGE_MARGINS_RANGE)?
            }
            ReadiumCssName::LineHeight => self.line_height = parse_number(&LINE_HEIGHT_RANGE)?,
            ReadiumCssName::ParaIndent | ReadiumCssName::Hyphens | ReadiumCssName::Ligatures => {
                return Err(ReadiumError::Settings(format!(
                    "{} is not a stored user setting",
                    name.css_ref()
                )))
            }
        }
        Ok(())
    }

    /// Current user properties, in declaration order.
    ///
    /// Choosing a font family other than the original forces the font
    /// override on.
    pub fn properties(&self) -> Vec<UserProperty> {
        let incremental = |name, value, range: IncrementalRange| UserProperty {
            name,
            value: PropertyValue::Incremental {
                value: range.clamp(value),
                range,
            },
        };
        let enumerable = |name, index, values: &'static [&'static str]| UserProperty {
            name,
            value: PropertyValue::Enumerable { index, values },
        };
        let switchable = |name, on, off, enabled| UserProperty {
            name,
            value: PropertyValue::Switchable { on, off, enabled },
        };

        alloc::vec![
            incremental(ReadiumCssName::FontSize, self.font_size, FONT_SIZE_RANGE),
            enumerable(
                ReadiumCssName::FontFamily,
                self.font_family,
                &FONT_FAMILY_VALUES
            ),
            switchable(
                ReadiumCssName::FontOverride,
                "readium-font-on",
                "readium-font-off",
                self.font_override || self.font_family != 0,
            ),
            enumerable(
                ReadiumCssName::Appearance,
                self.appearance,
                &APPEARANCE_VALUES
            ),
            switchable(
                ReadiumCssName::Scroll,
                "readium-scroll-on",
                "readium-scroll-off",
                self.scroll,
            ),
            switchable(
                ReadiumCssName::PublisherDefault,
                "readium-advanced-off",
                "readium-advanced-on",
                self.publisher_default,
            ),
            enumerable(
                ReadiumCssName::TextAlignment,
                self.text_alignment,
                &TEXT_ALIGNMENT_VALUES
            ),
            enumerable(
                ReadiumCssName::ColumnCount,
                self.column_count,
                &COLUMN_COUNT_VALUES
            ),
            incremental(
                ReadiumCssName::WordSpacing,
                self.word_spacing,
                WORD_SPACING_RANGE
            ),
            incremental(
                ReadiumCssName::LetterSpacing,
                self.letter_spacing,
                LETTER_SPACING_RANGE
            ),
            incremental(
                ReadiumCssName::PageMargins,
                self.page_margins,
                PAGE_MARGINS_RANGE
            ),
            incremental(
                ReadiumCssName::LineHeight,
                self.line_height,
                LINE_HEIGHT_RANGE
            ),
        ]
    }

    /// Property for `name`, if it is a user setting.
    pub fn property(&self, name: ReadiumCssName) -> Option<UserProperty> {
        self.properties().into_iter().find(|p| p.name == name)
    }

    /// Space-separated `--USER__*` declarations for a `style` attribute.
    pub fn css_declarations(&self) -> String {
        let mut out = String::new();
        for property in self.properties() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&property.declaration());
        }
        out
    }

    /// Step a numeric setting up. Returns whether it changed.
    pub fn increment(&mut self, name: ReadiumCssName) -> bool {
        self.step(name, true)
    }

    /// Step a numeric setting down. Returns whether it changed.
    pub fn decrement(&mut self, name: ReadiumCssName) -> bool {
        self.step(name, false)
    }

    fn step(&mut self, name: ReadiumCssName, up: bool) -> bool {
        let Some(mut property) = self.property(name) else {
            return false;
        };
        let changed = if up {
            property.increment()
        } else {
            property.decrement()
        };
        if let PropertyValue::Incremental { value, .. } = property.value {
            match name {
                ReadiumCssName::FontSize => self.font_size = value,
                ReadiumCssName::WordSpacing => self.word_spacing = value,
                ReadiumCssName::LetterSpacing => self.letter_spacing = value,
                ReadiumCssName::PageMargins => self.page_margins = value,
                ReadiumCssName::LineHeight => self.line_height = value,
                _ => {}
            }
        }
        changed
    }
}
