//! Publication metadata subset needed for layout selection.
//!
//! Only the declared languages and the spine reading progression are read
//! from the OPF package document; everything else is skipped.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::error::ReadiumError;
use crate::layout::{primary_subtag, ReadingProgression};

/// Languages whose scripts read right to left when nothing else is declared.
const RTL_LANGUAGES: [&str; 3] = ["ar", "fa", "he"];

/// Limits for OPF metadata extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetadataLimits {
    /// Maximum number of `dc:language` entries kept.
    pub max_languages: usize,
    /// Maximum UTF-8 byte length of a single language tag.
    pub max_language_bytes: usize,
}

impl Default for MetadataLimits {
    fn default() -> Self {
        Self {
            max_languages: 64,
            max_language_bytes: 256,
        }
    }
}

impl MetadataLimits {
    /// Embedded-focused preset with smaller bounds.
    pub fn embedded() -> Self {
        Self {
            max_languages: 8,
            max_language_bytes: 64,
        }
    }
}

/// Languages and declared reading progression of a publication.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    /// BCP 47 language tags, in document order.
    pub languages: SmallVec<[String; 2]>,
    /// Declared reading progression.
    pub reading_progression: ReadingProgression,
}

impl Metadata {
    pub fn new<I, S>(languages: I, reading_progression: ReadingProgression) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            reading_progression,
        }
    }

    /// The reading progression to use for rendering.
    ///
    /// A declared progression wins. Otherwise a single Arabic, Persian,
    /// Hebrew or traditional Chinese language reads right to left, and
    /// everything else left to right.
    pub fn effective_reading_progression(&self) -> ReadingProgression {
        if self.reading_progression != ReadingProgression::Auto {
            return self.reading_progression;
        }
        let [language] = self.languages.as_slice() else {
            return ReadingProgression::Ltr;
        };
        let language = language.to_ascii_lowercase();
        if language == "zh-hant" || language == "zh-tw" {
            return ReadingProgression::Rtl;
        }
        if RTL_LANGUAGES.contains(&primary_subtag(&language)) {
            ReadingProgression::Rtl
        } else {
            ReadingProgression::Ltr
        }
    }
}

/// Extract [`Metadata`] from an OPF package document.
pub fn parse_opf_metadata(content: &[u8]) -> Result<Metadata, ReadiumError> {
    parse_opf_metadata_with_limits(content, MetadataLimits::default())
}

/// Extract [`Metadata`] from an OPF package document with explicit limits.
pub fn parse_opf_metadata_with_limits(
    content: &[u8],
    limits: MetadataLimits,
) -> Result<Metadata, ReadiumError> {
    use quick_xml::events::Event;

    let mut reader = quick_xml::reader::Reader::from_reader(content);
    reader.config_mut().trim_text(true);

    let mut metadata = Metadata::default();
    let mut buf = Vec::with_capacity(256);
    let mut in_metadata = false;
    let mut in_language = false;
    let mut language = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"metadata" => in_metadata = true,
                b"language" if in_metadata => {
                    in_language = true;
                    language.clear();
                }
                b"spine" => {
                    metadata.reading_progression = spine_progression(&reader, &e);
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"spine" {
                    metadata.reading_progression = spine_progression(&reader, &e);
                }
            }
            Ok(Event::Text(e)) if in_language => {
                let text = reader.decoder().decode(&e).unwrap_or_default();
                push_language_text(&mut language, text.as_ref(), limits)?;
            }
            Ok(Event::GeneralRef(e)) if in_language => {
                let name = e.decode().map_err(|err| {
                    ReadiumError::Metadata(alloc::format!("Entity decode error: {:?}", err))
                })?;
                let mut entity = String::with_capacity(name.len() + 2);
                entity.push('&');
                entity.push_str(name.as_ref());
                entity.push(';');
                let resolved = quick_xml::escape::unescape(&entity).map_err(|err| {
                    ReadiumError::Metadata(alloc::format!("Entity unescape error: {:?}", err))
                })?;
                push_language_text(&mut language, resolved.as_ref(), limits)?;
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"metadata" => in_metadata = false,
                b"language" if in_language => {
                    in_language = false;
                    let tag = language.trim();
                    if !tag.is_empty() {
                        if metadata.languages.len() >= limits.max_languages {
                            return Err(ReadiumError::Metadata(alloc::format!(
                                "Languages exceed max_languages ({} > {})",
                                metadata.languages.len() + 1,
                                limits.max_languages
                            )));
                        }
                        metadata.languages.push(String::from(tag));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ReadiumError::Metadata(alloc::format!(
                    "Error parsing OPF at byte {}: {}",
                    reader.buffer_position(),
                    err
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    log::debug!(
        "OPF metadata: {} language(s), progression {}",
        metadata.languages.len(),
        metadata.reading_progression
    );
    Ok(metadata)
}

fn push_language_text(
    language: &mut String,
    text: &str,
    limits: MetadataLimits,
) -> Result<(), ReadiumError> {
    language.push_str(text);
    if language.len() > limits.max_language_bytes {
        return Err(ReadiumError::Metadata(alloc::format!(
            "Language tag exceeds max_language_bytes ({} > {})",
            language.len(),
            limits.max_language_bytes
        )));
    }
    Ok(())
}

fn spine_progression(
    reader: &quick_xml::reader::Reader<&[u8]>,
    e: &quick_xml::events::BytesStart<'_>,
) -> ReadingProgression {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() != b"page-progression-direction" {
            continue;
        }
        let value = reader
            .decoder()
            .decode(attr.value.as_ref())
            .unwrap_or_default();
        return match value.parse() {
            Ok(progression) => progression,
            Err(_) => {
                log::warn!("Ignoring unknown page-progression-direction '{}'", value);
                ReadingProgression::Auto
            }
        };
    }
    ReadingProgression::Auto
}
