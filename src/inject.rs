//! Readium CSS injection into XHTML resources.
//!
//! The injector streams a document through `quick-xml` and rewrites it so
//! that the layout's Readium CSS stylesheets wrap the publisher styles:
//!
//! * `ReadiumCSS-before.css` first in `<head>`,
//! * `ReadiumCSS-default.css` right after it, only for unstyled documents,
//! * `ReadiumCSS-after.css` last in `<head>`,
//!
//! and the user settings land in the root element's `style` attribute.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::error::ReadiumError;
use crate::layout::ReadiumCssLayout;
use crate::metadata::Metadata;
use crate::user_settings::UserSettings;

/// Limits for document rewriting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InjectionLimits {
    /// Maximum size of the input document.
    pub max_document_bytes: usize,
    /// Maximum size of the merged root `style` attribute.
    pub max_style_bytes: usize,
}

impl Default for InjectionLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: 4 * 1024 * 1024,
            max_style_bytes: 16 * 1024,
        }
    }
}

impl InjectionLimits {
    /// Embedded-focused preset with smaller bounds.
    pub fn embedded() -> Self {
        Self {
            max_document_bytes: 512 * 1024,
            max_style_bytes: 4 * 1024,
        }
    }
}

/// Injector options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InjectorOptions {
    /// URL prefix under which the Readium CSS assets are served.
    pub base_url: String,
    pub limits: InjectionLimits,
}

impl Default for InjectorOptions {
    fn default() -> Self {
        Self {
            base_url: "/readium-css".to_string(),
            limits: InjectionLimits::default(),
        }
    }
}

/// Which Readium CSS stylesheet of a layout set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stylesheet {
    Before,
    Default,
    After,
}

impl Stylesheet {
    const fn file_name(self) -> &'static str {
        match self {
            Self::Before => "ReadiumCSS-before.css",
            Self::Default => "ReadiumCSS-default.css",
            Self::After => "ReadiumCSS-after.css",
        }
    }
}

/// Rewrites XHTML resources for one publication layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadiumCssInjector {
    options: InjectorOptions,
    layout: ReadiumCssLayout,
}

impl ReadiumCssInjector {
    pub fn new(options: InjectorOptions, layout: ReadiumCssLayout) -> Self {
        Self { options, layout }
    }

    /// Injector for the layout selected from `metadata`.
    pub fn for_metadata(options: InjectorOptions, metadata: &Metadata) -> Self {
        Self::new(options, ReadiumCssLayout::from_metadata(metadata))
    }

    pub fn layout(&self) -> ReadiumCssLayout {
        self.layout
    }

    /// URL of `sheet` for this injector's layout.
    pub fn stylesheet_href(&self, sheet: Stylesheet) -> String {
        format!(
            "{}/{}{}",
            self.options.base_url.trim_end_matches('/'),
            self.layout.readium_css_path(),
            sheet.file_name()
        )
    }

    /// Inject the Readium CSS stylesheets and `settings` into `xhtml`.
    pub fn inject(
        &self,
        xhtml: &[u8],
        settings: Option<&UserSettings>,
    ) -> Result<Vec<u8>, ReadiumError> {
        let limits = self.options.limits;
        if xhtml.len() > limits.max_document_bytes {
            return Err(ReadiumError::Inject(format!(
                "Document exceeds max_document_bytes ({} > {})",
                xhtml.len(),
                limits.max_document_bytes
            )));
        }

        let with_default = !has_publisher_styles(xhtml)?;
        let declarations = settings.map(UserSettings::css_declarations);
        log::debug!(
            "Injecting Readium CSS layout {} (default stylesheet: {})",
            self.layout,
            with_default
        );

        let mut reader = Reader::from_reader(xhtml);
        let mut writer = Writer::new(Vec::with_capacity(xhtml.len() + 4 * 1024));
        let mut buf = Vec::with_capacity(1024);
        let mut saw_html = false;
        let mut saw_head = false;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|err| read_error(&reader, err))?;
            match event {
                Event::Start(e) if !saw_html && e.local_name().as_ref() == b"html" => {
                    saw_html = true;
                    let root = self.rewrite_root(&e, declarations.as_deref())?;
                    write(&mut writer, Event::Start(root))?;
                }
                Event::Start(e) if saw_html && !saw_head && e.local_name().as_ref() == b"head" => {
                    saw_head = true;
                    write(&mut writer, Event::Start(e))?;
                    self.write_head_start(&mut writer, with_default)?;
                }
                Event::Empty(e) if saw_html && !saw_head && e.local_name().as_ref() == b"head" => {
                    saw_head = true;
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    write(&mut writer, Event::Start(e))?;
                    self.write_head_start(&mut writer, with_default)?;
                    self.write_link(&mut writer, Stylesheet::After)?;
                    write(&mut writer, Event::End(BytesEnd::new(name)))?;
                }
                Event::End(e) if saw_head && e.local_name().as_ref() == b"head" => {
                    self.write_link(&mut writer, Stylesheet::After)?;
                    write(&mut writer, Event::End(e))?;
                }
                Event::Eof => break,
                other => write(&mut writer, other)?,
            }
            buf.clear();
        }

        if !saw_html {
            return Err(ReadiumError::Inject("Document has no <html> element".into()));
        }
        if !saw_head {
            return Err(ReadiumError::Inject("Document has no <head> element".into()));
        }
        Ok(writer.into_inner())
    }

    fn rewrite_root(
        &self,
        e: &BytesStart<'_>,
        declarations: Option<&str>,
    ) -> Result<BytesStart<'static>, ReadiumError> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut root = BytesStart::new(name);
        let dir = self.layout.dir_attribute();
        let mut style: Option<String> = None;

        for attr in e.attributes() {
            let attr = attr.map_err(|err| {
                ReadiumError::Inject(format!("Malformed <html> attribute: {}", err))
            })?;
            match attr.key.as_ref() {
                b"style" if declarations.is_some() => {
                    let raw = String::from_utf8_lossy(attr.value.as_ref());
                    let value = quick_xml::escape::unescape(&raw).map_err(|err| {
                        ReadiumError::Inject(format!("Malformed <html> style: {}", err))
                    })?;
                    style = Some(value.into_owned());
                }
                b"dir" if dir.is_some() => {}
                _ => root.push_attribute(attr),
            }
        }

        if let Some(dir) = dir {
            root.push_attribute(("dir", dir));
        }
        if let Some(declarations) = declarations {
            let merged = merge_style(style.as_deref(), declarations);
            let merged = quick_xml::escape::escape(merged.as_str());
            let max = self.options.limits.max_style_bytes;
            if merged.len() > max {
                return Err(ReadiumError::Inject(format!(
                    "Root style exceeds max_style_bytes ({} > {})",
                    merged.len(),
                    max
                )));
            }
            root.push_attribute((b"style".as_ref(), merged.as_bytes()));
        }
        Ok(root)
    }

    fn write_head_start(
        &self,
        writer: &mut Writer<Vec<u8>>,
        with_default: bool,
    ) -> Result<(), ReadiumError> {
        self.write_link(writer, Stylesheet::Before)?;
        if with_default {
            self.write_link(writer, Stylesheet::Default)?;
        }
        Ok(())
    }

    fn write_link(
        &self,
        writer: &mut Writer<Vec<u8>>,
        sheet: Stylesheet,
    ) -> Result<(), ReadiumError> {
        let href = self.stylesheet_href(sheet);
        let mut link = BytesStart::new("link");
        link.push_attribute(("rel", "stylesheet"));
        link.push_attribute(("type", "text/css"));
        link.push_attribute(("href", href.as_str()));
        write(writer, Event::Empty(link))
    }
}

/// Whether the document head links or embeds any stylesheet.
fn has_publisher_styles(xhtml: &[u8]) -> Result<bool, ReadiumError> {
    let mut reader = Reader::from_reader(xhtml);
    let mut buf = Vec::with_capacity(256);
    let mut in_head = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| read_error(&reader, err))?;
        match event {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"head" => in_head = true,
                b"style" if in_head => return Ok(true),
                b"link" if in_head && is_stylesheet_link(&e) => return Ok(true),
                b"body" => return Ok(false),
                _ => {}
            },
            Event::End(e) if e.local_name().as_ref() == b"head" => return Ok(false),
            Event::Eof => return Ok(false),
            _ => {}
        }
        buf.clear();
    }
}

fn is_stylesheet_link(e: &BytesStart<'_>) -> bool {
    e.attributes().flatten().any(|attr| {
        attr.key.as_ref() == b"rel"
            && String::from_utf8_lossy(attr.value.as_ref())
                .split_ascii_whitespace()
                .any(|rel| rel.eq_ignore_ascii_case("stylesheet"))
    })
}

/// Append `declarations` after any existing inline declarations.
fn merge_style(existing: Option<&str>, declarations: &str) -> String {
    let existing = existing.map(str::trim).unwrap_or_default();
    if existing.is_empty() {
        return declarations.to_string();
    }
    let mut merged = String::with_capacity(existing.len() + declarations.len() + 2);
    merged.push_str(existing);
    if !existing.ends_with(';') {
        merged.push(';');
    }
    merged.push(' ');
    merged.push_str(declarations);
    merged
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ReadiumError> {
    writer
        .write_event(event)
        .map_err(|err| ReadiumError::Inject(format!("Error writing XHTML: {}", err)))
}

fn read_error(reader: &Reader<&[u8]>, err: quick_xml::Error) -> ReadiumError {
    ReadiumError::Inject(format!(
        "Error parsing XHTML at byte {}: {}",
        reader.buffer_position(),
        err
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" lang="en"><head><title>One</title></head><body><p>Hi</p></body></html>"#;

    fn inject_str(injector: &ReadiumCssInjector, doc: &str, settings: Option<&UserSettings>) -> String {
        let out = injector.inject(doc.as_bytes(), settings).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_stylesheet_href_per_layout() {
        let ltr = ReadiumCssInjector::new(InjectorOptions::default(), ReadiumCssLayout::Ltr);
        assert_eq!(
            ltr.stylesheet_href(Stylesheet::Before),
            "/readium-css/ReadiumCSS-before.css"
        );
        let options = InjectorOptions {
            base_url: "https://assets.example/rcss/".into(),
            ..InjectorOptions::default()
        };
        let vertical = ReadiumCssInjector::new(options, ReadiumCssLayout::CjkVertical);
        assert_eq!(
            vertical.stylesheet_href(Stylesheet::After),
            "https://assets.example/rcss/cjk-vertical/ReadiumCSS-after.css"
        );
    }

    #[test]
    fn test_unstyled_document_gets_default_sheet() {
        let injector = ReadiumCssInjector::new(InjectorOptions::default(), ReadiumCssLayout::Ltr);
        let out = inject_str(&injector, DOC, None);
        let before = out.find("ReadiumCSS-before.css").unwrap();
        let default = out.find("ReadiumCSS-default.css").unwrap();
        let title = out.find("<title>").unwrap();
        let after = out.find("ReadiumCSS-after.css").unwrap();
        let head_end = out.find("</head>").unwrap();
        assert!(before < default && default < title && title < after && after < head_end);
        assert!(out.contains("<p>Hi</p>"));
        assert!(!out.contains("dir="));
    }

    #[test]
    fn test_styled_document_skips_default_sheet() {
        let doc = r#"<html><head><link rel="Stylesheet" href="book.css"/></head><body/></html>"#;
        let injector = ReadiumCssInjector::new(InjectorOptions::default(), ReadiumCssLayout::Ltr);
        let out = inject_str(&injector, doc, None);
        assert!(!out.contains("ReadiumCSS-default.css"));
        assert!(out.contains("book.css"));

        let doc = r#"<html><head><style>p { margin: 0 }</style></head><body/></html>"#;
        let out = inject_str(&injector, doc, None);
        assert!(!out.contains("ReadiumCSS-default.css"));
    }

    #[test]
    fn test_rtl_sets_dir_and_replaces_existing() {
        let doc = r#"<html dir="ltr" lang="ar"><head></head><body/></html>"#;
        let injector = ReadiumCssInjector::new(InjectorOptions::default(), ReadiumCssLayout::Rtl);
        let out = inject_str(&injector, doc, None);
        assert!(out.starts_with(r#"<html lang="ar" dir="rtl">"#));
        assert!(out.contains("/readium-css/rtl/ReadiumCSS-before.css"));
    }

    #[test]
    fn test_settings_merge_into_existing_style() {
        let doc = r#"<html style="color: red"><head/><body/></html>"#;
        let injector = ReadiumCssInjector::new(InjectorOptions::default(), ReadiumCssLayout::Ltr);
        let settings = UserSettings {
            font_family: 1,
            ..UserSettings::default()
        };
        let out = inject_str(&injector, doc, Some(&settings));
        assert!(out.contains(r#"style="color: red; --USER__fontSize: 100%;"#));
        assert!(out.contains("--USER__fontFamily: &quot;PT Serif&quot;;"));
        assert!(out.contains("ReadiumCSS-after.css\"/></head>"));
    }

    #[test]
    fn test_existing_style_ending_in_entity_gets_separator() {
        let doc = r#"<html style="font-family: &quot;A&quot;"><head/><body/></html>"#;
        let injector = ReadiumCssInjector::new(InjectorOptions::default(), ReadiumCssLayout::Rtl);
        let out = inject_str(&injector, doc, Some(&UserSettings::default()));
        assert!(out.contains(r#"style="font-family: &quot;A&quot;; --USER__fontSize: 100%;"#));
    }

    #[test]
    fn test_missing_head_is_error() {
        let injector = ReadiumCssInjector::new(InjectorOptions::default(), ReadiumCssLayout::Ltr);
        let err = injector.inject(b"<html><body/></html>", None).unwrap_err();
        assert!(matches!(err, ReadiumError::Inject(_)));
        let err = injector.inject(b"<svg/>", None).unwrap_err();
        assert!(err.message().contains("<html>"));
    }

    #[test]
    fn test_document_limit() {
        let options = InjectorOptions {
            limits: InjectionLimits {
                max_document_bytes: 16,
                ..InjectionLimits::default()
            },
            ..InjectorOptions::default()
        };
        let injector = ReadiumCssInjector::new(options, ReadiumCssLayout::Ltr);
        assert!(injector.inject(DOC.as_bytes(), None).is_err());
    }

    #[test]
    fn test_style_limit() {
        let options = InjectorOptions {
            limits: InjectionLimits {
                max_style_bytes: 32,
                ..InjectionLimits::default()
            },
            ..InjectorOptions::default()
        };
        let injector = ReadiumCssInjector::new(options, ReadiumCssLayout::Ltr);
        let settings = UserSettings::default();
        assert!(injector.inject(DOC.as_bytes(), Some(&settings)).is_err());
    }

    #[test]
    fn test_merge_style() {
        assert_eq!(merge_style(None, "a: 1;"), "a: 1;");
        assert_eq!(merge_style(Some("  "), "a: 1;"), "a: 1;");
        assert_eq!(merge_style(Some("b: 2;"), "a: 1;"), "b: 2; a: 1;");
        assert_eq!(merge_style(Some("f: \"A\""), "a: 1;"), "f: \"A\"; a: 1;");
    }
}
