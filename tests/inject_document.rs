mod common;

use common::documents::{chapter, opf};
use readium_css::{
    parse_opf_metadata, InjectorOptions, MemoryPreferences, PreferenceStore, ReadiumCssInjector,
    ReadiumCssName, Stylesheet, UserSettings,
};

fn injector_for(languages: &[&str], page_progression: Option<&str>) -> ReadiumCssInjector {
    let package = opf(languages, page_progression);
    let metadata = parse_opf_metadata(package.as_bytes()).expect("opf parses");
    ReadiumCssInjector::for_metadata(InjectorOptions::default(), &metadata)
}

fn inject(injector: &ReadiumCssInjector, doc: &str, settings: Option<&UserSettings>) -> String {
    let out = injector
        .inject(doc.as_bytes(), settings)
        .unwrap_or_else(|e| panic!("inject: {}", e));
    String::from_utf8(out).expect("utf-8 output")
}

#[test]
fn vertical_japanese_chapter_uses_cjk_stylesheets() {
    let injector = injector_for(&["ja"], Some("rtl"));
    let out = inject(&injector, &chapter(3, Some("style.css")), None);

    assert!(out.contains("/readium-css/cjk-vertical/ReadiumCSS-before.css"));
    assert!(out.contains("/readium-css/cjk-vertical/ReadiumCSS-after.css"));
    assert!(!out.contains("ReadiumCSS-default.css"));
    // Vertical CJK keeps the document direction.
    assert!(!out.contains("dir=\"rtl\""));

    let before = out.find("ReadiumCSS-before.css").expect("before");
    let publisher = out.find("style.css").expect("publisher css");
    let after = out.find("ReadiumCSS-after.css").expect("after");
    assert!(before < publisher && publisher < after);
}

#[test]
fn body_content_survives_rewrite() {
    let injector = injector_for(&["en"], None);
    let doc = chapter(5, None);
    let out = inject(&injector, &doc, None);

    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(out.contains("<!DOCTYPE html>"));
    assert!(out.contains("<section epub:type=\"chapter\">"));
    assert!(out.contains("<p id=\"p4\">Paragraph 4 with <em>emphasis</em> &amp; an entity.</p>"));
    let body_start = doc.find("<body>").expect("body");
    assert_eq!(&out[out.len() - (doc.len() - body_start)..], &doc[body_start..]);
}

#[test]
fn persisted_settings_reach_root_style() {
    let mut store = MemoryPreferences::new();
    let mut settings = UserSettings::default();
    settings.appearance = 2;
    assert!(settings.increment(ReadiumCssName::FontSize));
    assert!(settings.increment(ReadiumCssName::LineHeight));
    settings.save(&mut store);
    assert_eq!(
        store.get(ReadiumCssName::Appearance.css_ref()).as_deref(),
        Some("2")
    );

    let restored = UserSettings::load(&store);
    assert_eq!(restored, settings);

    let injector = injector_for(&["ar"], None);
    let out = inject(&injector, &chapter(1, None), Some(&restored));
    assert!(out.contains("dir=\"rtl\""));
    assert!(out.contains("--USER__appearance: readium-night-on;"));
    assert!(out.contains("--USER__fontSize: 125%;"));
    assert!(out.contains("--USER__lineHeight: 1.25;"));
    assert!(out.contains(&injector.stylesheet_href(Stylesheet::Default)));
}

#[test]
fn malformed_document_is_an_inject_error() {
    let injector = injector_for(&["en"], None);
    let err = injector
        .inject(b"<html><head></body></html>", None)
        .expect_err("mismatched tags");
    assert_eq!(err.kind(), "inject");
}
