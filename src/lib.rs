//! Readium CSS preparation for EPUB reading systems.
//!
//! `readium-css` covers the reader-side half of Readium CSS:
//!
//! - [`css_name`]: the `--USER__*` custom property names,
//! - [`layout`]: reading progression and stylesheet family selection,
//! - [`metadata`]: the OPF metadata subset those decisions depend on,
//! - [`user_settings`]: typed user preferences, rendered as declarations and
//!   persisted by property name,
//! - [`inject`]: streaming XHTML rewriting that wires it all into a document.
//!
//! ```rust
//! use readium_css::inject::{InjectorOptions, ReadiumCssInjector};
//! use readium_css::metadata::parse_opf_metadata;
//! use readium_css::user_settings::UserSettings;
//! use readium_css::ReadiumCssLayout;
//!
//! # fn main() -> Result<(), readium_css::ReadiumError> {
//! let opf = br#"<package><metadata><dc:language>he</dc:language></metadata><spine/></package>"#;
//! let metadata = parse_opf_metadata(opf)?;
//! let injector = ReadiumCssInjector::for_metadata(InjectorOptions::default(), &metadata);
//! assert_eq!(injector.layout(), ReadiumCssLayout::Rtl);
//!
//! let page = injector.inject(
//!     b"<html><head></head><body><p>shalom</p></body></html>",
//!     Some(&UserSettings::default()),
//! )?;
//! assert!(String::from_utf8_lossy(&page).contains("dir=\"rtl\""));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod css_name;
pub mod error;
pub mod inject;
pub mod layout;
pub mod metadata;
pub mod user_settings;

pub use css_name::ReadiumCssName;
pub use error::ReadiumError;
pub use inject::{InjectionLimits, InjectorOptions, ReadiumCssInjector, Stylesheet};
pub use layout::{ReadingProgression, ReadiumCssLayout};
pub use metadata::{parse_opf_metadata, parse_opf_metadata_with_limits, Metadata, MetadataLimits};
pub use user_settings::{
    MemoryPreferences, PreferenceStore, PropertyValue, UserProperty, UserSettings,
};
