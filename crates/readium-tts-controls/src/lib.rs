//! Text-to-speech control panel model for `readium-css` readers.
//!
//! The panel is described as plain data ([`PanelItem`]s and an optional
//! [`SettingsDialog`]) so any UI toolkit can draw it. User actions are
//! routed to the host through the [`TtsController`] trait.

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod config;
mod controls;

pub use config::{format_rate, Locale, TtsConfig, AVAILABLE_RATES};
pub use controls::{
    Control, ControlButton, Icon, PanelItem, PanelState, SelectorListItem, SelectorOption,
    SettingsDialog, TtsController, TtsControls, CONTROL_SPACER_DP, LARGE_ICON_DP,
};
