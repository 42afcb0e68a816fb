use crate::config::{format_rate, Locale, TtsConfig, AVAILABLE_RATES};

/// Size of the play/pause and stop icons, in density-independent pixels.
pub const LARGE_ICON_DP: u16 = 40;
/// Gap between the transport buttons and the settings button.
pub const CONTROL_SPACER_DP: u16 = 8;

/// Host side of the panel: playback state and commands.
pub trait TtsController {
    fn is_playing(&self) -> bool;
    /// Current engine configuration, `None` while the engine is not ready.
    fn config(&self) -> Option<TtsConfig>;
    fn set_config(&mut self, config: TtsConfig);
    fn play_pause(&mut self);
    fn stop(&mut self);
    fn previous(&mut self);
    fn next(&mut self);
}

/// A user action on the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Previous,
    PlayPause,
    Stop,
    Next,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    SkipPrevious,
    Play,
    Pause,
    Stop,
    SkipNext,
    Settings,
}

/// A panel button: what it does, how it looks, and its label resource key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlButton {
    pub control: Control,
    pub icon: Icon,
    /// String resource key used as the accessible description.
    pub label: &'static str,
    /// Drawn at [`LARGE_ICON_DP`].
    pub large: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelItem {
    Button(ControlButton),
    Spacer { size_dp: u16 },
}

/// One selectable entry of a [`SelectorListItem`].
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorOption<T> {
    pub value: T,
    pub title: String,
}

/// A labelled single-choice list.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorListItem<T> {
    /// String resource key of the label.
    pub label: &'static str,
    pub options: Vec<SelectorOption<T>>,
    /// Index of the current selection, `None` when it is not among the options.
    pub selected: Option<usize>,
    /// Whether the user can change the selection.
    pub enabled: bool,
}

impl<T: PartialEq> SelectorListItem<T> {
    fn new(
        label: &'static str,
        values: Vec<T>,
        selection: &T,
        enabled: bool,
        title_of: impl Fn(&T) -> String,
    ) -> Self {
        let selected = values.iter().position(|value| value == selection);
        let options = values
            .into_iter()
            .map(|value| SelectorOption {
                title: title_of(&value),
                value,
            })
            .collect();
        Self {
            label,
            options,
            selected,
            enabled,
        }
    }

    /// Title of the current selection.
    pub fn selected_title(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(|option| option.title.as_str())
    }
}

/// The TTS settings dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsDialog {
    /// String resource key of the title.
    pub title: &'static str,
    /// String resource key of the confirm (close) button.
    pub confirm: &'static str,
    pub rate: SelectorListItem<f64>,
    pub language: SelectorListItem<Locale>,
}

/// Everything needed to draw the panel once.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelState {
    pub items: Vec<PanelItem>,
    pub dialog: Option<SettingsDialog>,
}

/// Panel-local state. Playback state itself lives in the [`TtsController`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TtsControls {
    show_settings: bool,
}

impl TtsControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_settings_open(&self) -> bool {
        self.show_settings
    }

    /// Panel items, left to right.
    pub fn items(&self, playing: bool) -> Vec<PanelItem> {
        let (play_icon, play_label) = if playing {
            (Icon::Pause, "tts_pause")
        } else {
            (Icon::Play, "tts_play")
        };
        let button = |control, icon, label, large| {
            PanelItem::Button(ControlButton {
                control,
                icon,
                label,
                large,
            })
        };
        vec![
            button(Control::Previous, Icon::SkipPrevious, "tts_previous", false),
            button(Control::PlayPause, play_icon, play_label, true),
            button(Control::Stop, Icon::Stop, "tts_stop", true),
            button(Control::Next, Icon::SkipNext, "tts_next", false),
            PanelItem::Spacer {
                size_dp: CONTROL_SPACER_DP,
            },
            button(Control::Settings, Icon::Settings, "tts_settings", false),
        ]
    }

    /// Handle a button press.
    pub fn press<C: TtsController + ?Sized>(&mut self, control: Control, controller: &mut C) {
        log::debug!("TTS control pressed: {:?}", control);
        match control {
            Control::Previous => controller.previous(),
            Control::PlayPause => controller.play_pause(),
            Control::Stop => controller.stop(),
            Control::Next => controller.next(),
            Control::Settings => self.show_settings = true,
        }
    }

    /// Close the settings dialog.
    pub fn dismiss(&mut self) {
        self.show_settings = false;
    }

    /// The settings dialog, when open and the engine has a configuration.
    ///
    /// `locales` are offered sorted by display name; the selection falls back
    /// to `system_locale` when the configuration has no default locale. The
    /// language selector is disabled when there are no locales to offer.
    pub fn settings_dialog<C: TtsController + ?Sized>(
        &self,
        controller: &C,
        locales: &[Locale],
        system_locale: &Locale,
    ) -> Option<SettingsDialog> {
        if !self.show_settings {
            return None;
        }
        let config = controller.config()?;

        let rate = SelectorListItem::new(
            "tts_rate",
            AVAILABLE_RATES.to_vec(),
            &config.rate,
            true,
            |rate| format_rate(*rate),
        );

        let mut sorted = locales.to_vec();
        sorted.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        let selection = config
            .default_locale
            .clone()
            .unwrap_or_else(|| system_locale.clone());
        let enabled = !sorted.is_empty();
        let language = SelectorListItem::new("language", sorted, &selection, enabled, |locale| {
            locale.display_name.clone()
        });

        Some(SettingsDialog {
            title: "tts_settings",
            confirm: "close",
            rate,
            language,
        })
    }

    /// Snapshot of the whole panel for one frame.
    pub fn state<C: TtsController + ?Sized>(
        &self,
        controller: &C,
        locales: &[Locale],
        system_locale: &Locale,
    ) -> PanelState {
        PanelState {
            items: self.items(controller.is_playing()),
            dialog: self.settings_dialog(controller, locales, system_locale),
        }
    }

    /// Apply a rate picked in the dialog. Returns whether the configuration
    /// was updated.
    pub fn select_rate<C: TtsController + ?Sized>(&self, controller: &mut C, rate: f64) -> bool {
        if !rate.is_finite() || rate <= 0.0 {
            log::warn!("Ignoring invalid TTS rate {}", rate);
            return false;
        }
        let Some(config) = controller.config() else {
            log::warn!("Ignoring TTS rate change: engine has no configuration");
            return false;
        };
        controller.set_config(config.with_rate(rate));
        true
    }

    /// Apply a locale picked in the dialog. Returns whether the configuration
    /// was updated.
    pub fn select_locale<C: TtsController + ?Sized>(
        &self,
        controller: &mut C,
        locale: Locale,
    ) -> bool {
        let Some(config) = controller.config() else {
            log::warn!("Ignoring TTS locale change: engine has no configuration");
            return false;
        };
        controller.set_config(config.with_default_locale(locale));
        true
    }
}
