//! Theme

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::revision::Revision;

/// Visual theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light background, dark text
    #[default]
    Light,

    /// Dark background, light text
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Resolved token table for this mode.
    pub fn theme(self) -> &'static Theme {
        match self {
            Self::Light => &LIGHT_THEME,
            Self::Dark => &DARK_THEME,
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Color tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs, reason = "token names are self-describing")]
pub struct ThemeColors {
    pub primary: &'static str,
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub notification: &'static str,
    pub shadow: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub secondary_text: &'static str,
    pub secondary_background: &'static str,
    pub accent: &'static str,
    pub placeholder: &'static str,
}

/// A six-step size scale, used for spacing and font sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs, reason = "scale steps are self-describing")]
pub struct Scale {
    pub xs: u16,
    pub s: u16,
    pub m: u16,
    pub l: u16,
    pub xl: u16,
    pub xxl: u16,
}

/// Resolved theme tokens for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Mode these tokens belong to
    pub mode: ThemeMode,

    /// Color tokens
    pub colors: ThemeColors,

    /// Spacing scale, in points
    pub spacing: Scale,

    /// Font size scale, in points
    pub font_sizes: Scale,
}

const SPACING: Scale = Scale {
    xs: 4,
    s: 8,
    m: 16,
    l: 24,
    xl: 32,
    xxl: 48,
};

const FONT_SIZES: Scale = Scale {
    xs: 12,
    s: 14,
    m: 16,
    l: 18,
    xl: 24,
    xxl: 32,
};

/// Light mode tokens
pub static LIGHT_THEME: Theme = Theme {
    mode: ThemeMode::Light,
    colors: ThemeColors {
        primary: "#3498db",
        background: "#f8f9fa",
        card: "#ffffff",
        text: "#212529",
        border: "#dee2e6",
        notification: "#e74c3c",
        shadow: "rgba(0, 0, 0, 0.1)",
        error: "#e74c3c",
        success: "#2ecc71",
        secondary_text: "#6c757d",
        secondary_background: "#e9ecef",
        accent: "#f39c12",
        placeholder: "#adb5bd",
    },
    spacing: SPACING,
    font_sizes: FONT_SIZES,
};

/// Dark mode tokens
pub static DARK_THEME: Theme = Theme {
    mode: ThemeMode::Dark,
    colors: ThemeColors {
        primary: "#3498db",
        background: "#121212",
        card: "#1e1e1e",
        text: "#f8f9fa",
        border: "#343a40",
        notification: "#e74c3c",
        shadow: "rgba(0, 0, 0, 0.3)",
        error: "#e74c3c",
        success: "#2ecc71",
        secondary_text: "#adb5bd",
        secondary_background: "#2d3436",
        accent: "#f39c12",
        placeholder: "#6c757d",
    },
    spacing: SPACING,
    font_sizes: FONT_SIZES,
};

/// Theme store: a two-state machine over [`ThemeMode`].
#[derive(Debug)]
pub struct ThemeStore {
    mode: ThemeMode,
    revision: Revision,
}

impl ThemeStore {
    /// Start in light mode.
    pub fn new() -> Self {
        Self::with_mode(ThemeMode::Light)
    }

    /// Start in the given mode, e.g. one restored from a snapshot.
    pub fn with_mode(mode: ThemeMode) -> Self {
        Self {
            mode,
            revision: Revision::initial(),
        }
    }

    /// Flip between light and dark.
    pub fn toggle(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// Switch to the given mode.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        if self.mode == mode {
            return;
        }

        self.mode = mode;
        self.revision.bump();

        debug!(%mode, "theme changed");
    }

    /// Current mode
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Whether dark mode is active
    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Resolved tokens for the current mode
    pub fn theme(&self) -> &'static Theme {
        self.mode.theme()
    }

    /// Color tokens for the current mode
    pub fn colors(&self) -> &'static ThemeColors {
        &self.theme().colors
    }

    /// Spacing scale
    pub fn spacing(&self) -> &'static Scale {
        &self.theme().spacing
    }

    /// Font size scale
    pub fn font_sizes(&self) -> &'static Scale {
        &self.theme().font_sizes
    }

    /// Current revision, bumped on every mode change.
    pub fn revision(&self) -> Revision {
        self.revision
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}
