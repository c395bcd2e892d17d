//! Accelerator options of the notebook and the menu intents that select them.

use serde::Serialize;

use crate::domain::error::MenuError;

/// Hardware profile selectable in the notebook's session options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Accelerator {
    /// CPU only.
    None,
    /// Single GPU.
    GpuP100,
    /// Double GPU.
    GpuT4x2,
    /// TPU VM.
    TpuV38,
}

impl Accelerator {
    /// All options, in the order the selector probes them.
    pub const ALL: [Accelerator; 4] = [Self::None, Self::GpuT4x2, Self::GpuP100, Self::TpuV38];

    /// Label shown by the site for this option.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::GpuP100 => "GPU P100",
            Self::GpuT4x2 => "GPU T4 x2",
            Self::TpuV38 => "TPU VM v3-8",
        }
    }

    /// Short description used in progress messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::None => "CPU only",
            Self::GpuP100 => "Single GPU",
            Self::GpuT4x2 => "Double GPU",
            Self::TpuV38 => "TPU",
        }
    }

    /// Whether the option draws from the weekly accelerator quota.
    #[must_use]
    pub fn is_metered(self) -> bool {
        self != Self::None
    }

    /// Resolve a label as displayed on the page.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == label.trim())
    }
}

impl std::fmt::Display for Accelerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What the user asked for in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start(Accelerator),
    Shutdown,
}

/// Menu entries as `(number, text)`, in display order.
pub const MENU_ENTRIES: &[(u8, &str)] = &[
    (1, "Start CPU only"),
    (2, "Start single GPU"),
    (3, "Start double GPU"),
    (4, "Start TPU (untested)"),
    (5, "Close kaggle"),
];

/// Choice used when the user just presses Enter.
pub const DEFAULT_CHOICE: u8 = 5;

impl Intent {
    /// Map a menu number to an intent.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::OutOfRange`] for anything outside `1..=5`.
    pub fn from_choice(choice: u8) -> Result<Self, MenuError> {
        match choice {
            1 => Ok(Self::Start(Accelerator::None)),
            2 => Ok(Self::Start(Accelerator::GpuP100)),
            3 => Ok(Self::Start(Accelerator::GpuT4x2)),
            4 => Ok(Self::Start(Accelerator::TpuV38)),
            5 => Ok(Self::Shutdown),
            other => Err(MenuError::OutOfRange(other)),
        }
    }
}
