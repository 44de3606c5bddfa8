use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Presentation mode of the storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Retail,
    Wholesale,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Retail, Mode::Wholesale];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Retail => "retail",
            Mode::Wholesale => "wholesale",
        }
    }

    /// Label shown on the mode switch
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Retail => "Retail",
            Mode::Wholesale => "Wholesale",
        }
    }

    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Retail => Mode::Wholesale,
            Mode::Wholesale => Mode::Retail,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mode: {0}")]
pub struct ModeParseError(pub String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retail" => Ok(Mode::Retail),
            "wholesale" => Ok(Mode::Wholesale),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

/// Holds the active mode for one shopping session.
///
/// Renderers never reach into the controller; callers read `mode()` and pass
/// the value down explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new(initial: Mode) -> Self {
        Self { mode: initial }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Unconditional transition. Returns the mode that was replaced.
    pub fn set_mode(&mut self, new_mode: Mode) -> Mode {
        std::mem::replace(&mut self.mode, new_mode)
    }

    /// Flip retail <-> wholesale and return the new mode
    pub fn toggle(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.mode
    }
}
