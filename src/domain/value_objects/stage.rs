//! Named deployment stages exposed as CLI presets

use std::fmt;

/// The two stage presets offered on the command line.
///
/// Selection itself works on any configured stage name; the presets only
/// fix which name is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Development,
    Stable,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::Development, Stage::Stable];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Development => "development",
            Stage::Stable => "stable",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
