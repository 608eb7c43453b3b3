//! Value types shared by the builder, the resolution engine, and the CLI.
//!
//! # Search tiers
//!
//! Candidate directories come in three tiers, searched in a fixed order that
//! encodes override priority:
//!
//! ```text
//! user     ~/.OpenFOAM/<version>, ~/.OpenFOAM
//!    ↓ falls back to
//! group    <site>/<version>, <site>
//!    ↓ falls back to
//! other    <project>/etc
//! ```
//!
//! A [`SearchMode`] switches tiers on and off; it never reorders them.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::EtcFileError;

/// One tier of the search path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    User,
    Group,
    Other,
}

/// Which tiers to search. Parsed from any combination of `u`, `g`, `o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct SearchMode {
    pub user: bool,
    pub group: bool,
    pub other: bool,
}

impl SearchMode {
    pub const ALL: SearchMode = SearchMode {
        user: true,
        group: true,
        other: true,
    };

    pub fn includes(&self, tier: Tier) -> bool {
        match tier {
            Tier::User => self.user,
            Tier::Group => self.group,
            Tier::Other => self.other,
        }
    }
}

impl Default for SearchMode {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromStr for SearchMode {
    type Err = EtcFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EtcFileError::InvalidMode(s.to_string()));
        }
        let mut mode = SearchMode {
            user: false,
            group: false,
            other: false,
        };
        for c in s.chars() {
            match c {
                'u' => mode.user = true,
                'g' => mode.group = true,
                'o' => mode.other = true,
                _ => return Err(EtcFileError::InvalidMode(s.to_string())),
            }
        }
        Ok(mode)
    }
}

impl TryFrom<String> for SearchMode {
    type Error = EtcFileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, c) in [(self.user, 'u'), (self.group, 'g'), (self.other, 'o')] {
            if on {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Shell flavor for output lines meant to be evaluated by a command interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Csh,
    Sh,
}

impl OutputStyle {
    /// Directive that loads a file, including its trailing space.
    pub fn directive(&self) -> &'static str {
        match self {
            OutputStyle::Csh => "source ",
            OutputStyle::Sh => ". ",
        }
    }

    /// Config subdirectory holding files written for this shell.
    pub fn config_dir(&self) -> &'static str {
        match self {
            OutputStyle::Csh => "config.csh",
            OutputStyle::Sh => "config.sh",
        }
    }
}

/// Whether the walk stops at the first match or reports every one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    #[default]
    FirstOnly,
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_mode() {
        assert_eq!("ugo".parse::<SearchMode>().unwrap(), SearchMode::ALL);
    }

    #[test]
    fn parse_mode_any_order() {
        let mode: SearchMode = "og".parse().unwrap();
        assert!(!mode.user);
        assert!(mode.group);
        assert!(mode.other);
    }

    #[test]
    fn parse_mode_rejects_unknown_letter() {
        let result = "ux".parse::<SearchMode>();
        assert!(matches!(result, Err(EtcFileError::InvalidMode(m)) if m == "ux"));
    }

    #[test]
    fn parse_mode_rejects_empty() {
        assert!("".parse::<SearchMode>().is_err());
    }

    #[test]
    fn mode_displays_canonical_order() {
        let mode: SearchMode = "ou".parse().unwrap();
        assert_eq!(mode.to_string(), "uo");
    }

    #[test]
    fn mode_includes_tiers() {
        let mode: SearchMode = "g".parse().unwrap();
        assert!(!mode.includes(Tier::User));
        assert!(mode.includes(Tier::Group));
        assert!(!mode.includes(Tier::Other));
    }

    #[test]
    fn default_mode_is_everything() {
        assert_eq!(SearchMode::default().to_string(), "ugo");
    }

    #[test]
    fn style_directives() {
        assert_eq!(OutputStyle::Csh.directive(), "source ");
        assert_eq!(OutputStyle::Sh.directive(), ". ");
        assert_eq!(OutputStyle::Sh.config_dir(), "config.sh");
    }
}
