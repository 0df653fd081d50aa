use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External CMS platforms a post can be cross-posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Ghost,
    WordPress,
    Blogger,
    Medium,
}

impl PlatformKind {
    pub const ALL: [PlatformKind; 4] =
        [PlatformKind::Ghost, PlatformKind::WordPress, PlatformKind::Blogger, PlatformKind::Medium];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Ghost => "ghost",
            PlatformKind::WordPress => "wordpress",
            PlatformKind::Blogger => "blogger",
            PlatformKind::Medium => "medium",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ghost" => Ok(PlatformKind::Ghost),
            "wordpress" => Ok(PlatformKind::WordPress),
            "blogger" => Ok(PlatformKind::Blogger),
            "medium" => Ok(PlatformKind::Medium),
            other => Err(CoreError::UnsupportedPlatform(other.to_string())),
        }
    }
}
