//! Section identity and content provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SheetsiteError;

// ---------------------------------------------------------------------------
// SectionKind
// ---------------------------------------------------------------------------

/// One content section of the site, each backed by its own sheet tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    /// Rotating hero banner slides.
    Hero,
    /// Home page "about me" block (key/value sheet).
    Biography,
    /// Full biography page (keyed HERO/TIMELINE/GALLERY/PILLARS/FINAL sheet).
    Profile,
    /// Legislative achievement news cards.
    Laws,
    /// Regional achievement list.
    Achievements,
    /// Legislative initiatives blurb.
    Initiatives,
    /// International agenda block.
    Agenda,
    /// Upcoming projects carousel.
    Projects,
}

impl SectionKind {
    /// Every section, in page order.
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Hero,
        SectionKind::Biography,
        SectionKind::Laws,
        SectionKind::Achievements,
        SectionKind::Initiatives,
        SectionKind::Agenda,
        SectionKind::Projects,
        SectionKind::Profile,
    ];

    /// Stable kebab-case name used in config keys, CLI flags and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Biography => "biography",
            Self::Profile => "profile",
            Self::Laws => "laws",
            Self::Achievements => "achievements",
            Self::Initiatives => "initiatives",
            Self::Agenda => "agenda",
            Self::Projects => "projects",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionKind {
    type Err = SheetsiteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                SheetsiteError::validation(format!(
                    "unknown section '{s}' (expected one of: {})",
                    Self::ALL.map(|k| k.as_str()).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Where the content of a section came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum Provenance {
    /// Live sheet data replaced (some of) the defaults.
    Live {
        /// When the sheet was fetched.
        fetched_at: DateTime<Utc>,
        /// SHA-256 of the raw CSV body.
        content_hash: String,
        /// Data rows seen after blank-row filtering (header excluded).
        rows: usize,
    },
    /// The built-in fallback table is being served.
    Fallback {
        /// Why live data was not used.
        reason: String,
    },
}

impl Provenance {
    /// Fallback provenance with a reason.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self::Fallback {
            reason: reason.into(),
        }
    }

    /// Whether the section is serving live data.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }
}

// ---------------------------------------------------------------------------
// SectionState
// ---------------------------------------------------------------------------

/// Renderable state of one section: always has content, live or fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionState<T> {
    /// Which section this is.
    pub kind: SectionKind,
    /// Where the content came from.
    #[serde(flatten)]
    pub provenance: Provenance,
    /// The section content.
    pub content: T,
}

impl<T> SectionState<T> {
    /// Wrap fallback content.
    pub fn fallback(kind: SectionKind, content: T, reason: impl Into<String>) -> Self {
        Self {
            kind,
            provenance: Provenance::fallback(reason),
            content,
        }
    }
}
