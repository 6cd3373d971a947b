//! Section mappers: sheet rows → typed content records with fallbacks.
//!
//! Each section of the site owns a static fallback table and a mapper that
//! projects tokenized rows onto its records. Mappers are pure; they return
//! `None` when the sheet carries nothing usable, in which case the caller
//! keeps serving the fallback table.
//!
//! Fallback granularity differs per section:
//! - per collection: [`hero`], [`laws`], [`achievements`], [`projects`] and
//!   the list parts of [`profile`]
//! - per field: [`biography`], [`initiatives`], [`agenda`] and the singleton
//!   parts of [`profile`]

pub mod achievements;
pub mod agenda;
pub mod biography;
pub mod hero;
pub mod initiatives;
pub mod laws;
pub mod profile;
pub mod projects;

use serde::Serialize;
use sheetsite_csv::ContentRow;
use sheetsite_shared::SectionKind;

pub use achievements::{AchievementIcon, RegionalAchievement, RegionalAchievements};
pub use agenda::AgendaItem;
pub use biography::BiographyBlock;
pub use hero::{HeroSlide, LinkTarget, SlideLink};
pub use initiatives::Initiative;
pub use laws::{LegislativeAchievement, LegislativeAchievements};
pub use profile::{
    FinalCta, GalleryItem, PillarItem, Profile, ProfileHero, ProfileIcon, TimelineEntry,
};
pub use projects::{ProjectStatus, UpcomingProject};

/// Fewer rows than this (header included, blank rows excluded) means "no data".
pub const MIN_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A content section backed by one sheet.
pub trait SectionMapper {
    /// Content handed to the page for this section.
    type Content: Clone + std::fmt::Debug + Serialize + Send + 'static;

    /// Which section this mapper serves.
    const KIND: SectionKind;

    /// Static content served before, or instead of, live data.
    fn fallback() -> Self::Content;

    /// Map rows (header first) onto content. `None` keeps the fallback.
    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content>;
}

/// Outcome of mapping one CSV document.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped<T> {
    /// Live content, with the number of data rows it came from.
    Live { content: T, rows: usize },
    /// Nothing usable; the reason is for logs.
    Unusable { reason: String },
}

/// Tokenize `text` and map it through section `S`.
pub fn map_document<S: SectionMapper>(text: &str) -> Mapped<S::Content> {
    let rows = sheetsite_csv::parse(text);

    if rows.len() < MIN_ROWS {
        return Mapped::Unusable {
            reason: format!("sheet has {} row(s), need a header and data", rows.len()),
        };
    }

    match S::map_rows(&rows) {
        Some(content) => Mapped::Live {
            content,
            rows: rows.len() - 1,
        },
        None => Mapped::Unusable {
            reason: "no row carried the section's required fields".into(),
        },
    }
}

// ---------------------------------------------------------------------------
// Section markers
// ---------------------------------------------------------------------------

/// Rotating hero banner.
pub struct HeroSection;
/// Home page biography block.
pub struct BiographySection;
/// Full biography page.
pub struct ProfileSection;
/// Legislative achievement cards.
pub struct LawsSection;
/// Regional achievement list.
pub struct AchievementsSection;
/// Legislative initiatives blurb.
pub struct InitiativesSection;
/// International agenda block.
pub struct AgendaSection;
/// Upcoming projects carousel.
pub struct ProjectsSection;

// ---------------------------------------------------------------------------
// Helpers shared by the mappers
// ---------------------------------------------------------------------------

/// Rows after the header.
pub(crate) fn data_rows(rows: &[ContentRow]) -> &[ContentRow] {
    rows.get(1..).unwrap_or(&[])
}

/// Left-pad a numeric-looking id to two characters (`"1"` → `"01"`).
pub(crate) fn pad_id(raw: &str) -> String {
    format!("{raw:0>2}")
}

/// Owned copy of a static string list.
pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use sheetsite_csv::ContentRow;

    use crate::{Mapped, SectionMapper, map_document};

    /// Mapped content, or the fallback table when the document is unusable.
    pub fn map_or_fallback<S: SectionMapper>(text: &str) -> S::Content {
        match map_document::<S>(text) {
            Mapped::Live { content, .. } => content,
            Mapped::Unusable { .. } => S::fallback(),
        }
    }

    /// Build rows from string slices.
    pub fn rows(data: &[&[&str]]) -> Vec<ContentRow> {
        data.iter()
            .map(|r| ContentRow::new(r.iter().map(|c| c.to_string()).collect()))
            .collect()
    }

    /// Read a CSV fixture from the workspace `fixtures/csv` directory.
    pub fn fixture(name: &str) -> String {
        let path = format!("../../../fixtures/csv/{name}");
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_id_widths() {
        assert_eq!(pad_id("1"), "01");
        assert_eq!(pad_id("12"), "12");
        assert_eq!(pad_id("123"), "123");
    }

    #[test]
    fn header_only_keeps_every_section_on_fallback() {
        let text = "id,title,tag\n";
        assert!(matches!(map_document::<HeroSection>(text), Mapped::Unusable { .. }));
        assert!(matches!(map_document::<BiographySection>(text), Mapped::Unusable { .. }));
        assert!(matches!(map_document::<ProfileSection>(text), Mapped::Unusable { .. }));
        assert!(matches!(map_document::<LawsSection>(text), Mapped::Unusable { .. }));
        assert!(matches!(map_document::<AchievementsSection>(text), Mapped::Unusable { .. }));
        assert!(matches!(map_document::<InitiativesSection>(text), Mapped::Unusable { .. }));
        assert!(matches!(map_document::<AgendaSection>(text), Mapped::Unusable { .. }));
        assert!(matches!(map_document::<ProjectsSection>(text), Mapped::Unusable { .. }));

        assert_eq!(testing::map_or_fallback::<AgendaSection>(text), AgendaSection::fallback());
    }

    #[test]
    fn html_error_page_is_unusable() {
        let text = "<!DOCTYPE html>\n<html><body>Not found</body></html>\n";
        assert!(matches!(map_document::<HeroSection>(text), Mapped::Unusable { .. }));
    }

    #[test]
    fn mapping_is_idempotent() {
        let text = testing::fixture("laws.csv");
        assert_eq!(map_document::<LawsSection>(&text), map_document::<LawsSection>(&text));

        let text = testing::fixture("profile.csv");
        assert_eq!(
            map_document::<ProfileSection>(&text),
            map_document::<ProfileSection>(&text)
        );
    }
}
