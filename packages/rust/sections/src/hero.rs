//! Hero banner slides.
//!
//! Sheet columns: `id`, `img`, `link`. A row needs both an id and an image;
//! the link is optional. Any accepted row replaces the whole fallback list.

use serde::Serialize;
use sheetsite_csv::ContentRow;
use sheetsite_shared::SectionKind;

use crate::{HeroSection, SectionMapper, data_rows};

const COL_ID: usize = 0;
const COL_IMAGE: usize = 1;
const COL_LINK: usize = 2;

const EXTERNAL_REL: &str = "noopener noreferrer";

const FALLBACK_SLIDES: &[(&str, &str)] = &[
    ("1", "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/1.webp"),
    ("2", "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/8.webp"),
    ("3", "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/3.webp"),
    ("4", "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/7.webp"),
];

/// One banner slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSlide {
    pub id: String,
    pub image: String,
    /// Click target; `None` renders the image without a link wrapper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<SlideLink>,
}

/// Where a slide navigates when clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideLink {
    pub href: String,
    pub target: LinkTarget,
    /// `rel` attribute for the anchor; set for new-tab links only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<&'static str>,
}

/// Browsing context for a slide link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkTarget {
    /// External URL, opened in a new tab with `noopener noreferrer`.
    NewTab,
    /// In-page anchor or relative path.
    SameTab,
}

impl SlideLink {
    /// Build a link, `None` for a blank href. Anything starting with `http`
    /// counts as external.
    pub fn parse(href: &str) -> Option<Self> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        let (target, rel) = if href.starts_with("http") {
            (LinkTarget::NewTab, Some(EXTERNAL_REL))
        } else {
            (LinkTarget::SameTab, None)
        };
        Some(Self {
            href: href.to_string(),
            target,
            rel,
        })
    }
}

impl SectionMapper for HeroSection {
    type Content = Vec<HeroSlide>;
    const KIND: SectionKind = SectionKind::Hero;

    fn fallback() -> Self::Content {
        FALLBACK_SLIDES
            .iter()
            .map(|(id, image)| HeroSlide {
                id: id.to_string(),
                image: image.to_string(),
                link: None,
            })
            .collect()
    }

    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content> {
        let slides: Vec<HeroSlide> = data_rows(rows)
            .iter()
            .filter_map(|row| {
                let id = row.field(COL_ID)?;
                let image = row.field(COL_IMAGE)?;
                Some(HeroSlide {
                    id: id.to_string(),
                    image: image.to_string(),
                    link: SlideLink::parse(row.cell(COL_LINK)),
                })
            })
            .collect();

        (!slides.is_empty()).then_some(slides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::rows;

    #[test]
    fn second_slide_links_out_in_new_tab() {
        let rows = rows(&[
            &["id", "img", "link"],
            &["1", "https://x/a.webp", ""],
            &["2", "https://x/b.webp", "https://site/promo"],
        ]);
        let slides = HeroSection::map_rows(&rows).expect("slides");

        assert_eq!(slides.len(), 2);
        assert!(slides[0].link.is_none());

        let link = slides[1].link.as_ref().expect("link");
        assert_eq!(link.href, "https://site/promo");
        assert_eq!(link.target, LinkTarget::NewTab);
        assert_eq!(link.rel, Some("noopener noreferrer"));
    }

    #[test]
    fn relative_link_stays_in_tab() {
        let link = SlideLink::parse(" #buzon ").expect("link");
        assert_eq!(link.href, "#buzon");
        assert_eq!(link.target, LinkTarget::SameTab);
        assert!(link.rel.is_none());
    }

    #[test]
    fn rows_without_image_are_skipped() {
        let rows = rows(&[&["id", "img"], &["1", "  "], &["", "https://x/c.webp"], &["3"]]);
        assert!(HeroSection::map_rows(&rows).is_none());
    }

    #[test]
    fn fallback_has_four_unlinked_slides() {
        let slides = HeroSection::fallback();
        assert_eq!(slides.len(), 4);
        assert!(slides.iter().all(|s| s.link.is_none() && !s.image.is_empty()));
    }

    #[test]
    fn fixture_maps_all_slides() {
        let text = crate::testing::fixture("hero.csv");
        let slides = crate::testing::map_or_fallback::<HeroSection>(&text);
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[2].link.as_ref().map(|l| l.target), Some(LinkTarget::SameTab));
    }
}
