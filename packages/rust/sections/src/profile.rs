//! Full biography page, read from a keyed sheet.
//!
//! Column 0 names the section (`HERO`, `TIMELINE`, `GALLERY`, `PILLARS`,
//! `FINAL`), column 1 a sub-key, and columns 2–5 carry `title`,
//! `description`, `image` and `extra`. Singleton parts (hero, final call to
//! action) are overwritten field by field; list parts are rebuilt from the
//! sheet and only replace their fallback list when at least one row landed.

use serde::Serialize;
use sheetsite_csv::ContentRow;
use sheetsite_shared::SectionKind;

use crate::{ProfileSection, SectionMapper, data_rows};

const COL_SECTION: usize = 0;
const COL_KEY: usize = 1;
const COL_TITLE: usize = 2;
const COL_DESCRIPTION: usize = 3;
const COL_IMAGE: usize = 4;
const COL_EXTRA: usize = 5;

const UNTITLED_MILESTONE: &str = "Sin título";
const UNTITLED_PILLAR: &str = "Pilar";
const UNDATED_MILESTONE: &str = "—";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the biography page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub hero: ProfileHero,
    pub timeline: Vec<TimelineEntry>,
    pub gallery: Vec<GalleryItem>,
    pub pillars: Vec<PillarItem>,
    pub final_cta: FinalCta,
}

/// Opening block of the biography page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileHero {
    pub tag: String,
    pub title: String,
    pub quote: String,
    pub description: String,
    pub cta: String,
    pub image_main: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_secondary: Option<String>,
}

/// One milestone on the life timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub year: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: ProfileIcon,
}

/// One photo in the gallery strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub image: String,
}

/// One pillar of the political platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillarItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: ProfileIcon,
}

/// Closing call to action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalCta {
    pub title: String,
    pub button: String,
}

/// Icon set available on the biography page. Unknown keys render as a star.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileIcon {
    #[default]
    Star,
    Target,
    Users,
    Quote,
    Calendar,
    MapPin,
    Award,
    Check,
    Heart,
    Zap,
    Shield,
    Book,
}

impl ProfileIcon {
    /// Case-insensitive lookup with a [`ProfileIcon::Star`] default.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "target" => Self::Target,
            "users" => Self::Users,
            "quote" => Self::Quote,
            "calendar" => Self::Calendar,
            "mappin" => Self::MapPin,
            "award" => Self::Award,
            "check" => Self::Check,
            "heart" => Self::Heart,
            "zap" => Self::Zap,
            "shield" => Self::Shield,
            "book" => Self::Book,
            _ => Self::Star,
        }
    }
}

// ---------------------------------------------------------------------------
// Fallback table
// ---------------------------------------------------------------------------

const FALLBACK_TIMELINE: &[(&str, &str, &str, ProfileIcon)] = &[
    ("Orígenes", "Raíces Manabitas", "Nací y crecí en Manabí, donde aprendí el valor del trabajo duro de mi familia.", ProfileIcon::MapPin),
    ("Deporte", "Selección Nacional", "Representé a Ecuador en voleibol, aprendiendo que ningún logro es individual.", ProfileIcon::Award),
    ("Formación", "Abogada de la República", "Me especialicé en Derecho Deportivo y Gestión Pública para defender causas justas.", ProfileIcon::Book),
    ("Actualidad", "Asambleísta Nacional", "Legislando con honestidad y transparencia por un nuevo Ecuador.", ProfileIcon::Target),
];

const FALLBACK_GALLERY: &[(&str, &str)] = &[
    ("Escuchando a nuestros emprendedores", "https://images.unsplash.com/photo-1551836022-d5d88e9218df?q=80&w=800&auto=format&fit=crop"),
    ("Sesión en la Asamblea Nacional", "https://images.unsplash.com/photo-1521737604893-d14cc237f11d?q=80&w=800&auto=format&fit=crop"),
    ("Trabajo de campo", "https://images.unsplash.com/photo-1531206715517-5c0ba140b2b8?q=80&w=800&auto=format&fit=crop"),
    ("Manabí", "https://images.unsplash.com/photo-1577962917302-cd874c4e31d2?q=80&w=800&auto=format&fit=crop"),
];

const FALLBACK_PILLARS: &[(&str, &str, ProfileIcon)] = &[
    ("Liderazgo Joven", "Renovando la política con energía y nuevas ideas.", ProfileIcon::Star),
    ("Territorio 24/7", "No soy asambleísta de escritorio, recorro cada cantón.", ProfileIcon::Users),
    ("Resultados Reales", "Leyes aprobadas y fiscalización efectiva para Manabí.", ProfileIcon::Target),
];

fn fallback_hero() -> ProfileHero {
    ProfileHero {
        tag: "Biografía".into(),
        title: "Pasión por Servir a Ecuador".into(),
        quote: "No llegué a la política para ser una espectadora, sino para jugar el partido más importante: el futuro de nuestras familias.".into(),
        description: "Desde las canchas deportivas hasta el pleno de la Asamblea, mi vida ha estado marcada por la disciplina. Soy una manabita orgullosa que cree firmemente que la juventud no es el futuro, sino el presente activo que Ecuador necesita.".into(),
        cta: "Escríbeme al Buzón".into(),
        image_main: "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?q=80&w=800&auto=format&fit=crop".into(),
        image_secondary: Some("https://images.unsplash.com/photo-1529070538774-1843cb3265df?q=80&w=600&auto=format&fit=crop".into()),
    }
}

fn fallback_timeline() -> Vec<TimelineEntry> {
    FALLBACK_TIMELINE
        .iter()
        .map(|&(year, title, description, icon)| TimelineEntry {
            year: year.into(),
            title: title.into(),
            description: Some(description.into()),
            icon,
        })
        .collect()
}

fn fallback_gallery() -> Vec<GalleryItem> {
    FALLBACK_GALLERY
        .iter()
        .map(|&(caption, image)| GalleryItem {
            caption: Some(caption.into()),
            image: image.into(),
        })
        .collect()
}

fn fallback_pillars() -> Vec<PillarItem> {
    FALLBACK_PILLARS
        .iter()
        .map(|&(title, description, icon)| PillarItem {
            title: title.into(),
            description: Some(description.into()),
            icon,
        })
        .collect()
}

fn fallback_final_cta() -> FinalCta {
    FinalCta {
        title: "Pilares de mi Gestión".into(),
        button: "Únete al Cambio".into(),
    }
}

// ---------------------------------------------------------------------------
// Mapper
// ---------------------------------------------------------------------------

/// Payload columns of one keyed row.
struct KeyedRow<'a> {
    section: String,
    raw_key: Option<&'a str>,
    key: String,
    title: Option<&'a str>,
    description: Option<&'a str>,
    image: Option<&'a str>,
    extra: Option<&'a str>,
}

impl<'a> KeyedRow<'a> {
    fn read(row: &'a ContentRow) -> Self {
        let raw_key = row.field(COL_KEY);
        Self {
            section: row.cell(COL_SECTION).trim().to_uppercase(),
            raw_key,
            key: raw_key.unwrap_or_default().to_uppercase(),
            title: row.field(COL_TITLE),
            description: row.field(COL_DESCRIPTION),
            image: row.field(COL_IMAGE),
            extra: row.field(COL_EXTRA),
        }
    }
}

fn set(slot: &mut String, value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            *slot = v.to_string();
            true
        }
        None => false,
    }
}

impl SectionMapper for ProfileSection {
    type Content = Profile;
    const KIND: SectionKind = SectionKind::Profile;

    fn fallback() -> Self::Content {
        Profile {
            hero: fallback_hero(),
            timeline: fallback_timeline(),
            gallery: fallback_gallery(),
            pillars: fallback_pillars(),
            final_cta: fallback_final_cta(),
        }
    }

    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content> {
        let mut hero = fallback_hero();
        let mut final_cta = fallback_final_cta();
        let mut timeline = Vec::new();
        let mut gallery = Vec::new();
        let mut pillars = Vec::new();
        let mut touched = false;

        for row in data_rows(rows) {
            if row.width() < 2 {
                continue;
            }
            let r = KeyedRow::read(row);

            match r.section.as_str() {
                "HERO" => match r.key.as_str() {
                    "MAIN" => {
                        touched |= set(&mut hero.title, r.title);
                        touched |= set(&mut hero.description, r.description);
                        touched |= set(&mut hero.image_main, r.image);
                    }
                    "QUOTE" => {
                        // The description column wins over the title column.
                        touched |= set(&mut hero.quote, r.title);
                        touched |= set(&mut hero.quote, r.description);
                    }
                    "SECONDARY" => {
                        if let Some(image) = r.image {
                            hero.image_secondary = Some(image.to_string());
                            touched = true;
                        }
                    }
                    "TAG" => touched |= set(&mut hero.tag, r.title),
                    "CTA" => touched |= set(&mut hero.cta, r.title),
                    other => tracing::trace!(key = other, "ignoring unknown HERO key"),
                },
                "TIMELINE" if r.title.is_some() || r.description.is_some() => {
                    timeline.push(TimelineEntry {
                        year: r.raw_key.or(r.extra).unwrap_or(UNDATED_MILESTONE).to_string(),
                        title: r.title.unwrap_or(UNTITLED_MILESTONE).to_string(),
                        description: r.description.map(String::from),
                        icon: ProfileIcon::from_key(r.extra.unwrap_or_default()),
                    });
                }
                "GALLERY" => {
                    if let Some(image) = r.image {
                        gallery.push(GalleryItem {
                            caption: r.title.map(String::from),
                            image: image.to_string(),
                        });
                    }
                }
                "PILLARS" if r.title.is_some() || r.description.is_some() => {
                    pillars.push(PillarItem {
                        title: r.title.unwrap_or(UNTITLED_PILLAR).to_string(),
                        description: r.description.map(String::from),
                        icon: ProfileIcon::from_key(r.extra.unwrap_or_default()),
                    });
                }
                "FINAL" => match r.key.as_str() {
                    "TITLE" => touched |= set(&mut final_cta.title, r.title),
                    "BTN" => touched |= set(&mut final_cta.button, r.title),
                    _ => {}
                },
                _ => {}
            }
        }

        touched |= !timeline.is_empty() || !gallery.is_empty() || !pillars.is_empty();
        if !touched {
            return None;
        }

        Some(Profile {
            hero,
            timeline: if timeline.is_empty() { fallback_timeline() } else { timeline },
            gallery: if gallery.is_empty() { fallback_gallery() } else { gallery },
            pillars: if pillars.is_empty() { fallback_pillars() } else { pillars },
            final_cta,
        })
    }
}
