//! Legislative achievement news cards.
//!
//! Sheet columns: `id`, `titleTop`, `title`, `img`, `desc`, `full`, plus an
//! optional `sectionTitle` column located by header name. Rows without an id
//! or title are skipped. The first non-blank `sectionTitle` cell among
//! accepted rows renames the section.

use serde::Serialize;
use sheetsite_csv::ContentRow;
use sheetsite_shared::SectionKind;

use crate::{LawsSection, SectionMapper, data_rows, pad_id};

const COL_ID: usize = 0;
const COL_TITLE_TOP: usize = 1;
const COL_TITLE: usize = 2;
const COL_IMAGE: usize = 3;
const COL_SUMMARY: usize = 4;
const COL_BODY: usize = 5;

const HEADING_COLUMN: &str = "sectiontitle";
const FALLBACK_HEADING: &str = "NOTICIAS LEYES";

/// The legislative achievements section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegislativeAchievements {
    pub heading: String,
    pub items: Vec<LegislativeAchievement>,
}

/// One law card with its full text for the detail modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegislativeAchievement {
    pub id: String,
    /// Banner text above the card; defaults to the title.
    pub title_top: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

struct FallbackLaw {
    id: &'static str,
    title: &'static str,
    image: &'static str,
    summary: &'static str,
    body: &'static str,
}

const FALLBACK_LAWS: &[FallbackLaw] = &[
    FallbackLaw {
        id: "01",
        title: "EMPLEO JOVEN",
        image: "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/PUERTO-DE-MANTA-3.jpg",
        summary: "Leyes con incentivos que abren oportunidades de empleo...",
        body: "Desde la Asamblea impulsamos incentivos que premian a las empresas...\n\nEstablecimos una deducción adicional del 50%...\n\nTambién incorporamos un 75%...",
    },
    FallbackLaw {
        id: "02",
        title: "ZONAS FRANCAS",
        image: "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/ZONAS-FRANCAS-2.webp",
        summary: "Zonas Francas con nuevos incentivos para atraer inversión...",
        body: "Reemplazamos las ZEDE por Zonas Francas con beneficios como:\n\n• 0% IR por 5 años\n• Exoneración de aranceles\n• Atracción de inversión extranjera.",
    },
    FallbackLaw {
        id: "03",
        title: "ALIVIO RIMPE",
        image: "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/ALIVIO-FINANCIERO-BIESS.webp",
        summary: "Más de 186 mil emprendedores recibieron alivio...",
        body: "Remisión de intereses, multas y recargos del régimen RIMPE.\n\nMás de 186 mil negocios populares regularizaron su situación.",
    },
    FallbackLaw {
        id: "04",
        title: "HIPOTECARIOS BIESS",
        image: "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/ALIVIO-FINANCIERO-BIESS.webp",
        summary: "Familias salvaron sus viviendas...",
        body: "Se creó un nuevo plan de reestructuración hipotecaria...\n\nMiles de familias conservaron su hogar.",
    },
    FallbackLaw {
        id: "05",
        title: "BANCA CERRADA",
        image: "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/DEUDA-BANCA-CERRADA-2.webp",
        summary: "Condonación total de deudas...",
        body: "Condonación total del capital adeudado hasta USD 10.000.\n\nSe eliminaron intereses acumulados por más de dos décadas.",
    },
];

fn fallback_items() -> Vec<LegislativeAchievement> {
    FALLBACK_LAWS
        .iter()
        .map(|law| LegislativeAchievement {
            id: law.id.into(),
            title_top: law.title.into(),
            title: law.title.into(),
            image: Some(law.image.into()),
            summary: Some(law.summary.into()),
            body: Some(law.body.into()),
        })
        .collect()
}

/// Index of the `sectionTitle` column in the header row, if any.
fn heading_column(header: &ContentRow) -> Option<usize> {
    header
        .cells()
        .iter()
        .position(|c| c.trim().eq_ignore_ascii_case(HEADING_COLUMN))
}

impl SectionMapper for LawsSection {
    type Content = LegislativeAchievements;
    const KIND: SectionKind = SectionKind::Laws;

    fn fallback() -> Self::Content {
        LegislativeAchievements {
            heading: FALLBACK_HEADING.into(),
            items: fallback_items(),
        }
    }

    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content> {
        let heading_col = rows.first().and_then(heading_column);
        let mut heading: Option<String> = None;
        let mut items = Vec::new();

        for row in data_rows(rows) {
            if row.width() < 2 {
                continue;
            }
            let (Some(id), Some(title)) = (row.field(COL_ID), row.field(COL_TITLE)) else {
                continue;
            };

            items.push(LegislativeAchievement {
                id: pad_id(id),
                title_top: row.field_or(COL_TITLE_TOP, title),
                title: title.to_string(),
                image: row.field(COL_IMAGE).map(String::from),
                summary: row.field(COL_SUMMARY).map(String::from),
                body: row.field(COL_BODY).map(String::from),
            });

            if heading.is_none() {
                heading = heading_col.and_then(|col| row.field(col)).map(String::from);
            }
        }

        if items.is_empty() && heading.is_none() {
            return None;
        }

        Some(LegislativeAchievements {
            heading: heading.unwrap_or_else(|| FALLBACK_HEADING.into()),
            items: if items.is_empty() { fallback_items() } else { items },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::rows;

    const HEADER: &[&str] = &["id", "titleTop", "title", "img", "desc", "full", "SectionTitle"];

    #[test]
    fn maps_rows_and_pads_ids() {
        let rows = rows(&[
            HEADER,
            &["1", "", "EMPLEO JOVEN", "https://x/e.jpg", "Resumen", "Texto completo", "LEYES APROBADAS"],
            &["2", "ARRIBA", "ZONAS FRANCAS"],
        ]);
        let laws = LawsSection::map_rows(&rows).expect("laws");

        assert_eq!(laws.heading, "LEYES APROBADAS");
        assert_eq!(laws.items.len(), 2);
        assert_eq!(laws.items[0].id, "01");
        assert_eq!(laws.items[0].title_top, "EMPLEO JOVEN");
        assert_eq!(laws.items[1].title_top, "ARRIBA");
        assert!(laws.items[1].image.is_none());
        assert!(laws.items[1].body.is_none());
    }

    #[test]
    fn rows_missing_title_are_skipped() {
        let rows = rows(&[HEADER, &["1", "ARRIBA", ""], &["", "", "SIN ID"]]);
        assert!(LawsSection::map_rows(&rows).is_none());
    }

    #[test]
    fn heading_without_column_keeps_default() {
        let rows = rows(&[&["id", "titleTop", "title"], &["3", "", "ALIVIO RIMPE"]]);
        let laws = LawsSection::map_rows(&rows).expect("laws");
        assert_eq!(laws.heading, FALLBACK_HEADING);
    }

    #[test]
    fn fixture_handles_quoted_multiline_body() {
        let text = crate::testing::fixture("laws.csv");
        let laws = crate::testing::map_or_fallback::<LawsSection>(&text);
        assert_eq!(laws.items.len(), 2);
        assert_eq!(laws.heading, "NOTICIAS LEYES 2025");
        let body = laws.items[1].body.as_deref().expect("body");
        assert!(body.contains("\n\n• 0% IR por 5 años"));
        assert_eq!(laws.items[1].summary.as_deref(), Some("Inversión, empleo y \"exportación\""));
    }
}
