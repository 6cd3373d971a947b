//! International agenda block.
//!
//! One data row: `id`, `title`, `tag`, `subtitle`, `description`, `bullets`
//! (`;`-separated), `quote`, `image`. Every field falls back on its own.

use serde::Serialize;
use sheetsite_csv::{ContentRow, split_list};
use sheetsite_shared::SectionKind;

use crate::{AgendaSection, SectionMapper, data_rows, owned};

const COL_ID: usize = 0;
const COL_TITLE: usize = 1;
const COL_TAG: usize = 2;
const COL_SUBTITLE: usize = 3;
const COL_DESCRIPTION: usize = 4;
const COL_BULLETS: usize = 5;
const COL_QUOTE: usize = 6;
const COL_IMAGE: usize = 7;

const BULLET_DELIMITER: char = ';';

const FALLBACK_ID: &str = "1";
const FALLBACK_TITLE: &str = "AGENDA INTERNACIONAL";
const FALLBACK_TAG: &str = "Presidenta de Comisión";
const FALLBACK_SUBTITLE: &str = "Comisión Permanente de Asuntos de las Naciones Unidas (UIP)";
const FALLBACK_DESCRIPTION: &str = "Los parlamentos del mundo, a través de la Unión Interparlamentaria (UIP), me eligieron Presidenta de la Cuarta Comisión Permanente de Asuntos de las Naciones Unidas, un espacio estratégico para fortalecer la presencia del Ecuador en la agenda global. Desde esta responsabilidad trabajo para que nuestro país tenga una voz activa en los debates internacionales sobre desarrollo sostenible, derechos humanos, cooperación e igualdad.";
const FALLBACK_BULLETS: &[&str] = &[
    "Dirijo las sesiones oficiales ante los parlamentos miembros de la UIP.",
    "Coordino la relación parlamentaria con el sistema de Naciones Unidas.",
    "Conduzco la elaboración de resoluciones y posiciones internacionales.",
    "Represento al Ecuador en reuniones multilaterales y espacios de alto nivel.",
    "Impulso acuerdos, diálogos y buenas prácticas legislativas entre países.",
];
const FALLBACK_QUOTE: &str = "\"Con este liderazgo, llevo al Ecuador a los espacios donde se toman decisiones que impactan al mundo y al futuro de nuestra gente.\"";
const FALLBACK_IMAGE: &str =
    "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/ONU-UIP-1.webp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaItem {
    pub id: String,
    pub title: String,
    pub tag: String,
    pub subtitle: String,
    pub description: String,
    pub bullets: Vec<String>,
    pub quote: String,
    pub image: String,
}

impl SectionMapper for AgendaSection {
    type Content = AgendaItem;
    const KIND: SectionKind = SectionKind::Agenda;

    fn fallback() -> Self::Content {
        AgendaItem {
            id: FALLBACK_ID.into(),
            title: FALLBACK_TITLE.into(),
            tag: FALLBACK_TAG.into(),
            subtitle: FALLBACK_SUBTITLE.into(),
            description: FALLBACK_DESCRIPTION.into(),
            bullets: owned(FALLBACK_BULLETS),
            quote: FALLBACK_QUOTE.into(),
            image: FALLBACK_IMAGE.into(),
        }
    }

    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content> {
        let row = data_rows(rows).first()?;
        if (COL_TITLE..=COL_IMAGE).all(|col| row.field(col).is_none()) {
            return None;
        }

        let bullets = split_list(row.cell(COL_BULLETS), BULLET_DELIMITER);

        Some(AgendaItem {
            id: row.field_or(COL_ID, FALLBACK_ID),
            title: row.field_or(COL_TITLE, FALLBACK_TITLE),
            tag: row.field_or(COL_TAG, FALLBACK_TAG),
            subtitle: row.field_or(COL_SUBTITLE, FALLBACK_SUBTITLE),
            description: row.field_or(COL_DESCRIPTION, FALLBACK_DESCRIPTION),
            bullets: if bullets.is_empty() {
                owned(FALLBACK_BULLETS)
            } else {
                bullets
            },
            quote: row.field_or(COL_QUOTE, FALLBACK_QUOTE),
            image: row.field_or(COL_IMAGE, FALLBACK_IMAGE),
        })
    }
}
