//! Legislative initiatives blurb: one data row of `id`, `sectionTitle`,
//! `description`, each falling back independently.

use serde::Serialize;
use sheetsite_csv::ContentRow;
use sheetsite_shared::SectionKind;

use crate::{InitiativesSection, SectionMapper, data_rows};

const FALLBACK_ID: &str = "01";
const FALLBACK_HEADING: &str = "INICIATIVAS LEGISLATIVAS";
const FALLBACK_DESCRIPTION: &str = "Seguimos trabajando en nuevos proyectos de ley enfocados en la seguridad, la educación y el desarrollo productivo. Pronto encontrarás aquí el detalle de nuestras iniciativas en curso.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Initiative {
    pub id: String,
    pub heading: String,
    pub description: String,
}

impl SectionMapper for InitiativesSection {
    type Content = Initiative;
    const KIND: SectionKind = SectionKind::Initiatives;

    fn fallback() -> Self::Content {
        Initiative {
            id: FALLBACK_ID.into(),
            heading: FALLBACK_HEADING.into(),
            description: FALLBACK_DESCRIPTION.into(),
        }
    }

    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content> {
        let row = data_rows(rows).first()?;
        if row.field(1).is_none() && row.field(2).is_none() {
            return None;
        }

        Some(Initiative {
            id: row.field_or(0, FALLBACK_ID),
            heading: row.field_or(1, FALLBACK_HEADING),
            description: row.field_or(2, FALLBACK_DESCRIPTION),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::rows;

    #[test]
    fn description_only_keeps_default_heading() {
        let rows = rows(&[
            &["id", "sectionTitle", "description"],
            &["", "", "Nueva ley de\nseguridad ciudadana"],
        ]);
        let initiative = InitiativesSection::map_rows(&rows).expect("initiative");
        assert_eq!(initiative.heading, FALLBACK_HEADING);
        assert_eq!(initiative.id, FALLBACK_ID);
        assert_eq!(initiative.description, "Nueva ley de\nseguridad ciudadana");
    }

    #[test]
    fn only_first_data_row_is_read() {
        let rows = rows(&[
            &["id", "sectionTitle", "description"],
            &["7", "PROYECTOS DE LEY", ""],
            &["8", "IGNORADO", "IGNORADO"],
        ]);
        let initiative = InitiativesSection::map_rows(&rows).expect("initiative");
        assert_eq!(initiative.id, "7");
        assert_eq!(initiative.heading, "PROYECTOS DE LEY");
        assert_eq!(initiative.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn blank_payload_is_unusable() {
        let rows = rows(&[&["id", "sectionTitle", "description"], &["9"]]);
        assert!(InitiativesSection::map_rows(&rows).is_none());
    }
}
