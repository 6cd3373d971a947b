//! Home page biography block, read from a key/value sheet.
//!
//! Column 0 is the key; every remaining cell is re-joined with `,` to form the
//! value, so an unquoted value containing commas survives intact. Unknown
//! keys are ignored; blank values fall back field by field.

use std::collections::HashMap;

use serde::Serialize;
use sheetsite_csv::ContentRow;
use sheetsite_shared::SectionKind;

use crate::{BiographySection, SectionMapper, data_rows};

const KEY_TITLE: &str = "title";
const KEY_INTRO: &str = "p1";
const KEY_MANDATE: &str = "p2";
const KEY_VIDEO: &str = "video";

const FALLBACK_TITLE: &str = "¡HOLA! SOY VALENTINA CENTENO";
const FALLBACK_INTRO: &str = "Soy una abogada y política ecuatoriana, nacida en Portoviejo – Manabí. Fui elegida asambleísta nacional en 2023 y reelecta como asambleísta por Manabí en 2025. Lidero en la Asamblea Nacional la bancada de Acción Democrática Nacional (ADN).";
const FALLBACK_MANDATE: &str = "Como presidenta de la Comisión de Desarrollo Económico he impulsado leyes que promueven la seguridad, los alivios financieros, la innovación en sectores estratégicos y leyes que generan empleo joven como parte del desarrollo de nuestro país.";
const FALLBACK_VIDEO: &str = "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/Manabi-tendra-el-lugar-que-siempre-merecio.-Vamos-a-luchar-juntos-por-una-asamblea-distintaestiempodemanabi-Adn7-votatodo7.mp4";

/// "About me" block: heading, two paragraphs and a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiographyBlock {
    pub title: String,
    pub intro: String,
    pub mandate: String,
    pub video: String,
}

impl SectionMapper for BiographySection {
    type Content = BiographyBlock;
    const KIND: SectionKind = SectionKind::Biography;

    fn fallback() -> Self::Content {
        BiographyBlock {
            title: FALLBACK_TITLE.into(),
            intro: FALLBACK_INTRO.into(),
            mandate: FALLBACK_MANDATE.into(),
            video: FALLBACK_VIDEO.into(),
        }
    }

    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content> {
        let mut values: HashMap<&str, String> = HashMap::new();
        for row in data_rows(rows) {
            let Some(key) = row.field(0) else { continue };
            let value = row.cells_from(1).join(",").trim().to_string();
            // Later rows win, matching a spreadsheet read top to bottom.
            values.insert(key, value);
        }

        let pick = |key: &str, default: &str| -> (String, bool) {
            match values.get(key).filter(|v| !v.is_empty()) {
                Some(v) => (v.clone(), true),
                None => (default.to_string(), false),
            }
        };

        let (title, t) = pick(KEY_TITLE, FALLBACK_TITLE);
        let (intro, i) = pick(KEY_INTRO, FALLBACK_INTRO);
        let (mandate, m) = pick(KEY_MANDATE, FALLBACK_MANDATE);
        let (video, v) = pick(KEY_VIDEO, FALLBACK_VIDEO);

        (t || i || m || v).then_some(BiographyBlock {
            title,
            intro,
            mandate,
            video,
        })
    }
}
