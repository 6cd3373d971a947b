//! Regional achievements list.
//!
//! Sheet columns: `id`, `iconKey`, `title`, `body`, `image`, `sectionTitle`.
//! The heading is taken from the first row with a non-blank column 5, even
//! when that row is otherwise skipped.

use serde::Serialize;
use sheetsite_csv::ContentRow;
use sheetsite_shared::SectionKind;

use crate::{AchievementsSection, SectionMapper, data_rows, pad_id};

const COL_ID: usize = 0;
const COL_ICON: usize = 1;
const COL_TITLE: usize = 2;
const COL_BODY: usize = 3;
const COL_IMAGE: usize = 4;
const COL_HEADING: usize = 5;

const FALLBACK_HEADING: &str = "LOGROS MANABÍ";
const FALLBACK_IMAGE: &str =
    "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/ALIVIO-FINANCIERO-BIESS.webp";

/// The regional achievements section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionalAchievements {
    pub heading: String,
    pub items: Vec<RegionalAchievement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionalAchievement {
    pub id: String,
    pub icon: AchievementIcon,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Icons available for achievements; unknown keys render as a helmet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementIcon {
    #[default]
    Helmet,
    Ship,
    Water,
    Fire,
    Heart,
}

impl AchievementIcon {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "ship" => Self::Ship,
            "water" => Self::Water,
            "fire" => Self::Fire,
            "heart" => Self::Heart,
            _ => Self::Helmet,
        }
    }
}

const FALLBACK_ACHIEVEMENTS: &[(&str, AchievementIcon, &str, &str)] = &[
    (
        "01",
        AchievementIcon::Helmet,
        "Salvamos los recursos de la reconstrucción y reactivamos las obras que Manabí esperaba",
        "Tras un proceso firme de fiscalización, rescatamos los recursos de la reconstrucción y reactivamos un Comité que encontramos en abandono: sin gerente, sin informes y sin control.\nGracias a este trabajo, volvieron a avanzar obras como:\n• Puente Quimís\n• Puente Lodana\n• Mercado de Calceta\n• Plantas desaladoras para Manta\n• Plaza memorial San Gregorio\n• Sistema de agua potable para Chone\n\nProtegimos los fondos y aseguramos que la reconstrucción avance donde más se necesita.",
    ),
    (
        "02",
        AchievementIcon::Ship,
        "Los recursos del Puerto de Manta se quedan en Manta",
        "Impulsamos una reforma para que el canon del Puerto de Manta deje de ir al Presupuesto General del Estado y se quede directamente en el Municipio y la Prefectura.\n\nEsto garantiza que USD 1.859.830 se inviertan en obras e infraestructura para los mantenses.",
    ),
    (
        "03",
        AchievementIcon::Water,
        "Portoviejo y Montecristi ya tienen luz verde para proyectos de agua potable",
        "Tras articulación con el MEF, los municipios y la CAF, destrabamos dos avales históricos:\n• USD 50 millones para Portoviejo\n• USD 28 millones para Montecristi\n\nEstos proyectos garantizan agua segura y digna para miles de familias.",
    ),
    (
        "04",
        AchievementIcon::Fire,
        "Más GLP para los taxistas y una nueva estación en Portoviejo",
        "Impulsamos la ampliación del cupo de GLP para todo el país, permitiendo que Portoviejo abra nuevas estaciones de servicio.\n\nEste incremento garantiza disponibilidad del GLP y un ahorro de alrededor de USD 20 diarios para miles de familias y transportistas.",
    ),
    (
        "05",
        AchievementIcon::Heart,
        "Tres nuevos centros de salud para la ruralidad",
        "Acompañamos la contratación de nuevos subcentros del Seguro Social Campesino.\n\nHoy:\n• El centro de salud de Danzarín está concluido\n• Higuerón y Playa Prieta tienen un 90% de avance\n\nEstas obras, junto al mantenimiento de unidades médicas, superan el millón de dólares en inversión.",
    ),
];

impl SectionMapper for AchievementsSection {
    type Content = RegionalAchievements;
    const KIND: SectionKind = SectionKind::Achievements;

    fn fallback() -> Self::Content {
        RegionalAchievements {
            heading: FALLBACK_HEADING.into(),
            items: FALLBACK_ACHIEVEMENTS
                .iter()
                .map(|&(id, icon, title, body)| RegionalAchievement {
                    id: id.into(),
                    icon,
                    title: title.into(),
                    body: Some(body.into()),
                    image: Some(FALLBACK_IMAGE.into()),
                })
                .collect(),
        }
    }

    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content> {
        let mut heading: Option<&str> = None;
        let mut items = Vec::new();

        for row in data_rows(rows) {
            if row.width() < 2 {
                continue;
            }
            if heading.is_none() {
                heading = row.field(COL_HEADING);
            }
            let (Some(id), Some(title)) = (row.field(COL_ID), row.field(COL_TITLE)) else {
                continue;
            };

            items.push(RegionalAchievement {
                id: pad_id(id),
                icon: AchievementIcon::from_key(row.cell(COL_ICON)),
                title: title.to_string(),
                body: row.field(COL_BODY).map(String::from),
                image: row.field(COL_IMAGE).map(String::from),
            });
        }

        if items.is_empty() && heading.is_none() {
            return None;
        }

        Some(RegionalAchievements {
            heading: heading.unwrap_or(FALLBACK_HEADING).to_string(),
            items: if items.is_empty() {
                Self::fallback().items
            } else {
                items
            },
        })
    }
}
