//! Upcoming projects carousel.
//!
//! Sheet columns: `id`, `title`, `category`, `status`, `delivery`,
//! `description`, `image`. The section has no published sheet by default and
//! serves its fallback table until one is configured.

use serde::Serialize;
use sheetsite_csv::ContentRow;
use sheetsite_shared::SectionKind;

use crate::{ProjectsSection, SectionMapper, data_rows};

const COL_ID: usize = 0;
const COL_TITLE: usize = 1;
const COL_CATEGORY: usize = 2;
const COL_STATUS: usize = 3;
const COL_DELIVERY: usize = 4;
const COL_DESCRIPTION: usize = 5;
const COL_IMAGE: usize = 6;

const FALLBACK_CATEGORY: &str = "General";
const FALLBACK_DELIVERY: &str = "Por definir";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingProject {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: ProjectStatus,
    /// Badge text for `status`.
    pub status_label: &'static str,
    pub delivery: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Stage of an upcoming project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    ComingSoon,
}

impl ProjectStatus {
    /// Parse the sheet's status label, accents optional. Unknown labels are
    /// treated as still in planning.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .to_uppercase()
            .chars()
            .map(|c| match c {
                'Á' => 'A',
                'É' => 'E',
                'Í' => 'I',
                'Ó' => 'O',
                'Ú' => 'U',
                other => other,
            })
            .collect();

        match normalized.as_str() {
            "EN PROCESO" => Self::InProgress,
            "PROXIMAMENTE" => Self::ComingSoon,
            _ => Self::Planning,
        }
    }

    /// Label shown on the card.
    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "PLANIFICACIÓN",
            Self::InProgress => "EN PROCESO",
            Self::ComingSoon => "PRÓXIMAMENTE",
        }
    }
}

const FALLBACK_PROJECTS: &[(&str, &str, &str, ProjectStatus, &str, &str, &str)] = &[
    (
        "1",
        "Centro de Innovación Tecnológica Manta",
        "Educación",
        ProjectStatus::Planning,
        "Q3 2026",
        "Un espacio dedicado al desarrollo de habilidades digitales para jóvenes manabitas.",
        "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/PUERTO-DE-MANTA-3.jpg",
    ),
    (
        "2",
        "Reactivación Productiva Agro-Industrial",
        "Economía",
        ProjectStatus::ComingSoon,
        "Agosto 2026",
        "Líneas de crédito y tecnificación para pequeños productores de la zona norte.",
        "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/ZONAS-FRANCAS-2.webp",
    ),
    (
        "3",
        "Plan Maestro de Agua Segura",
        "Infraestructura",
        ProjectStatus::InProgress,
        "Diciembre 2026",
        "Extensión de redes de alcantarillado y agua potable para parroquias rurales.",
        "https://peachpuff-cod-624982.hostingersite.com/wp-content/uploads/2025/12/ALIVIO-FINANCIERO-BIESS.webp",
    ),
];

impl SectionMapper for ProjectsSection {
    type Content = Vec<UpcomingProject>;
    const KIND: SectionKind = SectionKind::Projects;

    fn fallback() -> Self::Content {
        FALLBACK_PROJECTS
            .iter()
            .map(
                |&(id, title, category, status, delivery, description, image)| UpcomingProject {
                    id: id.into(),
                    title: title.into(),
                    category: category.into(),
                    status,
                    status_label: status.label(),
                    delivery: delivery.into(),
                    description: Some(description.into()),
                    image: Some(image.into()),
                },
            )
            .collect()
    }

    fn map_rows(rows: &[ContentRow]) -> Option<Self::Content> {
        let projects: Vec<UpcomingProject> = data_rows(rows)
            .iter()
            .filter_map(|row| {
                let id = row.field(COL_ID)?;
                let title = row.field(COL_TITLE)?;
                let status = ProjectStatus::from_label(row.cell(COL_STATUS));
                Some(UpcomingProject {
                    id: id.to_string(),
                    title: title.to_string(),
                    category: row.field_or(COL_CATEGORY, FALLBACK_CATEGORY),
                    status,
                    status_label: status.label(),
                    delivery: row.field_or(COL_DELIVERY, FALLBACK_DELIVERY),
                    description: row.field(COL_DESCRIPTION).map(String::from),
                    image: row.field(COL_IMAGE).map(String::from),
                })
            })
            .collect();

        (!projects.is_empty()).then_some(projects)
    }
}
