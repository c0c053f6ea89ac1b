use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::map::Coordinates;

/// Shown in place of any image that fails to load.
pub const FALLBACK_IMAGE: &str =
    "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iODgiIGhlaWdodD0iODgiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyIvPg==";

/// Picks the image reference to display: the original unless it is known
/// to have failed, in which case the fallback is used.
pub fn resolve_image<'a>(src: &'a str, failed: &HashSet<String>) -> &'a str {
    if src.is_empty() || failed.contains(src) {
        FALLBACK_IMAGE
    } else {
        src
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub u32);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub name: String,
    pub avatar: String,
}

impl UserRef {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: UserRef,
    pub text: String,
    /// Display time as `H:MM`; no date or zone.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    pub users: Vec<UserRef>,
}

impl Reaction {
    pub fn has_user(&self, name: &str) -> bool {
        self.users.iter().any(|user| user.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub image: String,
    #[serde(default)]
    pub badge: Option<String>,
    pub author: UserRef,
    pub caption: String,
    #[serde(default)]
    pub text_overlay: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: u32,
    pub name: String,
    pub department: String,
    pub specialty_text: String,
    pub hours: String,
    pub distance: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub rating: f32,
    pub reviews: u32,
    pub available_now: bool,
    pub status: String,
}

impl Hospital {
    pub fn coordinates_or_fallback(&self) -> Coordinates {
        self.coordinates.unwrap_or(Coordinates::FALLBACK)
    }

    /// Parses the display distance ("250m", "1.2km") into meters for sorting.
    pub fn distance_meters(&self) -> Option<f32> {
        let raw = self.distance.trim();
        if let Some(km) = raw.strip_suffix("km") {
            km.trim().parse::<f32>().ok().map(|v| v * 1000.0)
        } else if let Some(m) = raw.strip_suffix('m') {
            m.trim().parse::<f32>().ok()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub experience: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewKeyword {
    pub label: String,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: u32,
    pub code: String,
    pub patient: UserRef,
    pub hospital_name: String,
    pub visit_date: String,
    pub visit_time: String,
    pub doctor: String,
    pub memo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitKind {
    Hospital,
    Pharmacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalVisit {
    pub id: u32,
    pub kind: VisitKind,
    pub name: String,
    pub visit_date: String,
    pub day_of_week: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitType {
    FirstVisit,
    Revisit,
}

impl VisitType {
    pub fn label(self) -> &'static str {
        match self {
            VisitType::FirstVisit => "첫방문",
            VisitType::Revisit => "재방문",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub hospital_name: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub visit_type: VisitType,
    pub day_of_week: String,
    pub tags: Vec<String>,
    pub content: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_images_resolve_to_fallback() {
        let mut failed = HashSet::new();
        assert_eq!(resolve_image("https://a/b.png", &failed), "https://a/b.png");
        failed.insert("https://a/b.png".to_string());
        assert_eq!(resolve_image("https://a/b.png", &failed), FALLBACK_IMAGE);
        assert_eq!(resolve_image("", &failed), FALLBACK_IMAGE);
    }

    #[test]
    fn distance_parses_meters_and_kilometers() {
        let mut hospital = crate::seed::hospitals().remove(0);
        hospital.distance = "250m".into();
        assert_eq!(hospital.distance_meters(), Some(250.0));
        hospital.distance = "1.5km".into();
        assert_eq!(hospital.distance_meters(), Some(1500.0));
        hospital.distance = "near".into();
        assert_eq!(hospital.distance_meters(), None);
    }
}
