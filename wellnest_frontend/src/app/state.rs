use std::time::Duration;

use eframe::egui::TextureHandle;
use poll_promise::Promise;
use serde::{Deserialize, Serialize};
use wellnest_core::map::MapWidgetLoader;
use wellnest_core::models::{
    Doctor, Hospital, MedicalRecord, MedicalVisit, Review, ReviewKeyword,
};
use wellnest_core::pages::{HospitalSearch, MedicalHistory};
use wellnest_core::seed;
use wellnest_core::upload::AnnotationKind;

use crate::image_loader::LoadedImage;

/// Survives restarts through eframe storage.
#[derive(Default, Serialize, Deserialize)]
pub struct Persisted {
    pub last_user_name: String,
}

/// Read-only catalogue the pages render from.
pub struct SeedData {
    pub hospitals: Vec<Hospital>,
    pub doctors: Vec<Doctor>,
    pub keywords: Vec<ReviewKeyword>,
    pub records: Vec<MedicalRecord>,
    pub visits: Vec<MedicalVisit>,
    pub reviews: Vec<Review>,
}

impl SeedData {
    pub fn load() -> Self {
        Self {
            hospitals: seed::hospitals(),
            doctors: seed::doctors(),
            keywords: seed::review_keywords(),
            records: seed::medical_records(),
            visits: seed::medical_visits(),
            reviews: seed::reviews(),
        }
    }
}

pub struct MapState {
    pub loader: MapWidgetLoader,
    pub tile: Option<Promise<Result<LoadedImage, String>>>,
    pub texture: Option<TextureHandle>,
}

impl MapState {
    pub fn new(timeout: Duration) -> Self {
        Self {
            loader: MapWidgetLoader::new(timeout),
            tile: None,
            texture: None,
        }
    }
}

pub struct UploadInputs {
    pub caption: String,
    pub annotation_kind: AnnotationKind,
    pub annotation_text: String,
    pub picking_gallery: bool,
    pub preview: Option<TextureHandle>,
}

impl Default for UploadInputs {
    fn default() -> Self {
        Self {
            caption: String::new(),
            annotation_kind: AnnotationKind::Text,
            annotation_text: String::new(),
            picking_gallery: false,
            preview: None,
        }
    }
}

#[derive(Default)]
pub struct PageState {
    pub login_name: String,
    pub search: HospitalSearch,
    pub history: MedicalHistory,
    pub upload: UploadInputs,
}
