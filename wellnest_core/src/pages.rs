//! Page-local state for the screens that only filter or present seed data.

use std::cmp::Ordering;

use url::Url;

use crate::map::{directions_url, MapView};
use crate::models::{Doctor, Hospital, MedicalRecord, MedicalVisit, ReviewKeyword};
use crate::shell::Page;

const NIGHT_CARE_STATUS: &str = "야간진료";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
    #[default]
    Distance,
    Department,
    AvailableNow,
    NightCare,
    /// Shown as a chip but carries no data to filter on.
    Injection,
}

impl SearchFilter {
    pub const ALL: [SearchFilter; 5] = [
        SearchFilter::Distance,
        SearchFilter::Department,
        SearchFilter::AvailableNow,
        SearchFilter::NightCare,
        SearchFilter::Injection,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchFilter::Distance => "거리순",
            SearchFilter::Department => "진료종",
            SearchFilter::AvailableNow => "즉시접수",
            SearchFilter::NightCare => "야간진료",
            SearchFilter::Injection => "약/주사",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalSearch {
    pub query: String,
    pub filter: SearchFilter,
}

impl HospitalSearch {
    pub fn results<'a>(&self, hospitals: &'a [Hospital]) -> Vec<&'a Hospital> {
        let query = self.query.trim();
        let mut results: Vec<&Hospital> = hospitals
            .iter()
            .filter(|hospital| {
                query.is_empty()
                    || hospital.name.contains(query)
                    || hospital.department.contains(query)
            })
            .collect();

        match self.filter {
            SearchFilter::Distance => results.sort_by(|a, b| compare_distance(a, b)),
            SearchFilter::Department => results.sort_by(|a, b| a.department.cmp(&b.department)),
            SearchFilter::AvailableNow => results.retain(|hospital| hospital.available_now),
            SearchFilter::NightCare => results.retain(|hospital| hospital.status == NIGHT_CARE_STATUS),
            SearchFilter::Injection => {}
        }
        results
    }
}

/// Unparseable distances sort last.
fn compare_distance(a: &Hospital, b: &Hospital) -> Ordering {
    match (a.distance_meters(), b.distance_meters()) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub struct HospitalDetailView<'a> {
    pub hospital: &'a Hospital,
    pub doctors: Vec<Doctor>,
    pub keywords: Vec<ReviewKeyword>,
    pub map: MapView,
}

impl<'a> HospitalDetailView<'a> {
    pub fn new(hospital: &'a Hospital, doctors: Vec<Doctor>, keywords: Vec<ReviewKeyword>) -> Self {
        Self {
            hospital,
            doctors,
            keywords,
            map: MapView::for_hospital(hospital),
        }
    }

    pub fn directions(&self) -> Result<Url, url::ParseError> {
        directions_url(&self.hospital.name, self.map.marker)
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1} ({})", self.hospital.rating, self.hospital.reviews)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryTab {
    #[default]
    Treatment,
    Medical,
}

impl HistoryTab {
    pub fn label(self) -> &'static str {
        match self {
            HistoryTab::Treatment => "진료내역",
            HistoryTab::Medical => "의료내역",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    /// Period search chip. Date ranges are not modelled, so it lists everything.
    Period,
    Patient(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalHistory {
    pub tab: HistoryTab,
    pub filter: HistoryFilter,
}

impl MedicalHistory {
    /// Patient names for the filter chips, in first-seen order.
    pub fn patients(records: &[MedicalRecord]) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in records {
            if !names.contains(&record.patient.name.as_str()) {
                names.push(&record.patient.name);
            }
        }
        names
    }

    /// Selecting the active chip again clears it.
    pub fn toggle_filter(&mut self, filter: HistoryFilter) {
        self.filter = if self.filter == filter {
            HistoryFilter::All
        } else {
            filter
        };
    }

    pub fn records<'a>(&self, records: &'a [MedicalRecord]) -> Vec<&'a MedicalRecord> {
        records
            .iter()
            .filter(|record| match &self.filter {
                HistoryFilter::All | HistoryFilter::Period => true,
                HistoryFilter::Patient(name) => record.patient.name == *name,
            })
            .collect()
    }

    pub fn visits<'a>(&self, visits: &'a [MedicalVisit]) -> Vec<&'a MedicalVisit> {
        visits.iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileMenuItem {
    pub label: &'static str,
    pub target: Option<Page>,
}

/// Rows on the profile screen; rows without a target are display-only.
pub const PROFILE_MENU: [ProfileMenuItem; 5] = [
    ProfileMenuItem {
        label: "진료 이력",
        target: Some(Page::MedicalHistory),
    },
    ProfileMenuItem {
        label: "건강검진 내역",
        target: Some(Page::MedicalHistory),
    },
    ProfileMenuItem {
        label: "나의 후기",
        target: Some(Page::MyReviews),
    },
    ProfileMenuItem {
        label: "공지사항",
        target: None,
    },
    ProfileMenuItem {
        label: "고객센터",
        target: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Coordinates;
    use crate::seed;
    use pretty_assertions::assert_eq;

    fn names<'a>(hospitals: &[&'a Hospital]) -> Vec<&'a str> {
        hospitals.iter().map(|hospital| hospital.name.as_str()).collect()
    }

    #[test]
    fn distance_filter_sorts_nearest_first() {
        let mut hospitals = seed::hospitals();
        hospitals.reverse();
        let search = HospitalSearch::default();
        assert_eq!(
            names(&search.results(&hospitals)),
            vec![
                "매일건강의원",
                "365클리닉 강남본점",
                "사랑니쏙쏙 강남본점",
                "강남예쁜이치과의원"
            ]
        );
    }

    #[test]
    fn night_care_and_query_narrow_results() {
        let hospitals = seed::hospitals();
        let search = HospitalSearch {
            query: String::new(),
            filter: SearchFilter::NightCare,
        };
        assert_eq!(names(&search.results(&hospitals)), vec!["사랑니쏙쏙 강남본점"]);

        let search = HospitalSearch {
            query: " 치과 ".into(),
            filter: SearchFilter::AvailableNow,
        };
        assert_eq!(names(&search.results(&hospitals)), vec!["강남예쁜이치과의원"]);
    }

    #[test]
    fn detail_view_falls_back_to_default_coordinates() {
        let hospitals = seed::hospitals();
        let view = HospitalDetailView::new(&hospitals[2], seed::doctors(), seed::review_keywords());
        assert_eq!(view.map.center, Coordinates::FALLBACK);
        assert!(view
            .directions()
            .expect("url")
            .as_str()
            .starts_with("https://map.kakao.com/link/to/"));
        assert_eq!(view.rating_label(), "4.9 (456)");
    }

    #[test]
    fn patient_chip_filters_and_toggles_off() {
        let records = seed::medical_records();
        let mut history = MedicalHistory::default();
        assert_eq!(
            MedicalHistory::patients(&records),
            vec!["김웰리", "박승희", "김동석"]
        );

        history.toggle_filter(HistoryFilter::Patient("박승희".into()));
        let filtered = history.records(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].hospital_name, "강남세브란스병원");

        history.toggle_filter(HistoryFilter::Patient("박승희".into()));
        assert_eq!(history.filter, HistoryFilter::All);
        assert_eq!(history.records(&records).len(), 3);
    }

    #[test]
    fn profile_menu_routes_to_profile_children() {
        for item in PROFILE_MENU.iter().filter_map(|item| item.target) {
            assert_eq!(item.parent(), Page::Profile);
        }
    }
}
