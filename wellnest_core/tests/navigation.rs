use pretty_assertions::assert_eq;
use wellnest_core::error::NavigationError;
use wellnest_core::{seed, AppState, MountedPage, Page};

fn session() -> AppState {
    let mut state = AppState::new(seed::DEFAULT_USER_NAME);
    state.login("김웰리");
    state
}

#[test]
fn detail_page_requires_a_selected_hospital() {
    let mut state = session();
    assert_eq!(
        state.change_page(Page::HospitalDetail),
        Err(NavigationError::NoHospitalSelected)
    );
    assert_eq!(state.current_page(), Page::Home);
    assert_eq!(
        state.mounted(),
        Some(MountedPage::Home {
            user_name: "김웰리"
        })
    );
}

#[test]
fn selecting_a_hospital_mounts_its_detail_page() {
    let mut state = session();
    let hospital = seed::hospitals().remove(0);
    state.select_hospital(hospital.clone());

    assert_eq!(state.current_page(), Page::HospitalDetail);
    assert_eq!(state.mounted(), Some(MountedPage::HospitalDetail(&hospital)));
}

#[test]
fn selection_survives_leaving_the_detail_page() {
    let mut state = session();
    state.select_hospital(seed::hospitals().remove(3));
    state.change_page(Page::Community).expect("community");
    state.change_page(Page::HospitalDetail).expect("detail again");
    assert_eq!(
        state.selected_hospital().map(|hospital| hospital.id),
        Some(4)
    );
}

#[test]
fn exactly_one_page_is_mounted_per_tag() {
    let mut state = session();
    let cases = [
        (Page::Community, MountedPage::Community),
        (Page::Hospital, MountedPage::Hospital),
        (Page::Upload, MountedPage::Upload),
        (Page::MedicalHistory, MountedPage::MedicalHistory),
        (Page::MyReviews, MountedPage::MyReviews),
        (
            Page::Profile,
            MountedPage::Profile {
                user_name: "김웰리",
            },
        ),
    ];
    for (page, expected) in cases {
        state.change_page(page).expect("navigate");
        assert_eq!(state.mounted(), Some(expected));
    }
}

#[test]
fn tab_bar_only_on_home_and_profile() {
    let mut state = session();
    let mut visible = Vec::new();
    for page in Page::TABS {
        state.change_page(page).expect("navigate");
        if state.shows_tab_bar() {
            visible.push(page);
        }
    }
    assert_eq!(visible, vec![Page::Home, Page::Profile]);
}
