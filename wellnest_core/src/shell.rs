//! Top-level session and routing state. Exactly one page is mounted at a
//! time; pages mutate this only through the handlers below.

use log::info;

use crate::error::NavigationError;
use crate::models::Hospital;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Community,
    Hospital,
    HospitalDetail,
    Upload,
    Profile,
    MedicalHistory,
    MyReviews,
}

impl Page {
    /// Pages reachable from the bottom navigation bar.
    pub const TABS: [Page; 4] = [Page::Home, Page::Community, Page::Hospital, Page::Profile];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "홈",
            Page::Community => "커뮤니티",
            Page::Hospital => "병원찾기",
            Page::HospitalDetail => "병원 정보",
            Page::Upload => "사진 올리기",
            Page::Profile => "내 정보",
            Page::MedicalHistory => "건강 내역",
            Page::MyReviews => "나의 후기",
        }
    }

    /// Where each page's back button leads.
    pub fn parent(self) -> Page {
        match self {
            Page::HospitalDetail => Page::Hospital,
            Page::Upload => Page::Community,
            Page::MedicalHistory | Page::MyReviews => Page::Profile,
            _ => Page::Home,
        }
    }
}

/// The page the shell currently renders, with whatever it needs borrowed
/// from the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MountedPage<'a> {
    Home { user_name: &'a str },
    Community,
    Hospital,
    HospitalDetail(&'a Hospital),
    Upload,
    Profile { user_name: &'a str },
    MedicalHistory,
    MyReviews,
}

#[derive(Debug, Clone)]
pub struct AppState {
    logged_in: bool,
    user_name: String,
    current_page: Page,
    selected_hospital: Option<Hospital>,
    default_user_name: String,
}

impl AppState {
    pub fn new(default_user_name: impl Into<String>) -> Self {
        let default_user_name = default_user_name.into();
        Self {
            logged_in: false,
            user_name: default_user_name.clone(),
            current_page: Page::Home,
            selected_hospital: None,
            default_user_name,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn selected_hospital(&self) -> Option<&Hospital> {
        self.selected_hospital.as_ref()
    }

    pub fn login(&mut self, name: &str) {
        let name = name.trim();
        self.user_name = if name.is_empty() {
            self.default_user_name.clone()
        } else {
            name.to_string()
        };
        self.logged_in = true;
        info!("logged in as {}", self.user_name);
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        self.current_page = Page::Home;
        self.selected_hospital = None;
        self.user_name = self.default_user_name.clone();
        info!("logged out");
    }

    pub fn change_page(&mut self, page: Page) -> Result<(), NavigationError> {
        if !self.logged_in {
            return Err(NavigationError::NotLoggedIn);
        }
        if page == Page::HospitalDetail && self.selected_hospital.is_none() {
            return Err(NavigationError::NoHospitalSelected);
        }
        if self.current_page != page {
            info!("navigate {:?} -> {:?}", self.current_page, page);
        }
        self.current_page = page;
        Ok(())
    }

    pub fn select_hospital(&mut self, hospital: Hospital) {
        info!("selected hospital {} ({})", hospital.name, hospital.id);
        self.selected_hospital = Some(hospital);
        self.current_page = Page::HospitalDetail;
    }

    pub fn go_back(&mut self) {
        self.current_page = self.current_page.parent();
    }

    pub fn mounted(&self) -> Option<MountedPage<'_>> {
        if !self.logged_in {
            return None;
        }
        let page = match self.current_page {
            Page::Home => MountedPage::Home {
                user_name: &self.user_name,
            },
            Page::Community => MountedPage::Community,
            Page::Hospital => MountedPage::Hospital,
            Page::HospitalDetail => MountedPage::HospitalDetail(self.selected_hospital.as_ref()?),
            Page::Upload => MountedPage::Upload,
            Page::Profile => MountedPage::Profile {
                user_name: &self.user_name,
            },
            Page::MedicalHistory => MountedPage::MedicalHistory,
            Page::MyReviews => MountedPage::MyReviews,
        };
        Some(page)
    }

    /// Whether the shared bottom navigation bar belongs on the current page.
    pub fn shows_tab_bar(&self) -> bool {
        matches!(self.current_page, Page::Home | Page::Profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn logged_in() -> AppState {
        let mut state = AppState::new(seed::DEFAULT_USER_NAME);
        state.login("홍길동");
        state
    }

    #[test]
    fn nothing_is_mounted_before_login() {
        let mut state = AppState::new(seed::DEFAULT_USER_NAME);
        assert_eq!(state.mounted(), None);
        assert_eq!(
            state.change_page(Page::Community),
            Err(NavigationError::NotLoggedIn)
        );
    }

    #[test]
    fn blank_login_keeps_default_name() {
        let mut state = AppState::new(seed::DEFAULT_USER_NAME);
        state.login("   ");
        assert!(state.is_logged_in());
        assert_eq!(state.user_name(), seed::DEFAULT_USER_NAME);
    }

    #[test]
    fn back_edges_follow_page_hierarchy() {
        let mut state = logged_in();
        state.select_hospital(seed::hospitals().remove(1));
        state.go_back();
        assert_eq!(state.current_page(), Page::Hospital);
        state.go_back();
        assert_eq!(state.current_page(), Page::Home);

        state.change_page(Page::MyReviews).expect("navigate");
        state.go_back();
        assert_eq!(state.current_page(), Page::Profile);
    }

    #[test]
    fn logout_clears_session() {
        let mut state = logged_in();
        state.select_hospital(seed::hospitals().remove(0));
        state.logout();
        assert!(!state.is_logged_in());
        assert!(state.selected_hospital().is_none());
        assert_eq!(state.current_page(), Page::Home);
        assert_eq!(state.user_name(), seed::DEFAULT_USER_NAME);
    }
}
