use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use eframe::egui::{self, Context};
use log::{error, info, warn};
use wellnest_core::config::WellnestPaths;
use wellnest_core::models::Hospital;
use wellnest_core::prefs::JsonPreferenceStore;
use wellnest_core::upload::{CapturedImage, NoCameraDevices};
use wellnest_core::{AppState, CommunityFeed, MountedPage, Page, UploadFlow, WellnestConfig};

use crate::image_loader::{self, ImageCache};
use crate::theme;

mod messages;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{MapState, PageState, Persisted, SeedData};

/// Owned copy of the mounted page so rendering can borrow `self` mutably.
enum Route {
    Home(String),
    Community,
    Hospital,
    HospitalDetail(Hospital),
    Upload,
    Profile(String),
    MedicalHistory,
    MyReviews,
}

impl From<MountedPage<'_>> for Route {
    fn from(page: MountedPage<'_>) -> Self {
        match page {
            MountedPage::Home { user_name } => Route::Home(user_name.to_string()),
            MountedPage::Community => Route::Community,
            MountedPage::Hospital => Route::Hospital,
            MountedPage::HospitalDetail(hospital) => Route::HospitalDetail(hospital.clone()),
            MountedPage::Upload => Route::Upload,
            MountedPage::Profile { user_name } => Route::Profile(user_name.to_string()),
            MountedPage::MedicalHistory => Route::MedicalHistory,
            MountedPage::MyReviews => Route::MyReviews,
        }
    }
}

pub struct WellnestApp {
    config: WellnestConfig,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    session: AppState,
    feed: CommunityFeed,
    prefs: JsonPreferenceStore,
    upload: Option<UploadFlow<NoCameraDevices>>,
    map: MapState,
    images: ImageCache,
    seed: SeedData,
    pages: PageState,
    persisted: Persisted,
    info_banner: Option<String>,
}

fn load_config() -> WellnestConfig {
    WellnestConfig::from_env().unwrap_or_else(|err| {
        error!("failed to load configuration, using local defaults: {err:#}");
        let paths = WellnestPaths::from_base_dir(".wellnest").unwrap_or_default();
        WellnestConfig::new(paths)
    })
}

impl WellnestApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        theme::apply(&cc.egui_ctx);
        let config = load_config();
        info!("data directory: {}", config.paths.data_dir.display());

        let persisted: Persisted = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let (tx, rx) = mpsc::channel();

        let mut pages = PageState::default();
        pages.login_name = persisted.last_user_name.clone();

        Self {
            session: AppState::new(config.default_user_name.clone()),
            feed: CommunityFeed::from_seed(config.ui.reaction_burst),
            prefs: JsonPreferenceStore::open(&config.paths.prefs_path),
            upload: None,
            map: MapState::new(config.ui.map_load_timeout),
            images: ImageCache::default(),
            seed: SeedData::load(),
            pages,
            persisted,
            info_banner: None,
            config,
            tx,
            rx,
        }
    }

    fn process_messages(&mut self, ctx: &Context) {
        messages::process_messages(self, ctx);
    }

    pub(crate) fn login(&mut self) {
        self.session.login(&self.pages.login_name);
        self.persisted.last_user_name = self.session.user_name().to_string();
        self.sync_page();
    }

    pub(crate) fn logout(&mut self) {
        self.session.logout();
        self.sync_page();
    }

    pub(crate) fn navigate(&mut self, page: Page) {
        match self.session.change_page(page) {
            Ok(()) => self.sync_page(),
            Err(err) => {
                warn!("navigation to {page:?} refused: {err}");
                self.info_banner = Some(err.to_string());
            }
        }
    }

    pub(crate) fn go_back(&mut self) {
        self.session.go_back();
        self.sync_page();
    }

    pub(crate) fn open_hospital(&mut self, hospital: Hospital) {
        self.session.select_hospital(hospital);
        self.map = MapState::new(self.config.ui.map_load_timeout);
        self.sync_page();
    }

    /// Mounts or tears down page-owned resources after any route change.
    /// Dropping the upload flow releases the camera.
    fn sync_page(&mut self) {
        match self.session.current_page() {
            Page::Upload if self.session.is_logged_in() => {
                if self.upload.is_none() {
                    self.pages.upload = Default::default();
                    self.upload = Some(UploadFlow::with_placeholder(
                        NoCameraDevices,
                        &self.prefs,
                        self.config.ui.placeholder_image.clone(),
                    ));
                }
            }
            _ => {
                if self.upload.take().is_some() {
                    info!("upload page closed");
                }
            }
        }
    }

    pub(crate) fn react(&mut self, ctx: &Context, emoji: &str, post_id: wellnest_core::models::PostId) {
        let ticket = self.feed.add_reaction(emoji, post_id);
        tasks::schedule_burst_reset(
            self.tx.clone(),
            ctx.clone(),
            ticket,
            self.feed.burst().duration(),
        );
    }

    pub(crate) fn pick_gallery_image(&mut self, ctx: &Context) {
        if self.pages.upload.picking_gallery {
            return;
        }
        self.pages.upload.picking_gallery = true;
        tasks::pick_gallery_image(self.tx.clone(), ctx.clone());
    }

    /// Rebuilds the preview texture for an in-memory capture. Remote
    /// placeholders go through the regular image cache instead.
    pub(crate) fn refresh_upload_preview(&mut self, ctx: &Context) {
        self.pages.upload.preview = None;
        let Some(bytes) = self
            .upload
            .as_ref()
            .and_then(UploadFlow::image)
            .and_then(CapturedImage::bytes)
        else {
            return;
        };
        match image_loader::decode(bytes) {
            Ok(image) => {
                let color = egui::ColorImage::from_rgba_unmultiplied(image.size, &image.pixels);
                self.pages.upload.preview =
                    Some(ctx.load_texture("upload-preview", color, egui::TextureOptions::LINEAR));
            }
            Err(err) => warn!("could not decode upload preview: {err}"),
        }
    }

    fn poll_map(&mut self, ctx: &Context, hospital: &Hospital) {
        let now = Instant::now();
        if self.map.loader.begin(now) {
            let view = wellnest_core::map::MapView::for_hospital(hospital);
            self.map.tile = Some(tasks::load_map_tile(view.center_tile().url()));
        }
        let finished = self
            .map
            .tile
            .as_ref()
            .and_then(|promise| promise.ready())
            .cloned();
        if let Some(result) = finished {
            self.map.tile = None;
            match result {
                Ok(image) => {
                    self.map.loader.mark_ready();
                    if self.map.loader.is_ready() {
                        let color =
                            egui::ColorImage::from_rgba_unmultiplied(image.size, &image.pixels);
                        self.map.texture =
                            Some(ctx.load_texture("map-tile", color, egui::TextureOptions::LINEAR));
                    }
                }
                Err(err) => self.map.loader.mark_failed(err),
            }
        }
        self.map.loader.poll(now);
        if self.map.tile.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn shows_bottom_bar(&self) -> bool {
        self.session.shows_tab_bar()
            || (self.session.current_page() == Page::Community && self.feed.show_bottom_nav())
    }
}

impl eframe::App for WellnestApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages(ctx);
        self.feed.poll_burst(Instant::now());

        if let Some(message) = self.info_banner.clone() {
            egui::TopBottomPanel::top("info_banner").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(theme::ALERT, message.as_str());
                    if ui.small_button("닫기").clicked() {
                        self.info_banner = None;
                    }
                });
            });
        }

        let Some(route) = self.session.mounted().map(Route::from) else {
            egui::CentralPanel::default().show(ctx, |ui| self.render_login(ui));
            return;
        };

        if self.shows_bottom_bar() {
            egui::TopBottomPanel::bottom("tab_bar").show(ctx, |ui| self.render_tab_bar(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::Home(user_name) => self.render_home(ui, &user_name),
            Route::Community => self.render_community(ui),
            Route::Hospital => self.render_hospital_search(ui),
            Route::HospitalDetail(hospital) => {
                self.poll_map(ui.ctx(), &hospital);
                self.render_hospital_detail(ui, &hospital);
            }
            Route::Upload => self.render_upload(ui),
            Route::Profile(user_name) => self.render_profile(ui, &user_name),
            Route::MedicalHistory => self.render_medical_history(ui),
            Route::MyReviews => self.render_my_reviews(ui),
        });

        self.render_reaction_burst(ctx);
        if let Some(remaining) = self.feed.burst().remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.persisted);
    }
}
