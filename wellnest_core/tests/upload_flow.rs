use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use wellnest_core::community::PostDraft;
use wellnest_core::error::{MediaError, UploadError};
use wellnest_core::prefs::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
use wellnest_core::upload::{
    AnnotationKind, CaptureMode, FacingConstraint, MediaDevices, MediaStream, NoCameraDevices,
    PermissionOutcome, VideoInput,
};
use wellnest_core::{CommunityFeed, UploadFlow};

#[derive(Clone, Default)]
struct Counters {
    acquired: Arc<AtomicUsize>,
    stopped: Arc<AtomicUsize>,
}

impl Counters {
    fn live(&self) -> usize {
        self.acquired.load(Ordering::SeqCst) - self.stopped.load(Ordering::SeqCst)
    }
}

struct Webcam {
    live: bool,
    counters: Counters,
}

impl MediaStream for Webcam {
    fn grab_frame(&mut self) -> Result<RgbaImage, MediaError> {
        Ok(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])))
    }

    fn stop(&mut self) {
        self.live = false;
        self.counters.stopped.fetch_add(1, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

struct Webcams {
    count: usize,
    counters: Counters,
}

impl MediaDevices for Webcams {
    fn enumerate_video_inputs(&self) -> Result<Vec<VideoInput>, MediaError> {
        Ok((0..self.count)
            .map(|n| VideoInput {
                device_id: n.to_string(),
                label: format!("webcam {n}"),
            })
            .collect())
    }

    fn acquire(&mut self, _constraint: FacingConstraint) -> Result<Box<dyn MediaStream>, MediaError> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(Webcam {
            live: true,
            counters: self.counters.clone(),
        }))
    }
}

struct BrokenEnumeration;

impl MediaDevices for BrokenEnumeration {
    fn enumerate_video_inputs(&self) -> Result<Vec<VideoInput>, MediaError> {
        Err(MediaError::Other("device busy".into()))
    }

    fn acquire(&mut self, _constraint: FacingConstraint) -> Result<Box<dyn MediaStream>, MediaError> {
        Err(MediaError::Other("device busy".into()))
    }
}

fn png() -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(5, 5, Rgba([1, 2, 3, 255])))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

#[test]
fn gallery_selection_stops_an_active_stream() {
    let counters = Counters::default();
    let devices = Webcams {
        count: 2,
        counters: counters.clone(),
    };
    let mut flow = UploadFlow::open(devices, &MemoryPreferenceStore::visited());
    assert!(flow.has_live_stream());
    assert_eq!(counters.live(), 1);

    flow.select_gallery(png()).expect("gallery");
    assert_eq!(flow.mode(), CaptureMode::Captured);
    assert!(!flow.has_live_stream());
    assert_eq!(counters.live(), 0);
    assert_eq!(flow.image().and_then(|image| image.dimensions()), Some((5, 5)));
}

#[test]
fn failed_gallery_read_changes_nothing() {
    let counters = Counters::default();
    let devices = Webcams {
        count: 1,
        counters: counters.clone(),
    };
    let mut flow = UploadFlow::open(devices, &MemoryPreferenceStore::visited());

    let err = flow.select_gallery(b"\x00\x01\x02".to_vec()).unwrap_err();
    assert!(matches!(err, UploadError::Gallery(_)));
    assert_eq!(flow.mode(), CaptureMode::Idle);
    assert!(flow.image().is_none());
    assert_eq!(counters.live(), 1);
}

#[test]
fn every_exit_path_releases_the_camera() {
    let counters = Counters::default();
    let devices = Webcams {
        count: 2,
        counters: counters.clone(),
    };
    let mut flow = UploadFlow::open(devices, &MemoryPreferenceStore::visited());
    flow.switch_camera();
    flow.switch_camera();
    assert_eq!(counters.live(), 1);
    drop(flow);
    assert_eq!(counters.acquired.load(Ordering::SeqCst), 3);
    assert_eq!(counters.live(), 0);
}

#[test]
fn enumeration_failure_still_allows_capture() {
    let mut flow = UploadFlow::open(BrokenEnumeration, &MemoryPreferenceStore::visited());
    let message = flow.camera_error().expect("classified error").to_string();
    assert_eq!(message, "카메라를 시작할 수 없습니다. 갤러리를 이용해주세요.");
    flow.capture_at(42).expect("placeholder capture");
    assert_eq!(flow.mode(), CaptureMode::Captured);
}

#[test]
fn permission_prompt_is_shown_once() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("data").join("prefs.json");

    let mut prefs = JsonPreferenceStore::open(&path);
    let mut flow = UploadFlow::open(NoCameraDevices, &prefs);
    assert!(matches!(flow.mode(), CaptureMode::Permission(_)));
    flow.allow_permission(&mut prefs);
    assert_eq!(flow.allow_permission(&mut prefs), PermissionOutcome::Granted);
    drop(flow);

    let reopened = JsonPreferenceStore::open(&path);
    assert!(reopened.has_visited());
    let flow = UploadFlow::open(NoCameraDevices, &reopened);
    assert_eq!(flow.mode(), CaptureMode::Idle);
}

#[test]
fn annotated_capture_publishes_to_the_feed() {
    let mut flow = UploadFlow::with_placeholder(
        NoCameraDevices,
        &MemoryPreferenceStore::visited(),
        "https://images.example.com/health?q=walk",
    );
    flow.capture_at(99).expect("capture");
    flow.edit().expect("edit");
    flow.set_annotation(AnnotationKind::Health, "걸음 수 10,000").expect("annotate");
    flow.set_annotation(AnnotationKind::Text, "오늘도 화이팅").expect("annotate");
    flow.close_detail().expect("close");

    let draft = flow.build_draft("산책 인증").expect("draft");
    assert_eq!(
        draft,
        PostDraft {
            image: "https://images.example.com/health?q=walk&99".into(),
            caption: "산책 인증".into(),
            text_overlay: Some("오늘도 화이팅".into()),
            health: Some("걸음 수 10,000".into()),
            ..PostDraft::default()
        }
    );

    let mut feed = CommunityFeed::from_seed(std::time::Duration::from_secs(2));
    let id = feed.publish(draft);
    assert_eq!(feed.posts()[0].id, id);
    assert_eq!(feed.posts()[0].caption, "산책 인증");
}
