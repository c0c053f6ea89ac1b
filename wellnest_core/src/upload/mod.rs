//! Photo upload screen: one-time permission prompt, live camera capture
//! with gallery fallback, and the annotation sub-mode.
//!
//! The capture stream is held in an [`ActiveStream`], so leaving `Idle`,
//! switching cameras, and dropping the flow all release the device.

mod image;
mod media;

pub use self::image::{decode_data_uri, read_gallery_file, CapturedImage, ImageSource};
pub use self::media::{
    ActiveStream, Facing, FacingConstraint, MediaDevices, MediaStream, NoCameraDevices, VideoInput,
};

use log::{debug, info, warn};

use crate::community::PostDraft;
use crate::config::DEFAULT_PLACEHOLDER_IMAGE;
use crate::error::{CameraError, UploadError};
use crate::prefs::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionPrompt {
    Camera,
    Gallery,
}

impl PermissionPrompt {
    pub fn title(self) -> &'static str {
        match self {
            PermissionPrompt::Camera => "카메라 접근 허용",
            PermissionPrompt::Gallery => "사진 접근 허용",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            PermissionPrompt::Camera => "사진을 촬영하려면 카메라 접근 권한이 필요합니다.",
            PermissionPrompt::Gallery => "갤러리에서 사진을 선택하려면 사진 접근 권한이 필요합니다.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Permission(PermissionPrompt),
    Idle,
    Captured,
    DetailAdjust,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Pending(PermissionPrompt),
    Granted,
    /// The user refused; the caller navigates away from the upload page.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraStatus {
    #[default]
    Unknown,
    Available {
        devices: usize,
    },
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Text,
    Location,
    Weather,
    Time,
    Health,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 5] = [
        AnnotationKind::Text,
        AnnotationKind::Location,
        AnnotationKind::Weather,
        AnnotationKind::Time,
        AnnotationKind::Health,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnnotationKind::Text => "텍스트",
            AnnotationKind::Location => "위치",
            AnnotationKind::Weather => "날씨",
            AnnotationKind::Time => "시간",
            AnnotationKind::Health => "건강",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostAnnotations {
    pub text: Option<String>,
    pub location: Option<String>,
    pub weather: Option<String>,
    pub time: Option<String>,
    pub health: Option<String>,
}

impl PostAnnotations {
    pub fn get(&self, kind: AnnotationKind) -> Option<&str> {
        self.slot(kind).as_deref()
    }

    fn slot(&self, kind: AnnotationKind) -> &Option<String> {
        match kind {
            AnnotationKind::Text => &self.text,
            AnnotationKind::Location => &self.location,
            AnnotationKind::Weather => &self.weather,
            AnnotationKind::Time => &self.time,
            AnnotationKind::Health => &self.health,
        }
    }

    fn slot_mut(&mut self, kind: AnnotationKind) -> &mut Option<String> {
        match kind {
            AnnotationKind::Text => &mut self.text,
            AnnotationKind::Location => &mut self.location,
            AnnotationKind::Weather => &mut self.weather,
            AnnotationKind::Time => &mut self.time,
            AnnotationKind::Health => &mut self.health,
        }
    }
}

/// Result of pressing the shutter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured,
    /// Pressed again on a captured image: the post is ready to publish.
    Upload(PostDraft),
}

pub struct UploadFlow<D: MediaDevices> {
    devices: D,
    mode: CaptureMode,
    camera: CameraStatus,
    facing: Facing,
    stream: Option<ActiveStream>,
    image: Option<CapturedImage>,
    annotations: PostAnnotations,
    camera_error: Option<CameraError>,
    placeholder_image: String,
}

impl<D: MediaDevices> UploadFlow<D> {
    pub fn open(devices: D, prefs: &impl PreferenceStore) -> Self {
        Self::with_placeholder(devices, prefs, DEFAULT_PLACEHOLDER_IMAGE)
    }

    pub fn with_placeholder(
        devices: D,
        prefs: &impl PreferenceStore,
        placeholder_image: impl Into<String>,
    ) -> Self {
        let mut flow = Self {
            devices,
            mode: CaptureMode::Permission(PermissionPrompt::Camera),
            camera: CameraStatus::Unknown,
            facing: Facing::default(),
            stream: None,
            image: None,
            annotations: PostAnnotations::default(),
            camera_error: None,
            placeholder_image: placeholder_image.into(),
        };
        if prefs.has_visited() {
            flow.enter_idle();
        }
        flow
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn camera_status(&self) -> CameraStatus {
        self.camera
    }

    pub fn camera_error(&self) -> Option<&CameraError> {
        self.camera_error.as_ref()
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    pub fn annotations(&self) -> &PostAnnotations {
        &self.annotations
    }

    pub fn devices(&self) -> &D {
        &self.devices
    }

    pub fn has_live_stream(&self) -> bool {
        self.stream.as_ref().is_some_and(ActiveStream::is_live)
    }

    pub fn can_switch_camera(&self) -> bool {
        self.mode == CaptureMode::Idle
            && matches!(self.camera, CameraStatus::Available { devices } if devices > 1)
    }

    pub fn allow_permission(&mut self, prefs: &mut impl PreferenceStore) -> PermissionOutcome {
        match self.mode {
            CaptureMode::Permission(PermissionPrompt::Camera) => {
                self.mode = CaptureMode::Permission(PermissionPrompt::Gallery);
                PermissionOutcome::Pending(PermissionPrompt::Gallery)
            }
            CaptureMode::Permission(PermissionPrompt::Gallery) => {
                if let Err(err) = prefs.mark_visited() {
                    warn!("could not persist permission prompt state: {err}");
                }
                self.enter_idle();
                PermissionOutcome::Granted
            }
            _ => PermissionOutcome::Granted,
        }
    }

    pub fn deny_permission(&mut self) -> PermissionOutcome {
        info!("upload permission denied");
        self.release_stream("permission denied");
        PermissionOutcome::Leave
    }

    fn enter_idle(&mut self) {
        self.mode = CaptureMode::Idle;
        self.start_camera();
    }

    pub fn start_camera(&mut self) {
        self.release_stream("restart");

        let inputs = match self.devices.enumerate_video_inputs() {
            Ok(inputs) => inputs,
            Err(err) => {
                warn!("video input enumeration failed: {err}");
                self.camera_error = Some(err.into());
                return;
            }
        };
        if inputs.is_empty() {
            warn!("no video input devices found");
            self.camera = CameraStatus::Unavailable;
            self.camera_error = Some(CameraError::NoDevice);
            return;
        }
        self.camera = CameraStatus::Available {
            devices: inputs.len(),
        };

        let constraint = if inputs.len() > 1 {
            FacingConstraint::Facing(self.facing)
        } else {
            FacingConstraint::Unconstrained
        };
        match self.devices.acquire(constraint) {
            Ok(stream) => {
                debug!("acquired capture stream with {constraint:?}");
                self.stream = Some(ActiveStream::new(stream));
                self.camera_error = None;
            }
            Err(err) => {
                warn!("could not acquire camera: {err}");
                self.camera_error = Some(err.into());
            }
        }
    }

    pub fn switch_camera(&mut self) -> bool {
        if !self.can_switch_camera() {
            return false;
        }
        self.facing = self.facing.flipped();
        self.start_camera();
        true
    }

    pub fn capture(&mut self) -> Result<CaptureOutcome, UploadError> {
        self.capture_at(chrono::Utc::now().timestamp_millis())
    }

    /// Shutter action. `millis` only feeds the placeholder cache-buster.
    pub fn capture_at(&mut self, millis: i64) -> Result<CaptureOutcome, UploadError> {
        match self.mode {
            CaptureMode::Idle => {}
            CaptureMode::Captured => {
                let draft = self.build_draft("").ok_or(UploadError::InvalidMode("upload"))?;
                info!("uploading captured image");
                return Ok(CaptureOutcome::Upload(draft));
            }
            _ => return Err(UploadError::InvalidMode("capture")),
        }

        let image = match self.stream.as_mut() {
            Some(stream) if stream.is_live() => {
                let frame = stream.grab_frame()?;
                CapturedImage::from_frame(&frame)?
            }
            _ => {
                debug!("no live camera, using placeholder image");
                CapturedImage::remote(format!("{}&{millis}", self.placeholder_image))
            }
        };
        self.release_stream("captured");
        self.image = Some(image);
        self.mode = CaptureMode::Captured;
        Ok(CaptureOutcome::Captured)
    }

    /// Replaces the current image with one picked from the gallery. On a
    /// decode failure nothing changes, including a live stream.
    pub fn select_gallery(&mut self, bytes: Vec<u8>) -> Result<(), UploadError> {
        if !matches!(self.mode, CaptureMode::Idle | CaptureMode::Captured) {
            return Err(UploadError::InvalidMode("gallery selection"));
        }
        let image = CapturedImage::from_gallery_bytes(bytes).map_err(|err| {
            warn!("gallery selection failed: {err}");
            err
        })?;
        self.release_stream("gallery selected");
        self.image = Some(image);
        self.mode = CaptureMode::Captured;
        Ok(())
    }

    pub fn edit(&mut self) -> Result<(), UploadError> {
        if self.mode != CaptureMode::Captured {
            return Err(UploadError::InvalidMode("edit"));
        }
        self.mode = CaptureMode::DetailAdjust;
        Ok(())
    }

    pub fn close_detail(&mut self) -> Result<(), UploadError> {
        if self.mode != CaptureMode::DetailAdjust {
            return Err(UploadError::InvalidMode("close detail"));
        }
        self.mode = CaptureMode::Captured;
        Ok(())
    }

    /// Blank values clear the annotation.
    pub fn set_annotation(&mut self, kind: AnnotationKind, value: &str) -> Result<(), UploadError> {
        if self.mode != CaptureMode::DetailAdjust {
            return Err(UploadError::InvalidMode("annotation"));
        }
        let value = value.trim();
        *self.annotations.slot_mut(kind) = (!value.is_empty()).then(|| value.to_string());
        Ok(())
    }

    pub fn build_draft(&self, caption: &str) -> Option<PostDraft> {
        let image = self.image.as_ref()?;
        let annotations = self.annotations.clone();
        Some(PostDraft {
            image: image.to_image_ref(),
            caption: caption.trim().to_string(),
            text_overlay: annotations.text,
            location: annotations.location,
            weather: annotations.weather,
            time: annotations.time,
            health: annotations.health,
        })
    }

    fn release_stream(&mut self, reason: &str) {
        if let Some(stream) = self.stream.take() {
            debug!("releasing capture stream: {reason}");
            stream.stop();
        }
    }
}

impl<D: MediaDevices> Drop for UploadFlow<D> {
    fn drop(&mut self) {
        self.release_stream("upload page closed");
    }
}
