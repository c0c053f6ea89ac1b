//! Narrow interface to the platform's camera stack.

use image::RgbaImage;
use log::debug;

use crate::error::MediaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Front camera.
    User,
    /// Back camera.
    #[default]
    Environment,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Facing::User => Facing::Environment,
            Facing::Environment => Facing::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingConstraint {
    /// Used when only one camera exists, so the request cannot fail on facing.
    Unconstrained,
    Facing(Facing),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInput {
    pub device_id: String,
    pub label: String,
}

pub trait MediaStream {
    fn grab_frame(&mut self) -> Result<RgbaImage, MediaError>;
    fn stop(&mut self);
    fn is_live(&self) -> bool;
}

pub trait MediaDevices {
    fn enumerate_video_inputs(&self) -> Result<Vec<VideoInput>, MediaError>;
    fn acquire(&mut self, constraint: FacingConstraint) -> Result<Box<dyn MediaStream>, MediaError>;
}

/// Owns an acquired capture stream and stops it when released or dropped,
/// so the device is freed on every exit path.
pub struct ActiveStream {
    inner: Box<dyn MediaStream>,
}

impl ActiveStream {
    pub fn new(inner: Box<dyn MediaStream>) -> Self {
        Self { inner }
    }

    pub fn grab_frame(&mut self) -> Result<RgbaImage, MediaError> {
        self.inner.grab_frame()
    }

    pub fn is_live(&self) -> bool {
        self.inner.is_live()
    }

    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.inner.is_live() {
            debug!("stopping capture stream");
            self.inner.stop();
        }
    }
}

impl Drop for ActiveStream {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ActiveStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveStream")
            .field("live", &self.inner.is_live())
            .finish()
    }
}

/// Backend for hosts without any capture support: there are never devices,
/// which routes the upload screen to its gallery and placeholder paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCameraDevices;

impl MediaDevices for NoCameraDevices {
    fn enumerate_video_inputs(&self) -> Result<Vec<VideoInput>, MediaError> {
        Ok(Vec::new())
    }

    fn acquire(&mut self, _constraint: FacingConstraint) -> Result<Box<dyn MediaStream>, MediaError> {
        Err(MediaError::NotFound)
    }
}
