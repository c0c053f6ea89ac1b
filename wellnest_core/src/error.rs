use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("hospital detail requested without a selected hospital")]
    NoHospitalSelected,
    #[error("not logged in")]
    NotLoggedIn,
}

/// Failures reported by a media capture backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("no capture device found")]
    NotFound,
    #[error("camera access was denied")]
    NotAllowed,
    #[error("camera failure: {0}")]
    Other(String),
}

/// What the upload screen tells the user when the camera cannot be used.
/// None of these are fatal; gallery selection keeps working.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("사용 가능한 카메라가 없습니다.")]
    NoDevice,
    #[error("카메라를 찾을 수 없습니다. 갤러리에서 사진을 업로드해주세요.")]
    NotFound,
    #[error("카메라 접근 권한이 거부되었습니다.")]
    PermissionDenied,
    #[error("카메라를 시작할 수 없습니다. 갤러리를 이용해주세요.")]
    Unavailable(String),
}

impl From<MediaError> for CameraError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::NotFound => CameraError::NotFound,
            MediaError::NotAllowed => CameraError::PermissionDenied,
            MediaError::Other(reason) => CameraError::Unavailable(reason),
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not read the selected image: {0}")]
    Gallery(String),
    #[error("could not capture a frame: {0}")]
    Capture(#[from] MediaError),
    #[error("could not encode the captured frame: {0}")]
    Encode(#[from] image::ImageError),
    #[error("{0} is not available in the current capture mode")]
    InvalidMode(&'static str),
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}
