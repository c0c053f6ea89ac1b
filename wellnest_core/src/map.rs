//! Coordinates, directions links, and the load lifecycle of the embedded map.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::Hospital;

const DIRECTIONS_BASE: &str = "https://map.kakao.com/link/to/";
const TILE_URL_BASE: &str = "https://tile.openstreetmap.org";
const TILE_SIZE: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Seoul City Hall; used when a hospital has no coordinates.
    pub const FALLBACK: Coordinates = Coordinates {
        lat: 37.5665,
        lng: 126.978,
    };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub marker: Coordinates,
    pub level: u8,
}

impl MapView {
    pub fn for_hospital(hospital: &Hospital) -> Self {
        let point = hospital.coordinates_or_fallback();
        Self {
            center: point,
            marker: point,
            level: 3,
        }
    }

    /// Web-mercator zoom roughly matching the widget's level scale.
    pub fn zoom(&self) -> u8 {
        19u8.saturating_sub(self.level)
    }

    pub fn center_tile(&self) -> TilePosition {
        TilePosition::locate(self.center, self.zoom())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePosition {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
    /// Offset of the located point inside the tile, in pixels.
    pub pixel: (f32, f32),
}

impl TilePosition {
    pub fn locate(at: Coordinates, zoom: u8) -> Self {
        let n = f64::from(1u32 << zoom);
        let lat = at.lat.clamp(-85.0511, 85.0511).to_radians();
        let fx = (at.lng + 180.0) / 360.0 * n;
        let fy = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n;
        let x = fx.floor();
        let y = fy.floor();
        Self {
            zoom,
            x: x as u32,
            y: y as u32,
            pixel: (
                ((fx - x) * TILE_SIZE) as f32,
                ((fy - y) * TILE_SIZE) as f32,
            ),
        }
    }

    pub fn url(&self) -> String {
        format!("{TILE_URL_BASE}/{}/{}/{}.png", self.zoom, self.x, self.y)
    }
}

/// Link that opens turn-by-turn directions to `name` in the external map app.
pub fn directions_url(name: &str, at: Coordinates) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(DIRECTIONS_BASE)?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .push(&format!("{name},{},{}", at.lat, at.lng));
    }
    Ok(url)
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapWidgetState {
    Idle,
    Loading { since: Instant },
    Ready,
    TimedOut,
    Failed(String),
}

/// Best-effort loader state for the map widget. Timeouts and failures are
/// only logged; the map area simply stays empty.
#[derive(Debug, Clone)]
pub struct MapWidgetLoader {
    state: MapWidgetState,
    timeout: Duration,
}

impl MapWidgetLoader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: MapWidgetState::Idle,
            timeout,
        }
    }

    pub fn state(&self) -> &MapWidgetState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == MapWidgetState::Ready
    }

    /// Starts loading unless a load is already in flight or finished.
    pub fn begin(&mut self, now: Instant) -> bool {
        if matches!(self.state, MapWidgetState::Idle) {
            self.state = MapWidgetState::Loading { since: now };
            true
        } else {
            false
        }
    }

    pub fn mark_ready(&mut self) {
        if matches!(self.state, MapWidgetState::Loading { .. }) {
            info!("map widget ready");
            self.state = MapWidgetState::Ready;
        }
    }

    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        if matches!(self.state, MapWidgetState::Loading { .. }) {
            let reason = reason.into();
            warn!("map widget failed to load: {reason}");
            self.state = MapWidgetState::Failed(reason);
        }
    }

    pub fn poll(&mut self, now: Instant) -> &MapWidgetState {
        if let MapWidgetState::Loading { since } = self.state {
            if now.duration_since(since) >= self.timeout {
                warn!(
                    "map widget initialisation timed out after {:?}",
                    self.timeout
                );
                self.state = MapWidgetState::TimedOut;
            }
        }
        &self.state
    }
}
