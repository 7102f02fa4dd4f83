//! Watermark region geometry and one-time HD→SD calibration.
//!
//! The operator supplies a single rectangle in HD pixel space. The
//! `CalibrationContext` remaps it once into SD pixel space using the frame
//! dimensions of the first matched pair, and that context is then reused for
//! every pair in the batch.

use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// A rectangle in a single frame's pixel coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl WatermarkRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Checks that the rectangle has a positive size and lies within a frame
    /// of the given dimensions.
    pub fn validate(&self, frame_width: u32, frame_height: u32) -> CoreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidRegion(format!(
                "Region size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.fits_within(frame_width, frame_height) {
            return Err(CoreError::InvalidRegion(format!(
                "Region {}x{}+{}+{} exceeds frame bounds {}x{}",
                self.width, self.height, self.x, self.y, frame_width, frame_height
            )));
        }
        Ok(())
    }

    /// Returns true when the rectangle lies entirely inside a frame of the
    /// given dimensions. Uses checked arithmetic so degenerate rectangles
    /// near `u32::MAX` cannot wrap around.
    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        let right = match self.x.checked_add(self.width) {
            Some(v) => v,
            None => return false,
        };
        let bottom = match self.y.checked_add(self.height) {
            Some(v) => v,
            None => return false,
        };
        right <= frame_width && bottom <= frame_height
    }
}

impl std::str::FromStr for WatermarkRegion {
    type Err = String;

    /// Parses "X,Y,W,H" (e.g. "1520,40,320,90").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected X,Y,W,H, got '{s}'"));
        }
        let values: Result<Vec<u32>, _> = parts.iter().map(|p| p.parse::<u32>()).collect();
        let values = values.map_err(|e| format!("invalid region value in '{s}': {e}"))?;
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// The fixed HD region and its SD remap, computed once per batch run.
///
/// Scale factors come from the frame dimensions of the first matched pair
/// only. Batches mixing resolutions will mis-scale for later pairs; the
/// pipeline does not recalibrate per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationContext {
    /// Operator-selected rectangle in HD pixel space
    pub hd: WatermarkRegion,
    /// The same rectangle remapped into SD pixel space
    pub sd: WatermarkRegion,
}

impl CalibrationContext {
    /// Remaps `hd_region` into SD pixel space by independent horizontal and
    /// vertical scale factors, truncating each scaled value.
    ///
    /// `hd_dims` and `sd_dims` are `(width, height)` of the two reference
    /// frames. The HD region is validated against the HD frame bounds; an SD
    /// region that falls outside the SD frame is left to fail per frame at
    /// patch time rather than here.
    pub fn calibrate(
        hd_region: WatermarkRegion,
        hd_dims: (u32, u32),
        sd_dims: (u32, u32),
    ) -> CoreResult<Self> {
        let (hd_w, hd_h) = hd_dims;
        let (sd_w, sd_h) = sd_dims;
        if hd_w == 0 || hd_h == 0 {
            return Err(CoreError::InvalidRegion(format!(
                "HD reference frame has degenerate dimensions {hd_w}x{hd_h}"
            )));
        }
        hd_region.validate(hd_w, hd_h)?;

        let scale_x = f64::from(sd_w) / f64::from(hd_w);
        let scale_y = f64::from(sd_h) / f64::from(hd_h);

        let sd = WatermarkRegion::new(
            (f64::from(hd_region.x) * scale_x) as u32,
            (f64::from(hd_region.y) * scale_y) as u32,
            (f64::from(hd_region.width) * scale_x) as u32,
            (f64::from(hd_region.height) * scale_y) as u32,
        );

        Ok(Self { hd: hd_region, sd })
    }
}

/// Source of the operator-selected watermark rectangle.
///
/// The interactive surface (a drag gesture over the reference frame) lives
/// outside the core; implementations receive the extracted reference frame
/// image and return one rectangle in that frame's pixel coordinates. Invoked
/// exactly once per batch run.
pub trait RegionProvider {
    fn select_region(&self, reference_frame: &Path) -> CoreResult<WatermarkRegion>;
}

/// Region provider returning a rectangle known up front (e.g. from CLI
/// arguments or tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedRegionProvider(pub WatermarkRegion);

impl RegionProvider for FixedRegionProvider {
    fn select_region(&self, _reference_frame: &Path) -> CoreResult<WatermarkRegion> {
        Ok(self.0)
    }
}
