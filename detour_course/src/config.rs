// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Course configuration and its validation errors.

use kurbo::Size;

/// Viewport and culling settings for a [`Course`](crate::Course).
///
/// Construct with struct-update syntax over [`Default`]:
///
/// ```
/// use detour_course::CourseConfig;
///
/// let config = CourseConfig {
///     cull_margin: 16.0,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CourseConfig {
    /// Visible screen area in pixels. The horizontal scroll offset maps world
    /// `x` to screen `x - offset`; `y` is shared.
    pub viewport: Size,
    /// Extra pixels kept on both sides of the viewport when collecting
    /// visible obstacles.
    pub cull_margin: f64,
}

impl CourseConfig {
    /// The game's native screen size.
    pub const SCREEN: Size = Size::new(138.0, 224.0);

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Size { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        if !(self.cull_margin.is_finite() && self.cull_margin >= 0.0) {
            return Err(ConfigError::InvalidCullMargin(self.cull_margin));
        }
        Ok(())
    }
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            viewport: Self::SCREEN,
            cull_margin: 0.0,
        }
    }
}

/// Rejected [`CourseConfig`] value.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The viewport has a non-finite or non-positive side.
    #[error("viewport must be finite and positive, got {width}x{height}")]
    InvalidViewport {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// The cull margin is negative or not finite.
    #[error("cull margin must be finite and non-negative, got {0}")]
    InvalidCullMargin(f64),
}
