use super::Geometry;
use serde::{Deserialize, Serialize};
use x11_dl::xlib;

/// One windowing region. The table order is significant: index 0 is the
/// primary monitor and carries the bar.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Monitor {
    pub geometry: Geometry,
}

impl Monitor {
    #[must_use]
    pub const fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.geometry.contains_point(x, y)
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self {
            geometry: Geometry::new(0, 0, 800, 600),
        }
    }
}

impl From<Geometry> for Monitor {
    fn from(geometry: Geometry) -> Self {
        Self { geometry }
    }
}

impl From<&x11_dl::xrandr::XRRMonitorInfo> for Monitor {
    fn from(info: &x11_dl::xrandr::XRRMonitorInfo) -> Self {
        Self {
            geometry: Geometry::new(info.x, info.y, info.width, info.height),
        }
    }
}

impl From<&x11_dl::xinerama::XineramaScreenInfo> for Monitor {
    fn from(info: &x11_dl::xinerama::XineramaScreenInfo) -> Self {
        Self {
            geometry: Geometry::new(
                info.x_org.into(),
                info.y_org.into(),
                info.width.into(),
                info.height.into(),
            ),
        }
    }
}

impl From<&xlib::XWindowAttributes> for Monitor {
    fn from(attributes: &xlib::XWindowAttributes) -> Self {
        Self {
            geometry: Geometry::new(
                attributes.x,
                attributes.y,
                attributes.width,
                attributes.height,
            ),
        }
    }
}
