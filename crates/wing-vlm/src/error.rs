use std::fmt;

use thiserror::Error;

/// Where a geometry problem was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// Planform parameters as a whole.
    Planform,
    /// Spanwise mesh station `j` (0 = root).
    Station(usize),
    /// Spanwise panel `j`, between stations `j` and `j + 1`.
    Panel(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Planform => write!(f, "planform"),
            Location::Station(j) => write!(f, "station {j}"),
            Location::Panel(j) => write!(f, "panel {j}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VlmError {
    /// Bad planform input, too few stations, or a collapsed panel. Fatal.
    #[error("degenerate geometry at {location}: {reason}")]
    DegenerateGeometry { location: Location, reason: String },

    /// The influence matrix cannot be inverted reliably. Fatal.
    #[error("singular influence system ({size}x{size}), pivot ratio {pivot_ratio:e}")]
    SingularSystem { size: usize, pivot_ratio: f64 },

    #[error("invalid flow condition: {0}")]
    InvalidFlow(String),
}

impl VlmError {
    pub(crate) fn geometry(location: Location, reason: impl Into<String>) -> Self {
        VlmError::DegenerateGeometry { location, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, VlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_panel() {
        let err = VlmError::geometry(Location::Panel(3), "normal collapsed");
        assert_eq!(err.to_string(), "degenerate geometry at panel 3: normal collapsed");
    }
}
