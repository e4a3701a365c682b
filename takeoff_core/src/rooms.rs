//! # Room Data
//!
//! Input records for a takeoff, as produced by plan extraction.
//!
//! ```text
//! RoomsData
//! ├── project: Option<String>
//! ├── floor: Option<String>
//! └── rooms: Vec<Room>   (absent key -> empty)
//! ```
//!
//! Room dimensions and opening counts are taken as given. Negative values are
//! clamped by the calculator rather than rejected here. A room missing one of
//! `id`, `name`, `length`, `width` or `height` fails the whole load.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "project": "AC Wallcovering Office",
//!   "floor": "2nd Floor",
//!   "rooms": [
//!     {"id": "201", "name": "Conference A", "length": 20, "width": 15,
//!      "height": 9, "doors": 2, "windows": 3, "finish_type": "paint"}
//!   ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Finish system applied to a room's walls.
///
/// Parsing is deliberately forgiving: only `"wallcovering"` (any case) selects
/// [`FinishType::Wallcovering`]; every other string, `null`, or a missing key
/// means paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishType {
    #[default]
    Paint,
    Wallcovering,
}

impl FinishType {
    pub const ALL: [FinishType; 2] = [FinishType::Paint, FinishType::Wallcovering];

    /// Resolve a raw finish tag, defaulting to paint.
    ///
    /// ```rust
    /// use takeoff_core::rooms::FinishType;
    ///
    /// assert_eq!(FinishType::from_tag(Some("WallCovering")), FinishType::Wallcovering);
    /// assert_eq!(FinishType::from_tag(Some("epoxy")), FinishType::Paint);
    /// assert_eq!(FinishType::from_tag(None), FinishType::Paint);
    /// ```
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::to_lowercase).as_deref() {
            Some("wallcovering") => FinishType::Wallcovering,
            _ => FinishType::Paint,
        }
    }

    /// Lowercase tag used in JSON and spreadsheet cells
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishType::Paint => "paint",
            FinishType::Wallcovering => "wallcovering",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FinishType::Paint => "Paint",
            FinishType::Wallcovering => "Wallcovering",
        }
    }
}

impl fmt::Display for FinishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FinishType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(FinishType::from_tag(tag.as_deref()))
    }
}

/// A single room as extracted from a floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room number or tag (e.g., "201"); not required to be unique
    pub id: String,

    /// Human-readable name (e.g., "Conference A")
    pub name: String,

    /// Plan length in feet
    pub length: f64,

    /// Plan width in feet
    pub width: f64,

    /// Wall height in feet
    pub height: f64,

    /// Number of standard doors
    #[serde(default)]
    pub doors: i64,

    /// Number of standard windows
    #[serde(default)]
    pub windows: i64,

    /// Finish system for the walls
    #[serde(default)]
    pub finish_type: FinishType,
}

impl Room {
    /// Create a room with no openings, finished in paint.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        length: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Room {
            id: id.into(),
            name: name.into(),
            length,
            width,
            height,
            doors: 0,
            windows: 0,
            finish_type: FinishType::Paint,
        }
    }

    /// Set the door and window counts
    pub fn with_openings(mut self, doors: i64, windows: i64) -> Self {
        self.doors = doors;
        self.windows = windows;
        self
    }

    /// Set the finish system
    pub fn with_finish(mut self, finish_type: FinishType) -> Self {
        self.finish_type = finish_type;
        self
    }
}

/// A plan's worth of rooms plus optional project labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomsData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,

    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl RoomsData {
    /// Parse rooms from JSON.
    ///
    /// Structural problems (a room without `length`, a string where a number
    /// belongs) are errors; nothing is skipped.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        serde_json::from_str(json).map_err(|e| CalcError::from_json(&e))
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
