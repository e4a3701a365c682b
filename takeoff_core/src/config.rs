//! # Takeoff Configuration
//!
//! Standard opening sizes, finish-system coverage rates and default wall
//! heights. A [`TakeoffConfig`] is built once (usually `TakeoffConfig::default()`)
//! and handed to the calculators explicitly.
//!
//! ## Standard Table
//!
//! | Item         | Value                         |
//! |--------------|-------------------------------|
//! | Door         | 3 ft x 7 ft = 21 sf           |
//! | Window       | 3 ft x 4 ft = 12 sf           |
//! | Primer       | 1 coat @ 400 sf/gal           |
//! | Finish paint | 2 coats @ 400 sf/gal          |
//! | Wallcovering | 30 sf/roll                    |
//! | Wall heights | standard 8, tall 9, high 10 ft |
//!
//! ## TOML Overrides
//!
//! Every key is optional; anything left out keeps the standard value.
//!
//! ```toml
//! [finish_systems.paint.finish]
//! coats = 2
//! coverage = 350.0
//!
//! [finish_systems.wallcovering]
//! coverage = 28.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Feet, SqFt};

/// Standard door width (ft)
pub const DOOR_WIDTH_FT: f64 = 3.0;
/// Standard door height (ft)
pub const DOOR_HEIGHT_FT: f64 = 7.0;
/// Standard window width (ft)
pub const WINDOW_WIDTH_FT: f64 = 3.0;
/// Standard window height (ft)
pub const WINDOW_HEIGHT_FT: f64 = 4.0;

/// Primer and finish-paint spread rate (sf/gal)
pub const PAINT_COVERAGE_SQFT_PER_GAL: f64 = 400.0;
/// Wallcovering yield (sf/roll)
pub const WALLCOVERING_COVERAGE_SQFT_PER_ROLL: f64 = 30.0;

/// Environment variable naming a TOML override file
pub const CONFIG_ENV_VAR: &str = "PAINTPILOT_CONFIG";

/// A rectangular opening deducted from wall area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningSpec {
    pub width_ft: f64,
    pub height_ft: f64,
}

impl OpeningSpec {
    pub const fn new(width_ft: f64, height_ft: f64) -> Self {
        OpeningSpec { width_ft, height_ft }
    }

    /// Opening area; derived, never stored
    pub fn area(&self) -> SqFt {
        Feet(self.width_ft).times_height(Feet(self.height_ft))
    }
}

/// Door and window sizes assumed for every counted opening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardOpenings {
    pub door: OpeningSpec,
    pub window: OpeningSpec,
}

impl Default for StandardOpenings {
    fn default() -> Self {
        StandardOpenings {
            door: OpeningSpec::new(DOOR_WIDTH_FT, DOOR_HEIGHT_FT),
            window: OpeningSpec::new(WINDOW_WIDTH_FT, WINDOW_HEIGHT_FT),
        }
    }
}

/// One product applied in one or more coats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoatSpec {
    /// Number of coats; multiplies the gallons required
    pub coats: u32,
    /// Spread rate per coat (sf/gal)
    pub coverage: f64,
}

impl CoatSpec {
    pub const fn new(coats: u32, coverage: f64) -> Self {
        CoatSpec { coats, coverage }
    }
}

/// Primer + finish paint system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintSystem {
    pub primer: CoatSpec,
    pub finish: CoatSpec,
}

impl Default for PaintSystem {
    fn default() -> Self {
        PaintSystem {
            primer: CoatSpec::new(1, PAINT_COVERAGE_SQFT_PER_GAL),
            finish: CoatSpec::new(2, PAINT_COVERAGE_SQFT_PER_GAL),
        }
    }
}

/// Wallcovering yield per roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallcoveringSystem {
    /// Usable square feet per roll
    pub coverage: f64,
}

impl Default for WallcoveringSystem {
    fn default() -> Self {
        WallcoveringSystem {
            coverage: WALLCOVERING_COVERAGE_SQFT_PER_ROLL,
        }
    }
}

/// Coverage tables for every supported finish system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishSystems {
    pub paint: PaintSystem,
    pub wallcovering: WallcoveringSystem,
}

/// Typical ceiling heights used when a plan gives none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultWallHeights {
    pub standard: f64,
    pub tall: f64,
    pub high: f64,
}

impl Default for DefaultWallHeights {
    fn default() -> Self {
        DefaultWallHeights {
            standard: 8.0,
            tall: 9.0,
            high: 10.0,
        }
    }
}

/// Named wall-height class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallHeightClass {
    Standard,
    Tall,
    High,
}

impl DefaultWallHeights {
    /// Height in feet for a class
    pub fn get(&self, class: WallHeightClass) -> f64 {
        match class {
            WallHeightClass::Standard => self.standard,
            WallHeightClass::Tall => self.tall,
            WallHeightClass::High => self.high,
        }
    }
}

/// Everything the calculators need besides the rooms themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeoffConfig {
    pub openings: StandardOpenings,
    pub finish_systems: FinishSystems,
    pub wall_heights: DefaultWallHeights,
}

impl TakeoffConfig {
    /// Parse a TOML override document and validate it.
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let config: TakeoffConfig = toml::from_str(source).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid takeoff config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject rates that would divide by zero or go negative.
    pub fn validate(&self) -> CalcResult<()> {
        let coverages = [
            ("finish_systems.paint.primer.coverage", self.finish_systems.paint.primer.coverage),
            ("finish_systems.paint.finish.coverage", self.finish_systems.paint.finish.coverage),
            ("finish_systems.wallcovering.coverage", self.finish_systems.wallcovering.coverage),
        ];
        for (field, value) in coverages {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Coverage must be positive"));
            }
        }

        let coats = [
            ("finish_systems.paint.primer.coats", self.finish_systems.paint.primer.coats),
            ("finish_systems.paint.finish.coats", self.finish_systems.paint.finish.coats),
        ];
        for (field, value) in coats {
            if value == 0 {
                return Err(CalcError::invalid_input(field, "0", "At least one coat is required"));
            }
        }

        let dimensions = [
            ("openings.door.width_ft", self.openings.door.width_ft),
            ("openings.door.height_ft", self.openings.door.height_ft),
            ("openings.window.width_ft", self.openings.window.width_ft),
            ("openings.window.height_ft", self.openings.window.height_ft),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Opening dimensions cannot be negative",
                ));
            }
        }

        Ok(())
    }
}

/// Load a TOML override file.
pub fn load_config(path: &Path) -> CalcResult<TakeoffConfig> {
    let source = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read config", path.display().to_string(), e.to_string()))?;
    let config = TakeoffConfig::from_toml_str(&source)?;
    tracing::debug!(path = %path.display(), "Loaded takeoff config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_opening_areas() {
        let openings = StandardOpenings::default();
        assert_eq!(openings.door.area(), SqFt(21.0));
        assert_eq!(openings.window.area(), SqFt(12.0));
    }

    #[test]
    fn test_standard_finish_systems() {
        let systems = FinishSystems::default();
        assert_eq!(systems.paint.primer, CoatSpec::new(1, 400.0));
        assert_eq!(systems.paint.finish, CoatSpec::new(2, 400.0));
        assert_eq!(systems.wallcovering.coverage, 30.0);
    }

    #[test]
    fn test_wall_height_classes() {
        let heights = DefaultWallHeights::default();
        assert_eq!(heights.get(WallHeightClass::Standard), 8.0);
        assert_eq!(heights.get(WallHeightClass::Tall), 9.0);
        assert_eq!(heights.get(WallHeightClass::High), 10.0);
    }

    #[test]
    fn test_empty_toml_is_standard_table() {
        let config = TakeoffConfig::from_toml_str("").unwrap();
        assert_eq!(config, TakeoffConfig::default());
    }

    #[test]
    fn test_partial_toml_override() {
        let config = TakeoffConfig::from_toml_str(
            r#"
            [finish_systems.paint.finish]
            coats = 3
            coverage = 350.0

            [openings.door]
            width_ft = 3.0
            height_ft = 8.0
            "#,
        )
        .unwrap();

        assert_eq!(config.finish_systems.paint.finish, CoatSpec::new(3, 350.0));
        assert_eq!(config.finish_systems.paint.primer, CoatSpec::new(1, 400.0));
        assert_eq!(config.openings.door.area(), SqFt(24.0));
        assert_eq!(config.openings.window.area(), SqFt(12.0));
        assert_eq!(config.finish_systems.wallcovering.coverage, 30.0);
    }

    #[test]
    fn test_zero_coverage_rejected() {
        let err = TakeoffConfig::from_toml_str(
            r#"
            [finish_systems.wallcovering]
            coverage = 0.0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_zero_coats_rejected() {
        let mut config = TakeoffConfig::default();
        config.finish_systems.paint.primer.coats = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = TakeoffConfig::from_toml_str("[finish_systems\ncoverage = ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/paintpilot.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
