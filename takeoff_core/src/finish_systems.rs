//! # Finish Systems
//!
//! Material calculators: net wall area in, paint gallons or wallcovering rolls
//! out. Areas are clamped at zero before use, so nothing here goes negative.
//!
//! Rounding is part of the result, not display formatting:
//!
//! - paint: primer, finish and total each rounded to 2 decimals, with the
//!   total summed from the *unrounded* primer and finish
//! - wallcovering: rolls rounded to 1 decimal
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::config::FinishSystems;
//! use takeoff_core::finish_systems::calculate_paint_materials;
//! use takeoff_core::units::{Gallons, SqFt};
//!
//! let paint = calculate_paint_materials(SqFt(400.0), &FinishSystems::default().paint);
//! assert_eq!(paint.primer_gallons, Gallons(1.0));
//! assert_eq!(paint.finish_gallons, Gallons(2.0));
//! assert_eq!(paint.total_gallons, Gallons(3.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{CoatSpec, FinishSystems, PaintSystem, WallcoveringSystem};
use crate::rooms::FinishType;
use crate::units::{Gallons, Rolls, SqFt};

/// Decimal places kept on gallon quantities
pub const GALLON_DECIMALS: usize = 2;
/// Decimal places kept on roll quantities
pub const ROLL_DECIMALS: usize = 1;

/// Paint quantities for one room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintMaterials {
    pub primer_gallons: Gallons,
    pub finish_gallons: Gallons,
    pub total_gallons: Gallons,
}

/// Wallcovering quantity for one room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallcoveringMaterials {
    pub rolls: Rolls,
}

/// Material quantities, tagged by finish system.
///
/// ## JSON Serialization
///
/// ```json
/// {"type": "paint", "primer_gallons": 1.38, "finish_gallons": 2.76, "total_gallons": 4.14}
/// {"type": "wallcovering", "rolls": 15.3}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Materials {
    Paint(PaintMaterials),
    Wallcovering(WallcoveringMaterials),
}

impl Materials {
    /// Finish system these quantities belong to
    pub fn finish_type(&self) -> FinishType {
        match self {
            Materials::Paint(_) => FinishType::Paint,
            Materials::Wallcovering(_) => FinishType::Wallcovering,
        }
    }

    pub fn as_paint(&self) -> Option<&PaintMaterials> {
        match self {
            Materials::Paint(p) => Some(p),
            Materials::Wallcovering(_) => None,
        }
    }

    pub fn as_wallcovering(&self) -> Option<&WallcoveringMaterials> {
        match self {
            Materials::Wallcovering(w) => Some(w),
            Materials::Paint(_) => None,
        }
    }
}

fn gallons_for(area: SqFt, coat: &CoatSpec) -> Gallons {
    Gallons(area.value() * f64::from(coat.coats) / coat.coverage)
}

/// Primer + finish gallons for a wall area.
pub fn calculate_paint_materials(area: SqFt, system: &PaintSystem) -> PaintMaterials {
    let area = area.non_negative();
    let primer = gallons_for(area, &system.primer);
    let finish = gallons_for(area, &system.finish);
    let total = primer + finish;

    PaintMaterials {
        primer_gallons: primer.rounded(GALLON_DECIMALS),
        finish_gallons: finish.rounded(GALLON_DECIMALS),
        total_gallons: total.rounded(GALLON_DECIMALS),
    }
}

/// Wallcovering rolls for a wall area.
pub fn calculate_wallcovering_materials(area: SqFt, system: &WallcoveringSystem) -> WallcoveringMaterials {
    let area = area.non_negative();
    WallcoveringMaterials {
        rolls: Rolls(area.value() / system.coverage).rounded(ROLL_DECIMALS),
    }
}

/// Dispatch to the calculator for `finish_type`.
pub fn calculate_materials(net_area: SqFt, finish_type: FinishType, systems: &FinishSystems) -> Materials {
    match finish_type {
        FinishType::Paint => Materials::Paint(calculate_paint_materials(net_area, &systems.paint)),
        FinishType::Wallcovering => {
            Materials::Wallcovering(calculate_wallcovering_materials(net_area, &systems.wallcovering))
        }
    }
}
