//! # Takeoff Summary
//!
//! Project totals for the bid package, per finish system.
//!
//! Totals are sums of the *already-rounded* per-room values, rounded once
//! more at the end. This can differ by a cent from rounding the raw sum, and
//! matches what the per-room rows in the workbook add up to.

use serde::{Deserialize, Serialize};

use crate::calculator::{TakeoffResult, AREA_DECIMALS};
use crate::finish_systems::{Materials, GALLON_DECIMALS, ROLL_DECIMALS};
use crate::units::{Gallons, Rolls, SqFt};

/// Paint totals across all paint rooms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaintTotals {
    pub rooms: usize,
    pub net_area: SqFt,
    pub primer_gallons: Gallons,
    pub finish_gallons: Gallons,
    pub total_gallons: Gallons,
}

/// Wallcovering totals across all wallcovering rooms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WallcoveringTotals {
    pub rooms: usize,
    pub net_area: SqFt,
    pub rolls: Rolls,
}

/// Project-level totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TakeoffSummary {
    /// Net area over every room regardless of finish
    pub total_net_area: SqFt,
    pub paint: PaintTotals,
    pub wallcovering: WallcoveringTotals,
}

impl TakeoffSummary {
    /// Aggregate per-room results.
    ///
    /// ```rust
    /// use takeoff_core::summary::TakeoffSummary;
    ///
    /// let summary = TakeoffSummary::from_results(&[]);
    /// assert_eq!(summary.room_count(), 0);
    /// ```
    pub fn from_results(results: &[TakeoffResult]) -> Self {
        let mut summary = TakeoffSummary::default();

        for result in results {
            summary.total_net_area = summary.total_net_area + result.net_area;
            match &result.materials {
                Materials::Paint(p) => {
                    let paint = &mut summary.paint;
                    paint.rooms += 1;
                    paint.net_area = paint.net_area + result.net_area;
                    paint.primer_gallons = paint.primer_gallons + p.primer_gallons;
                    paint.finish_gallons = paint.finish_gallons + p.finish_gallons;
                    paint.total_gallons = paint.total_gallons + p.total_gallons;
                }
                Materials::Wallcovering(w) => {
                    let wc = &mut summary.wallcovering;
                    wc.rooms += 1;
                    wc.net_area = wc.net_area + result.net_area;
                    wc.rolls = wc.rolls + w.rolls;
                }
            }
        }

        summary.total_net_area = summary.total_net_area.rounded(AREA_DECIMALS);
        summary.paint.net_area = summary.paint.net_area.rounded(AREA_DECIMALS);
        summary.paint.primer_gallons = summary.paint.primer_gallons.rounded(GALLON_DECIMALS);
        summary.paint.finish_gallons = summary.paint.finish_gallons.rounded(GALLON_DECIMALS);
        summary.paint.total_gallons = summary.paint.total_gallons.rounded(GALLON_DECIMALS);
        summary.wallcovering.net_area = summary.wallcovering.net_area.rounded(AREA_DECIMALS);
        summary.wallcovering.rolls = summary.wallcovering.rolls.rounded(ROLL_DECIMALS);
        summary
    }

    pub fn room_count(&self) -> usize {
        self.paint.rooms + self.wallcovering.rooms
    }
}
