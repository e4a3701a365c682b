//! # Takeoff Calculator
//!
//! The per-room pipeline:
//!
//! ```text
//! Room ──► gross_wall_area ──► net_paintable_area ──► calculate_materials
//!          2(L+W)·H, ≥ 0       − doors·21 − windows·12, ≥ 0
//! ```
//!
//! [`process_takeoff`] runs it over every room in order and returns one
//! [`TakeoffResult`] per room. Rooms are not sorted or deduplicated.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculator::process_takeoff;
//! use takeoff_core::config::TakeoffConfig;
//! use takeoff_core::rooms::{FinishType, Room, RoomsData};
//! use takeoff_core::units::SqFt;
//!
//! let data = RoomsData {
//!     project: None,
//!     floor: None,
//!     rooms: vec![Room::new("201", "Conference A", 20.0, 15.0, 9.0)
//!         .with_openings(2, 3)
//!         .with_finish(FinishType::Paint)],
//! };
//!
//! let results = process_takeoff(&data, &TakeoffConfig::default());
//! assert_eq!(results[0].gross_area, SqFt(630.0));
//! assert_eq!(results[0].net_area, SqFt(552.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{StandardOpenings, TakeoffConfig};
use crate::finish_systems::Materials;
use crate::rooms::{Room, RoomsData};
use crate::units::{Feet, SqFt};

pub use crate::finish_systems::calculate_materials;

/// Decimal places kept on gross and net areas
pub const AREA_DECIMALS: usize = 2;

/// Takeoff for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffResult {
    /// The input room, unchanged
    pub room: Room,

    /// Perimeter x height, rounded to 2 decimals
    pub gross_area: SqFt,

    /// Gross minus openings, rounded to 2 decimals
    pub net_area: SqFt,

    /// Quantities for the room's finish system
    pub materials: Materials,
}

/// Gross wall area: perimeter times height, never negative.
pub fn gross_wall_area(room: &Room) -> SqFt {
    let perimeter = Feet(2.0 * (room.length + room.width));
    perimeter.times_height(Feet(room.height)).non_negative()
}

/// Net paintable area after deducting standard openings.
///
/// Negative opening counts count as zero, and the result never drops below
/// zero even when openings exceed the wall.
pub fn net_paintable_area(gross: SqFt, doors: i64, windows: i64, openings: &StandardOpenings) -> SqFt {
    let door_area = openings.door.area() * doors.max(0) as f64;
    let window_area = openings.window.area() * windows.max(0) as f64;
    (gross.non_negative() - door_area - window_area).non_negative()
}

/// Run the full pipeline for a single room.
pub fn takeoff_room(room: &Room, config: &TakeoffConfig) -> TakeoffResult {
    let gross = gross_wall_area(room);
    let net = net_paintable_area(gross, room.doors, room.windows, &config.openings);
    let materials = calculate_materials(net, room.finish_type, &config.finish_systems);

    tracing::debug!(
        room = %room.id,
        finish = %room.finish_type,
        gross_sqft = gross.value(),
        net_sqft = net.value(),
        "Room takeoff"
    );

    TakeoffResult {
        room: room.clone(),
        gross_area: gross.rounded(AREA_DECIMALS),
        net_area: net.rounded(AREA_DECIMALS),
        materials,
    }
}

/// Compute takeoff results for every room, preserving input order.
pub fn process_takeoff(rooms_data: &RoomsData, config: &TakeoffConfig) -> Vec<TakeoffResult> {
    let results: Vec<TakeoffResult> = rooms_data
        .rooms
        .iter()
        .map(|room| takeoff_room(room, config))
        .collect();

    tracing::info!(
        rooms = results.len(),
        project = rooms_data.project.as_deref().unwrap_or(""),
        "Takeoff complete"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finish_systems::{PaintMaterials, WallcoveringMaterials};
    use crate::rooms::FinishType;
    use crate::units::{Gallons, Rolls};

    fn openings() -> StandardOpenings {
        StandardOpenings::default()
    }

    fn run(rooms: Vec<Room>) -> Vec<TakeoffResult> {
        let data = RoomsData {
            project: None,
            floor: None,
            rooms,
        };
        process_takeoff(&data, &TakeoffConfig::default())
    }

    #[test]
    fn test_gross_area_is_perimeter_times_height() {
        for (l, w, h) in [(20.0, 15.0, 9.0), (12.5, 10.0, 8.0), (0.0, 0.0, 9.0), (50.0, 6.0, 0.0)] {
            let room = Room::new("r", "R", l, w, h);
            assert_eq!(gross_wall_area(&room), SqFt(2.0 * (l + w) * h));
        }
    }

    #[test]
    fn test_gross_area_never_negative() {
        assert_eq!(gross_wall_area(&Room::new("r", "R", -20.0, 5.0, 9.0)), SqFt(0.0));
        assert_eq!(gross_wall_area(&Room::new("r", "R", 20.0, 5.0, -9.0)), SqFt(0.0));
        // Two negatives multiply back to a positive area; only the result is clamped.
        assert_eq!(gross_wall_area(&Room::new("r", "R", -10.0, -5.0, -2.0)), SqFt(60.0));
    }

    #[test]
    fn test_net_area_subtracts_openings() {
        assert_eq!(net_paintable_area(SqFt(630.0), 2, 3, &openings()), SqFt(552.0));
        assert_eq!(net_paintable_area(SqFt(504.0), 1, 2, &openings()), SqFt(459.0));
        assert_eq!(net_paintable_area(SqFt(100.0), 0, 0, &openings()), SqFt(100.0));
    }

    #[test]
    fn test_negative_counts_do_not_inflate_area() {
        assert_eq!(net_paintable_area(SqFt(300.0), -4, 0, &openings()), SqFt(300.0));
        assert_eq!(net_paintable_area(SqFt(300.0), 1, -10, &openings()), SqFt(279.0));
    }

    #[test]
    fn test_openings_exceeding_gross_clamp_to_zero() {
        assert_eq!(net_paintable_area(SqFt(50.0), 3, 0, &openings()), SqFt(0.0));
        assert_eq!(net_paintable_area(SqFt(-10.0), 0, 0, &openings()), SqFt(0.0));
    }

    #[test]
    fn test_end_to_end_paint_room() {
        let results = run(vec![Room::new("201", "Conference A", 20.0, 15.0, 9.0)
            .with_openings(2, 3)
            .with_finish(FinishType::Paint)]);

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.gross_area, SqFt(630.0));
        assert_eq!(r.net_area, SqFt(552.0));
        assert_eq!(
            r.materials,
            Materials::Paint(PaintMaterials {
                primer_gallons: Gallons(1.38),
                finish_gallons: Gallons(2.76),
                total_gallons: Gallons(4.14),
            })
        );
    }

    #[test]
    fn test_end_to_end_wallcovering_room() {
        let results = run(vec![Room::new("205", "Break Room", 16.0, 12.0, 9.0)
            .with_openings(1, 2)
            .with_finish(FinishType::Wallcovering)]);

        let r = &results[0];
        assert_eq!(r.gross_area, SqFt(504.0));
        assert_eq!(r.net_area, SqFt(459.0));
        assert_eq!(
            r.materials,
            Materials::Wallcovering(WallcoveringMaterials { rolls: Rolls(15.3) })
        );
    }

    #[test]
    fn test_unknown_finish_from_json_is_paint() {
        let data = RoomsData::from_json(
            r#"{"rooms": [
                {"id": "1", "name": "A", "length": 10, "width": 10, "height": 10, "finish_type": "stucco"},
                {"id": "2", "name": "B", "length": 10, "width": 10, "height": 10}
            ]}"#,
        )
        .unwrap();
        let results = process_takeoff(&data, &TakeoffConfig::default());
        assert!(results.iter().all(|r| r.materials.finish_type() == FinishType::Paint));
    }

    #[test]
    fn test_empty_rooms_yield_empty_results() {
        assert!(run(Vec::new()).is_empty());
        let data = RoomsData::from_json("{}").unwrap();
        assert!(process_takeoff(&data, &TakeoffConfig::default()).is_empty());
    }

    #[test]
    fn test_openings_exceeding_gross_zero_gallons() {
        let results = run(vec![Room::new("c", "Closet", 2.0, 2.0, 3.0).with_openings(2, 2)]);
        let r = &results[0];
        assert_eq!(r.gross_area, SqFt(24.0));
        assert_eq!(r.net_area, SqFt(0.0));
        let paint = r.materials.as_paint().unwrap();
        assert_eq!(paint.primer_gallons, Gallons(0.0));
        assert_eq!(paint.finish_gallons, Gallons(0.0));
        assert_eq!(paint.total_gallons, Gallons(0.0));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let results = run(vec![
            Room::new("B", "Second", 10.0, 10.0, 8.0),
            Room::new("A", "First", 10.0, 10.0, 8.0),
            Room::new("A", "First again", 12.0, 10.0, 8.0),
        ]);
        let ids: Vec<_> = results.iter().map(|r| r.room.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "A"]);
        assert_eq!(results[2].room.name, "First again");
    }

    #[test]
    fn test_areas_rounded_materials_from_unrounded_net() {
        // gross = 2 * (10.333 + 10) * 9 = 365.994; net = 365.994 - 21 = 344.994
        let results = run(vec![Room::new("x", "X", 10.333, 10.0, 9.0).with_openings(1, 0)]);
        let r = &results[0];
        assert_eq!(r.gross_area, SqFt(365.99));
        assert_eq!(r.net_area, SqFt(344.99));
        // 344.994 / 400 = 0.862485 -> 0.86; 2 * 344.994 / 400 = 1.72497 -> 1.72
        let paint = r.materials.as_paint().unwrap();
        assert_eq!(paint.primer_gallons, Gallons(0.86));
        assert_eq!(paint.finish_gallons, Gallons(1.72));
        assert_eq!(paint.total_gallons, Gallons(2.59));
    }

    #[test]
    fn test_custom_config_is_used() {
        let mut config = TakeoffConfig::default();
        config.finish_systems.wallcovering.coverage = 45.0;
        let data = RoomsData {
            project: None,
            floor: None,
            rooms: vec![Room::new("1", "A", 16.0, 12.0, 9.0)
                .with_openings(1, 2)
                .with_finish(FinishType::Wallcovering)],
        };
        let results = process_takeoff(&data, &config);
        // 459 / 45 = 10.2
        assert_eq!(
            results[0].materials.as_wallcovering().map(|w| w.rolls),
            Some(Rolls(10.2))
        );
    }
}
