//! Property-based invariants for the entity codecs and the entity list.
//!
//! 1. parse(emit(entity)) == entity for every version.
//! 2. Appended entities are traversed once each, in order.
//! 3. Bounded setters accept exactly their documented domain.

mod common;

use common::*;
use dxf_codec::entities::*;
use dxf_codec::{Color, DxfVersion, Handle, Vector3};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Values exactly representable after six-digit formatting.
fn coordinate() -> impl Strategy<Value = f64> {
    (-1_000_000i64..=1_000_000).prop_map(|n| n as f64 / 1000.0)
}

fn vector() -> impl Strategy<Value = Vector3> {
    (coordinate(), coordinate(), coordinate()).prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

fn version() -> impl Strategy<Value = DxfVersion> {
    proptest::sample::select(DxfVersion::ALL.to_vec())
}

fn common_header() -> impl Strategy<Value = EntityCommon> {
    (
        "[A-Z][A-Z0-9_]{0,15}",
        prop_oneof![Just("BYLAYER".to_string()), Just("DASHED".to_string())],
        1i16..=255,
        proptest::option::of(1u64..0xFFFF),
    )
        .prop_map(|(layer, linetype, color, handle)| {
            let mut common = EntityCommon::with_layer(layer);
            common.linetype = linetype;
            common.color = Color::from_index(color);
            common.handle = handle.map(Handle::new);
            common
        })
}

fn line_entity() -> impl Strategy<Value = EntityType> {
    (common_header(), vector(), vector())
        .prop_filter("endpoints must differ", |(_, a, b)| a != b)
        .prop_map(|(common, start, end)| {
            let mut line = Line::from_points(start, end);
            line.common = common;
            line.into()
        })
}

fn circle_entity() -> impl Strategy<Value = EntityType> {
    (common_header(), vector(), 1i64..1_000_000).prop_map(|(common, center, r)| {
        let mut circle = Circle::from_center_radius(center, r as f64 / 1000.0);
        circle.common = common;
        circle.into()
    })
}

fn polyline_entity() -> impl Strategy<Value = EntityType> {
    (common_header(), proptest::collection::vec(vector(), 1..12), any::<bool>()).prop_map(
        |(common, points, closed)| {
            let mut polyline = Polyline::from_points(points);
            polyline.common = common;
            polyline.set_closed(closed);
            polyline.into()
        },
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn line_round_trips(entity in line_entity(), version in version()) {
        prop_assert_eq!(round_trip(&entity, version), entity);
    }

    #[test]
    fn circle_round_trips(entity in circle_entity(), version in version()) {
        prop_assert_eq!(round_trip(&entity, version), entity);
    }

    #[test]
    fn polyline_round_trips(entity in polyline_entity(), version in version()) {
        prop_assert_eq!(round_trip(&entity, version), entity);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. List integrity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn list_visits_every_element_once(points in proptest::collection::vec(vector(), 0..64)) {
        let mut list = EntityList::new();
        for (i, p) in points.iter().enumerate() {
            prop_assert_eq!(list.append(point(*p)), i);
        }
        prop_assert_eq!(list.len(), points.len());

        let visited: Vec<Vector3> = list
            .iter()
            .map(|e| match e {
                EntityType::Point(p) => p.location,
                other => panic!("unexpected {:?}", other.kind()),
            })
            .collect();
        prop_assert_eq!(&visited, &points);

        prop_assert_eq!(list.clear(), points.len());
        prop_assert!(list.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Range validity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn leader_creation_flag_domain(value in -10i16..10) {
        let mut leader = Leader::new();
        let before = leader.clone();
        let accepted = leader.set_creation_flag(value).is_ok();
        prop_assert_eq!(accepted, (0..=3).contains(&value));
        if !accepted {
            prop_assert_eq!(leader, before);
        }
    }

    #[test]
    fn visibility_domain(value in -5i16..5) {
        let mut common = EntityCommon::new();
        prop_assert_eq!(common.set_visibility(value).is_ok(), value == 0 || value == 1);
    }
}
