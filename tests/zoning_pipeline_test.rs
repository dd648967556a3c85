//! End-to-end engine tests over an in-memory fixture dataset
//!
//! The fixture is laid out in storage feet around downtown Seattle and
//! queried through WGS84 envelopes, the same path a live request takes.

use geo::{Coord, Geometry, Intersects, LineString, Polygon, Rect};
use indexmap::IndexMap;
use zonemap::geom::crs;
use zonemap::model::{Building, District, LayerKind, Parcel};
use zonemap::query::{query_layer, QueryEnvelope};
use zonemap::store::Dataset;

/// Fixture origin in storage feet, near downtown Seattle
const ORIGIN: Coord<f64> = Coord {
    x: 1_270_000.0,
    y: 223_000.0,
};

fn square(dx: f64, dy: f64, size: f64) -> Geometry<f64> {
    let x = ORIGIN.x + dx;
    let y = ORIGIN.y + dy;
    Geometry::Polygon(Polygon::new(
        LineString::from(vec![
            Coord { x, y },
            Coord { x: x + size, y },
            Coord { x: x + size, y: y + size },
            Coord { x, y: y + size },
            Coord { x, y },
        ]),
        vec![],
    ))
}

fn building(gid: i64, pin: &str, use_label: Option<&str>, geometry: Geometry<f64>) -> Building {
    Building {
        gid,
        pin: pin.to_string(),
        use_label: use_label.map(str::to_string),
        geometry,
    }
}

fn district(gid: i64, code: &str, category: &str, geometry: Geometry<f64>) -> District {
    District {
        gid,
        code: code.to_string(),
        category: category.to_string(),
        geometry,
    }
}

/// A neighborhood with three ruled/unruled districts, one overlapping
/// district pair, and buildings exercising every classification branch
fn fixture() -> Dataset {
    let districts = vec![
        district(1, "SF-5000", "Single Family", square(0.0, 0.0, 1000.0)),
        district(2, "NC-40", "Neighborhood Commercial", square(1500.0, 0.0, 1000.0)),
        district(3, "IC-45", "Industrial Commercial", square(3000.0, 0.0, 1000.0)),
        // Overlapping pair; the lower gid must win the tie-break
        district(9, "OV-A", "Overlap A", square(0.0, 1500.0, 1000.0)),
        district(5, "OV-B", "Overlap B", square(500.0, 1500.0, 1000.0)),
    ];
    let buildings = vec![
        building(101, "7228500105", Some("Residential"), square(200.0, 200.0, 100.0)),
        building(102, "7228500230", Some("Residential"), square(1700.0, 200.0, 100.0)),
        building(103, "7228500340", Some("Residential"), square(5000.0, 200.0, 100.0)),
        building(104, "7228500410", Some("Industrial"), square(3200.0, 200.0, 100.0)),
        building(105, "7228500550", None, square(700.0, 1700.0, 100.0)),
    ];
    let parcels = vec![Parcel {
        gid: 900,
        name: "Pioneer Square".to_string(),
        city: "Seattle".to_string(),
        geometry: square(0.0, 0.0, 2000.0),
    }];
    let mut rules = IndexMap::new();
    rules.insert("SF-5000".to_string(), Some("Residential".to_string()));
    rules.insert("NC-40".to_string(), Some("Commercial".to_string()));
    Dataset::from_parts(buildings, districts, parcels, rules)
}

/// WGS84 envelope covering a storage-feet window relative to the origin
fn envelope(min_dx: f64, min_dy: f64, max_dx: f64, max_dy: f64) -> QueryEnvelope {
    let lo = crs::storage_to_wgs84(Coord {
        x: ORIGIN.x + min_dx,
        y: ORIGIN.y + min_dy,
    });
    let hi = crs::storage_to_wgs84(Coord {
        x: ORIGIN.x + max_dx,
        y: ORIGIN.y + max_dy,
    });
    QueryEnvelope::new(lo.x, lo.y, hi.x, hi.y).expect("fixture envelope should be valid")
}

fn full_window() -> QueryEnvelope {
    envelope(-100.0, -100.0, 6000.0, 3000.0)
}

fn property<'a>(feature: &'a geojson::Feature, key: &str) -> &'a serde_json::Value {
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get(key))
        .unwrap_or(&serde_json::Value::Null)
}

fn building_by_id(collection: &geojson::FeatureCollection, gid: u64) -> &geojson::Feature {
    collection
        .features
        .iter()
        .find(|f| matches!(&f.id, Some(geojson::feature::Id::Number(n)) if n.as_u64() == Some(gid)))
        .unwrap_or_else(|| panic!("no feature with id {}", gid))
}

#[test]
fn test_compliant_building_in_matching_district() {
    let dataset = fixture();
    let result = query_layer(&dataset, LayerKind::Buildings, &full_window());
    let feature = building_by_id(&result, 101);
    assert_eq!(property(feature, "zoning"), "SF-5000");
    assert_eq!(property(feature, "status"), "Compliant");
    assert_eq!(property(feature, "use"), "Residential");
    assert_eq!(property(feature, "pin"), "7228500105");
}

#[test]
fn test_conflicting_building_in_commercial_district() {
    let dataset = fixture();
    let result = query_layer(&dataset, LayerKind::Buildings, &full_window());
    let feature = building_by_id(&result, 102);
    assert_eq!(property(feature, "zoning"), "NC-40");
    assert_eq!(property(feature, "status"), "Conflict");
}

#[test]
fn test_rule_change_flips_status() {
    // Same building and district, permitted use changed under it
    let districts = vec![district(1, "SF-5000", "Single Family", square(0.0, 0.0, 1000.0))];
    let buildings = vec![building(
        101,
        "7228500105",
        Some("Residential"),
        square(200.0, 200.0, 100.0),
    )];

    let mut allow_residential = IndexMap::new();
    allow_residential.insert("SF-5000".to_string(), Some("Residential".to_string()));
    let dataset = Dataset::from_parts(
        buildings.clone(),
        districts.clone(),
        Vec::new(),
        allow_residential,
    );
    let result = query_layer(&dataset, LayerKind::Buildings, &full_window());
    assert_eq!(property(building_by_id(&result, 101), "status"), "Compliant");

    let mut allow_commercial = IndexMap::new();
    allow_commercial.insert("SF-5000".to_string(), Some("Commercial".to_string()));
    let dataset = Dataset::from_parts(buildings, districts, Vec::new(), allow_commercial);
    let result = query_layer(&dataset, LayerKind::Buildings, &full_window());
    assert_eq!(property(building_by_id(&result, 101), "status"), "Conflict");
}

#[test]
fn test_unzoned_building_is_compliant_with_sentinel() {
    let dataset = fixture();
    let result = query_layer(&dataset, LayerKind::Buildings, &full_window());
    let feature = building_by_id(&result, 103);
    assert_eq!(property(feature, "zoning"), "Unzoned");
    assert_eq!(property(feature, "status"), "Compliant");
}

#[test]
fn test_district_without_rule_is_compliant_with_code() {
    let dataset = fixture();
    let result = query_layer(&dataset, LayerKind::Buildings, &full_window());
    let feature = building_by_id(&result, 104);
    assert_eq!(property(feature, "zoning"), "IC-45");
    assert_eq!(property(feature, "status"), "Compliant");
}

#[test]
fn test_overlapping_districts_resolve_deterministically() {
    let dataset = fixture();
    for _ in 0..5 {
        let result = query_layer(&dataset, LayerKind::Buildings, &full_window());
        let feature = building_by_id(&result, 105);
        // Both OV-A (gid 9) and OV-B (gid 5) contain the centroid;
        // the lower gid wins every run
        assert_eq!(property(feature, "zoning"), "OV-B");
    }
}

#[test]
fn test_missing_use_label_in_ruled_district_is_conflict() {
    let districts = vec![district(1, "SF-5000", "Single Family", square(0.0, 0.0, 1000.0))];
    let buildings = vec![building(101, "7228500105", None, square(200.0, 200.0, 100.0))];
    let mut rules = IndexMap::new();
    rules.insert("SF-5000".to_string(), Some("Residential".to_string()));
    let dataset = Dataset::from_parts(buildings, districts, Vec::new(), rules);

    let result = query_layer(&dataset, LayerKind::Buildings, &full_window());
    let feature = building_by_id(&result, 101);
    assert_eq!(property(feature, "status"), "Conflict");
    assert!(property(feature, "use").is_null());
}

#[test]
fn test_every_returned_geometry_intersects_the_window() {
    let dataset = fixture();
    let window = envelope(-100.0, -100.0, 2000.0, 2500.0);
    let public: Rect<f64> = *window.public_rect();
    let precise = public.to_polygon();

    for layer in [LayerKind::Buildings, LayerKind::Zoning, LayerKind::Parcels] {
        let result = query_layer(&dataset, layer, &window);
        assert!(!result.features.is_empty(), "{:?} should have results", layer);
        for feature in &result.features {
            let value = feature.geometry.as_ref().expect("feature without geometry").value.clone();
            let geometry = Geometry::<f64>::try_from(value).expect("invalid GeoJSON geometry");
            assert!(
                geometry.intersects(&precise),
                "{:?} feature {:?} does not intersect the window",
                layer,
                feature.id
            );
        }
    }
}

#[test]
fn test_output_positions_are_two_dimensional() {
    let dataset = fixture();
    let result = query_layer(&dataset, LayerKind::Zoning, &full_window());
    let value = serde_json::to_value(&result).expect("serializable collection");
    for feature in value["features"].as_array().expect("features array") {
        let rings = feature["geometry"]["coordinates"].as_array().expect("rings");
        for ring in rings {
            for position in ring.as_array().expect("ring positions") {
                assert_eq!(position.as_array().expect("position").len(), 2);
            }
        }
    }
}

#[test]
fn test_zoning_and_parcel_layers_carry_their_property_shapes() {
    let dataset = fixture();
    let zoning = query_layer(&dataset, LayerKind::Zoning, &full_window());
    assert_eq!(zoning.features.len(), 5);
    for feature in &zoning.features {
        assert!(property(feature, "code").is_string());
        assert!(property(feature, "category").is_string());
    }

    let parcels = query_layer(&dataset, LayerKind::Parcels, &full_window());
    assert_eq!(parcels.features.len(), 1);
    assert_eq!(property(&parcels.features[0], "name"), "Pioneer Square");
    assert_eq!(property(&parcels.features[0], "city"), "Seattle");
}

#[test]
fn test_identical_queries_yield_identical_collections() {
    let dataset = fixture();
    let window = full_window();
    for layer in [LayerKind::Buildings, LayerKind::Zoning, LayerKind::Parcels] {
        let first = serde_json::to_value(query_layer(&dataset, layer, &window)).expect("json");
        let second = serde_json::to_value(query_layer(&dataset, layer, &window)).expect("json");
        assert_eq!(first, second, "{:?} query is not idempotent", layer);
    }
}

#[test]
fn test_empty_window_yields_empty_collection() {
    let dataset = fixture();
    // A valid window over empty ground far from the fixture
    let window = envelope(50_000.0, 50_000.0, 51_000.0, 51_000.0);
    let result = query_layer(&dataset, LayerKind::Buildings, &window);
    assert!(result.features.is_empty());
    let value = serde_json::to_value(&result).expect("json");
    assert_eq!(value["type"], "FeatureCollection");
    assert_eq!(value["features"], serde_json::json!([]));
}

#[test]
fn test_building_cap_is_enforced_at_1000() {
    // A 40x30 grid of 1200 footprints, all inside one district
    let mut buildings = Vec::new();
    for row in 0..30i64 {
        for col in 0..40i64 {
            let gid = row * 40 + col + 1;
            buildings.push(building(
                gid,
                &format!("{:010}", gid),
                Some("Residential"),
                square(col as f64 * 20.0, row as f64 * 20.0, 10.0),
            ));
        }
    }
    let districts = vec![district(1, "SF-5000", "Single Family", square(-50.0, -50.0, 1000.0))];
    let dataset = Dataset::from_parts(buildings, districts, Vec::new(), IndexMap::new());

    let window = envelope(-100.0, -100.0, 1000.0, 1000.0);
    let result = query_layer(&dataset, LayerKind::Buildings, &window);
    assert_eq!(result.features.len(), 1000);
}

#[test]
fn test_invalid_district_geometry_is_repaired_in_output() {
    // Bowtie district ring; the engine must repair rather than drop it
    let x = ORIGIN.x;
    let y = ORIGIN.y;
    let bowtie = Geometry::Polygon(Polygon::new(
        LineString::from(vec![
            Coord { x, y },
            Coord { x: x + 400.0, y: y + 400.0 },
            Coord { x: x + 400.0, y },
            Coord { x, y: y + 400.0 },
            Coord { x, y },
        ]),
        vec![],
    ));
    let dataset = Dataset::from_parts(
        Vec::new(),
        vec![district(1, "SF-5000", "Single Family", bowtie)],
        Vec::new(),
        IndexMap::new(),
    );

    let result = query_layer(&dataset, LayerKind::Zoning, &full_window());
    assert_eq!(result.features.len(), 1);
    let value = result.features[0].geometry.as_ref().expect("geometry").value.clone();
    let geometry = Geometry::<f64>::try_from(value).expect("valid geometry");
    use geo::algorithm::Validation;
    match geometry {
        Geometry::Polygon(p) => assert!(p.is_valid()),
        Geometry::MultiPolygon(mp) => assert!(mp.is_valid()),
        other => panic!("unexpected geometry {:?}", other),
    }
}
