//! SQLite loader for the municipal dataset
//!
//! Geometry columns hold GeoJSON text in the storage CRS (EPSG:2926).
//! Rows with NULL or unparseable geometry are skipped, never fatal; a
//! connection or query failure is surfaced to the caller.

use super::Dataset;
use crate::geom::repair::parse_stored_geometry;
use crate::model::{Building, District, Parcel};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Dataset schema, shared with fixture construction in tests
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS building_footprints (
    gid INTEGER PRIMARY KEY,
    pin TEXT NOT NULL DEFAULT '',
    use_label TEXT,
    geom TEXT
);
CREATE TABLE IF NOT EXISTS zoning_districts (
    gid INTEGER PRIMARY KEY,
    code TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT '',
    geom TEXT
);
CREATE TABLE IF NOT EXISTS zoning_rules (
    zoning_code TEXT PRIMARY KEY,
    allowed_use TEXT
);
CREATE TABLE IF NOT EXISTS parcels (
    gid INTEGER PRIMARY KEY,
    name TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    geom TEXT
);
";

/// Load the full dataset from a SQLite file.
///
/// Rows are read in `gid` order, which becomes the stable store order
/// that cap truncation sees.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;

    let buildings = load_buildings(&conn)?;
    let districts = load_districts(&conn)?;
    let parcels = load_parcels(&conn)?;
    let rules = load_rules(&conn)?;

    Ok(Dataset::from_parts(buildings, districts, parcels, rules))
}

fn load_buildings(conn: &Connection) -> Result<Vec<Building>> {
    let mut stmt = conn
        .prepare("SELECT gid, pin, use_label, geom FROM building_footprints ORDER BY gid")
        .context("failed to query building_footprints")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut buildings = Vec::new();
    for row in rows {
        let (gid, pin, use_label, geom) = row.context("bad building_footprints row")?;
        let Some(geometry) = geom.as_deref().and_then(parse_stored_geometry) else {
            continue; // no geometry, feature excluded from all responses
        };
        buildings.push(Building {
            gid,
            pin,
            use_label,
            geometry,
        });
    }
    Ok(buildings)
}

fn load_districts(conn: &Connection) -> Result<Vec<District>> {
    let mut stmt = conn
        .prepare("SELECT gid, code, category, geom FROM zoning_districts ORDER BY gid")
        .context("failed to query zoning_districts")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut districts = Vec::new();
    for row in rows {
        let (gid, code, category, geom) = row.context("bad zoning_districts row")?;
        let Some(geometry) = geom.as_deref().and_then(parse_stored_geometry) else {
            continue;
        };
        districts.push(District {
            gid,
            code,
            category,
            geometry,
        });
    }
    Ok(districts)
}

fn load_parcels(conn: &Connection) -> Result<Vec<Parcel>> {
    let mut stmt = conn
        .prepare("SELECT gid, name, city, geom FROM parcels ORDER BY gid")
        .context("failed to query parcels")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut parcels = Vec::new();
    for row in rows {
        let (gid, name, city, geom) = row.context("bad parcels row")?;
        let Some(geometry) = geom.as_deref().and_then(parse_stored_geometry) else {
            continue;
        };
        parcels.push(Parcel {
            gid,
            name,
            city,
            geometry,
        });
    }
    Ok(parcels)
}

fn load_rules(conn: &Connection) -> Result<IndexMap<String, Option<String>>> {
    let mut stmt = conn
        .prepare("SELECT zoning_code, allowed_use FROM zoning_rules ORDER BY zoning_code")
        .context("failed to query zoning_rules")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
    })?;

    let mut rules = IndexMap::new();
    for row in rows {
        let (code, allowed_use) = row.context("bad zoning_rules row")?;
        rules.insert(code, allowed_use);
    }
    Ok(rules)
}
