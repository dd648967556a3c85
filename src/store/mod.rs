//! Read-only backing dataset
//!
//! The three feature layers plus the zoning-rule table, held in memory
//! with one R-tree per layer. Built either from parts (fixtures, tests)
//! or loaded from a SQLite file. Nothing here is mutated after
//! construction; concurrent queries share the dataset read-only.

mod sqlite;

pub use sqlite::{load_dataset, SCHEMA};

use crate::geom::{build_index, IndexedFeature};
use crate::model::{Building, District, LayerKind, Parcel};
use indexmap::IndexMap;
use rstar::RTree;

/// In-memory snapshot of the municipal dataset
pub struct Dataset {
    buildings: Vec<Building>,
    districts: Vec<District>,
    parcels: Vec<Parcel>,
    /// zoning code -> allowed-use label; a NULL label in the source means
    /// "no declared restriction" and is kept as None
    rules: IndexMap<String, Option<String>>,
    building_index: RTree<IndexedFeature>,
    district_index: RTree<IndexedFeature>,
    parcel_index: RTree<IndexedFeature>,
}

impl Dataset {
    /// Assemble a dataset and build its spatial indexes
    pub fn from_parts(
        buildings: Vec<Building>,
        districts: Vec<District>,
        parcels: Vec<Parcel>,
        rules: IndexMap<String, Option<String>>,
    ) -> Self {
        let building_index = build_index(buildings.iter().map(|b| &b.geometry));
        let district_index = build_index(districts.iter().map(|d| &d.geometry));
        let parcel_index = build_index(parcels.iter().map(|p| &p.geometry));
        Self {
            buildings,
            districts,
            parcels,
            rules,
            building_index,
            district_index,
            parcel_index,
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    /// Allowed-use label for a zoning code.
    ///
    /// Returns `None` both when no rule row exists for the code and when
    /// the rule row carries no label; the classifier treats the two the
    /// same way ("no restriction on record").
    pub fn allowed_use(&self, code: &str) -> Option<&str> {
        self.rules.get(code).and_then(|label| label.as_deref())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Spatial index for one layer
    pub fn index(&self, layer: LayerKind) -> &RTree<IndexedFeature> {
        match layer {
            LayerKind::Buildings => &self.building_index,
            LayerKind::Zoning => &self.district_index,
            LayerKind::Parcels => &self.parcel_index,
        }
    }

    pub fn layer_len(&self, layer: LayerKind) -> usize {
        match layer {
            LayerKind::Buildings => self.buildings.len(),
            LayerKind::Zoning => self.districts.len(),
            LayerKind::Parcels => self.parcels.len(),
        }
    }
}
