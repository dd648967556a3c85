//! Compliance classification of declared use against the zoning rule
//!
//! Total pure function: every building gets exactly one status. A
//! building with no district association, or whose district's code has
//! no rule on record, is compliant by default. Otherwise the declared
//! use must equal the allowed use exactly; the comparison is
//! case-sensitive with no normalization, mirroring the reference
//! behavior (mismatched casing in the source data shows up as a
//! Conflict, which is a data-quality signal rather than a bug here).

use serde::Serialize;

/// Sentinel zoning label for a building with no district association.
/// Distinct from an empty string: it means "no zoning restriction
/// recorded", not "unknown".
pub const UNZONED: &str = "Unzoned";

/// The two possible compliance outcomes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ComplianceStatus {
    Compliant,
    Conflict,
}

impl ComplianceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::Conflict => "Conflict",
        }
    }
}

/// Classify a building's declared use against the allowed use from its
/// resolved zoning rule.
///
/// `allowed_use` is `None` when the building has no association or the
/// code has no rule entry; that defaults to `Compliant`. A declared use
/// that is absent while a rule exists compares unequal and yields
/// `Conflict`, matching the reference system's NULL-comparison outcome.
pub fn classify(declared_use: Option<&str>, allowed_use: Option<&str>) -> ComplianceStatus {
    match allowed_use {
        None => ComplianceStatus::Compliant,
        Some(allowed) if declared_use == Some(allowed) => ComplianceStatus::Compliant,
        Some(_) => ComplianceStatus::Conflict,
    }
}
