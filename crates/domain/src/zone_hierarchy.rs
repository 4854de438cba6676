// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Zone containment model for a single facility.
//!
//! A facility's bookable zones form a one-level hierarchy: main zones
//! represent the whole facility, sub-zones are contained within exactly
//! one main zone. The conflict detector uses the containment chain to
//! decide which existing bookings can collide with a candidate zone.
//!
//! ## Invariants
//!
//! - Zone ids are unique within the facility
//! - All zones belong to the same facility
//! - A sub-zone's parent references an existing main zone
//! - Containment is exactly one level deep (no sub-sub-zones)

use crate::error::DomainError;
use crate::types::{Zone, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The containment chain for one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Containment {
    /// The zone itself.
    pub zone_id: ZoneId,
    /// Containing zones. For a sub-zone this is its main zone; for a main
    /// zone it is empty.
    pub ancestors: Vec<ZoneId>,
    /// Contained zones. For a main zone these are its sub-zones; for a
    /// sub-zone it is empty.
    pub descendants: Vec<ZoneId>,
}

/// The validated zone set of one facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneHierarchy {
    /// All zones of the facility, in the order they were provided.
    zones: Vec<Zone>,
}

impl ZoneHierarchy {
    /// Builds a `ZoneHierarchy` from a facility's zone set, validating the
    /// structural invariants.
    ///
    /// # Arguments
    ///
    /// * `zones` - The facility's zones
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A zone id appears more than once (`DuplicateZone`)
    /// - Zones belong to different facilities (`InvalidZoneStructure`)
    /// - A main zone carries a parent reference (`InvalidZoneStructure`)
    /// - A parent reference points at a missing or non-main zone
    ///   (`InvalidZoneStructure`)
    pub fn from_zones(zones: Vec<Zone>) -> Result<Self, DomainError> {
        let mut seen: HashSet<&ZoneId> = HashSet::new();
        for zone in &zones {
            if !seen.insert(&zone.zone_id) {
                return Err(DomainError::DuplicateZone {
                    zone_id: zone.zone_id.value().to_string(),
                });
            }
        }

        if let Some(first) = zones.first() {
            for zone in &zones {
                if zone.facility_id != first.facility_id {
                    return Err(DomainError::InvalidZoneStructure {
                        zone_id: zone.zone_id.value().to_string(),
                        reason: format!(
                            "zone belongs to facility '{}', expected '{}'",
                            zone.facility_id.value(),
                            first.facility_id.value()
                        ),
                    });
                }
            }
        }

        for zone in &zones {
            match &zone.parent_zone_id {
                Some(parent_id) => {
                    if zone.is_main_zone {
                        return Err(DomainError::InvalidZoneStructure {
                            zone_id: zone.zone_id.value().to_string(),
                            reason: String::from("a main zone cannot have a parent"),
                        });
                    }
                    let Some(parent) = zones.iter().find(|z| &z.zone_id == parent_id) else {
                        return Err(DomainError::InvalidZoneStructure {
                            zone_id: zone.zone_id.value().to_string(),
                            reason: format!("parent zone '{}' not found", parent_id.value()),
                        });
                    };
                    if !parent.is_main_zone {
                        return Err(DomainError::InvalidZoneStructure {
                            zone_id: zone.zone_id.value().to_string(),
                            reason: format!(
                                "parent zone '{}' is not a main zone",
                                parent_id.value()
                            ),
                        });
                    }
                }
                None => {}
            }
        }

        Ok(Self { zones })
    }

    /// Returns all zones of the facility.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Returns whether the zone id exists in this facility.
    #[must_use]
    pub fn contains(&self, zone_id: &ZoneId) -> bool {
        self.zones.iter().any(|z| &z.zone_id == zone_id)
    }

    /// Looks up the full zone record for an id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownZone` if the id is not in the facility's
    /// zone set.
    pub fn zone(&self, zone_id: &ZoneId) -> Result<&Zone, DomainError> {
        self.zones
            .iter()
            .find(|z| &z.zone_id == zone_id)
            .ok_or_else(|| DomainError::UnknownZone {
                zone_id: zone_id.value().to_string(),
            })
    }

    /// Resolves the containment chain for a zone.
    ///
    /// For a main zone, `descendants` are all of its sub-zones; for a
    /// sub-zone, `ancestors` contains its main zone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownZone` if the id is not in the facility's
    /// zone set.
    pub fn resolve_containment(&self, zone_id: &ZoneId) -> Result<Containment, DomainError> {
        let zone: &Zone = self.zone(zone_id)?;

        let ancestors: Vec<ZoneId> = zone.parent_zone_id.iter().cloned().collect();
        let descendants: Vec<ZoneId> = self
            .zones
            .iter()
            .filter(|z| z.parent_zone_id.as_ref() == Some(zone_id))
            .map(|z| z.zone_id.clone())
            .collect();

        Ok(Containment {
            zone_id: zone.zone_id.clone(),
            ancestors,
            descendants,
        })
    }
}
