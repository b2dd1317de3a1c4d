//! Maturity-gap ranking
//!
//! Surfaces the capabilities furthest behind their strategic target.

use atlas_core::Landscape;
use atlas_model::{CapabilityId, DomainId};
use serde::Serialize;

/// One capability behind its target maturity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityGap {
    pub capability_id: CapabilityId,
    pub capability_name: String,
    pub domain_id: DomainId,
    pub domain_name: String,
    pub current: u8,
    pub target: u8,
    /// `(target ?? current) - current`; always positive in this list
    pub gap: u8,
}

/// Capabilities with a positive maturity gap, largest gap first
///
/// A capability without a target counts as on-target. Sub-capabilities
/// are ranked alongside their parents.
#[must_use]
pub fn maturity_gaps(landscape: &Landscape) -> Vec<MaturityGap> {
    let mut gaps = Vec::new();
    for domain in landscape.domains() {
        for capability in domain.all_capabilities() {
            let gap = capability.maturity_gap();
            if gap > 0 {
                gaps.push(MaturityGap {
                    capability_id: capability.id.clone(),
                    capability_name: capability.name.clone(),
                    domain_id: domain.id,
                    domain_name: domain.name.clone(),
                    current: capability.maturity,
                    target: capability.target_maturity.unwrap_or(capability.maturity),
                    gap: gap as u8,
                });
            }
        }
    }
    gaps.sort_by(|a, b| b.gap.cmp(&a.gap));
    gaps
}
