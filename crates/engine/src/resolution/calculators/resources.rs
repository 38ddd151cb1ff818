//! Limited-use class resource pools.

use charbldr_domain::{Class, ResourceUsage};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePool {
    pub max: u32,
    pub spent: u32,
    pub remaining: u32,
}

impl ResourcePool {
    pub fn new(max: u32, spent: u32) -> Self {
        Self {
            max,
            spent,
            remaining: max.saturating_sub(spent),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePools {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lay_on_hands: Option<ResourcePool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_divinity: Option<ResourcePool>,
}

/// Pools the class declares, sized for `level`. A pool not unlocked yet is
/// absent.
pub fn resource_pools(class: Option<&Class>, level: u8, usage: ResourceUsage) -> ResourcePools {
    let Some(class) = class else {
        return ResourcePools::default();
    };
    let resources = &class.resources;

    let lay_on_hands = resources.lay_on_hands_per_level.map(|per_level| {
        ResourcePool::new(
            per_level.saturating_mul(u32::from(level)),
            usage.lay_on_hands_spent,
        )
    });

    let channel_divinity = resources
        .channel_divinity
        .iter()
        .filter(|step| step.level <= level)
        .max_by_key(|step| step.level)
        .map(|step| ResourcePool::new(step.uses, usage.channel_divinity_spent));

    ResourcePools {
        lay_on_hands,
        channel_divinity,
    }
}
