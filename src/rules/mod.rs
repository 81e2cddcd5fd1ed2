//! Rule metadata: declarations, ordering, merged descriptors.

pub mod descriptor;
pub mod metadata;
pub mod order;
pub mod rule;

pub use descriptor::{
    descriptor_of, ComponentDescriptor, DescriptorCache, PlanEntry, PropertyDescriptor, Target,
    WholeTypeRule,
};
pub use metadata::{CapabilityInfo, ParentRequirement, PropertyInfo, TypeInfo};
pub use order::{RuleOrder, RuleOrigin};
pub use rule::{AttributeRule, BooleanClassRule, ClassRule, NullClassRule, Rule, StyleRule};
