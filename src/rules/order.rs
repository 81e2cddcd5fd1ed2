//! Deterministic rule ordering.
//!
//! Every rule that contributes to a component's output is assigned a
//! [`RuleOrder`]. Fields are ordered so that the derived `Ord`
//! (lexicographic) gives resolution order:
//!
//! ```text
//! (order, origin, position)
//! ```
//!
//! - Lower declared `order` resolves first
//! - On equal order, capability rules precede type rules, which precede property rules
//! - Within an origin, declaration position breaks the tie
//!
//! Capability position follows the order capabilities are listed on the type;
//! property position follows field declaration order after the
//! capability/base/type overlay. Both are pinned by the metadata, so the output
//! never depends on a runtime enumeration order.

/// Where a rule was declared, lowest resolves first on equal `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RuleOrigin {
    /// Whole-type rule declared on a capability.
    #[default]
    Capability,
    /// Whole-type rule declared on the component type or one of its bases.
    Type,
    /// Rule declared on a property.
    Property,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RuleOrder {
    /// User-declared order (ascending).
    pub order: i32,
    pub origin: RuleOrigin,
    /// Declaration position within the origin.
    pub position: u32,
}

impl RuleOrder {
    /// Sort key from its three parts.
    pub fn new(order: i32, origin: RuleOrigin, position: u32) -> Self {
        Self {
            order,
            origin,
            position,
        }
    }
}
