//! Fills the root element's attributes from the resolver.

use crate::attributes::Attributes;
use crate::error::Result;
use crate::pipeline::interceptor::{HookContext, Interceptor};

/// Merges the resolved attribute map into the root element's attributes, so
/// interceptors ordered after it see and may adjust the resolved values.
#[derive(Debug, Default, Clone, Copy)]
pub struct PresentationInterceptor;

impl Interceptor for PresentationInterceptor {
    fn name(&self) -> &'static str {
        "presentation"
    }

    fn on_attributes_resolved(
        &self,
        ctx: &mut HookContext<'_>,
        attributes: &mut Attributes,
    ) -> Result<()> {
        let resolved = ctx.resolver.resolve_attributes(ctx.component)?;
        attributes.merge(&resolved);
        Ok(())
    }
}
