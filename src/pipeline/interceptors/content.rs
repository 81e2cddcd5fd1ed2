//! Emits a component's child content.

use crate::component::HasChildContent;
use crate::error::Result;
use crate::pipeline::interceptor::{HookContext, Interceptor};
use crate::tree::{Content, TreeConsumer};

/// For components listing [`HasChildContent`], emits the fragment supplied by
/// the parent inside the root element.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChildContentInterceptor;

impl Interceptor for ChildContentInterceptor {
    fn name(&self) -> &'static str {
        "child-content"
    }

    fn on_content_building(
        &self,
        ctx: &mut HookContext<'_>,
        sink: &mut dyn TreeConsumer,
        sequence: &mut u32,
    ) -> Result<()> {
        if !ctx.descriptor.has_capability::<HasChildContent>() {
            return Ok(());
        }
        if let Some(fragment) = ctx.component.child_content() {
            sink.add_content(*sequence, Content::Fragment(fragment));
            *sequence = sequence.saturating_add(1);
        }
        Ok(())
    }
}
