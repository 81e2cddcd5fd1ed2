//! Interceptors: ordered lifecycle hooks.
//!
//! An [`Interceptor`] overrides any subset of the hooks; the rest default to
//! no-ops. The [`InterceptorChain`] keeps interceptors sorted ascending by
//! order (ties keep registration order) and calls every hook of a phase in
//! that order, stopping at the first error. Hooks sharing the attribute map
//! observe each other's mutations.

use std::fmt;
use std::sync::Arc;

use crate::attributes::Attributes;
use crate::component::Component;
use crate::composition::{Composition, ComponentId};
use crate::error::Result;
use crate::resolve::Resolver;
use crate::rules::ComponentDescriptor;
use crate::tree::TreeConsumer;

// ---------------------------------------------------------------------------
// HookContext
// ---------------------------------------------------------------------------

/// What a hook sees of the instance being driven.
pub struct HookContext<'a> {
    pub component: &'a dyn Component,
    pub id: ComponentId,
    pub composition: &'a mut Composition,
    pub descriptor: Arc<ComponentDescriptor>,
    pub resolver: &'a Resolver,
}

impl HookContext<'_> {
    /// Name of the component type being processed.
    pub fn type_name(&self) -> &'static str {
        self.descriptor.type_name()
    }
}

impl fmt::Debug for HookContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookContext")
            .field("component", &self.type_name())
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Interceptor
// ---------------------------------------------------------------------------

pub trait Interceptor {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    fn on_parameters_received(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Runs once per instance, on its first parameter pass.
    fn on_initialized(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    fn on_parameters_applied(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Fill or adjust the root element's attributes.
    fn on_attributes_resolved(
        &self,
        ctx: &mut HookContext<'_>,
        attributes: &mut Attributes,
    ) -> Result<()> {
        let _ = (ctx, attributes);
        Ok(())
    }

    /// Emit content into the open root element. Each emitted operation takes
    /// `*sequence` and advances it.
    fn on_content_building(
        &self,
        ctx: &mut HookContext<'_>,
        sink: &mut dyn TreeConsumer,
        sequence: &mut u32,
    ) -> Result<()> {
        let _ = (ctx, sink, sequence);
        Ok(())
    }

    fn on_after_render(&self, ctx: &mut HookContext<'_>, first_render: bool) -> Result<()> {
        let _ = (ctx, first_render);
        Ok(())
    }

    fn on_dispose(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// InterceptorChain
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InterceptorChain {
    entries: Vec<(i32, Box<dyn Interceptor>)>,
}

impl InterceptorChain {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after every interceptor whose order is `<= order`.
    pub fn register(&mut self, order: i32, interceptor: impl Interceptor + 'static) {
        let position = self.entries.partition_point(|(o, _)| *o <= order);
        tracing::debug!(interceptor = interceptor.name(), order, "registered interceptor");
        self.entries.insert(position, (order, Box::new(interceptor)));
    }

    /// Number of registered interceptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interceptor names in call order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(_, i)| i.name()).collect()
    }

    fn each(&self, mut hook: impl FnMut(&dyn Interceptor) -> Result<()>) -> Result<()> {
        self.entries.iter().try_for_each(|(_, i)| hook(i.as_ref()))
    }

    /// Call every `on_parameters_received` in order, stopping at the first error.
    pub fn parameters_received(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        self.each(|i| i.on_parameters_received(ctx))
    }

    /// Same, for `on_initialized`.
    pub fn initialized(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        self.each(|i| i.on_initialized(ctx))
    }

    /// Same, for `on_parameters_applied`.
    pub fn parameters_applied(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        self.each(|i| i.on_parameters_applied(ctx))
    }

    /// Same, for `on_attributes_resolved`. Later interceptors see earlier edits.
    pub fn attributes_resolved(
        &self,
        ctx: &mut HookContext<'_>,
        attributes: &mut Attributes,
    ) -> Result<()> {
        self.each(|i| i.on_attributes_resolved(ctx, attributes))
    }

    /// Same, for `on_content_building`. `sequence` is shared across the chain.
    pub fn content_building(
        &self,
        ctx: &mut HookContext<'_>,
        sink: &mut dyn TreeConsumer,
        sequence: &mut u32,
    ) -> Result<()> {
        self.each(|i| i.on_content_building(ctx, sink, sequence))
    }

    /// Same, for `on_after_render`.
    pub fn after_render(&self, ctx: &mut HookContext<'_>, first_render: bool) -> Result<()> {
        self.each(|i| i.on_after_render(ctx, first_render))
    }

    /// Runs every dispose hook even after one fails, and returns the first error.
    pub fn dispose(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        let mut first = Ok(());
        for (_, interceptor) in &self.entries {
            if let Err(err) = interceptor.on_dispose(ctx) {
                tracing::warn!(
                    interceptor = interceptor.name(),
                    component = ctx.type_name(),
                    error = %err,
                    "dispose hook failed"
                );
                if first.is_ok() {
                    first = Err(err);
                }
            }
        }
        first
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(order, i)| (order, i.name())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentType, Reflect, TypeHandle};
    use crate::error::Error;
    use crate::resolve::fixture::Stub;
    use crate::rules::TypeInfo;
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Plain;
    impl ComponentType for Plain {
        fn type_name() -> &'static str {
            "Plain"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>()
        }
    }

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Interceptor for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn on_initialized(&self, _: &mut HookContext<'_>) -> Result<()> {
            self.log.borrow_mut().push(format!("{}:init", self.name));
            Ok(())
        }

        fn on_attributes_resolved(
            &self,
            _: &mut HookContext<'_>,
            attributes: &mut Attributes,
        ) -> Result<()> {
            let seen = attributes.get("trail").map(Value::to_string).unwrap_or_default();
            attributes.insert("trail", format!("{seen}{}", self.name));
            Ok(())
        }
    }

    struct Failing;
    impl Interceptor for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn on_initialized(&self, ctx: &mut HookContext<'_>) -> Result<()> {
            Err(Error::Configuration {
                component: ctx.type_name(),
                message: "rejected".into(),
            })
        }
    }

    fn with_context(f: impl FnOnce(&mut HookContext<'_>)) {
        let component = Stub::<Plain>::new();
        let mut composition = Composition::new();
        let id = composition.mount(TypeHandle::of::<Plain>(), None);
        let resolver = Resolver::default();
        let mut ctx = HookContext {
            component: &component,
            id,
            composition: &mut composition,
            descriptor: component.descriptor(),
            resolver: &resolver,
        };
        f(&mut ctx);
    }

    #[test]
    fn sorted_by_order_with_stable_ties() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        for (order, name) in [(10, "c"), (0, "a"), (10, "d"), (0, "b")] {
            chain.register(order, Recorder { name, log: log.clone() });
        }
        assert_eq!(chain.names(), ["a", "b", "c", "d"]);

        with_context(|ctx| chain.initialized(ctx).unwrap());
        assert_eq!(*log.borrow(), ["a:init", "b:init", "c:init", "d:init"]);
    }

    #[test]
    fn hooks_observe_earlier_mutations() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        chain.register(1, Recorder { name: "y", log: log.clone() });
        chain.register(0, Recorder { name: "x", log });

        let mut attributes = Attributes::new();
        with_context(|ctx| chain.attributes_resolved(ctx, &mut attributes).unwrap());
        assert_eq!(attributes.get("trail"), Some(&Value::from("xy")));
    }

    #[test]
    fn first_error_stops_the_phase() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        chain.register(0, Failing);
        chain.register(1, Recorder { name: "late", log: log.clone() });

        with_context(|ctx| {
            let err = chain.initialized(ctx).unwrap_err();
            assert!(matches!(err, Error::Configuration { component: "Plain", .. }));
        });
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn default_hooks_are_no_ops() {
        let mut chain = InterceptorChain::new();
        chain.register(0, Failing);
        with_context(|ctx| {
            chain.parameters_received(ctx).unwrap();
            chain.parameters_applied(ctx).unwrap();
            chain.after_render(ctx, true).unwrap();
            chain.dispose(ctx).unwrap();
        });
    }
}
