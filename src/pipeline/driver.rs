//! The pipeline driver: moves component instances through their lifecycle,
//! calling the interceptor chain at each phase and emitting the root element.

use crate::attributes::Attributes;
use crate::component::Component;
use crate::composition::{Composition, ComponentId};
use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::resolve::Resolver;
use crate::tree::TreeConsumer;

use super::interceptor::{HookContext, Interceptor, InterceptorChain};
use super::interceptors::{
    ChildContentInterceptor, FormValidator, NestingValidator, PresentationInterceptor,
    CHILD_CONTENT_ORDER, FORM_ORDER, NESTING_ORDER, PRESENTATION_ORDER,
};
use super::lifecycle::{Lifecycle, LifecycleState};

// ---------------------------------------------------------------------------
// Instance
// ---------------------------------------------------------------------------

/// A mounted component together with its lifecycle state.
#[derive(Debug)]
pub struct Instance<C> {
    component: C,
    id: ComponentId,
    lifecycle: Lifecycle,
    after_renders: u32,
}

impl<C: Component> Instance<C> {
    /// The wrapped component.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access for changing parameters. Follow with
    /// [`Pipeline::set_parameters`] before the next render.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Slot in the pipeline's composition.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// The instance's lifecycle tracker.
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Drives component instances through the interceptor chain.
///
/// The pipeline owns the [`Composition`] of everything it has mounted and the
/// [`Resolver`] interceptors resolve presentation with.
#[derive(Debug)]
pub struct Pipeline {
    chain: InterceptorChain,
    resolver: Resolver,
    composition: Composition,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Pipeline {
    /// A pipeline with the built-in interceptors registered.
    pub fn new(config: ResolverConfig) -> Self {
        Self::empty(config)
            .with_interceptor(NESTING_ORDER, NestingValidator)
            .with_interceptor(FORM_ORDER, FormValidator)
            .with_interceptor(PRESENTATION_ORDER, PresentationInterceptor)
            .with_interceptor(CHILD_CONTENT_ORDER, ChildContentInterceptor)
    }

    /// A pipeline with no interceptors at all.
    pub fn empty(config: ResolverConfig) -> Self {
        Self {
            chain: InterceptorChain::new(),
            resolver: Resolver::new(config),
            composition: Composition::new(),
        }
    }

    /// Register an interceptor (builder).
    pub fn with_interceptor(mut self, order: i32, interceptor: impl Interceptor + 'static) -> Self {
        self.register(order, interceptor);
        self
    }

    /// Add an interceptor to the chain. See [`InterceptorChain::register`].
    pub fn register(&mut self, order: i32, interceptor: impl Interceptor + 'static) {
        self.chain.register(order, interceptor);
    }

    /// Registered interceptors.
    pub fn chain(&self) -> &InterceptorChain {
        &self.chain
    }

    /// The resolver used by `render`.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Every mounted instance.
    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Mount `component` rendered inside `enclosing`.
    pub fn mount<C: Component>(&mut self, component: C, enclosing: Option<ComponentId>) -> Instance<C> {
        let ty = component.type_handle();
        let id = self.composition.mount(ty, enclosing);
        Instance {
            component,
            id,
            lifecycle: Lifecycle::new(ty.name),
            after_renders: 0,
        }
    }

    /// Run a parameter pass: received, initialized (first pass only), applied.
    pub fn set_parameters<C: Component>(&mut self, instance: &mut Instance<C>) -> Result<()> {
        self.ensure_mounted(instance)?;
        let Self {
            chain,
            resolver,
            composition,
        } = self;
        let Instance {
            component,
            id,
            lifecycle,
            ..
        } = instance;
        let mut ctx = context(&*component, *id, composition, resolver);

        lifecycle.transition(LifecycleState::ParametersReceiving)?;
        chain.parameters_received(&mut ctx)?;
        if !lifecycle.is_initialized() {
            lifecycle.transition(LifecycleState::Initializing)?;
            chain.initialized(&mut ctx)?;
        }
        lifecycle.transition(LifecycleState::ParametersApplying)?;
        chain.parameters_applied(&mut ctx)
    }

    /// Change parameters through `update`, then run a parameter pass.
    pub fn update<C: Component>(
        &mut self,
        instance: &mut Instance<C>,
        update: impl FnOnce(&mut C),
    ) -> Result<()> {
        update(&mut instance.component);
        self.set_parameters(instance)
    }

    /// Emit the component's root element at `sequence`.
    ///
    /// The element carries the resolved tag and the attribute map built by the
    /// `on_attributes_resolved` hooks. Inside it come the content hooks'
    /// output, then the component's own [`Component::build_content`].
    pub fn render<C: Component>(
        &mut self,
        instance: &mut Instance<C>,
        sink: &mut dyn TreeConsumer,
        sequence: u32,
    ) -> Result<()> {
        self.ensure_mounted(instance)?;
        let Self {
            chain,
            resolver,
            composition,
        } = self;
        let Instance {
            component,
            id,
            lifecycle,
            ..
        } = instance;

        lifecycle.transition(LifecycleState::Rendering)?;
        let component: &dyn Component = &*component;
        let tag = resolver.resolve_tag_name(component);
        let mut ctx = context(component, *id, composition, resolver);

        let mut attributes = Attributes::new();
        chain.attributes_resolved(&mut ctx, &mut attributes)?;
        tracing::trace!(
            component = ctx.type_name(),
            tag = %tag,
            attributes = attributes.len(),
            "rendering"
        );

        sink.open_element(&tag, sequence);
        let mut next = sequence.saturating_add(1);
        for (name, value) in attributes {
            sink.add_attribute(next, &name, value);
            next = next.saturating_add(1);
        }
        chain.content_building(&mut ctx, sink, &mut next)?;
        component.build_content(sink);
        sink.close_element();
        Ok(())
    }

    /// Run the after-render hooks. The first call after the first render
    /// reports `first_render = true`.
    pub fn after_render<C: Component>(&mut self, instance: &mut Instance<C>) -> Result<()> {
        self.ensure_mounted(instance)?;
        if instance.lifecycle.state() != LifecycleState::Rendering {
            return Err(Error::Lifecycle {
                component: instance.component.type_handle().name,
                from: instance.lifecycle.state(),
                to: LifecycleState::Rendering,
            });
        }
        let first_render = instance.after_renders == 0;
        instance.after_renders += 1;

        let mut ctx = context(
            &instance.component,
            instance.id,
            &mut self.composition,
            &self.resolver,
        );
        self.chain.after_render(&mut ctx, first_render)
    }

    /// Dispose the instance and unmount it. Its registered children stay
    /// mounted.
    ///
    /// The instance ends `Disposed` and unmounted even when a dispose hook
    /// fails; the hook's error is returned afterwards.
    pub fn dispose<C: Component>(&mut self, instance: &mut Instance<C>) -> Result<()> {
        instance.lifecycle.transition(LifecycleState::Disposing)?;
        let hooks = {
            let mut ctx = context(
                &instance.component,
                instance.id,
                &mut self.composition,
                &self.resolver,
            );
            self.chain.dispose(&mut ctx)
        };
        self.composition.unmount(instance.id);
        instance.lifecycle.transition(LifecycleState::Disposed)?;
        hooks
    }

    fn ensure_mounted<C: Component>(&self, instance: &Instance<C>) -> Result<()> {
        if self.composition.contains(instance.id) {
            Ok(())
        } else {
            Err(Error::NotMounted {
                component: instance.component.type_handle().name,
            })
        }
    }
}

fn context<'a>(
    component: &'a dyn Component,
    id: ComponentId,
    composition: &'a mut Composition,
    resolver: &'a Resolver,
) -> HookContext<'a> {
    HookContext {
        component,
        id,
        composition,
        descriptor: component.descriptor(),
        resolver,
    }
}
