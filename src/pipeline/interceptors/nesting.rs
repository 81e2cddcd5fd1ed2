//! Nesting validation against declared parent requirements.

use std::sync::Arc;

use crate::composition::AncestorLink;
use crate::error::{Error, Result};
use crate::pipeline::interceptor::{HookContext, Interceptor};

/// On initialization, resolves every parent requirement of the component
/// against its captured enclosing chain.
///
/// A present ancestor gets the component registered as its child. A missing
/// required ancestor fails with [`Error::MissingParent`]; a missing optional
/// one is recorded as an empty link.
#[derive(Debug, Default, Clone, Copy)]
pub struct NestingValidator;

impl Interceptor for NestingValidator {
    fn name(&self) -> &'static str {
        "nesting"
    }

    fn on_initialized(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        let descriptor = Arc::clone(&ctx.descriptor);
        for requirement in descriptor.parents() {
            let parent = requirement.parent;
            let ancestor = ctx.composition.captured_ancestor(ctx.id, parent.id);
            match ancestor {
                Some(ancestor) => {
                    ctx.composition.register_child(ancestor, ctx.id);
                }
                None if requirement.optional => {
                    tracing::trace!(
                        component = descriptor.type_name(),
                        parent = parent.name,
                        "optional parent absent"
                    );
                }
                None => {
                    tracing::warn!(
                        component = descriptor.type_name(),
                        parent = parent.name,
                        "component rendered outside its required parent"
                    );
                    return Err(Error::MissingParent {
                        component: descriptor.type_name(),
                        parent: parent.name,
                    });
                }
            }
            ctx.composition.link(ctx.id, AncestorLink { parent, ancestor });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentType, Reflect, TypeHandle};
    use crate::composition::{ComponentId, Composition};
    use crate::resolve::fixture::Stub;
    use crate::resolve::Resolver;
    use crate::rules::TypeInfo;
    use pretty_assertions::assert_eq;

    struct Tabs;
    impl ComponentType for Tabs {
        fn type_name() -> &'static str {
            "Tabs"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>()
        }
    }

    struct Tab;
    impl ComponentType for Tab {
        fn type_name() -> &'static str {
            "Tab"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>().parent::<Tabs>(false)
        }
    }

    struct Hint;
    impl ComponentType for Hint {
        fn type_name() -> &'static str {
            "Hint"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>().parent::<Tabs>(true)
        }
    }

    fn initialize<T: ComponentType>(
        composition: &mut Composition,
        enclosing: Option<ComponentId>,
    ) -> (ComponentId, Result<()>) {
        let component = Stub::<T>::new();
        let id = composition.mount(TypeHandle::of::<T>(), enclosing);
        let resolver = Resolver::default();
        let mut ctx = HookContext {
            component: &component,
            id,
            composition,
            descriptor: component.descriptor(),
            resolver: &resolver,
        };
        (id, NestingValidator.on_initialized(&mut ctx))
    }

    #[test]
    fn required_parent_missing_fails() {
        let mut composition = Composition::new();
        let (_, result) = initialize::<Tab>(&mut composition, None);
        let err = result.unwrap_err();
        assert!(matches!(err, Error::MissingParent { component: "Tab", parent: "Tabs" }));
        assert!(err.to_string().contains("<Tabs> ... <Tab /> ... </Tabs>"));
    }

    #[test]
    fn present_parent_registers_child() {
        let mut composition = Composition::new();
        let (tabs, _) = initialize::<Tabs>(&mut composition, None);
        let (first, first_result) = initialize::<Tab>(&mut composition, Some(tabs));
        let (second, second_result) = initialize::<Tab>(&mut composition, Some(tabs));
        first_result.unwrap();
        second_result.unwrap();

        assert_eq!(composition.children_of_type::<Tab>(tabs), vec![first, second]);
        assert_eq!(composition.ancestor_of::<Tabs>(first), Some(tabs));
    }

    #[test]
    fn optional_parent_absent_links_nothing() {
        let mut composition = Composition::new();
        let (hint, result) = initialize::<Hint>(&mut composition, None);
        result.unwrap();
        assert_eq!(
            composition.links(hint),
            [AncestorLink { parent: TypeHandle::of::<Tabs>(), ancestor: None }]
        );
    }

    #[test]
    fn no_requirements_is_a_no_op() {
        let mut composition = Composition::new();
        let (tabs, result) = initialize::<Tabs>(&mut composition, None);
        result.unwrap();
        assert!(composition.links(tabs).is_empty());
    }
}
