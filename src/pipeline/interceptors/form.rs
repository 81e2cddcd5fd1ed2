//! Parameter validation for form components.

use crate::component::HasForm;
use crate::error::{Error, Result};
use crate::pipeline::interceptor::{HookContext, Interceptor};

/// Rejects invalid parameter combinations on [`HasForm`] components:
///
/// - `on_submit` together with `on_valid_submit` or `on_invalid_submit`;
/// - both `model` and `edit_context`, or neither.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormValidator;

impl Interceptor for FormValidator {
    fn name(&self) -> &'static str {
        "form"
    }

    fn on_parameters_applied(&self, ctx: &mut HookContext<'_>) -> Result<()> {
        if !ctx.descriptor.has_capability::<HasForm>() {
            return Ok(());
        }
        let supplied = |name: &str| ctx.component.property(name).is_some_and(|v| !v.is_null());
        let fail = |message: &str| Error::Configuration {
            component: ctx.type_name(),
            message: message.to_owned(),
        };

        if supplied(HasForm::ON_SUBMIT)
            && (supplied(HasForm::ON_VALID_SUBMIT) || supplied(HasForm::ON_INVALID_SUBMIT))
        {
            return Err(fail(
                "`on_submit` cannot be combined with `on_valid_submit` or `on_invalid_submit`",
            ));
        }
        match (supplied(HasForm::MODEL), supplied(HasForm::EDIT_CONTEXT)) {
            (true, true) => Err(fail("supply either `model` or `edit_context`, not both")),
            (false, false) => Err(fail("one of `model` or `edit_context` is required")),
            _ => Ok(()),
        }
    }
}
