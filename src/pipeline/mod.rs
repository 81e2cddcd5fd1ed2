//! Render pipeline: lifecycle state machine, interceptor chain, and the
//! driver that walks component instances through both.
//!
//! ```text
//! mount ─→ set_parameters ─→ render ─→ after_render ─→ dispose
//!              │  received         attributes_resolved
//!              │  initialized*     content_building
//!              │  applied
//!              └── * first pass only
//! ```

pub mod driver;
pub mod interceptor;
pub mod interceptors;
pub mod lifecycle;

pub use driver::{Instance, Pipeline};
pub use interceptor::{HookContext, Interceptor, InterceptorChain};
pub use interceptors::{
    ChildContentInterceptor, FormValidator, NestingValidator, PresentationInterceptor,
};
pub use lifecycle::{Lifecycle, LifecycleState};
