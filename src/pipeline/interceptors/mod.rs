//! Built-in interceptors and the orders [`Pipeline::new`](crate::pipeline::Pipeline::new)
//! registers them at. User interceptors at order 0 run after validation and
//! presentation, and before child content.

pub mod content;
pub mod form;
pub mod nesting;
pub mod presentation;

pub use content::ChildContentInterceptor;
pub use form::FormValidator;
pub use nesting::NestingValidator;
pub use presentation::PresentationInterceptor;

pub const NESTING_ORDER: i32 = -200;
pub const FORM_ORDER: i32 = -100;
pub const PRESENTATION_ORDER: i32 = -100;
pub const CHILD_CONTENT_ORDER: i32 = 100;
