//! Render-tree emission: the consumer sink, content fragments, and the fluent
//! builder on top of them.

pub mod builder;
pub mod consumer;
pub mod content;

pub use builder::{NodeKind, TreeBuilder, TreeConsumerExt};
pub use consumer::{Frame, RenderTree, TreeConsumer};
pub use content::{fragment, Content, ElementRef, ReferenceCapture, RenderFragment};
