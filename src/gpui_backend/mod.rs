//! GPUI integration for gpui_funcplot.
//!
//! This module provides a GPUI view that renders a [`Graph`](crate::graph::Graph)
//! and routes left-drag to pan and the scroll wheel to zoom toward the
//! cursor.

mod config;
mod paint;
mod view;

pub use config::GraphViewConfig;
pub use view::{GpuiGraphView, GraphHandle};
