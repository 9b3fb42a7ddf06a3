//! Layout: alignment policy, dynamic units and the flow positioner.

pub mod alignment;
pub mod unit;
pub mod positioner;

pub use alignment::{Alignment, CrossAlign, Justify};
pub use positioner::{FlowPositioner, LayoutContext, LayoutError, Positioner};
pub use unit::{Unit, UnitVec};
