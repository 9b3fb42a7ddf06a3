//! Built-in widgets: Group, Block, Text, Button.

pub mod block;
pub mod button;
pub mod group;
pub mod text;

pub use block::Block;
pub use button::Button;
pub use group::Group;
pub use text::Text;
