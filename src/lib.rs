#![doc = include_str!("../README.md")]

pub mod bar;
pub mod blocks;
pub(crate) mod color;
pub(crate) mod cursor;
pub(crate) mod error;
pub(crate) mod progress;
pub(crate) mod runner;
pub(crate) mod snapshot;
pub mod terminal;
pub(crate) mod tree;
pub(crate) mod value;


/// Re-exports of all public types and traits.
pub mod prelude {
    pub use crate::bar::{Bar, BarStyle, NumberRepresentation, TitlePosition, WidthSpec};
    pub use crate::color::{Color, paint};
    pub use crate::cursor::Cursor;
    pub use crate::error::{Error, Result};
    pub use crate::progress::TreeProgress;
    pub use crate::runner::RenderLoop;
    pub use crate::snapshot::{NodeKind, NodeView, RenderSnapshot};
    pub use crate::terminal::{AnsiTerminal, Terminal};
    pub use crate::tree::{BarLeaf, Group, ProgressTree};
    pub use crate::value::Value;
}

pub use crate::prelude::*;
