mod component;
mod config;
mod demo;
mod geometry;
mod graph;
mod placement;
mod render;
mod sim;
mod state;
mod types;

pub use component::CircuitBoardCanvas;
pub use config::BoardConfig;
pub use geometry::Point;
pub use graph::CircuitGraph;
pub use state::{BoardState, DragState, Feedback, Key, WiringState};
pub use types::{Component, ComponentId, GateKind, Selection, Wire, WireId};
