//! Pointer-reactive particle/graph engine. Everything under this module is
//! free of browser types and runs on the host target; the canvas component
//! feeds it pointer samples and frame deltas and reads attribute slices back
//! out for upload.

mod clock;
mod config;
mod edges;
mod math;
mod nodes;
mod pointer;
mod reveal;
mod scene;

pub use clock::FrameClock;
pub use config::{CategoryDef, ConfigError, EdgeRule, NodeSpec, SceneConfig, Tuning};
pub use edges::{Edge, EdgeField, Pulse};
pub use nodes::{Node, NodeField};
pub use pointer::{PointerState, PointerTracker, Viewport};
pub use reveal::{RevealPhase, RevealTimeline, RevealTiming};
pub use scene::{HoveredInfo, Scene};
