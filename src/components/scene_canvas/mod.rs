mod component;

pub use component::SceneCanvas;
