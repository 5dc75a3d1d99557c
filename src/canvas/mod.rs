pub mod composer;
pub mod draw;
pub mod frame;
pub mod text;
pub mod theme;

pub use composer::SceneComposer;
pub use draw::Draw;
pub use frame::Frame;
pub use text::TextPainter;
pub use theme::Theme;
