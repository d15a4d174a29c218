//! Moleskin UI: a retained tree of components driven by application state.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use moleskin_ui::prelude::*;
//!
//! struct Menu { highlighted: bool }
//! impl StateModel for Menu {}
//!
//! let mut fonts = FontSystem::new();
//! fonts.register_family("DejaVu Sans", include_bytes!("DejaVuSans.ttf"))?;
//!
//! let highlight = template::from_fns(
//!     |menu: &Menu| menu.highlighted,
//!     |on: bool, _owner: &Component<Menu>| ColorForm::new(if on { Color::white() } else { Color::black() }),
//! );
//! let root = Component::builder("#101010")
//!     .child(Component::builder(highlight).foreground("New game").build(&mut fonts)?)
//!     .child(Button::builder(ButtonBackground::from_hex("#202020", "#606060")?).foreground("Quit").build(&mut fonts)?)
//!     .shared_layout(GridLayout::shared(1, 2))
//!     .build(&mut fonts)?;
//!
//! Frame::new(root, my_handler).run(&mut canvas);
//! ```
//!
//! # Templates
//!
//! Every artist draws a form produced by its template. Implement
//! [`SingletonTemplate`](template::SingletonTemplate) for templates that
//! re-select from state each frame and are shared per type; wrap a constant
//! form with [`template::fixed`] otherwise.

pub mod artist;
pub mod backgrounds;
pub mod component;
pub mod foreground;
pub mod frame;
pub mod layout;
pub mod state;
pub mod template;
pub mod widgets;

#[cfg(test)]
mod testing;

/// Everything needed to assemble and drive a tree.
pub mod prelude {
    pub use crate::artist::{Artist, Drawable};
    pub use crate::backgrounds::{BackgroundColor, BackgroundImage, ColorForm, ImageForm};
    pub use crate::component::{
        BackgroundSpec, Clickable, Component, ComponentBuilder, ComponentDefaults, ForegroundSpec, Placement, Press,
    };
    pub use crate::foreground::{Alignment, Foreground, ForegroundForm};
    pub use crate::frame::{Frame, FrameControl, FrameHandler};
    pub use crate::layout::{Arrangement, FullLayout, GridLayout, Layout};
    pub use crate::state::{Selector, StateModel};
    pub use crate::template::{self, Bind, FixedForm, SingletonTemplate, Template, TemplateRef};
    pub use crate::widgets::{Button, ButtonBackground, ButtonForm};

    // Engine primitives every tree touches.
    pub use moleskin_engine::ConfigError;
    pub use moleskin_engine::assets::{AssetConfig, ImageCache};
    pub use moleskin_engine::coords::{Position, Rect, Size};
    pub use moleskin_engine::paint::Color;
    pub use moleskin_engine::surface::{Canvas, Surface};
    pub use moleskin_engine::text::{FontHandle, FontSystem};
}
