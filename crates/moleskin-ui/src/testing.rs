//! Test artists and fixtures.

use std::cell::Cell;
use std::rc::Rc;

use moleskin_engine::coords::{Position, Rect, Size};
use moleskin_engine::paint::Color;
use moleskin_engine::surface::Surface;
use moleskin_engine::text::FontSystem;

use crate::artist::Artist;
use crate::component::Component;
use crate::state::StateModel;
use crate::template::{Bind, FixedForm};

const DEJAVU_SANS: &[u8] = include_bytes!("../../moleskin-engine/fonts/DejaVuSans.ttf");

/// A font system with DejaVu Sans registered, the default component family.
pub fn dejavu() -> FontSystem {
    let mut fonts = FontSystem::new();
    fonts.register_family("DejaVu Sans", DEJAVU_SANS).unwrap();
    fonts
}

/// Shared draw counter.
#[derive(Clone, Default)]
pub struct DrawLog(Rc<Cell<usize>>);

impl DrawLog {
    pub fn count(&self) -> usize {
        self.0.get()
    }

    fn record(&self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Fills a fixed-size square at its region's origin and counts draws.
pub struct Block {
    size: Size,
    template: FixedForm<Color>,
    log: DrawLog,
}

impl Block {
    pub fn new(size: Size, color: Color, log: &DrawLog) -> Self {
        Self { size, template: FixedForm::new(color), log: log.clone() }
    }
}

impl<S: StateModel> Artist<S> for Block {
    type Form = Color;

    fn template(&self) -> Option<&dyn Bind<S, Color>> {
        Some(&self.template)
    }

    fn draw(&self, surface: &mut dyn Surface, form: Color, _owner: &Component<S>) {
        surface.subsurface(Rect::from_origin_size(Position::ORIGIN, self.size)).fill(form);
        self.log.record();
    }

    fn natural_size(&self) -> Size {
        self.size
    }
}

/// Takes up space without a template, so it never draws.
pub struct Spacer(pub Size);

impl<S: StateModel> Artist<S> for Spacer {
    type Form = ();

    fn template(&self) -> Option<&dyn Bind<S, ()>> {
        None
    }

    fn draw(&self, _surface: &mut dyn Surface, _form: (), _owner: &Component<S>) {}

    fn natural_size(&self) -> Size {
        self.0
    }
}
