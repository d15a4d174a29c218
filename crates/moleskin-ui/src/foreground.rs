//! Text foregrounds.

use std::rc::Rc;

use moleskin_engine::coords::{Position, Size};
use moleskin_engine::paint::Color;
use moleskin_engine::surface::Surface;
use moleskin_engine::text::FontHandle;

use crate::artist::Artist;
use crate::component::Component;
use crate::state::StateModel;
use crate::template::{Bind, TemplateRef, fixed};

/// Horizontal placement of text inside its region.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// X offset of text `text_width` wide in a region `region_width` wide.
    ///
    /// Negative when the text is wider than the region.
    pub fn offset(self, region_width: i32, text_width: i32) -> i32 {
        match self {
            Alignment::Left => 0,
            Alignment::Center => (region_width - text_width) / 2,
            Alignment::Right => region_width - text_width,
        }
    }
}

/// Everything needed to rasterize one line of text.
#[derive(Debug, Clone)]
pub struct ForegroundForm {
    pub font: FontHandle,
    pub text: Rc<str>,
    pub antialias: bool,
    pub color: Color,
    /// Fill behind the glyphs; `None` leaves it transparent.
    pub background: Option<Color>,
    pub alignment: Alignment,
}

impl ForegroundForm {
    /// Black, aliased, left-aligned text on a transparent background.
    pub fn new(font: FontHandle, text: impl Into<Rc<str>>) -> Self {
        Self {
            font,
            text: text.into(),
            antialias: false,
            color: Color::black(),
            background: None,
            alignment: Alignment::Left,
        }
    }

    pub fn antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Extent of the rendered text.
    pub fn text_size(&self) -> Size {
        self.font.size_of(&self.text)
    }
}

/// Draws a line of text at the top of its region.
pub struct Foreground<S: StateModel> {
    template: TemplateRef<S, ForegroundForm>,
}

impl<S: StateModel> Foreground<S> {
    pub fn new(template: TemplateRef<S, ForegroundForm>) -> Self {
        Self { template }
    }

    pub fn fixed(form: ForegroundForm) -> Self {
        Self::new(fixed(form))
    }
}

impl<S: StateModel> Artist<S> for Foreground<S> {
    type Form = ForegroundForm;

    fn template(&self) -> Option<&dyn Bind<S, ForegroundForm>> {
        Some(&*self.template)
    }

    fn draw(&self, surface: &mut dyn Surface, form: ForegroundForm, _owner: &Component<S>) {
        let image = form.font.render(&form.text, form.antialias, form.color, form.background);
        let x = form.alignment.offset(surface.size().width, image.width() as i32);
        surface.blit(&image, Position::new(x, 0));
    }

    /// Text extent for fixed forms. State-driven text has no size until it
    /// is bound.
    fn natural_size(&self) -> Size {
        self.template.constant_form().map(ForegroundForm::text_size).unwrap_or(Size::ZERO)
    }
}
