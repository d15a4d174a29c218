use moleskin_engine::ConfigError;
use moleskin_engine::paint::Color;
use moleskin_engine::surface::Surface;

use crate::artist::Artist;
use crate::component::Component;
use crate::state::StateModel;
use crate::template::{Bind, TemplateRef, fixed};

/// Form of a solid background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorForm {
    pub color: Color,
}

impl ColorForm {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }

    /// Parses `#RRGGBB` / `#RRGGBBAA`, with or without the `#`.
    pub fn from_hex(hexcode: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(Color::from_hex(hexcode)?))
    }
}

impl From<Color> for ColorForm {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

/// Fills its whole region with one color.
pub struct BackgroundColor<S: StateModel> {
    template: TemplateRef<S, ColorForm>,
}

impl<S: StateModel> BackgroundColor<S> {
    pub fn new(template: TemplateRef<S, ColorForm>) -> Self {
        Self { template }
    }

    /// Backed by a fixed-form template that never consults state.
    pub fn fixed(form: impl Into<ColorForm>) -> Self {
        Self::new(fixed(form.into()))
    }
}

impl<S: StateModel> Artist<S> for BackgroundColor<S> {
    type Form = ColorForm;

    fn template(&self) -> Option<&dyn Bind<S, ColorForm>> {
        Some(&*self.template)
    }

    fn draw(&self, surface: &mut dyn Surface, form: ColorForm, _owner: &Component<S>) {
        surface.fill(form.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moleskin_engine::coords::Size;
    use moleskin_engine::surface::Canvas;
    use moleskin_engine::text::FontSystem;

    use crate::template::from_fns;

    struct Alarm(bool);

    impl StateModel for Alarm {}

    fn owner() -> Component<Alarm> {
        Component::builder(Color::black()).build(&mut FontSystem::new()).unwrap()
    }

    #[test]
    fn hex_form() {
        assert_eq!(ColorForm::from_hex("#FF0000").unwrap().color, Color::rgb(255, 0, 0));
        assert_eq!(
            ColorForm::from_hex("#ABC").unwrap_err(),
            ConfigError::InvalidHexColor("#ABC".into())
        );
    }

    #[test]
    fn fixed_fills_surface() {
        let artist = BackgroundColor::<Alarm>::fixed(Color::white());
        let mut canvas = Canvas::new(Size::new(3, 3));
        let form = artist.bind_template(&Alarm(true), &owner()).unwrap();
        artist.draw(&mut canvas, form, &owner());
        assert_eq!(canvas.pixel(2, 2), Some(Color::white()));
    }

    #[test]
    fn templated_color_follows_state() {
        let template = from_fns(
            |s: &Alarm| s.0,
            |on: bool, _owner: &Component<Alarm>| {
                ColorForm::new(if on { Color::rgb(255, 0, 0) } else { Color::black() })
            },
        );
        let artist = BackgroundColor::new(template);
        let owner = owner();
        assert_eq!(artist.bind_template(&Alarm(true), &owner).unwrap().color, Color::rgb(255, 0, 0));
        assert_eq!(artist.bind_template(&Alarm(false), &owner).unwrap().color, Color::black());
    }
}
