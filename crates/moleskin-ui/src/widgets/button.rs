use moleskin_engine::ConfigError;
use moleskin_engine::paint::Color;
use moleskin_engine::surface::Surface;

use crate::artist::Artist;
use crate::component::{BackgroundSpec, Component, ComponentBuilder, Press};
use crate::state::StateModel;
use crate::template::{Bind, TemplateRef, fixed};

/// Colors of a button at rest and while pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonForm {
    pub initial: Color,
    pub pressed: Color,
}

impl ButtonForm {
    pub const fn new(initial: Color, pressed: Color) -> Self {
        Self { initial, pressed }
    }

    pub fn from_hex(initial: &str, pressed: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(Color::from_hex(initial)?, Color::from_hex(pressed)?))
    }
}

/// Fills with the pressed color while its owner is pressed.
pub struct ButtonBackground<S: StateModel> {
    template: TemplateRef<S, ButtonForm>,
}

impl<S: StateModel> ButtonBackground<S> {
    pub fn new(template: TemplateRef<S, ButtonForm>) -> Self {
        Self { template }
    }

    pub fn fixed(form: ButtonForm) -> Self {
        Self::new(fixed(form))
    }

    pub fn from_hex(initial: &str, pressed: &str) -> Result<Self, ConfigError> {
        Ok(Self::fixed(ButtonForm::from_hex(initial, pressed)?))
    }
}

impl<S: StateModel> Artist<S> for ButtonBackground<S> {
    type Form = ButtonForm;

    fn template(&self) -> Option<&dyn Bind<S, ButtonForm>> {
        Some(&*self.template)
    }

    fn draw(&self, surface: &mut dyn Surface, form: ButtonForm, owner: &Component<S>) {
        surface.fill(if owner.is_pressed() { form.pressed } else { form.initial });
    }
}

/// A childless component that latches pressed when clicked.
///
/// ```rust,ignore
/// let start = Button::builder(ButtonBackground::from_hex("#202020", "#606060")?)
///     .foreground("Start")
///     .build(&mut fonts)?;
/// ```
pub struct Button;

impl Button {
    pub fn builder<S: StateModel>(background: ButtonBackground<S>) -> ComponentBuilder<S> {
        Component::builder(BackgroundSpec::artist(background)).clickable(Press::default())
    }
}
