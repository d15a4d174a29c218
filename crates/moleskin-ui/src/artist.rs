//! Artists: the drawable unit pairing a template with a draw operation.

use moleskin_engine::coords::Size;
use moleskin_engine::surface::Surface;

use crate::component::Component;
use crate::state::StateModel;
use crate::template::Bind;

/// Draws one form into a surface.
///
/// An artist holds at most one template and no other mutable state. The form
/// it draws is whatever its template bound for the current frame.
pub trait Artist<S: StateModel>: 'static {
    type Form;

    fn template(&self) -> Option<&dyn Bind<S, Self::Form>>;

    /// Writes pixels into `surface`. The only side-effecting step of a frame.
    fn draw(&self, surface: &mut dyn Surface, form: Self::Form, owner: &Component<S>);

    /// `select_state` then `bind` through this artist's template.
    fn bind_template(&self, state: &S, owner: &Component<S>) -> Option<Self::Form> {
        self.template().map(|template| template.bind_state(state, owner))
    }

    /// Size this artist occupies when nothing else determines it.
    fn natural_size(&self) -> Size {
        Size::ZERO
    }
}

/// Type-erased [`Artist`] as stored by a [`Component`].
pub trait Drawable<S: StateModel> {
    /// Binds the template against `state` and draws the result.
    ///
    /// Artists without a template draw nothing.
    fn render(&self, surface: &mut dyn Surface, state: &S, owner: &Component<S>);

    fn size_hint(&self) -> Size;
}

impl<S: StateModel, A: Artist<S>> Drawable<S> for A {
    fn render(&self, surface: &mut dyn Surface, state: &S, owner: &Component<S>) {
        if let Some(form) = self.bind_template(state, owner) {
            self.draw(surface, form, owner);
        }
    }

    #[inline]
    fn size_hint(&self) -> Size {
        self.natural_size()
    }
}
