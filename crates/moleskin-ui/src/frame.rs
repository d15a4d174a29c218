//! The render loop driver.

use moleskin_engine::coords::Size;
use moleskin_engine::surface::Surface;

use crate::component::Component;
use crate::state::StateModel;

/// Whether the loop should keep going after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

impl From<bool> for FrameControl {
    fn from(keep_going: bool) -> Self {
        if keep_going { FrameControl::Continue } else { FrameControl::Exit }
    }
}

/// Application side of a [`Frame`].
pub trait FrameHandler<S: StateModel> {
    /// Called before every frame: pump input, present the previous frame,
    /// update state. Returning [`FrameControl::Exit`] ends the loop before
    /// anything else is drawn.
    fn poll(&mut self, surface: &mut dyn Surface) -> FrameControl;

    /// Snapshot the root is drawn against this frame.
    fn state(&self) -> &S;
}

/// Owns the root component and drives it once per iteration.
///
/// Each iteration completes fully (poll, then draw) before the next starts.
pub struct Frame<S: StateModel, H> {
    root: Component<S>,
    handler: H,
    last_size: Option<Size>,
}

impl<S: StateModel, H: FrameHandler<S>> Frame<S, H> {
    pub fn new(root: Component<S>, handler: H) -> Self {
        Self { root, handler, last_size: None }
    }

    pub fn root(&self) -> &Component<S> {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Component<S> {
        &mut self.root
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// One iteration. Returns `false` once the handler asked to stop.
    ///
    /// A surface whose size differs from the previous frame's invalidates
    /// the root's arrangement first.
    pub fn step(&mut self, surface: &mut dyn Surface) -> bool {
        if self.handler.poll(surface) == FrameControl::Exit {
            return false;
        }

        let size = surface.size();
        if self.last_size.is_some_and(|last| last != size) {
            log::debug!("surface resized to {}x{}, re-arranging", size.width, size.height);
            self.root.invalidate_layout();
        }
        self.last_size = Some(size);

        self.root.draw(surface, self.handler.state());
        true
    }

    /// Steps until the handler stops the loop. Returns the number of frames
    /// drawn.
    pub fn run(&mut self, surface: &mut dyn Surface) -> u64 {
        let mut frames = 0;
        while self.step(surface) {
            frames += 1;
        }
        log::info!("frame loop stopped after {frames} frames");
        frames
    }

    pub fn into_parts(self) -> (Component<S>, H) {
        (self.root, self.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moleskin_engine::paint::Color;
    use moleskin_engine::surface::Canvas;
    use moleskin_engine::text::FontSystem;

    use crate::backgrounds::ColorForm;
    use crate::layout::FullLayout;
    use crate::template::from_fns;

    struct Ticks(u8);

    impl StateModel for Ticks {}

    /// Stops after `limit` frames, bumping the state each poll.
    struct Countdown {
        state: Ticks,
        limit: u8,
        polls: u8,
    }

    impl FrameHandler<Ticks> for Countdown {
        fn poll(&mut self, _surface: &mut dyn Surface) -> FrameControl {
            self.polls += 1;
            self.state.0 = self.state.0.wrapping_add(50);
            (self.polls <= self.limit).into()
        }

        fn state(&self) -> &Ticks {
            &self.state
        }
    }

    fn root() -> Component<Ticks> {
        let template = from_fns(
            |t: &Ticks| t.0,
            |shade: u8, _owner: &Component<Ticks>| ColorForm::new(Color::rgb(shade, shade, shade)),
        );
        Component::builder(template).layout(FullLayout).build(&mut FontSystem::new()).unwrap()
    }

    #[test]
    fn runs_until_handler_stops() {
        let mut frame = Frame::new(root(), Countdown { state: Ticks(0), limit: 3, polls: 0 });
        let mut canvas = Canvas::new(Size::new(4, 4));
        assert_eq!(frame.run(&mut canvas), 3);
        assert_eq!(frame.handler().polls, 4);
        // last drawn frame saw the third bump
        assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(150, 150, 150)));
    }

    #[test]
    fn immediate_exit_draws_nothing() {
        let mut frame = Frame::new(root(), Countdown { state: Ticks(0), limit: 0, polls: 0 });
        let mut canvas = Canvas::filled(Size::new(2, 2), Color::white());
        assert_eq!(frame.run(&mut canvas), 0);
        assert_eq!(canvas.pixel(0, 0), Some(Color::white()));
        assert!(frame.root().placement().is_none());
    }

    #[test]
    fn resize_rearranges_root() {
        let mut frame = Frame::new(root(), Countdown { state: Ticks(0), limit: 10, polls: 0 });
        assert!(frame.step(&mut Canvas::new(Size::new(4, 4))));
        assert_eq!(frame.root().current_size(), Size::new(4, 4));

        assert!(frame.step(&mut Canvas::new(Size::new(9, 6))));
        assert_eq!(frame.root().current_size(), Size::new(9, 6));
    }

    #[test]
    fn bool_converts_to_control() {
        assert_eq!(FrameControl::from(true), FrameControl::Continue);
        assert_eq!(FrameControl::from(false), FrameControl::Exit);
    }
}
