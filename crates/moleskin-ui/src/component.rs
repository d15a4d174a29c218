//! The composite node of a tree.
//!
//! A [`Component`] owns one background artist, an optional foreground
//! artist, a fixed list of children and an optional [`Layout`]. On its first
//! draw it arranges its children and caches the resulting rectangles; later
//! draws reuse them until [`Component::invalidate_layout`] is called.

use std::rc::Rc;

use moleskin_engine::ConfigError;
use moleskin_engine::coords::{Position, Rect, Size};
use moleskin_engine::paint::Color;
use moleskin_engine::surface::Surface;
use moleskin_engine::text::FontSystem;

use crate::artist::{Artist, Drawable};
use crate::backgrounds::{BackgroundColor, ColorForm};
use crate::foreground::{Alignment, Foreground, ForegroundForm};
use crate::layout::{Arrangement, Layout};
use crate::state::StateModel;
use crate::template::TemplateRef;

// ── Placement ─────────────────────────────────────────────────────────────

/// Cached arrangement of a component, relative to its own origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub size: Size,
    pub background: Rect,
    /// One rectangle per child the layout accepted, in child order.
    pub children: Vec<Rect>,
    pub foreground: Rect,
}

// ── Clickable ─────────────────────────────────────────────────────────────

/// Capability of reacting to a click that lands on a component.
pub trait Clickable {
    /// `at` is relative to the component's origin.
    fn click(&mut self, at: Position);

    fn is_pressed(&self) -> bool;

    fn release(&mut self);
}

/// Latches pressed on click until released.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pressed: bool,
}

impl Clickable for Press {
    fn click(&mut self, _at: Position) {
        self.pressed = true;
    }

    fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn release(&mut self) {
        self.pressed = false;
    }
}

// ── Component ─────────────────────────────────────────────────────────────

pub struct Component<S: StateModel> {
    background: Box<dyn Drawable<S>>,
    foreground: Option<Box<dyn Drawable<S>>>,
    children: Vec<Component<S>>,
    layout: Option<Rc<dyn Layout>>,
    clickable: Option<Box<dyn Clickable>>,
    placement: Option<Placement>,
}

impl<S: StateModel> Component<S> {
    pub fn builder(background: impl Into<BackgroundSpec<S>>) -> ComponentBuilder<S> {
        ComponentBuilder::new(background)
    }

    /// Draws the background, each accepted child, then the foreground.
    ///
    /// Arranges on the first call and whenever the cached arrangement was
    /// invalidated. Every drawable gets its own subsurface and binds its own
    /// template against `state`.
    pub fn draw(&mut self, surface: &mut dyn Surface, state: &S) {
        if self.placement.is_none() {
            let placement = self.arrange(surface.size());
            log::trace!(
                "arranged component: {}x{}, {} of {} children placed",
                placement.size.width,
                placement.size.height,
                placement.children.len(),
                self.children.len()
            );
            self.placement = Some(placement);
        }
        let Some(placement) = &self.placement else {
            return;
        };

        {
            let mut region = surface.subsurface(placement.background);
            self.background.render(&mut *region, state, self);
        }

        for (child, rect) in self.children.iter_mut().zip(&placement.children) {
            let mut region = surface.subsurface(*rect);
            child.draw(&mut *region, state);
        }

        if let Some(foreground) = &self.foreground {
            let mut region = surface.subsurface(placement.foreground);
            foreground.render(&mut *region, state, self);
        }
    }

    fn arrange(&self, destination: Size) -> Placement {
        let child_sizes: Vec<Size> = self.children.iter().map(Component::current_size).collect();
        let arrangement = match &self.layout {
            Some(layout) => layout.arrange(destination, &child_sizes),
            None => Arrangement::new(self.natural_size(), Vec::new()),
        };

        let full = Rect::from_origin_size(Position::ORIGIN, arrangement.size);
        let children = arrangement
            .positions
            .iter()
            .zip(&child_sizes)
            .map(|(position, size)| Rect::from_origin_size(*position, *size))
            .collect();

        Placement {
            size: arrangement.size,
            background: full,
            children,
            foreground: full,
        }
    }

    /// The foreground's natural size, or zero without one.
    fn natural_size(&self) -> Size {
        self.foreground.as_ref().map(|fg| fg.size_hint()).unwrap_or(Size::ZERO)
    }

    /// Arranged size once drawn, natural size before.
    pub fn current_size(&self) -> Size {
        match &self.placement {
            Some(placement) => placement.size,
            None => self.natural_size(),
        }
    }

    /// The cached arrangement, if this component has been drawn.
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Drops the cached arrangement of this component and its descendants.
    ///
    /// The next draw re-arranges against the surface it is given.
    pub fn invalidate_layout(&mut self) {
        self.placement = None;
        for child in &mut self.children {
            child.invalidate_layout();
        }
    }

    pub fn children(&self) -> &[Component<S>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Component<S>] {
        &mut self.children
    }

    pub fn layout(&self) -> Option<&Rc<dyn Layout>> {
        self.layout.as_ref()
    }

    // ── Input ─────────────────────────────────────────────────────────────

    /// Routes a click at `(x, y)`, relative to this component's origin.
    ///
    /// A clickable component takes the click itself. Otherwise the click goes
    /// to the first child whose cached rectangle contains the point, with
    /// coordinates translated into that child. Returns the component that
    /// handled it, or `None` if nothing did. Undrawn components have no
    /// rectangles and handle nothing.
    pub fn on_click(&mut self, x: i32, y: i32) -> Option<&mut Component<S>> {
        let point = Position::new(x, y);
        let bounds = Rect::from_origin_size(Position::ORIGIN, self.placement.as_ref()?.size);
        if let Some(clickable) = &mut self.clickable {
            if !bounds.contains(point) {
                return None;
            }
            clickable.click(point);
            log::debug!("click at ({x}, {y}) pressed component");
            return Some(self);
        }

        let placement = self.placement.as_ref()?;
        let index = placement.children.iter().position(|rect| rect.contains(point))?;
        let origin = placement.children[index].origin;
        self.children[index].on_click(x - origin.x, y - origin.y)
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable.is_some()
    }

    pub fn is_pressed(&self) -> bool {
        self.clickable.as_ref().is_some_and(|c| c.is_pressed())
    }

    /// Releases this component and every pressed descendant.
    pub fn release(&mut self) {
        if let Some(clickable) = &mut self.clickable {
            clickable.release();
        }
        for child in &mut self.children {
            child.release();
        }
    }
}

// ── Construction inputs ───────────────────────────────────────────────────

/// What a component's background may be built from.
///
/// Resolved to an artist once, by [`ComponentBuilder::build`].
pub enum BackgroundSpec<S: StateModel> {
    /// `#RRGGBB` or `#RRGGBBAA`.
    Hex(String),
    Color(Color),
    Form(ColorForm),
    Template(TemplateRef<S, ColorForm>),
    Artist(Box<dyn Drawable<S>>),
}

impl<S: StateModel> BackgroundSpec<S> {
    pub fn artist(artist: impl Artist<S>) -> Self {
        BackgroundSpec::Artist(Box::new(artist))
    }

    fn resolve(self) -> Result<Box<dyn Drawable<S>>, ConfigError> {
        let artist: Box<dyn Drawable<S>> = match self {
            BackgroundSpec::Hex(hexcode) => {
                Box::new(BackgroundColor::<S>::fixed(ColorForm::from_hex(&hexcode)?))
            }
            BackgroundSpec::Color(color) => Box::new(BackgroundColor::<S>::fixed(color)),
            BackgroundSpec::Form(form) => Box::new(BackgroundColor::<S>::fixed(form)),
            BackgroundSpec::Template(template) => Box::new(BackgroundColor::new(template)),
            BackgroundSpec::Artist(artist) => artist,
        };
        Ok(artist)
    }
}

impl<S: StateModel> From<&str> for BackgroundSpec<S> {
    fn from(hexcode: &str) -> Self {
        BackgroundSpec::Hex(hexcode.to_string())
    }
}

impl<S: StateModel> From<String> for BackgroundSpec<S> {
    fn from(hexcode: String) -> Self {
        BackgroundSpec::Hex(hexcode)
    }
}

impl<S: StateModel> From<Color> for BackgroundSpec<S> {
    fn from(color: Color) -> Self {
        BackgroundSpec::Color(color)
    }
}

impl<S: StateModel> From<ColorForm> for BackgroundSpec<S> {
    fn from(form: ColorForm) -> Self {
        BackgroundSpec::Form(form)
    }
}

impl<S: StateModel> From<TemplateRef<S, ColorForm>> for BackgroundSpec<S> {
    fn from(template: TemplateRef<S, ColorForm>) -> Self {
        BackgroundSpec::Template(template)
    }
}

/// What a component's foreground may be built from.
pub enum ForegroundSpec<S: StateModel> {
    /// Plain text, styled from [`ComponentDefaults`].
    Text(String),
    Form(ForegroundForm),
    Template(TemplateRef<S, ForegroundForm>),
    Artist(Box<dyn Drawable<S>>),
}

impl<S: StateModel> ForegroundSpec<S> {
    pub fn artist(artist: impl Artist<S>) -> Self {
        ForegroundSpec::Artist(Box::new(artist))
    }

    fn resolve(
        self,
        defaults: &ComponentDefaults,
        fonts: &mut FontSystem,
    ) -> Result<Box<dyn Drawable<S>>, ConfigError> {
        let artist: Box<dyn Drawable<S>> = match self {
            ForegroundSpec::Text(text) => Box::new(Foreground::<S>::fixed(defaults.text_form(text, fonts)?)),
            ForegroundSpec::Form(form) => Box::new(Foreground::<S>::fixed(form)),
            ForegroundSpec::Template(template) => Box::new(Foreground::new(template)),
            ForegroundSpec::Artist(artist) => artist,
        };
        Ok(artist)
    }
}

impl<S: StateModel> From<&str> for ForegroundSpec<S> {
    fn from(text: &str) -> Self {
        ForegroundSpec::Text(text.to_string())
    }
}

impl<S: StateModel> From<String> for ForegroundSpec<S> {
    fn from(text: String) -> Self {
        ForegroundSpec::Text(text)
    }
}

impl<S: StateModel> From<ForegroundForm> for ForegroundSpec<S> {
    fn from(form: ForegroundForm) -> Self {
        ForegroundSpec::Form(form)
    }
}

impl<S: StateModel> From<TemplateRef<S, ForegroundForm>> for ForegroundSpec<S> {
    fn from(template: TemplateRef<S, ForegroundForm>) -> Self {
        ForegroundSpec::Template(template)
    }
}

/// Styling applied to plain-text foregrounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDefaults {
    pub font_family: String,
    pub font_size: f32,
    pub antialias: bool,
    pub color: Color,
    pub background: Option<Color>,
    pub alignment: Alignment,
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self {
            font_family: "dejavusans".to_string(),
            font_size: 11.0,
            antialias: false,
            color: Color::black(),
            background: None,
            alignment: Alignment::Left,
        }
    }
}

impl ComponentDefaults {
    /// Resolves the default font and styles `text` with these defaults.
    pub fn text_form(
        &self,
        text: impl Into<Rc<str>>,
        fonts: &mut FontSystem,
    ) -> Result<ForegroundForm, ConfigError> {
        let font = fonts.resolve(&self.font_family, self.font_size)?;
        Ok(ForegroundForm::new(font, text)
            .antialias(self.antialias)
            .color(self.color)
            .background(self.background)
            .alignment(self.alignment))
    }
}

// ── Builder ───────────────────────────────────────────────────────────────

pub struct ComponentBuilder<S: StateModel> {
    background: BackgroundSpec<S>,
    foreground: Option<ForegroundSpec<S>>,
    children: Vec<Component<S>>,
    layout: Option<Rc<dyn Layout>>,
    clickable: Option<Box<dyn Clickable>>,
    defaults: ComponentDefaults,
}

impl<S: StateModel> ComponentBuilder<S> {
    pub fn new(background: impl Into<BackgroundSpec<S>>) -> Self {
        Self {
            background: background.into(),
            foreground: None,
            children: Vec::new(),
            layout: None,
            clickable: None,
            defaults: ComponentDefaults::default(),
        }
    }

    pub fn foreground(mut self, foreground: impl Into<ForegroundSpec<S>>) -> Self {
        self.foreground = Some(foreground.into());
        self
    }

    pub fn child(mut self, child: Component<S>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Component<S>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Some(Rc::new(layout));
        self
    }

    /// Uses an already shared layout, e.g. [`GridLayout::shared`](crate::layout::GridLayout::shared).
    pub fn shared_layout(mut self, layout: Rc<dyn Layout>) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn clickable(mut self, clickable: impl Clickable + 'static) -> Self {
        self.clickable = Some(Box::new(clickable));
        self
    }

    pub fn defaults(mut self, defaults: ComponentDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Resolves background and foreground into artists.
    ///
    /// Fails on a malformed hex color or, for plain-text foregrounds, on a
    /// font family `fonts` does not know.
    pub fn build(self, fonts: &mut FontSystem) -> Result<Component<S>, ConfigError> {
        let background = self.background.resolve()?;
        let foreground = self
            .foreground
            .map(|spec| spec.resolve(&self.defaults, fonts))
            .transpose()?;

        Ok(Component {
            background,
            foreground,
            children: self.children,
            layout: self.layout,
            clickable: self.clickable,
            placement: None,
        })
    }
}
