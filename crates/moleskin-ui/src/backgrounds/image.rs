use std::rc::Rc;

use image::{DynamicImage, RgbaImage};
use moleskin_engine::ConfigError;
use moleskin_engine::assets::{AssetCache, Loader};
use moleskin_engine::coords::{Position, Size};
use moleskin_engine::paint::pixels;
use moleskin_engine::surface::Surface;

use crate::artist::Artist;
use crate::component::Component;
use crate::state::StateModel;
use crate::template::{Bind, TemplateRef, fixed};

/// Form of an image background: pixels already converted for blitting.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageForm {
    pub pixels: Rc<RgbaImage>,
}

impl ImageForm {
    /// Converts `image`, rejecting pixel formats surfaces cannot take.
    pub fn from_image(image: &DynamicImage) -> Result<Self, ConfigError> {
        Ok(Self { pixels: Rc::new(pixels::to_surface_pixels(image)?) })
    }

    pub fn size(&self) -> Size {
        Size::new(self.pixels.width() as i32, self.pixels.height() as i32)
    }
}

/// Blits an image at the top-left of its region.
pub struct BackgroundImage<S: StateModel> {
    template: TemplateRef<S, ImageForm>,
}

impl<S: StateModel> BackgroundImage<S> {
    pub fn new(template: TemplateRef<S, ImageForm>) -> Self {
        Self { template }
    }

    pub fn from_image(image: &DynamicImage) -> Result<Self, ConfigError> {
        Ok(Self::new(fixed(ImageForm::from_image(image)?)))
    }

    /// Loads `path` through `cache`, usually an
    /// [`ImageCache`](moleskin_engine::assets::ImageCache). Load failures
    /// propagate unchanged.
    pub fn load<L: Loader<DynamicImage>>(
        cache: &mut AssetCache<DynamicImage, L>,
        path: &str,
    ) -> anyhow::Result<Self> {
        let image = cache.get(path)?;
        Ok(Self::from_image(&image)?)
    }
}

impl<S: StateModel> Artist<S> for BackgroundImage<S> {
    type Form = ImageForm;

    fn template(&self) -> Option<&dyn Bind<S, ImageForm>> {
        Some(&*self.template)
    }

    fn draw(&self, surface: &mut dyn Surface, form: ImageForm, _owner: &Component<S>) {
        surface.blit(&form.pixels, Position::ORIGIN);
    }

    fn natural_size(&self) -> Size {
        self.template.constant_form().map(ImageForm::size).unwrap_or(Size::ZERO)
    }
}
