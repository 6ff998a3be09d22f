//! Background, selection indicator and viewport mask of a picker.

use spinwheel_foundation::{Color, Rect, Size};

/// Opaque texture handle owned by the host framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// What is drawn behind the columns.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Background {
    /// No background node at all.
    #[default]
    Clear,
    Color(Color),
    Texture(TextureId),
}

/// Band marking the selected rows across all columns, centered in the control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionIndicator {
    pub color: Color,
    pub size: Size,
}

/// Non-cell nodes of a picker.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorations {
    background: Background,
    indicator: Option<SelectionIndicator>,
    indicator_color: Color,
    shows_indicator: bool,
    mask: Rect,
}

impl Decorations {
    pub fn new(size: Size, shows_indicator: bool, indicator_color: Color) -> Self {
        Self {
            background: Background::Clear,
            indicator: None,
            indicator_color,
            shows_indicator,
            mask: mask_for(size),
        }
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// A clear color removes the background node.
    pub fn set_background_color(&mut self, color: Color) {
        self.background = if color.is_clear() {
            Background::Clear
        } else {
            Background::Color(color)
        };
    }

    /// `None` removes the background node.
    pub fn set_background_texture(&mut self, texture: Option<TextureId>) {
        self.background = match texture {
            Some(texture) => Background::Texture(texture),
            None => Background::Clear,
        };
    }

    pub fn indicator(&self) -> Option<&SelectionIndicator> {
        self.indicator.as_ref()
    }

    pub fn shows_indicator(&self) -> bool {
        self.shows_indicator
    }

    /// Shows or releases the indicator band of `band` size.
    pub fn set_shows_indicator(&mut self, shows: bool, band: Size) {
        self.shows_indicator = shows;
        self.indicator = shows.then_some(SelectionIndicator {
            color: self.indicator_color,
            size: band,
        });
    }

    pub fn indicator_color(&self) -> Color {
        self.indicator_color
    }

    pub fn set_indicator_color(&mut self, color: Color) {
        self.indicator_color = color;
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.color = color;
        }
    }

    /// Viewport mask in control-local coordinates.
    pub fn mask(&self) -> Rect {
        self.mask
    }

    /// Rebuilds the mask and resizes the indicator after a reload.
    pub fn layout(&mut self, size: Size, max_row_height: f32) {
        self.mask = mask_for(size);
        if self.shows_indicator {
            self.set_shows_indicator(true, Size::new(size.width, max_row_height));
        }
    }
}

fn mask_for(size: Size) -> Rect {
    Rect::new(-size.width / 2.0, -size.height / 2.0, size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_removes_background() {
        let mut decorations = Decorations::new(Size::new(200.0, 200.0), true, Color::WHITE);
        decorations.set_background_color(Color::BLACK);
        assert_eq!(decorations.background(), Background::Color(Color::BLACK));

        decorations.set_background_color(Color::CLEAR);
        assert_eq!(decorations.background(), Background::Clear);
    }

    #[test]
    fn test_texture_background() {
        let mut decorations = Decorations::new(Size::new(200.0, 200.0), true, Color::WHITE);
        decorations.set_background_texture(Some(TextureId(7)));
        assert_eq!(decorations.background(), Background::Texture(TextureId(7)));

        decorations.set_background_texture(None);
        assert_eq!(decorations.background(), Background::Clear);
    }

    #[test]
    fn test_indicator_follows_layout_and_color() {
        let mut decorations = Decorations::new(Size::new(200.0, 100.0), true, Color::WHITE);
        assert!(decorations.indicator().is_none());

        decorations.layout(Size::new(200.0, 100.0), 44.0);
        decorations.set_indicator_color(Color::BLACK);

        let indicator = decorations.indicator().unwrap();
        assert_eq!(indicator.size, Size::new(200.0, 44.0));
        assert_eq!(indicator.color, Color::BLACK);
        assert_eq!(decorations.mask(), Rect::new(-100.0, -50.0, 200.0, 100.0));
    }

    #[test]
    fn test_hidden_indicator_is_released() {
        let mut decorations = Decorations::new(Size::new(200.0, 200.0), true, Color::WHITE);
        decorations.layout(Size::new(200.0, 200.0), 44.0);

        decorations.set_shows_indicator(false, Size::ZERO);
        decorations.layout(Size::new(200.0, 200.0), 44.0);

        assert!(decorations.indicator().is_none());
        assert!(!decorations.shows_indicator());
    }
}
