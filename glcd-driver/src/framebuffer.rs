//! Hand-off to the drawing layer
//!
//! Pixel storage and flushing live outside this crate. Bring-up only needs
//! to point the drawing layer at a screen buffer and wipe it.

/// Screen buffer owner that bring-up hands over to
pub trait FrameBuffer {
    /// Opaque handle naming one screen buffer
    type Screen;

    /// Make `screen` the target of subsequent drawing
    fn select_screen(&mut self, screen: Self::Screen);

    /// Blank the selected screen
    fn clear(&mut self);
}

impl<F: FrameBuffer + ?Sized> FrameBuffer for &mut F {
    type Screen = F::Screen;

    fn select_screen(&mut self, screen: Self::Screen) {
        (**self).select_screen(screen)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}
