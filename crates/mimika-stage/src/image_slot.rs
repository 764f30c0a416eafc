//! Avatar image ownership with stale-load protection.
//!
//! Image decodes complete asynchronously in the embedding shell. Every new
//! load request bumps a generation counter and invalidates the current
//! image; a completion carrying a stale ticket is discarded instead of
//! overwriting fresher state.

use mimika_core::PixelSource;

use crate::error::{StageError, StageResult};

/// Ticket identifying one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Holder of the avatar (or backdrop) image.
#[derive(Debug, Default)]
pub struct ImageSlot {
    image: Option<PixelSource>,
    generation: u64,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load: invalidates the current image and returns the
    /// ticket the completion must present.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.image = None;
        LoadTicket(self.generation)
    }

    /// Completes a load.
    ///
    /// Returns true when the image was installed, false when the ticket
    /// was stale and the data was discarded.
    pub fn complete(&mut self, ticket: LoadTicket, image: PixelSource) -> StageResult<bool> {
        if image.pixels.len() != image.width as usize * image.height as usize * 4 {
            return Err(StageError::bad_image("pixel buffer length mismatch"));
        }
        if ticket.0 != self.generation {
            log::debug!(
                "discarding stale image load (ticket {} vs generation {})",
                ticket.0,
                self.generation
            );
            return Ok(false);
        }
        self.image = Some(image);
        Ok(true)
    }

    /// Drops the current image without starting a new load.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.image = None;
    }

    pub fn image(&self) -> Option<&PixelSource> {
        self.image.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> PixelSource {
        PixelSource::new(width, height, vec![128; (width * height * 4) as usize])
            .expect("valid pixel source")
    }

    #[test]
    fn test_fresh_load_installs() {
        let mut slot = ImageSlot::new();
        let ticket = slot.begin_load();
        assert!(slot.complete(ticket, checker(4, 4)).unwrap());
        assert!(slot.image().is_some());
    }

    #[test]
    fn test_stale_completion_discarded() {
        let mut slot = ImageSlot::new();
        let old = slot.begin_load();
        let fresh = slot.begin_load();

        // The old request resolves after a newer load began.
        assert!(!slot.complete(old, checker(2, 2)).unwrap());
        assert!(slot.image().is_none());

        assert!(slot.complete(fresh, checker(4, 4)).unwrap());
        assert_eq!(slot.image().unwrap().width, 4);
    }

    #[test]
    fn test_begin_load_invalidates_current() {
        let mut slot = ImageSlot::new();
        let ticket = slot.begin_load();
        slot.complete(ticket, checker(4, 4)).unwrap();

        let _pending = slot.begin_load();
        assert!(slot.image().is_none());
    }

    #[test]
    fn test_invalidate_blocks_inflight_completion() {
        let mut slot = ImageSlot::new();
        let ticket = slot.begin_load();
        slot.invalidate();
        assert!(!slot.complete(ticket, checker(2, 2)).unwrap());
        assert!(slot.image().is_none());
    }
}
