use super::resolver::{IconCandidate, IconResolution};

/// Walks an [`IconResolution`] as image loads fail.
///
/// The presentation layer renders [`IconCursor::current`] and calls
/// [`IconCursor::on_load_error`] when that image fails to load.
#[derive(Debug, Clone)]
pub struct IconCursor {
    resolution: IconResolution,
    index: usize,
}

impl IconCursor {
    pub fn new(resolution: IconResolution) -> Self {
        Self {
            resolution,
            index: 0,
        }
    }

    pub fn current(&self) -> &IconCandidate {
        &self.resolution.candidates()[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance past a failed image. Returns the next candidate to render,
    /// or `None` if the current candidate cannot fail or nothing is left.
    pub fn on_load_error(&mut self) -> Option<&IconCandidate> {
        if !self.current().can_fail() || self.index + 1 >= self.resolution.len() {
            return None;
        }
        self.index += 1;
        tracing::trace!(index = self.index, "icon candidate failed, advancing");
        Some(self.current())
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.resolution.len()
    }
}

impl From<IconResolution> for IconCursor {
    fn from(resolution: IconResolution) -> Self {
        Self::new(resolution)
    }
}
