//! Window handle and its behavior flag bitmask.

use bitflags::bitflags;

bitflags! {
    /// Behavior flags carried by a screen's window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WindowFlags: u32 {
        /// Content must not appear in screenshots, recordings, or the
        /// recent-tasks thumbnail.
        const SECURE = 1 << 0;
        const KEEP_SCREEN_ON = 1 << 1;
        const FULLSCREEN = 1 << 2;
    }
}

/// Flag state for one screen's window. Mutated only from the host thread;
/// the compositor reads the mask when it captures or previews the window.
#[derive(Debug, Default)]
pub struct Window {
    flags: WindowFlags,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_flags(&mut self, flags: WindowFlags) {
        self.flags |= flags;
    }

    pub fn clear_flags(&mut self, flags: WindowFlags) {
        self.flags -= flags;
    }

    pub fn has_flags(&self, flags: WindowFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_clear_are_idempotent() {
        let mut window = Window::new();
        window.add_flags(WindowFlags::SECURE);
        window.add_flags(WindowFlags::SECURE);
        assert!(window.has_flags(WindowFlags::SECURE));

        window.clear_flags(WindowFlags::SECURE);
        window.clear_flags(WindowFlags::SECURE);
        assert!(!window.has_flags(WindowFlags::SECURE));
    }

    #[test]
    fn clearing_one_flag_leaves_others() {
        let mut window = Window::new();
        window.add_flags(WindowFlags::SECURE | WindowFlags::KEEP_SCREEN_ON);
        window.clear_flags(WindowFlags::SECURE);
        assert!(window.has_flags(WindowFlags::KEEP_SCREEN_ON));
        assert!(!window.has_flags(WindowFlags::SECURE));
    }
}
