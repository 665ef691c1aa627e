//! Size state for the resizable filter popover.

use tracing::trace;

pub const MIN_WIDTH: f64 = 280.0;
pub const MAX_WIDTH: f64 = 600.0;
pub const MIN_HEIGHT: f64 = 300.0;
pub const MAX_HEIGHT: f64 = 700.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const DEFAULT: Size = Size {
        width: 400.0,
        height: 480.0,
    };

    pub fn clamped(self) -> Size {
        Size {
            width: self.width.clamp(MIN_WIDTH, MAX_WIDTH),
            height: self.height.clamp(MIN_HEIGHT, MAX_HEIGHT),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::DEFAULT
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResizablePopover {
    size: Size,
    resizing: bool,
}

impl ResizablePopover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// True while a drag gesture holds the pointer listeners.
    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    /// Starts a drag at pointer position `(x, y)`.
    ///
    /// The pointer listeners stay attached for as long as the returned
    /// gesture lives and are released when it is dropped, whether the drag
    /// ended with a pointer-up or was abandoned.
    pub fn begin_resize(&mut self, x: f64, y: f64) -> ResizeGesture<'_> {
        trace!(x, y, "Resize gesture started");
        self.resizing = true;
        let start_size = self.size;
        ResizeGesture {
            popover: self,
            origin: (x, y),
            start_size,
        }
    }
}

/// A drag in progress on the popover's resize handle.
#[derive(Debug)]
pub struct ResizeGesture<'a> {
    popover: &'a mut ResizablePopover,
    origin: (f64, f64),
    start_size: Size,
}

impl ResizeGesture<'_> {
    /// Resizes relative to where the drag started, within the size limits.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Size {
        let size = Size {
            width: self.start_size.width + (x - self.origin.0),
            height: self.start_size.height + (y - self.origin.1),
        }
        .clamped();
        self.popover.size = size;
        size
    }

    pub fn size(&self) -> Size {
        self.popover.size
    }

    /// Ends the drag on pointer-up.
    pub fn release(self) -> Size {
        self.popover.size
    }
}

impl Drop for ResizeGesture<'_> {
    fn drop(&mut self) {
        self.popover.resizing = false;
        trace!(
            width = self.popover.size.width,
            height = self.popover.size.height,
            "Resize gesture released"
        );
    }
}
