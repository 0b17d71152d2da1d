//! Session intent gathered by the prompt workflow.

/// Brightness delta for "Brightness - Low".
pub const BRIGHTNESS_LOW: f32 = 0.1;
/// Brightness delta for "Brightness - High".
pub const BRIGHTNESS_HIGH: f32 = 0.5;
/// Contrast delta; not user-configurable.
pub const CONTRAST_VALUE: f32 = 0.2;

/// Brightness intensity picked in the brightness sub-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessLevel {
    /// Slight brightening.
    Low,
    /// Strong brightening.
    High,
}

impl BrightnessLevel {
    /// Menu labels, in the order shown to the user.
    pub const LABELS: [&'static str; 2] = ["Brightness - Low", "Brightness - High"];

    /// Map a menu index back to a level.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Low),
            1 => Some(Self::High),
            _ => None,
        }
    }

    /// The signed delta passed to the brightness action.
    #[must_use]
    pub fn delta(self) -> f32 {
        match self {
            Self::Low => BRIGHTNESS_LOW,
            Self::High => BRIGHTNESS_HIGH,
        }
    }
}

/// A single pre-watermark edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Brighten by the chosen level.
    Brightness(BrightnessLevel),
    /// Raise contrast by [`CONTRAST_VALUE`].
    Contrast,
    /// Desaturate.
    Greyscale,
    /// Invert colour channels.
    Invert,
}

/// Top-level edit menu labels.
pub const EDIT_LABELS: [&str; 4] = ["Brightness", "Contrast", "Make image b&w", "Invert colours"];

/// Which edit a top-level menu index selects. Brightness needs a second
/// prompt for its level, so it is reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditChoice {
    /// Ask for a brightness level next.
    Brightness,
    /// A complete edit.
    Ready(EditKind),
}

impl EditChoice {
    /// Map a menu index from [`EDIT_LABELS`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Brightness),
            1 => Some(Self::Ready(EditKind::Contrast)),
            2 => Some(Self::Ready(EditKind::Greyscale)),
            3 => Some(Self::Ready(EditKind::Invert)),
            _ => None,
        }
    }
}

/// Watermark kinds offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkKind {
    /// Render a line of text.
    Text,
    /// Composite another image.
    Image,
}

impl WatermarkKind {
    /// Menu labels, in the order shown to the user.
    pub const LABELS: [&'static str; 2] = ["Text watermark", "Image watermark"];

    /// Map a menu index back to a kind.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Text),
            1 => Some(Self::Image),
            _ => None,
        }
    }
}

/// The watermark to apply, with its parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Watermark {
    /// Text to print; may be empty.
    Text(String),
    /// Filename of the overlay image inside the image directory.
    Image(String),
}

impl Watermark {
    /// The kind of this watermark.
    #[must_use]
    pub fn kind(&self) -> WatermarkKind {
        match self {
            Self::Text(_) => WatermarkKind::Text,
            Self::Image(_) => WatermarkKind::Image,
        }
    }
}

/// Everything one run of the workflow needs. Built fresh each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIntent {
    /// Input filename inside the image directory.
    pub input_file: String,
    /// Edit to apply before watermarking, if any.
    pub edit: Option<EditKind>,
    /// The watermark to apply.
    pub watermark: Watermark,
}

impl SessionIntent {
    /// Whether the user asked to edit the picture.
    #[must_use]
    pub fn editing_requested(&self) -> bool {
        self.edit.is_some()
    }
}
