//! Floor overlay control
//!
//! State machine behind the map's floor selector. The buttons list the
//! building's floors top-down, followed by a "hide overlays" button. Depending
//! on how much vertical room the map leaves, the control is either permanently
//! expanded in a compact form, or collapsed behind a toggle and then laid out
//! vertically or horizontally.

use domain::FloorOverlay;
use tokio::sync::broadcast;
use tracing::debug;

/// Rendered height of one floor button
pub const BUTTON_HEIGHT_PX: f64 = 29.0;
/// Vertical space taken by other map controls
pub const CHROME_ALLOWANCE_PX: f64 = 52.0;
/// Spare room below which the collapsed list turns horizontal
pub const LAYOUT_MARGIN_PX: f64 = 10.0;
/// Button counts up to this always use the compact form
pub const REDUCED_MAX_BUTTONS: usize = 3;
/// Fraction of the available height under which the compact form is used
pub const REDUCED_HEIGHT_FRACTION: f64 = 0.2;

const EVENT_CAPACITY: usize = 16;

/// One button of the control
#[derive(Debug, Clone, PartialEq)]
pub enum FloorButton {
    Floor(FloorOverlay),
    /// Hides every overlay
    HideAll,
}

impl FloorButton {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Floor(overlay) => &overlay.floor,
            Self::HideAll => "∅",
        }
    }
}

/// How the control is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlLayout {
    /// Always open, compact
    Reduced,
    /// Behind an open/close toggle
    Collapsed { horizontal: bool },
}

impl ControlLayout {
    /// Pick a layout for `button_count` buttons in `available_height` pixels
    #[must_use]
    pub fn compute(button_count: usize, available_height: f64) -> Self {
        let required = button_count as f64 * BUTTON_HEIGHT_PX;
        if button_count <= REDUCED_MAX_BUTTONS
            || required < available_height * REDUCED_HEIGHT_FRACTION
        {
            return Self::Reduced;
        }
        let spare = available_height - required - CHROME_ALLOWANCE_PX;
        Self::Collapsed {
            horizontal: spare <= LAYOUT_MARGIN_PX,
        }
    }
}

/// Emitted whenever the visible overlay changes
#[derive(Debug, Clone, PartialEq)]
pub struct FloorChanged {
    /// Image of the new overlay, `None` to hide overlays
    pub file: Option<String>,
    /// Image corners, set together with `file`
    pub coordinates: Option<[[f64; 2]; 4]>,
}

impl FloorChanged {
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            file: None,
            coordinates: None,
        }
    }
}

/// The floor selector's state
#[derive(Debug)]
pub struct FloorControl {
    buttons: Vec<FloorButton>,
    layout: ControlLayout,
    open: bool,
    available_height: f64,
    selected: Option<usize>,
    events: broadcast::Sender<FloorChanged>,
}

impl FloorControl {
    #[must_use]
    pub fn new(available_height: f64) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            buttons: Vec::new(),
            layout: ControlLayout::compute(0, available_height),
            open: false,
            available_height,
            selected: None,
            events,
        }
    }

    /// Replace the overlays, ordered bottom floor first
    pub fn set_overlays(&mut self, overlays: &[FloorOverlay]) {
        self.buttons = overlays
            .iter()
            .rev()
            .cloned()
            .map(FloorButton::Floor)
            .chain(std::iter::once(FloorButton::HideAll))
            .collect();
        self.selected = None;
        self.recompute();
    }

    /// The map container changed size
    pub fn resize(&mut self, available_height: f64) {
        self.available_height = available_height;
        self.recompute();
    }

    fn recompute(&mut self) {
        let layout = ControlLayout::compute(self.buttons.len(), self.available_height);
        if layout != self.layout {
            debug!(?layout, buttons = self.buttons.len(), "Floor control layout changed");
            self.layout = layout;
            self.open = false;
        }
    }

    #[must_use]
    pub fn buttons(&self) -> &[FloorButton] {
        &self.buttons
    }

    #[must_use]
    pub const fn layout(&self) -> ControlLayout {
        self.layout
    }

    /// Total height the buttons need when stacked
    #[must_use]
    pub fn required_height(&self) -> f64 {
        self.buttons.len() as f64 * BUTTON_HEIGHT_PX
    }

    /// Whether the button list is visible
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.layout, ControlLayout::Reduced) || self.open
    }

    /// Open or close a collapsed list; the compact form stays open
    pub fn toggle_open(&mut self) {
        if matches!(self.layout, ControlLayout::Collapsed { .. }) {
            self.open = !self.open;
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&FloorButton> {
        self.selected.and_then(|index| self.buttons.get(index))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FloorChanged> {
        self.events.subscribe()
    }

    /// Select the button at `index`
    ///
    /// Returns the resulting event, or `None` for an index out of range.
    pub fn select(&mut self, index: usize) -> Option<FloorChanged> {
        let event = match self.buttons.get(index)? {
            FloorButton::Floor(overlay) => FloorChanged {
                file: Some(overlay.file.clone()),
                coordinates: Some(overlay.coordinates),
            },
            FloorButton::HideAll => FloorChanged::hidden(),
        };

        self.selected = Some(index);
        if matches!(self.layout, ControlLayout::Collapsed { .. }) {
            self.open = false;
        }
        // nobody listening is fine
        let _ = self.events.send(event.clone());
        Some(event)
    }

    /// Select by overlay id; `None` selects the hide-all button
    pub fn select_overlay(&mut self, id: Option<i64>) -> Option<FloorChanged> {
        let index = self.buttons.iter().position(|button| match (button, id) {
            (FloorButton::Floor(overlay), Some(id)) => overlay.id == id,
            (FloorButton::HideAll, None) => true,
            _ => false,
        })?;
        self.select(index)
    }
}
