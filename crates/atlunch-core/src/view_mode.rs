/// Which primary surface the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Map,
    List,
    /// Not yet decided; renders as map-first.
    #[default]
    Unset,
}

/// Seeds the view mode from the first viewport measurement, then gets out of
/// the way once the user picks a mode explicitly.
#[derive(Debug, Clone, Default)]
pub struct ViewModeController {
    mode: ViewMode,
    explicit: bool,
    measured: bool,
}

impl ViewModeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Apply the first viewport measurement. Only the first call has any
    /// effect, and none at all once the mode was set explicitly.
    pub fn resolve_initial(&mut self, is_mobile_viewport: bool) -> ViewMode {
        if !self.explicit && !self.measured && is_mobile_viewport {
            self.mode = ViewMode::List;
        }
        self.measured = true;
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.explicit = true;
        self.measured = true;
    }
}
