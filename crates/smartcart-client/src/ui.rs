//! UI chrome state: theme and transient panel visibility.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Shared UI state owned by the application root.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub theme: Theme,
    pub mobile_menu_open: bool,
    pub cart_drawer_open: bool,
}

impl UiState {
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn toggle_cart_drawer(&mut self) {
        self.cart_drawer_open = !self.cart_drawer_open;
    }

    /// Close transient panels, e.g. on navigation.
    pub fn close_overlays(&mut self) {
        self.mobile_menu_open = false;
        self.cart_drawer_open = false;
    }
}
