use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPage {
    Reports,
    Orders,
}

impl AppPage {
    pub const ALL: [AppPage; 2] = [AppPage::Reports, AppPage::Orders];

    pub fn title(&self) -> &'static str {
        match self {
            AppPage::Reports => "Reports",
            AppPage::Orders => "Orders",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<AppPage>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(AppPage::Reports),
        }
    }

    pub fn open(&self, page: AppPage) {
        self.active.set(page);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
