//! Dashboard panel: users list and profile tabs.

mod render;

pub use render::render_dashboard;
use taller_core::models::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Users,
    Profile,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 2] = [DashboardTab::Users, DashboardTab::Profile];

    pub fn title(self) -> &'static str {
        match self {
            DashboardTab::Users => "Usuarios",
            DashboardTab::Profile => "Perfil",
        }
    }

    pub fn index(self) -> usize {
        match self {
            DashboardTab::Users => 0,
            DashboardTab::Profile => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            DashboardTab::Users => DashboardTab::Profile,
            DashboardTab::Profile => DashboardTab::Users,
        }
    }
}

/// What the users region currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UsersView {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded(Vec<UserSummary>),
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub tab: DashboardTab,
    pub users: UsersView,
    /// Highlighted row in the users table.
    pub selected: usize,
}

impl DashboardState {
    /// Clears the list and shows the loading indicator.
    pub fn begin_loading(&mut self) {
        self.users = UsersView::Loading;
        self.selected = 0;
    }

    pub fn finish_loading(&mut self, result: Result<Vec<UserSummary>, String>) {
        self.users = match result {
            Ok(users) => UsersView::Loaded(users),
            Err(_) => UsersView::Failed,
        };
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        if let UsersView::Loaded(users) = &self.users
            && self.selected + 1 < users.len()
        {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
