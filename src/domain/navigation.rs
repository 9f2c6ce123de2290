use strum::{EnumIter, IntoEnumIterator};

/// Navigable pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Route {
    #[default]
    Dashboard,
    Competitors,
    Intelligence,
    Market,
    Reports,
    Subscriptions,
    Accessibility,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Competitors => "/competitors",
            Route::Intelligence => "/intelligence",
            Route::Market => "/market",
            Route::Reports => "/reports",
            Route::Subscriptions => "/subscriptions",
            Route::Accessibility => "/accessibility",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Competitors => "Competitor Analysis",
            Route::Intelligence => "Product Intelligence",
            Route::Market => "Market Trends",
            Route::Reports => "Reports",
            Route::Subscriptions => "Subscriptions",
            Route::Accessibility => "Accessibility",
        }
    }

    /// Unknown paths land on the dashboard; a trailing slash is ignored.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or("/");
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Route::iter().find(|r| r.path() == normalized).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_roundtrip() {
        for route in Route::iter() {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn tolerant_parsing() {
        assert_eq!(Route::from_path("/market/"), Route::Market);
        assert_eq!(Route::from_path("/reports?tab=2"), Route::Reports);
        assert_eq!(Route::from_path("/nowhere"), Route::Dashboard);
        assert_eq!(Route::from_path(""), Route::Dashboard);
    }
}
