use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Chat,
    Upload,
    About,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Chat => "/chat",
            Route::Upload => "/upload",
            Route::About => "/about",
        }
    }

    /// Pages that carry the navigation bar.
    pub fn shows_nav_bar(self) -> bool {
        matches!(self, Route::About | Route::Upload | Route::Chat)
    }

    /// Pages that only make sense with a session.
    pub fn requires_session(self) -> bool {
        matches!(self, Route::Chat | Route::Upload)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let path = trimmed.trim_start_matches('/').trim_end_matches('/');
        match path.to_ascii_lowercase().as_str() {
            "" | "home" => Ok(Route::Home),
            "login" => Ok(Route::Login),
            "chat" => Ok(Route::Chat),
            "upload" => Ok(Route::Upload),
            "about" => Ok(Route::About),
            _ => Err(UnknownRoute(trimmed.to_string())),
        }
    }
}
