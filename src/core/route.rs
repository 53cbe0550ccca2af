//! # Routes
//!
//! Three paths, two screens. Redirects are not the router's job; the
//! message screen sends itself to `/login` when it has no token.

/// A path the client knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Messages,
}

/// The screen a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Messages,
}

impl Route {
    /// Parses a path. Unknown paths return `None`.
    pub fn parse(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Root),
            "/login" => Some(Route::Login),
            "/messages" => Some(Route::Messages),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Messages => "/messages",
        }
    }

    pub fn screen(self) -> Screen {
        match self {
            Route::Root | Route::Login => Screen::Login,
            Route::Messages => Screen::Messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_paths_two_screens() {
        assert_eq!(Route::parse("/").map(Route::screen), Some(Screen::Login));
        assert_eq!(Route::parse("/login").map(Route::screen), Some(Screen::Login));
        assert_eq!(
            Route::parse("/messages").map(Route::screen),
            Some(Screen::Messages)
        );
    }

    #[test]
    fn test_unknown_paths_do_not_match() {
        assert_eq!(Route::parse("/admin"), None);
        assert_eq!(Route::parse("/messages/"), None);
        assert_eq!(Route::parse(""), None);
    }

    #[test]
    fn test_path_round_trips() {
        for route in [Route::Root, Route::Login, Route::Messages] {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }
}
