//! Path-style routes between screens

use super::access::AccessLevel;
use super::catalog::LibraryKind;

/// Screens of the application
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Access gate
    Landing,
    Menu,
    Library(LibraryKind),
}

/// A screen plus the access level carried into it.
/// Path format: `/menu?userType=hc7`, `/clips?userType=visitor`, `/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub screen: Screen,
    pub access: AccessLevel,
}

impl Route {
    pub fn landing() -> Self {
        Self {
            screen: Screen::Landing,
            access: AccessLevel::Visitor,
        }
    }

    pub fn menu(access: AccessLevel) -> Self {
        Self {
            screen: Screen::Menu,
            access,
        }
    }

    pub fn library(kind: LibraryKind, access: AccessLevel) -> Self {
        Self {
            screen: Screen::Library(kind),
            access,
        }
    }

    /// Parse a path. Unknown paths fall back to the landing route.
    pub fn parse(path: &str) -> Self {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let access = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "userType")
            .map(|(_, value)| AccessLevel::from_query_value(value))
            .unwrap_or_default();

        match path.trim_matches('/') {
            "menu" => Self::menu(access),
            segment => match LibraryKind::from_segment(segment) {
                Some(kind) => Self::library(kind, access),
                None => Self::landing(),
            },
        }
    }

    pub fn to_path(&self) -> String {
        let segment = match self.screen {
            Screen::Landing => return "/".to_string(),
            Screen::Menu => "menu",
            Screen::Library(kind) => kind.segment(),
        };
        format!("/{}?userType={}", segment, self.access.query_value())
    }
}
