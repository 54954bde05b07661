//! Delegated control events.
//!
//! Each page container has a single event endpoint. The control that
//! originated an event identifies itself with a `control` attribute of the
//! form `<action>[:<target>]`, for example `add:3`, `decrease:7`,
//! `category:dessert` or `checkout`. Controls rendered after page load
//! therefore need no wiring of their own.

use std::fmt;
use std::str::FromStr;

use quickbite_core::{CategoryFilter, ItemId};
use thiserror::Error;

use super::{Command, Page};

/// Why a control event could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown container: {0}")]
    UnknownContainer(String),
    #[error("event on {0} carried no control")]
    MissingControl(Container),
    #[error("unknown action {action:?} on {container}")]
    UnknownAction { container: Container, action: String },
    #[error("invalid target {target:?} for action {action}")]
    InvalidTarget { action: String, target: String },
}

/// A page region that listens for events from its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// The menu grid (add-to-cart buttons).
    Menu,
    /// The category filter bar.
    Categories,
    /// The search box.
    Search,
    /// The cart contents (steppers, remove, checkout, browse).
    Cart,
    /// Header navigation.
    Nav,
}

impl Container {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Categories => "categories",
            Self::Search => "search",
            Self::Cart => "cart",
            Self::Nav => "nav",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Container {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(Self::Menu),
            "categories" => Ok(Self::Categories),
            "search" => Ok(Self::Search),
            "cart" => Ok(Self::Cart),
            "nav" => Ok(Self::Nav),
            other => Err(DispatchError::UnknownContainer(other.to_string())),
        }
    }
}

/// Resolve a control event into a command.
///
/// `control` is the originating control's identity; `value` carries free
/// text for inputs (the search box).
///
/// # Errors
///
/// Returns `DispatchError` if the control is missing, not handled by the
/// container, or has an unparsable target.
pub fn resolve(
    container: Container,
    control: Option<&str>,
    value: Option<&str>,
) -> Result<Command, DispatchError> {
    if container == Container::Search {
        return Ok(Command::Search(value.unwrap_or_default().to_string()));
    }

    let control = control
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(DispatchError::MissingControl(container))?;
    let (action, target) = control
        .split_once(':')
        .map_or((control, None), |(action, target)| (action, Some(target)));

    match (container, action) {
        (Container::Menu, "add") => Ok(Command::AddToCart(item_id(action, target)?)),
        (Container::Categories, "category") => {
            let raw = target.unwrap_or_default();
            let filter = raw
                .parse::<CategoryFilter>()
                .map_err(|_| invalid(action, raw))?;
            Ok(Command::SelectCategory(filter))
        }
        (Container::Cart, "increase") => Ok(Command::ChangeQuantity {
            id: item_id(action, target)?,
            delta: 1,
        }),
        (Container::Cart, "decrease") => Ok(Command::ChangeQuantity {
            id: item_id(action, target)?,
            delta: -1,
        }),
        (Container::Cart, "remove") => Ok(Command::RemoveFromCart(item_id(action, target)?)),
        (Container::Cart, "checkout") => Ok(Command::Checkout),
        (Container::Cart | Container::Nav, "browse") => Ok(Command::Navigate(Page::Catalog)),
        (Container::Nav, "show") => {
            let raw = target.unwrap_or_default();
            let page = Page::parse(raw).ok_or_else(|| invalid(action, raw))?;
            Ok(Command::Navigate(page))
        }
        _ => Err(DispatchError::UnknownAction {
            container,
            action: action.to_string(),
        }),
    }
}

fn item_id(action: &str, target: Option<&str>) -> Result<ItemId, DispatchError> {
    let raw = target.unwrap_or_default();
    raw.parse().map_err(|_| invalid(action, raw))
}

fn invalid(action: &str, target: &str) -> DispatchError {
    DispatchError::InvalidTarget {
        action: action.to_string(),
        target: target.to_string(),
    }
}
