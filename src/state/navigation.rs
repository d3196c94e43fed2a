//! Console view routing with a back stack

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Screens the console can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    Timer,
    Settings,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Timer => "timer",
            View::Settings => "settings",
        }
    }

    /// Label shown in the navigation bar
    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "HOME",
            View::Timer => "TIMER MODE",
            View::Settings => "SETTINGS",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(View::Home),
            "timer" => Ok(View::Timer),
            "settings" => Ok(View::Settings),
            other => Err(format!("Unknown view: {}", other)),
        }
    }
}

/// Navigation history. Never empty; the last entry is the current view.
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<View>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            history: vec![View::Timer],
        }
    }

    pub fn current(&self) -> View {
        *self.history.last().unwrap_or(&View::Timer)
    }

    pub fn history(&self) -> &[View] {
        &self.history
    }

    /// Push a view, even if it is already showing
    pub fn navigate(&mut self, view: View) {
        self.history.push(view);
    }

    /// Pop back to the previous view. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
