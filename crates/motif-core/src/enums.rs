//! Context categories, saved lists, toast kinds, and store phases for Motif.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Phase enums provide `allowed_next_states()` so stores can assert their
//! transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ContextCategory
// ---------------------------------------------------------------------------

/// A single-select context filter category.
///
/// Declaration order is the order in which active filter values are appended
/// to the outbound query text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ContextCategory {
    Social,
    Mood,
}

impl ContextCategory {
    pub const ALL: [Self; 2] = [Self::Social, Self::Mood];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Mood => "mood",
        }
    }

    /// Known option ids for this category, in display order.
    ///
    /// Filter values are free text; these are the ones the product offers.
    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Social => &["parents", "date", "group", "solo"],
            Self::Mood => &["hype", "chill", "deep"],
        }
    }
}

impl fmt::Display for ContextCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "social" => Ok(Self::Social),
            "mood" => Ok(Self::Mood),
            other => Err(CoreError::Validation(format!(
                "unknown context category '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// SavedList
// ---------------------------------------------------------------------------

/// One of the two named per-user saved collections.
///
/// `as_str()` is also the field name of the array in the remote user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SavedList {
    Hearts,
    Watchlist,
}

impl SavedList {
    pub const ALL: [Self; 2] = [Self::Hearts, Self::Watchlist];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hearts => "hearts",
            Self::Watchlist => "watchlist",
        }
    }
}

impl fmt::Display for SavedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SavedList {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hearts" => Ok(Self::Hearts),
            "watchlist" => Ok(Self::Watchlist),
            other => Err(CoreError::Validation(format!("unknown saved list '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// ToastKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Error,
    Success,
}

impl ToastKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SearchPhase
// ---------------------------------------------------------------------------

/// Lifecycle of a search session.
///
/// ```text
/// idle → searching → succeeded
///                  → failed
/// succeeded | failed → searching (new search)
/// any → idle (reset)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Succeeded,
    Failed,
}

impl SearchPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Searching, Self::Idle],
            Self::Searching => &[Self::Searching, Self::Succeeded, Self::Failed, Self::Idle],
            Self::Succeeded | Self::Failed => &[Self::Searching, Self::Idle],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Searching => "searching",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Lifecycle of the signed-in session.
///
/// ```text
/// signed_out → signing_in → signed_in
///                         → signed_out (sign-in failed)
/// signed_in → signed_out
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    SignedOut,
    SigningIn,
    SignedIn,
}

impl SessionPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::SignedOut => &[Self::SigningIn, Self::SignedIn],
            Self::SigningIn => &[Self::SignedIn, Self::SignedOut],
            Self::SignedIn => &[Self::SignedIn, Self::SignedOut],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignedOut => "signed_out",
            Self::SigningIn => "signing_in",
            Self::SignedIn => "signed_in",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
