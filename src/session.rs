//! Explicit session context.
//!
//! Authentication happens outside this tool. Whatever gate sits in front of
//! it hands over at most a display name; that name travels in a `Session`
//! value into the dashboard and report instead of living in global state.

/// Identity and school context for one dashboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    school_name: String,
    display_name: Option<String>,
}

impl Session {
    /// A session without a signed-in user.
    pub fn anonymous(school_name: impl Into<String>) -> Self {
        Self {
            school_name: school_name.into(),
            display_name: None,
        }
    }

    /// Attach the display name supplied by an access gate.
    ///
    /// Blank names are ignored.
    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        self
    }

    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Text the mock series is seeded from: the display name when present,
    /// otherwise the school name.
    pub fn seed_text(&self) -> &str {
        self.display_name().unwrap_or(&self.school_name)
    }
}
