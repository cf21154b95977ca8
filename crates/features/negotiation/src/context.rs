/// Per-call options handed to the [`SerializationEngine`](crate::SerializationEngine).
///
/// Never persisted; the gateway builds a fresh one for every serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializationContext {
    groups: Vec<String>,
    max_depth_checks: bool,
}

impl SerializationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts output to fields of the given visibility groups. Empty means no restriction.
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn enable_max_depth_checks(mut self) -> Self {
        self.max_depth_checks = true;
        self
    }

    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    #[must_use]
    pub const fn max_depth_checks_enabled(&self) -> bool {
        self.max_depth_checks
    }
}
