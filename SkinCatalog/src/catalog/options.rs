//! Catalog build options

/// Prefabs whose items are never catalogued, whatever they inherit from.
pub const DEFAULT_IGNORED_PREFABS: &[&str] = &["collectible_untradable_coin"];

/// Options controlling how a [`Catalog`](super::Catalog) is built.
///
/// # Example
///
/// ```
/// use skincatalog::catalog::CatalogOptions;
///
/// let options = CatalogOptions::new()
///     .with_strict_localization(true)
///     .with_ignored_prefab("valve_test_prefab")
///     .with_vanilla_knives(false);
/// assert!(options.is_ignored_prefab("collectible_untradable_coin"));
/// ```
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Fail on localization tokens missing from the language table.
    /// When off, the raw token (without `#`) is used as the display string.
    pub strict_localization: bool,

    /// Prefab ids whose items are dropped during classification.
    pub ignored_prefabs: Vec<String>,

    /// Add a `vanilla` entry for every knife to the knife set.
    /// Default: true
    pub include_vanilla_knives: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogOptions {
    /// Create options with the default ignore list and lenient localization.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strict_localization: false,
            ignored_prefabs: DEFAULT_IGNORED_PREFABS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            include_vanilla_knives: true,
        }
    }

    #[must_use]
    pub fn with_strict_localization(mut self, strict: bool) -> Self {
        self.strict_localization = strict;
        self
    }

    /// Add a prefab id to the ignore list.
    #[must_use]
    pub fn with_ignored_prefab(mut self, prefab: impl Into<String>) -> Self {
        let prefab = prefab.into();
        if !self.ignored_prefabs.contains(&prefab) {
            self.ignored_prefabs.push(prefab);
        }
        self
    }

    #[must_use]
    pub fn with_vanilla_knives(mut self, include: bool) -> Self {
        self.include_vanilla_knives = include;
        self
    }

    pub fn is_ignored_prefab(&self, prefab: &str) -> bool {
        self.ignored_prefabs.iter().any(|p| p == prefab)
    }
}
