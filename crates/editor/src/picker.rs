//! The "choose a family, then a sub-variant" add flow.

use pageblocks_core::{Family, Registry, SubVariant};

/// Where the add flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Picker {
    /// Not adding anything.
    #[default]
    Closed,
    /// Showing the family list.
    ChoosingFamily,
    /// Showing the sub-variants of one family.
    ChoosingVariant(Family),
}

impl Picker {
    /// Opens the family list from any state.
    pub fn open(self) -> Self {
        Picker::ChoosingFamily
    }

    /// Moves from the family list to that family's sub-variants.
    ///
    /// Only valid while choosing a family; any other state is returned
    /// unchanged.
    pub fn choose_family(self, family: Family) -> Self {
        match self {
            Picker::ChoosingFamily => Picker::ChoosingVariant(family),
            other => other,
        }
    }

    /// One step back: sub-variants to families, families to closed.
    pub fn back(self) -> Self {
        match self {
            Picker::ChoosingVariant(_) => Picker::ChoosingFamily,
            _ => Picker::Closed,
        }
    }

    /// Abandons the flow.
    pub fn cancel(self) -> Self {
        Picker::Closed
    }

    /// True in either choosing state.
    pub fn is_open(self) -> bool {
        !matches!(self, Picker::Closed)
    }

    /// Family whose sub-variants are being shown.
    pub fn family(self) -> Option<Family> {
        match self {
            Picker::ChoosingVariant(family) => Some(family),
            _ => None,
        }
    }

    /// Families offered, optionally restricted to what a container accepts.
    pub fn families(registry: &Registry, accepts: Option<&[Family]>) -> Vec<Family> {
        registry
            .families()
            .into_iter()
            .filter(|family| accepts.is_none_or(|allowed| allowed.contains(family)))
            .collect()
    }

    /// Sub-variants offered in the current state; empty unless a family
    /// was chosen.
    pub fn variants(self, registry: &Registry) -> Vec<&SubVariant> {
        match self.family() {
            Some(family) => registry.variants_of(family).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_transitions() {
        let picker = Picker::default().open();
        assert_eq!(picker, Picker::ChoosingFamily);

        let picker = picker.choose_family(Family::Image);
        assert_eq!(picker.family(), Some(Family::Image));
        assert_eq!(picker.back(), Picker::ChoosingFamily);
        assert_eq!(picker.cancel(), Picker::Closed);
    }

    #[test]
    fn test_choose_family_requires_family_list() {
        assert_eq!(Picker::Closed.choose_family(Family::Text), Picker::Closed);
    }

    #[test]
    fn test_offered_choices() {
        let registry = pageblocks_core::registry();
        let ids: Vec<&str> = Picker::ChoosingVariant(Family::Gallery)
            .variants(registry)
            .iter()
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(ids, ["GL01", "GL02", "GL03"]);

        let nested = Picker::families(registry, Some(&[Family::Text, Family::Table]));
        assert_eq!(nested, [Family::Text, Family::Table]);
        assert_eq!(Picker::families(registry, None).len(), 10);
    }
}
