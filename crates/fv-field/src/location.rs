use core::fmt;
use core::str::FromStr;

use crate::FieldError;

/// Mesh-entity kind a field's scoping indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Nodal,
    Elemental,
    /// One value set per node of each element; reduce before projecting.
    ElementalNodal,
}

impl Location {
    pub const ALL: [Location; 3] = [
        Location::Nodal,
        Location::Elemental,
        Location::ElementalNodal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Location::Nodal => "Nodal",
            Location::Elemental => "Elemental",
            Location::ElementalNodal => "ElementalNodal",
        }
    }

    pub fn snake_case(self) -> &'static str {
        match self {
            Location::Nodal => "nodal",
            Location::Elemental => "elemental",
            Location::ElementalNodal => "elemental_nodal",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the PascalCase or snake_case label, ignoring ASCII case.
impl FromStr for Location {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|loc| s.eq_ignore_ascii_case(loc.as_str()) || s.eq_ignore_ascii_case(loc.snake_case()))
            .ok_or_else(|| FieldError::UnsupportedLocation {
                location: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_spellings() {
        assert_eq!("Nodal".parse::<Location>().unwrap(), Location::Nodal);
        assert_eq!("elemental".parse::<Location>().unwrap(), Location::Elemental);
        assert_eq!(
            "elemental_nodal".parse::<Location>().unwrap(),
            Location::ElementalNodal
        );
        assert_eq!(
            "ElementalNodal".parse::<Location>().unwrap(),
            Location::ElementalNodal
        );
    }

    #[test]
    fn display_round_trips() {
        for loc in Location::ALL {
            assert_eq!(loc.to_string().parse::<Location>().unwrap(), loc);
        }
    }

    #[test]
    fn rejects_unknown() {
        let err = "unknown_location".parse::<Location>().unwrap_err();
        assert_eq!(
            err,
            FieldError::UnsupportedLocation {
                location: "unknown_location".to_string()
            }
        );
        assert!("TimeFreq_sets".parse::<Location>().is_err());
    }

    #[test]
    fn stray_underscores_are_not_ignored() {
        for label in ["n_o_dal", "_elemental_", "Elemental_Nodal_", "elementalnodal_", "ele_mental"] {
            assert!(label.parse::<Location>().is_err(), "{}", label);
        }
        assert_eq!("ELEMENTAL_NODAL".parse::<Location>().unwrap(), Location::ElementalNodal);
        assert_eq!("elementalnodal".parse::<Location>().unwrap(), Location::ElementalNodal);
    }
}
