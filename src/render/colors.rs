//! Colour palette for town drawings

use serde::Serialize;

use crate::town::district::District;

/// The fixed set of colours a renderer must support
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Colour {
    #[default]
    Black,
    Green,
    Red,
}

/// Colour for a district: selection wins over highlighting
pub fn district_colour(district: &District) -> Colour {
    if district.selected {
        Colour::Red
    } else if district.highlighted {
        Colour::Green
    } else {
        Colour::Black
    }
}

/// Colour for a link
pub fn link_colour(highlighted: bool) -> Colour {
    if highlighted {
        Colour::Green
    } else {
        Colour::Black
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::town::district::DistrictType;

    #[test]
    fn test_selection_wins_over_highlight() {
        let mut district = District::new(DistrictType::Housing, 0, Vec2::ZERO, 1000).unwrap();
        assert_eq!(district_colour(&district), Colour::Black);

        district.highlighted = true;
        assert_eq!(district_colour(&district), Colour::Green);

        district.selected = true;
        assert_eq!(district_colour(&district), Colour::Red);
    }

    #[test]
    fn test_link_colour() {
        assert_eq!(link_colour(false), Colour::Black);
        assert_eq!(link_colour(true), Colour::Green);
    }
}
