//! Whole-town audit
//!
//! Re-derives every global invariant from the current state and reports all
//! violations at once. The mutation path already keeps a town consistent with
//! no margin; the audit is mostly useful with a positive safety distance to
//! find members that sit too close for interactive editing.

use ahash::{AHashMap, AHashSet};

use crate::core::config::EditorConfig;
use crate::core::constants::{MAX_LINK, NO_LINK};
use crate::core::error::TownError;
use crate::core::types::Uid;
use crate::spatial::geometry::{circle_segment_overlap, circles_overlap};
use crate::town::district::{check_capacity, DistrictType};
use crate::town::state::Town;

impl Town {
    /// Check the town against `config.safety_distance` and `config.town_extent`
    ///
    /// An empty result means the town is consistent.
    pub fn audit(&self, config: &EditorConfig) -> Vec<TownError> {
        let mut errors = Vec::new();
        self.audit_districts(config, &mut errors);
        self.audit_links(config.safety_distance, &mut errors);
        errors
    }

    fn audit_districts(&self, config: &EditorConfig, errors: &mut Vec<TownError>) {
        let districts: Vec<_> = self.districts().collect();
        let extent = config.town_extent;

        for (i, district) in districts.iter().enumerate() {
            if district.uid() == NO_LINK {
                errors.push(TownError::ReservedUid);
            }
            if let Err(e) = check_capacity(district.capacity() as u64) {
                errors.push(e);
            }

            let position = district.position();
            let radius = district.radius();
            if position.x - radius < -extent
                || position.x + radius > extent
                || position.y - radius < -extent
                || position.y + radius > extent
            {
                errors.push(TownError::OutOfBounds(district.uid()));
            }

            for other in &districts[i + 1..] {
                if circles_overlap(
                    position,
                    radius,
                    other.position(),
                    other.radius(),
                    config.safety_distance,
                ) {
                    errors.push(TownError::node_overlap(district.uid(), other.uid()));
                }
            }
        }
    }

    fn audit_links(&self, safety_distance: f64, errors: &mut Vec<TownError>) {
        let mut seen = AHashSet::new();
        let mut degrees: AHashMap<Uid, usize> = AHashMap::new();

        for link in self.links() {
            if !seen.insert(*link) {
                errors.push(TownError::DuplicateLink {
                    uid0: link.uid0(),
                    uid1: link.uid1(),
                });
            }

            let (Some(a), Some(b)) = (self.get_district(link.uid0()), self.get_district(link.uid1())) else {
                for uid in link.uids() {
                    if self.get_district(uid).is_none() {
                        errors.push(TownError::LinkEndpointMissing(uid));
                    }
                }
                continue;
            };

            for uid in link.uids() {
                *degrees.entry(uid).or_default() += 1;
            }

            for district in self.districts() {
                if link.touches(district.uid()) {
                    continue;
                }
                if circle_segment_overlap(
                    district.position(),
                    district.radius(),
                    a.position(),
                    b.position(),
                    safety_distance,
                ) {
                    errors.push(TownError::NodeLinkOverlap(district.uid()));
                }
            }
        }

        for district in self.districts_of_type(DistrictType::Housing) {
            if degrees.get(&district.uid()).copied().unwrap_or(0) > MAX_LINK {
                errors.push(TownError::HousingLinkLimitExceeded(district.uid()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::town::district::District;
    use crate::town::link::Link;

    fn district(kind: DistrictType, uid: Uid, x: f64, y: f64) -> District {
        District::new(kind, uid, Vec2::new(x, y), 1000).unwrap()
    }

    fn loose_config(safety_distance: f64) -> EditorConfig {
        EditorConfig {
            safety_distance,
            ..EditorConfig::default()
        }
    }

    #[test]
    fn test_clean_town_passes() {
        let town = Town::from_parts(
            vec![
                district(DistrictType::Housing, 0, 0.0, 0.0),
                district(DistrictType::Transport, 1, 100.0, 0.0),
            ],
            vec![Link::new(0, 1).unwrap()],
        )
        .unwrap();
        assert!(town.audit(&EditorConfig::default()).is_empty());
    }

    #[test]
    fn test_safety_margin_reports_close_pairs() {
        // Edge gap of ~6.75 passes at zero margin but not at 10
        let town = Town::from_parts(
            vec![
                district(DistrictType::Housing, 0, 0.0, 0.0),
                district(DistrictType::Transport, 1, 70.0, 0.0),
            ],
            vec![],
        )
        .unwrap();
        assert!(town.audit(&loose_config(0.0)).is_empty());
        assert_eq!(
            town.audit(&loose_config(10.0)),
            vec![TownError::NodeNodeOverlap { first: 0, second: 1 }]
        );
    }

    #[test]
    fn test_safety_margin_reports_link_crowding() {
        let town = Town::from_parts(
            vec![
                district(DistrictType::Housing, 0, 0.0, 0.0),
                district(DistrictType::Transport, 1, 300.0, 0.0),
                district(DistrictType::Production, 2, 150.0, 35.0),
            ],
            vec![Link::new(0, 1).unwrap()],
        )
        .unwrap();
        assert_eq!(
            town.audit(&loose_config(10.0)),
            vec![TownError::NodeLinkOverlap(2)]
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let town = Town::from_parts(vec![district(DistrictType::Housing, 3, 990.0, 0.0)], vec![])
            .unwrap();
        assert_eq!(
            town.audit(&EditorConfig::default()),
            vec![TownError::OutOfBounds(3)]
        );
    }
}
