//! The town aggregate: districts, links and the rules that bind them
//!
//! Every mutation is validated against the whole town before anything is
//! written. A failed operation returns the error and leaves the town exactly
//! as it was.

use std::collections::BTreeMap;

use crate::core::constants::{MAX_LINK, NO_LINK};
use crate::core::error::{Result, TownError};
use crate::core::types::{Uid, Vec2};
use crate::spatial::geometry::{circle_segment_overlap, circles_overlap};
use crate::town::district::{District, DistrictType};
use crate::town::link::Link;

/// A town: uid-sorted districts plus the links between them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Town {
    /// Districts by uid (sorted, so iteration is deterministic)
    districts: BTreeMap<Uid, District>,
    /// Links in insertion order
    links: Vec<Link>,
    /// Currently selected district
    selected: Option<Uid>,
    /// Whether access paths of the selected housing district are highlighted
    show_paths: bool,
    /// Links on the highlighted access paths
    highlighted_links: Vec<Link>,
}

impl Town {
    /// Create an empty town
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a town from a batch of districts and links
    ///
    /// All districts are inserted first, then all links, each through the
    /// same validated path as interactive edits (with no safety margin).
    pub fn from_parts(districts: Vec<District>, links: Vec<Link>) -> Result<Self> {
        let mut town = Self::new();
        for district in districts {
            town.add_district(district, 0.0)?;
        }
        for link in links {
            town.add_link(link, 0.0)?;
        }
        Ok(town)
    }

    // === DISTRICTS ===

    /// Add a district
    ///
    /// Fails if the uid is taken, or if the district would come within
    /// `safety_distance` of another district or of a link.
    pub fn add_district(&mut self, district: District, safety_distance: f64) -> Result<()> {
        let uid = district.uid();
        if self.districts.contains_key(&uid) {
            return Err(TownError::DuplicateUid(uid));
        }

        self.check_district_overlap(&district, safety_distance)?;
        self.check_district_link_overlap(&district, safety_distance)?;

        self.districts.insert(uid, district);
        self.refresh_highlights();
        Ok(())
    }

    /// Remove a district and every link that references it
    ///
    /// Unknown uids are ignored.
    pub fn remove_district(&mut self, uid: Uid) {
        if self.districts.remove(&uid).is_none() {
            return;
        }
        self.links.retain(|link| !link.touches(uid));
        if self.selected == Some(uid) {
            self.selected = None;
        }
        self.refresh_highlights();
    }

    /// Move a district, keeping it clear of every other town member
    pub fn move_district(&mut self, uid: Uid, position: Vec2, safety_distance: f64) -> Result<()> {
        let mut candidate = self.district_or_err(uid)?.clone();
        candidate.set_position(position)?;
        self.commit_reshaped(candidate, safety_distance)
    }

    /// Resize a district from a radius
    ///
    /// The radius goes through `District::set_radius`, so it is clamped into
    /// the capacity range rather than rejected.
    pub fn resize_district(&mut self, uid: Uid, radius: f64, safety_distance: f64) -> Result<()> {
        let mut candidate = self.district_or_err(uid)?.clone();
        candidate.set_radius(radius);
        self.commit_reshaped(candidate, safety_distance)
    }

    /// Change the type of a district
    ///
    /// Turning a district into housing fails if it already has more links
    /// than a housing district may carry.
    pub fn set_district_type(&mut self, uid: Uid, district_type: DistrictType) -> Result<()> {
        self.district_or_err(uid)?;
        if district_type == DistrictType::Housing && self.link_degree(uid) > MAX_LINK {
            return Err(TownError::HousingLinkLimitExceeded(uid));
        }

        if let Some(district) = self.get_district_mut(uid) {
            district.set_type(district_type);
        }
        self.refresh_highlights();
        Ok(())
    }

    /// Get a district by uid
    pub fn get_district(&self, uid: Uid) -> Option<&District> {
        self.districts.get(&uid)
    }

    /// Mutable access is kept inside the crate so that geometry changes
    /// always go through the validated operations above.
    pub(crate) fn get_district_mut(&mut self, uid: Uid) -> Option<&mut District> {
        self.districts.get_mut(&uid)
    }

    /// Iterate over all districts in uid order
    pub fn districts(&self) -> impl Iterator<Item = &District> {
        self.districts.values()
    }

    /// Iterate over districts of one type in uid order
    pub fn districts_of_type(&self, district_type: DistrictType) -> impl Iterator<Item = &District> {
        self.districts
            .values()
            .filter(move |district| district.is_type(district_type))
    }

    /// All district uids, ascending
    pub fn district_uids(&self) -> Vec<Uid> {
        self.districts.keys().copied().collect()
    }

    /// Number of districts
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    /// Check if the town has no districts
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Uid of the first district (in uid order) whose circle contains `position`
    pub fn district_at(&self, position: Vec2) -> Option<Uid> {
        self.districts
            .values()
            .find(|district| district.position().distance(&position) <= district.radius())
            .map(District::uid)
    }

    /// Smallest uid not yet in use, or `None` if every uid below `NO_LINK` is taken
    pub fn available_uid(&self) -> Option<Uid> {
        (0..NO_LINK).find(|uid| !self.districts.contains_key(uid))
    }

    // === LINKS ===

    /// Add a link between two existing districts
    ///
    /// Fails on a duplicate link, a missing end, a housing end already at
    /// `MAX_LINK` links, or a third district within `safety_distance` of the
    /// new segment.
    pub fn add_link(&mut self, link: Link, safety_distance: f64) -> Result<()> {
        if self.has_link(&link) {
            return Err(TownError::DuplicateLink {
                uid0: link.uid0(),
                uid1: link.uid1(),
            });
        }

        let mut ends = Vec::with_capacity(2);
        for uid in link.uids() {
            let district = self
                .districts
                .get(&uid)
                .ok_or(TownError::LinkEndpointMissing(uid))?;
            ends.push(district);
        }

        for district in &ends {
            if district.is_type(DistrictType::Housing) && self.link_degree(district.uid()) >= MAX_LINK {
                return Err(TownError::HousingLinkLimitExceeded(district.uid()));
            }
        }

        self.check_segment_overlap(&link, ends[0].position(), ends[1].position(), None, safety_distance)?;

        self.links.push(link);
        self.refresh_highlights();
        Ok(())
    }

    /// Remove the first link equal to `link`; absent links are ignored
    pub fn remove_link(&mut self, link: &Link) {
        if let Some(index) = self.links.iter().position(|l| l == link) {
            self.links.remove(index);
            self.refresh_highlights();
        }
    }

    /// Whether the town contains the link (order-independent)
    pub fn has_link(&self, link: &Link) -> bool {
        self.links.iter().any(|l| l == link)
    }

    /// All links in insertion order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Uids of the districts linked to `uid`
    pub fn linked_uids(&self, uid: Uid) -> Result<Vec<Uid>> {
        if !self.districts.contains_key(&uid) {
            return Err(TownError::LinkEndpointMissing(uid));
        }
        Ok(self.links.iter().filter_map(|link| link.other(uid)).collect())
    }

    /// Number of links touching `uid`
    pub fn link_degree(&self, uid: Uid) -> usize {
        self.links.iter().filter(|link| link.touches(uid)).count()
    }

    // === SELECTION ===

    /// Select a district, or clear the selection with `None`
    ///
    /// Selecting an unknown uid clears the selection.
    pub fn select_district(&mut self, uid: Option<Uid>) {
        if let Some(previous) = self.selected.take() {
            if let Some(district) = self.districts.get_mut(&previous) {
                district.selected = false;
            }
        }

        if let Some(district) = uid.and_then(|uid| self.districts.get_mut(&uid)) {
            district.selected = true;
            self.selected = Some(district.uid());
        }
        self.refresh_highlights();
    }

    pub fn selected(&self) -> Option<Uid> {
        self.selected
    }

    /// Toggle highlighting of the selected housing district's access paths
    pub fn set_show_paths(&mut self, show: bool) {
        self.show_paths = show;
        self.refresh_highlights();
    }

    pub fn show_paths(&self) -> bool {
        self.show_paths
    }

    /// Links on the highlighted access paths
    pub fn highlighted_links(&self) -> &[Link] {
        &self.highlighted_links
    }

    /// Recompute highlight flags from the selection and the path toggle
    fn refresh_highlights(&mut self) {
        let mut path_uids: Vec<Uid> = Vec::new();
        let mut path_links: Vec<Link> = Vec::new();

        let origin = self
            .selected
            .filter(|_| self.show_paths)
            .filter(|uid| {
                self.districts
                    .get(uid)
                    .is_some_and(|district| district.is_type(DistrictType::Housing))
            });

        if let Some(origin) = origin {
            for target in [DistrictType::Transport, DistrictType::Production] {
                let Ok(result) = self.path_find(origin, target) else {
                    continue;
                };
                for pair in result.path.windows(2) {
                    if let Ok(link) = Link::new(pair[0], pair[1]) {
                        path_links.push(link);
                    }
                }
                path_uids.extend(result.path);
            }
        }

        for district in self.districts.values_mut() {
            district.highlighted = path_uids.contains(&district.uid());
        }
        path_links.dedup();
        self.highlighted_links = path_links;
    }

    // === VALIDATION ===

    fn district_or_err(&self, uid: Uid) -> Result<&District> {
        self.districts.get(&uid).ok_or(TownError::NodeNotFound(uid))
    }

    /// Validate a moved or resized district and store it on success
    fn commit_reshaped(&mut self, candidate: District, safety_distance: f64) -> Result<()> {
        let uid = candidate.uid();
        self.check_district_overlap(&candidate, safety_distance)?;
        self.check_district_link_overlap(&candidate, safety_distance)?;

        // Links attached to the district follow it and must stay clear too
        for link in self.links.iter().filter(|link| link.touches(uid)) {
            let Some(other) = link.other(uid).and_then(|other| self.districts.get(&other)) else {
                continue;
            };
            self.check_segment_overlap(link, candidate.position(), other.position(), Some(uid), safety_distance)?;
        }

        self.districts.insert(uid, candidate);
        self.refresh_highlights();
        Ok(())
    }

    /// Check a district against every other district
    fn check_district_overlap(&self, district: &District, safety_distance: f64) -> Result<()> {
        for other in self.districts.values() {
            if other.uid() == district.uid() {
                continue;
            }
            if circles_overlap(
                district.position(),
                district.radius(),
                other.position(),
                other.radius(),
                safety_distance,
            ) {
                return Err(TownError::node_overlap(district.uid(), other.uid()));
            }
        }
        Ok(())
    }

    /// Check a district against every link it is not an end of
    fn check_district_link_overlap(&self, district: &District, safety_distance: f64) -> Result<()> {
        for link in &self.links {
            if link.touches(district.uid()) {
                continue;
            }
            let (Some(a), Some(b)) = (
                self.districts.get(&link.uid0()),
                self.districts.get(&link.uid1()),
            ) else {
                continue;
            };
            if circle_segment_overlap(
                district.position(),
                district.radius(),
                a.position(),
                b.position(),
                safety_distance,
            ) {
                return Err(TownError::NodeLinkOverlap(district.uid()));
            }
        }
        Ok(())
    }

    /// Check a link segment against every district that is not one of its ends
    fn check_segment_overlap(
        &self,
        link: &Link,
        a: Vec2,
        b: Vec2,
        skip: Option<Uid>,
        safety_distance: f64,
    ) -> Result<()> {
        for district in self.districts.values() {
            let uid = district.uid();
            if link.touches(uid) || skip == Some(uid) {
                continue;
            }
            if circle_segment_overlap(district.position(), district.radius(), a, b, safety_distance) {
                return Err(TownError::NodeLinkOverlap(uid));
            }
        }
        Ok(())
    }
}
