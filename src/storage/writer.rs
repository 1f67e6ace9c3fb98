//! Save towns in the text format read by the loader

use std::fmt;
use std::path::Path;

use crate::storage::loader::StorageError;
use crate::town::district::DistrictType;
use crate::town::state::Town;

/// Formats a town as a loadable file
pub struct TownFile<'a>(pub &'a Town);

impl fmt::Display for TownFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let town = self.0;
        writeln!(f, "# Archipelago town")?;

        for district_type in DistrictType::ALL {
            let districts: Vec<_> = town.districts_of_type(district_type).collect();
            writeln!(f, "# {} districts: uid x y capacity", district_type.name())?;
            writeln!(f, "{}", districts.len())?;
            for district in districts {
                let position = district.position();
                writeln!(
                    f,
                    "\t{} {} {} {}",
                    district.uid(),
                    position.x,
                    position.y,
                    district.capacity()
                )?;
            }
        }

        writeln!(f, "# links: uid0 uid1")?;
        writeln!(f, "{}", town.link_count())?;
        for link in town.links() {
            writeln!(f, "\t{} {}", link.uid0(), link.uid1())?;
        }
        Ok(())
    }
}

/// Render a town in the text format
pub fn write_town(town: &Town) -> String {
    TownFile(town).to_string()
}

/// Write a town to disk, replacing any existing file
pub fn save_to_file(town: &Town, path: &Path) -> Result<(), StorageError> {
    std::fs::write(path, write_town(town))?;
    tracing::debug!(
        "Saved {} districts and {} links to {:?}",
        town.len(),
        town.link_count(),
        path
    );
    Ok(())
}
