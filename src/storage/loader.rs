//! Load towns from the archipelago text format
//!
//! ```text
//! # housing districts: count, then `uid x y capacity` rows
//! 1
//!     0 0 0 1000
//! # transport districts
//! 1
//!     1 100 0 1000   # trailing comments are fine
//! # production districts
//! 0
//! # links: count, then `uid0 uid1` rows
//! 1
//!     0 1
//! ```
//!
//! Everything after `#` on a line is ignored, as are blank lines. The parsed
//! batch goes through `Town::from_parts`, so a file is held to the same
//! rules as interactive edits.

use std::path::Path;

use nom::character::complete::{space1, u32 as parse_u32, u64 as parse_u64};
use nom::combinator::all_consuming;
use nom::number::complete::double;
use nom::sequence::preceded;
use nom::{IResult, Parser};
use thiserror::Error;

use crate::core::error::TownError;
use crate::core::types::{Uid, Vec2};
use crate::town::district::{check_capacity, District, DistrictType};
use crate::town::link::Link;
use crate::town::state::Town;

const COMMENT_DELIMITER: char = '#';

/// Errors that can occur when loading or saving a town
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A line did not match the expected row shape
    #[error("Syntax error on line {line}: {content:?}")]
    Syntax { line: usize, content: String },
    /// The file ended in the middle of a section
    #[error("Unexpected end of file in {section} section")]
    UnexpectedEnd { section: &'static str },
    /// The rows parsed but break a town rule
    #[error(transparent)]
    Town(#[from] TownError),
}

/// Iterator over non-blank lines with comments stripped, with 1-based line numbers
struct ContentLines<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> ContentLines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for ContentLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, raw) in self.lines.by_ref() {
            let content = match raw.find(COMMENT_DELIMITER) {
                Some(pos) => &raw[..pos],
                None => raw,
            }
            .trim();

            if !content.is_empty() {
                return Some((index + 1, content));
            }
        }
        None
    }
}

fn count_row(input: &str) -> IResult<&str, u64> {
    all_consuming(parse_u64).parse(input)
}

fn district_row(input: &str) -> IResult<&str, (Uid, f64, f64, u64)> {
    all_consuming((
        parse_u32,
        preceded(space1, double),
        preceded(space1, double),
        preceded(space1, parse_u64),
    ))
    .parse(input)
}

fn link_row(input: &str) -> IResult<&str, (Uid, Uid)> {
    all_consuming((parse_u32, preceded(space1, parse_u32))).parse(input)
}

/// Run a row parser on a trimmed line
fn parse_line<T>(
    parser: fn(&str) -> IResult<&str, T>,
    line: usize,
    content: &str,
) -> Result<T, StorageError> {
    parser(content)
        .map(|(_, value)| value)
        .map_err(|_| StorageError::Syntax {
            line,
            content: content.to_string(),
        })
}

/// Read a section count; a file that ends before the section counts as zero
fn read_count(lines: &mut ContentLines<'_>) -> Result<u64, StorageError> {
    match lines.next() {
        Some((line, content)) => parse_line(count_row, line, content),
        None => Ok(0),
    }
}

fn parse_districts(
    lines: &mut ContentLines<'_>,
    district_type: DistrictType,
    districts: &mut Vec<District>,
) -> Result<(), StorageError> {
    let count = read_count(lines)?;
    for _ in 0..count {
        let (line, content) = lines.next().ok_or(StorageError::UnexpectedEnd {
            section: district_type.name(),
        })?;
        let (uid, x, y, capacity) = parse_line(district_row, line, content)?;

        check_capacity(capacity)?;
        let capacity = u32::try_from(capacity).map_err(|_| TownError::CapacityTooHigh(capacity))?;
        districts.push(District::new(district_type, uid, Vec2::new(x, y), capacity)?);
    }
    Ok(())
}

fn parse_links(lines: &mut ContentLines<'_>, links: &mut Vec<Link>) -> Result<(), StorageError> {
    let count = read_count(lines)?;
    for _ in 0..count {
        let (line, content) = lines
            .next()
            .ok_or(StorageError::UnexpectedEnd { section: "link" })?;
        let (uid0, uid1) = parse_line(link_row, line, content)?;
        links.push(Link::new(uid0, uid1)?);
    }
    Ok(())
}

/// Parse a town from the text format
///
/// Nothing is returned unless the whole file parses and validates.
pub fn parse_town(text: &str) -> Result<Town, StorageError> {
    let mut lines = ContentLines::new(text);
    let mut districts = Vec::new();
    let mut links = Vec::new();

    for district_type in DistrictType::ALL {
        parse_districts(&mut lines, district_type, &mut districts)?;
    }
    parse_links(&mut lines, &mut links)?;

    if let Some((line, _)) = lines.next() {
        tracing::warn!("Ignoring content after the link section (line {})", line);
    }

    Ok(Town::from_parts(districts, links)?)
}

/// Load a town from disk
///
/// A file that cannot be read yields an empty town. A file that reads but
/// does not parse or validate is an error.
pub fn load_from_file(path: &Path) -> Result<Town, StorageError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Could not open {:?} ({}), starting with an empty town", path, e);
            return Ok(Town::new());
        }
    };

    let town = parse_town(&content)?;
    tracing::info!(
        "Loaded {} districts and {} links from {:?}",
        town.len(),
        town.link_count(),
        path
    );
    Ok(town)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_lines_skip_comments_and_blanks() {
        let text = "# header\n\n   \n  3  # count\n\t# indented comment\n1 2\n";
        let lines: Vec<_> = ContentLines::new(text).collect();
        assert_eq!(lines, vec![(4, "3"), (6, "1 2")]);
    }

    #[test]
    fn test_district_row() {
        assert_eq!(
            district_row("4 -12.5 300 2500"),
            Ok(("", (4, -12.5, 300.0, 2500)))
        );
        assert_eq!(district_row("4\t1.0   2.0 1000").map(|(_, v)| v), Ok((4, 1.0, 2.0, 1000)));
        assert!(district_row("4 1.0 2.0").is_err());
        assert!(district_row("4 1.0 2.0 1000 9").is_err());
        assert!(district_row("-4 1.0 2.0 1000").is_err());
    }

    #[test]
    fn test_link_row() {
        assert_eq!(link_row("7 2"), Ok(("", (7, 2))));
        assert!(link_row("7").is_err());
        assert!(link_row("7 x").is_err());
    }

    #[test]
    fn test_parse_minimal_town() {
        let text = "1\n0 0 0 1000\n1\n1 100 0 1000\n0\n1\n0 1\n";
        let town = parse_town(text).unwrap();
        assert_eq!(town.len(), 2);
        assert_eq!(town.link_count(), 1);
        assert!(town.get_district(1).unwrap().is_type(DistrictType::Transport));
    }

    #[test]
    fn test_empty_text_is_empty_town() {
        let town = parse_town("# nothing here\n\n").unwrap();
        assert!(town.is_empty());
    }

    #[test]
    fn test_missing_rows() {
        let result = parse_town("2\n0 0 0 1000\n");
        assert!(matches!(
            result,
            Err(StorageError::UnexpectedEnd { section: "housing" })
        ));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let result = parse_town("1\n\n0 zero 0 1000\n");
        match result {
            Err(StorageError::Syntax { line, content }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "0 zero 0 1000");
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_capacity_is_a_capacity_error() {
        let result = parse_town("1\n0 0 0 99999999999\n");
        assert!(matches!(
            result,
            Err(StorageError::Town(TownError::CapacityTooHigh(99_999_999_999)))
        ));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        for text in [
            "2\n0 nan 0 1000\n1 nan 0 1000\n0\n0\n0\n",
            "2\n0 inf 0 1000\n1 inf 0 1000\n0\n0\n0\n",
            "0\n1\n4 0 -infinity 1000\n",
        ] {
            let result = parse_town(text);
            assert!(
                matches!(result, Err(StorageError::Town(TownError::NonFinitePosition(_)))),
                "accepted {:?}: {:?}",
                text,
                result
            );
        }
    }

    #[test]
    fn test_self_link_in_file() {
        let result = parse_town("1\n0 0 0 1000\n0\n0\n1\n0 0\n");
        assert!(matches!(result, Err(StorageError::Town(TownError::SelfLink(0)))));
    }
}
