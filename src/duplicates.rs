use std::collections::HashMap;
use std::fmt;

use log::info;

use crate::FileRecord;

/// All records sharing one content hash, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct HashGroup<'a> {
    pub hash: &'a str,
    pub members: Vec<&'a FileRecord>,
}

impl HashGroup<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_duplicate(&self) -> bool {
        self.members.len() > 1
    }

    /// Size of a single copy. Equal hashes imply equal sizes.
    pub fn size_bytes(&self) -> u64 {
        self.members.first().map(|r| r.size_bytes).unwrap_or(0)
    }

    /// Bytes taken up by every copy beyond the first.
    pub fn wasted_bytes(&self) -> u64 {
        self.size_bytes() * self.members.len().saturating_sub(1) as u64
    }
}

/// Groups records by content hash. Groups appear in the order their hash was
/// first seen; members keep input order.
pub fn group(records: &[FileRecord]) -> Vec<HashGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<HashGroup<'_>> = Vec::new();

    for record in records {
        let hash = record.content_hash.as_str();
        match index.get(hash) {
            Some(&i) => groups[i].members.push(record),
            None => {
                index.insert(hash, groups.len());
                groups.push(HashGroup {
                    hash,
                    members: vec![record],
                });
            }
        }
    }

    groups
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateStats {
    pub total_files: usize,
    /// Number of hashes seen exactly once.
    pub unique_count: usize,
    pub duplicate_group_count: usize,
    /// Copies beyond the first, summed over duplicate groups.
    pub total_duplicate_files: usize,
    pub wasted_bytes: u64,
}

impl DuplicateStats {
    pub fn from_groups(groups: &[HashGroup<'_>]) -> Self {
        let mut stats = Self::default();
        for group in groups {
            stats.total_files += group.len();
            if group.is_duplicate() {
                stats.duplicate_group_count += 1;
                stats.total_duplicate_files += group.len() - 1;
                stats.wasted_bytes += group.wasted_bytes();
            } else {
                stats.unique_count += 1;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Duplicate,
    Unique,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Duplicate => f.pad("DUPLICATE"),
            Status::Unique => f.pad("UNIQUE"),
        }
    }
}

/// One line of the full listing (and one CSV row).
#[derive(Debug, Clone, Copy)]
pub struct ListingRow<'a> {
    pub status: Status,
    /// Members in this record's group, itself included.
    pub duplicate_count: usize,
    pub record: &'a FileRecord,
}

/// Grouping result over a borrowed record set.
pub struct Analysis<'a> {
    records: &'a [FileRecord],
    groups: Vec<HashGroup<'a>>,
    stats: DuplicateStats,
}

impl<'a> Analysis<'a> {
    pub fn new(records: &'a [FileRecord]) -> Self {
        info!("Finding duplicates among {} files...", records.len());
        let groups = group(records);
        let stats = DuplicateStats::from_groups(&groups);
        info!(
            "Duplicate analysis complete: {} distinct hashes, {} duplicate groups, {} duplicate files",
            groups.len(),
            stats.duplicate_group_count,
            stats.total_duplicate_files
        );
        Self {
            records,
            groups,
            stats,
        }
    }

    pub fn stats(&self) -> DuplicateStats {
        self.stats
    }

    pub fn groups(&self) -> &[HashGroup<'a>] {
        &self.groups
    }

    pub fn duplicate_groups(&self) -> impl Iterator<Item = &HashGroup<'a>> {
        self.groups.iter().filter(|g| g.is_duplicate())
    }

    /// Every record, duplicates first, each partition in discovery order.
    pub fn listing(&self) -> Vec<ListingRow<'a>> {
        let counts: HashMap<&str, usize> = self.groups.iter().map(|g| (g.hash, g.len())).collect();

        let mut rows: Vec<ListingRow<'a>> = self
            .records
            .iter()
            .map(|record| {
                let duplicate_count = counts
                    .get(record.content_hash.as_str())
                    .copied()
                    .unwrap_or(1);
                ListingRow {
                    status: if duplicate_count > 1 {
                        Status::Duplicate
                    } else {
                        Status::Unique
                    },
                    duplicate_count,
                    record,
                }
            })
            .collect();

        // Stable, so discovery order survives within each status.
        rows.sort_by_key(|row| row.status);
        rows
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;
    use time::OffsetDateTime;

    pub(crate) fn record(name: &str, hash: &str, size: u64) -> FileRecord {
        let full_path = PathBuf::from("/photos").join(name);
        FileRecord {
            file_name: name.to_string(),
            directory: PathBuf::from("/photos"),
            full_path,
            size_bytes: size,
            content_hash: hash.to_string(),
            last_modified: OffsetDateTime::UNIX_EPOCH,
            created: None,
        }
    }

    #[test]
    fn groups_in_first_seen_order() {
        let records = vec![
            record("a.jpg", "x", 1),
            record("b.jpg", "y", 1),
            record("c.jpg", "x", 1),
            record("d.jpg", "z", 1),
        ];
        let groups = group(&records);

        let hashes: Vec<_> = groups.iter().map(|g| g.hash).collect();
        assert_eq!(hashes, vec!["x", "y", "z"]);
        let members: Vec<_> = groups[0].members.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(members, vec!["a.jpg", "c.jpg"]);
    }

    #[test]
    fn equal_hashes_share_a_group_and_different_hashes_do_not() {
        let records = vec![
            record("a.jpg", "h1", 5),
            record("b.jpg", "h2", 5),
            record("c.jpg", "h1", 5),
            record("d.jpg", "h2", 5),
            record("e.jpg", "h3", 5),
        ];
        let groups = group(&records);
        for a in &records {
            for b in &records {
                let ga = groups.iter().position(|g| g.members.contains(&a)).unwrap();
                let gb = groups.iter().position(|g| g.members.contains(&b)).unwrap();
                assert_eq!(ga == gb, a.content_hash == b.content_hash);
            }
        }
    }

    #[test]
    fn duplicate_arithmetic() {
        let records = vec![
            record("a.jpg", "x", 100),
            record("b.jpg", "x", 100),
            record("c.jpg", "x", 100),
            record("d.jpg", "y", 7),
            record("e.jpg", "z", 40),
            record("f.jpg", "z", 40),
        ];
        let stats = DuplicateStats::from_groups(&group(&records));
        assert_eq!(
            stats,
            DuplicateStats {
                total_files: 6,
                unique_count: 1,
                duplicate_group_count: 2,
                total_duplicate_files: 3,
                wasted_bytes: 2 * 100 + 40,
            }
        );
    }

    #[test]
    fn empty_input_has_no_groups() {
        let stats = DuplicateStats::from_groups(&group(&[]));
        assert_eq!(stats, DuplicateStats::default());
    }

    #[test]
    fn listing_puts_duplicates_first_in_discovery_order() {
        let records = vec![
            record("a.jpg", "u1", 1),
            record("b.jpg", "d", 2),
            record("c.jpg", "u2", 3),
            record("d.jpg", "d", 2),
        ];
        let analysis = Analysis::new(&records);
        let rows = analysis.listing();

        let order: Vec<_> = rows.iter().map(|r| r.record.file_name.as_str()).collect();
        assert_eq!(order, vec!["b.jpg", "d.jpg", "a.jpg", "c.jpg"]);
        assert_eq!(rows[0].status, Status::Duplicate);
        assert_eq!(rows[0].duplicate_count, 2);
        assert_eq!(rows[2].status, Status::Unique);
        assert_eq!(rows[2].duplicate_count, 1);
        assert_eq!(analysis.duplicate_groups().count(), 1);
    }

    #[test]
    fn status_labels() {
        assert_eq!(Status::Duplicate.to_string(), "DUPLICATE");
        assert_eq!(Status::Unique.to_string(), "UNIQUE");
    }
}
