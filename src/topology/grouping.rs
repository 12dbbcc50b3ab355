//! Device grouping.
//!
//! Rows are partitioned by device type and then by `out_device`. Both levels
//! keep first-seen order, and rows keep table order inside each group. The
//! sections are then ordered switches first, routers second, and any other
//! type after that.

use super::types::{DeviceType, Row};
use log::debug;

/// Rows sharing a device type and `out_device`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub device_type: &'a DeviceType,
    pub out_device: &'a str,
    pub rows: Vec<&'a Row>,
}

/// All groups of one device type, emitted under a single heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSection<'a> {
    pub device_type: &'a DeviceType,
    pub groups: Vec<Group<'a>>,
}

impl TypeSection<'_> {
    /// Rows across every group of the section, in processing order
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }
}

/// Build the ordered processing plan for `rows`.
pub fn group_rows(rows: &[Row]) -> Vec<TypeSection<'_>> {
    let mut sections: Vec<TypeSection<'_>> = Vec::new();

    for row in rows {
        let section = match sections.iter().position(|s| *s.device_type == row.device_type) {
            Some(index) => &mut sections[index],
            None => {
                sections.push(TypeSection {
                    device_type: &row.device_type,
                    groups: Vec::new(),
                });
                let last = sections.len() - 1;
                &mut sections[last]
            }
        };

        match section.groups.iter_mut().find(|g| g.out_device == row.out_device) {
            Some(group) => group.rows.push(row),
            None => section.groups.push(Group {
                device_type: &row.device_type,
                out_device: &row.out_device,
                rows: vec![row],
            }),
        }
    }

    // Stable, so first-seen order survives within each rank
    sections.sort_by_key(|section| section.device_type.rank());

    for section in &sections {
        debug!(
            "Grouped {} rows of type '{}' into {} devices",
            section.row_count(),
            section.device_type,
            section.groups.len()
        );
    }

    sections
}
