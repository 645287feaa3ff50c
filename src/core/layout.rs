//! Physician block formatting and the two-column grid used by every
//! directory table.

use crate::domain::model::PhysicianRecord;

pub const GRID_COLUMNS: usize = 2;

/// The five display lines for one physician. The name line is rendered bold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicianBlock {
    pub name: String,
    pub address: String,
    pub locality: String,
    pub phone: String,
    pub fax: String,
}

impl PhysicianBlock {
    pub fn from_record(record: &PhysicianRecord) -> Self {
        Self {
            name: format!("{}, {} {}", record.last_name, record.first_name, record.title),
            address: format!("{} {}", record.address_line1, record.address_line2),
            locality: format!("{}, {} {}", record.city, record.state, record.zip),
            phone: format!("Office Phone: {}", record.office_phone),
            fax: format!("Office Fax: {}", record.office_fax),
        }
    }

    /// Lines after the bold name line.
    pub fn detail_lines(&self) -> [&str; 4] {
        [
            self.address.as_str(),
            self.locality.as_str(),
            self.phone.as_str(),
            self.fax.as_str(),
        ]
    }

    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}",
            self.name, self.address, self.locality, self.phone, self.fax
        )
    }
}

/// `rows × 2` cells, filled row-major. `None` is an intentionally blank cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGrid {
    pub rows: Vec<[Option<PhysicianBlock>; GRID_COLUMNS]>,
}

impl DirectoryGrid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn filled_cells(&self) -> usize {
        self.cells().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Option<PhysicianBlock>> {
        self.rows.iter().flat_map(|row| row.iter())
    }
}

/// 需要的列數：兩欄，奇數時多一列
pub fn row_count(records: usize) -> usize {
    records.div_ceil(GRID_COLUMNS)
}

/// Places records left-to-right, top-to-bottom. The column alternates 0/1
/// and the row advances each time the column wraps back to 0.
pub fn layout_grid<'a, I>(records: I) -> DirectoryGrid
where
    I: IntoIterator<Item = &'a PhysicianRecord>,
{
    let blocks: Vec<PhysicianBlock> = records.into_iter().map(PhysicianBlock::from_record).collect();
    let mut rows: Vec<[Option<PhysicianBlock>; GRID_COLUMNS]> =
        (0..row_count(blocks.len())).map(|_| [None, None]).collect();

    let mut current_row = 0;
    let mut current_column = 0;

    for block in blocks {
        rows[current_row][current_column] = Some(block);

        if current_column == GRID_COLUMNS - 1 {
            current_column = 0;
            current_row += 1;
        } else {
            current_column += 1;
        }
    }

    DirectoryGrid { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physician(last: &str) -> PhysicianRecord {
        PhysicianRecord {
            last_name: last.to_string(),
            first_name: "Pat".to_string(),
            title: "MD".to_string(),
            specialty: "Cardiology".to_string(),
            address_line1: "100 Main St".to_string(),
            address_line2: "Suite 2".to_string(),
            city: "Walnut Creek".to_string(),
            state: "CA".to_string(),
            zip: "94596".to_string(),
            office_phone: "925-555-0100".to_string(),
            office_fax: "925-555-0101".to_string(),
        }
    }

    #[test]
    fn test_block_format() {
        let block = PhysicianBlock::from_record(&physician("Smith"));
        assert_eq!(
            block.to_text(),
            "Smith, Pat MD\n100 Main St Suite 2\nWalnut Creek, CA 94596\nOffice Phone: 925-555-0100\nOffice Fax: 925-555-0101"
        );
    }

    #[test]
    fn test_missing_fax_leaves_empty_value() {
        let mut record = physician("Smith");
        record.office_fax.clear();

        let block = PhysicianBlock::from_record(&record);
        assert!(block.to_text().ends_with("Office Fax: "));
    }

    #[test]
    fn test_empty_record_never_panics() {
        let block = PhysicianBlock::from_record(&PhysicianRecord::default());
        assert_eq!(block.name, ",  ");
        assert_eq!(block.phone, "Office Phone: ");
    }

    #[test]
    fn test_row_count_rounds_up() {
        assert_eq!(row_count(0), 0);
        assert_eq!(row_count(1), 1);
        assert_eq!(row_count(2), 1);
        assert_eq!(row_count(7), 4);
        assert_eq!(row_count(8), 4);
    }

    #[test]
    fn test_grid_counts_match_records() {
        for n in 1..=9usize {
            let records: Vec<PhysicianRecord> = (0..n).map(|i| physician(&format!("P{}", i))).collect();
            let grid = layout_grid(&records);
            assert_eq!(grid.row_count(), n.div_ceil(2), "rows for {}", n);
            assert_eq!(grid.filled_cells(), n, "filled cells for {}", n);
        }
    }

    #[test]
    fn test_odd_count_leaves_last_cell_blank_in_row_major_order() {
        let records: Vec<PhysicianRecord> = ["A", "B", "C", "D", "E"].iter().map(|n| physician(n)).collect();
        let grid = layout_grid(&records);

        let names: Vec<Option<String>> = grid
            .cells()
            .map(|c| c.as_ref().map(|b| b.name.clone()))
            .collect();

        assert_eq!(
            names,
            vec![
                Some("A, Pat MD".to_string()),
                Some("B, Pat MD".to_string()),
                Some("C, Pat MD".to_string()),
                Some("D, Pat MD".to_string()),
                Some("E, Pat MD".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_empty_grid() {
        let grid = layout_grid(&Vec::<PhysicianRecord>::new());
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.filled_cells(), 0);
    }
}
