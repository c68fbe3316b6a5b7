//! Block segmenter: one export -> ordered measurement runs.
//!
//! Rules:
//! - no `SetupTitle` row: the whole file is one anonymous block (always returned)
//! - otherwise each `SetupTitle` row opens a block that runs until the next one;
//!   rows before the first marker belong to no block
//! - blocks whose table is empty are dropped, later blocks are still parsed;
//!   if every block is empty the first one is kept (with its empty table) so
//!   the result is never empty
//! - when more than one block survives, every table gets a `SetupTitle`
//!   label column holding its block title

use log::{debug, warn};

use crate::domain::{Block, RawRow, RowPolicy, SETUP_TITLE_TAG};
use crate::parse::{build_table, extract_parameters, is_tagged};

/// Partition rows into blocks.
pub fn segment_blocks(rows: &[RawRow], policy: RowPolicy) -> Vec<Block> {
    let starts: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| is_tagged(row, SETUP_TITLE_TAG))
        .map(|(idx, _)| idx)
        .collect();

    if starts.is_empty() {
        debug!("no {SETUP_TITLE_TAG} rows; treating input as a single block");
        return vec![Block {
            title: String::new(),
            parameters: extract_parameters(rows),
            table: build_table(rows, policy),
        }];
    }

    let mut blocks = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(rows.len());
        let range = &rows[start..end];
        let title = range[0].get(1).cloned().unwrap_or_default();

        let table = build_table(range, policy);
        if table.is_empty() {
            warn!("block '{title}' (row {}) has no measurement data; skipping", start + 1);
            continue;
        }

        blocks.push(Block {
            title,
            parameters: extract_parameters(range),
            table,
        });
    }

    if blocks.is_empty() {
        let end = starts.get(1).copied().unwrap_or(rows.len());
        let range = &rows[starts[0]..end];
        blocks.push(Block {
            title: range[0].get(1).cloned().unwrap_or_default(),
            parameters: extract_parameters(range),
            table: build_table(range, policy),
        });
    }

    if blocks.len() > 1 {
        for block in &mut blocks {
            let table = std::mem::take(&mut block.table);
            block.table = table.with_label(SETUP_TITLE_TAG, block.title.clone());
        }
    }

    debug!("{} marker rows -> {} blocks with data", starts.len(), blocks.len());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableView;
    use crate::io::split_rows;

    fn block_text(title: &str, n_rows: usize) -> String {
        let mut s = format!("SetupTitle,{title}\nTestParameter,Run,{title}\nDataName,V,I,T\n");
        for i in 0..n_rows {
            s.push_str(&format!("DataValue,{i},{},{}\n", i * 2, i * 3));
        }
        s
    }

    #[test]
    fn unmarked_file_is_one_block_matching_table_builder() {
        let rows = split_rows("TestParameter,a,1\nDataName,V,I\nDataValue,1,2\n");
        let blocks = segment_blocks(&rows, RowPolicy::AllAfterHeader);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "");
        assert_eq!(blocks[0].table, build_table(&rows, RowPolicy::AllAfterHeader));
        assert!(blocks[0].table.label().is_none());
        assert_eq!(blocks[0].parameters.len(), 1);
    }

    #[test]
    fn unmarked_file_without_header_still_yields_one_block() {
        let rows = split_rows("just,some,text\n");
        let blocks = segment_blocks(&rows, RowPolicy::AllAfterHeader);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].table.is_empty());
    }

    #[test]
    fn two_block_scenario_concatenates_to_four_columns() {
        // Marker rows at 0 and 50, ten data rows each.
        let mut text = block_text("first", 10);
        for _ in split_rows(&text).len()..50 {
            text.push_str("Comment,filler\n");
        }
        text.push_str(&block_text("second", 10));
        let rows = split_rows(&text);
        assert!(is_tagged(&rows[50], SETUP_TITLE_TAG));

        let blocks = segment_blocks(&rows, RowPolicy::TaggedOnly);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "first");
        assert_eq!(blocks[1].title, "second");
        for block in &blocks {
            assert_eq!(block.table.n_rows(), 10);
            assert_eq!(block.table.width(), 4);
        }

        let views: Vec<TableView> = blocks.iter().map(|b| b.table.to_view()).collect();
        let stacked = TableView::concat(&views);
        assert_eq!(stacked.rows.len(), 20);
        assert_eq!(stacked.columns, vec!["V", "I", "T", "SetupTitle"]);
        assert_eq!(stacked.rows[15][3], "second");
    }

    #[test]
    fn empty_blocks_are_dropped_without_aborting() {
        let text = format!(
            "SetupTitle,broken\nTestParameter,x,1\n{}SetupTitle,header-only\nDataName,V,I\n",
            block_text("good", 3)
        );
        let rows = split_rows(&text);
        let blocks = segment_blocks(&rows, RowPolicy::AllAfterHeader);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "good");
        // A lone surviving block is not labelled.
        assert!(blocks[0].table.label().is_none());
    }

    #[test]
    fn title_column_in_header_is_overwritten_by_label() {
        let text = "SetupTitle,a\nDataName,SetupTitle,V\nDataValue,1,2\n\
SetupTitle,b\nDataName,SetupTitle,V\nDataValue,3,4\n";
        let blocks = segment_blocks(&split_rows(text), RowPolicy::AllAfterHeader);
        assert_eq!(blocks.len(), 2);

        let views: Vec<TableView> = blocks.iter().map(|b| b.table.to_view()).collect();
        let stacked = TableView::concat(&views);
        assert_eq!(stacked.columns, vec!["SetupTitle", "V"]);
        assert_eq!(stacked.rows[0], vec!["a", "2"]);
        assert_eq!(stacked.rows[1], vec!["b", "4"]);
    }

    #[test]
    fn all_empty_blocks_keep_the_first() {
        let rows = split_rows("SetupTitle,one\nTestParameter,x,1\nSetupTitle,two\nDataName,V\n");
        let blocks = segment_blocks(&rows, RowPolicy::AllAfterHeader);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "one");
        assert_eq!(blocks[0].parameters["x"].as_scalar(), Some("1"));
        assert!(blocks[0].table.is_empty());
    }

    #[test]
    fn marker_without_title_gives_empty_title() {
        let rows = split_rows("SetupTitle\nDataName,V\nDataValue,1\n");
        let blocks = segment_blocks(&rows, RowPolicy::AllAfterHeader);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "");
    }

    #[test]
    fn parameters_are_scoped_to_their_block() {
        let text = format!("{}{}", block_text("a", 2), block_text("b", 2));
        let blocks = segment_blocks(&split_rows(&text), RowPolicy::AllAfterHeader);
        assert_eq!(blocks[0].parameters["Run"].as_scalar(), Some("a"));
        assert_eq!(blocks[1].parameters["Run"].as_scalar(), Some("b"));
    }
}
