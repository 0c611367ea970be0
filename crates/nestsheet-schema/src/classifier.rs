//! Column classification of an existing sheet
//!
//! Row 1 holds headers. A header merged across several columns of row 1
//! denotes a struct whose sub-field names sit in row 2. An unmerged header
//! ending in `_<digits>` is one slot of a flat list; anything else is a
//! plain scalar column.
//!
//! Any row-1 merge, vertical or horizontal, makes row 2 part of the header.
//! Within such a header an unmerged row-1 label with a row-2 label below it
//! is a struct of one field.

use std::collections::{HashMap, HashSet};

use nestsheet_core::{CellValue, Worksheet};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{Column, FlatMember, SheetSchema, StructElement};

static SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)_([0-9]+)$").expect("Valid suffix regex pattern"));

/// Split `score_10` into `("score", 10)`
///
/// The prefix is greedy, so `a_1_2` splits as `("a_1", 2)`. Suffixes too
/// large for a u64 count as no suffix.
pub fn split_suffix(header: &str) -> Option<(&str, u64)> {
    let caps = SUFFIX_RE.captures(header)?;
    let base = caps.get(1)?.as_str();
    let index = caps.get(2)?.as_str().parse::<u64>().ok()?;
    Some((base, index))
}

fn cell_label(sheet: &Worksheet, row: u32, col: u32) -> Option<String> {
    let col = u16::try_from(col).ok()?;
    sheet.value_at(row, col).and_then(CellValue::label)
}

/// Classify the columns of a sheet from its header rows and merges
pub fn classify(sheet: &Worksheet) -> SheetSchema {
    let mut schema = SheetSchema::default();

    let Some(max_col) = sheet.max_column() else {
        return schema;
    };

    // 0-based column -> (first, last) of its row-1 horizontal merge
    let mut h_merged: HashMap<u32, (u32, u32)> = HashMap::new();
    // 0-based columns whose row-1 header spans down into row 2
    let mut v_merged: HashSet<u32> = HashSet::new();
    for range in sheet.merged_regions() {
        if range.start.row != 0 {
            continue;
        }
        if range.start.col != range.end.col {
            let span = (u32::from(range.start.col), u32::from(range.end.col));
            for col in span.0..=span.1 {
                h_merged.insert(col, span);
            }
        } else if range.end.row >= 1 {
            v_merged.insert(u32::from(range.start.col));
        }
    }
    schema.two_row_header = !h_merged.is_empty() || !v_merged.is_empty();

    let mut col: u32 = 0;
    while col <= u32::from(max_col) {
        let Some(header) = cell_label(sheet, 0, col) else {
            col += 1;
            continue;
        };
        let suffix = split_suffix(&header);

        // One-field structs are written without a horizontal merge
        let span = h_merged.get(&col).copied().or_else(|| {
            let one_field = schema.two_row_header
                && !v_merged.contains(&col)
                && cell_label(sheet, 1, col).is_some();
            one_field.then_some((col, col))
        });

        if let Some((merge_start, merge_end)) = span {
            let mut element = StructElement {
                index: 0,
                sub_fields: Vec::new(),
                positions: Vec::new(),
            };
            for sc in merge_start..=merge_end {
                let sub_field =
                    cell_label(sheet, 1, sc).unwrap_or_else(|| format!("field_{}", sc + 1));
                element.sub_fields.push(sub_field);
                element.positions.push(sc + 1);
            }

            let base = match suffix {
                Some((base, index)) => {
                    element.index = index;
                    base.to_string()
                }
                None => {
                    schema.single_structs.insert(header.clone());
                    header.clone()
                }
            };
            schema.struct_groups.entry(base).or_default().push(element);
            col = merge_end + 1;
        } else if let Some((base, index)) = suffix {
            schema
                .flat_groups
                .entry(base.to_string())
                .or_default()
                .push(FlatMember {
                    header: header.clone(),
                    suffix: index,
                    position: col + 1,
                });
            col += 1;
        } else {
            schema.simple.push(Column {
                name: header,
                position: col + 1,
            });
            col += 1;
        }
    }

    // Stable sorts: equal suffixes keep column order
    for members in schema.flat_groups.values_mut() {
        members.sort_by_key(|m| m.suffix);
    }
    for elements in schema.struct_groups.values_mut() {
        elements.sort_by_key(|e| e.index);
    }

    tracing::debug!(
        simple = schema.simple.len(),
        flat_groups = schema.flat_groups.len(),
        struct_groups = schema.struct_groups.len(),
        single_structs = schema.single_structs.len(),
        "classified sheet columns"
    );

    schema
}
