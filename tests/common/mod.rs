#![allow(dead_code)]

use std::path::Path;

use atlas_tools::io::excel_write::SheetTable;
use atlas_tools::model::table::{TABLE_NAMES, expected_columns};
use atlas_tools::model::{CellValue, Row, SourceTables};
use atlas_tools::normalize::cell_text;

/// Shorthand for a text cell.
pub fn t(value: &str) -> CellValue {
    CellValue::from(value)
}

/// Shorthand for a numeric cell.
pub fn n(value: f64) -> CellValue {
    CellValue::Number(value)
}

/// Empty sheets for every table.
pub fn empty_sheets() -> Vec<SheetTable> {
    TABLE_NAMES
        .iter()
        .map(|name| SheetTable::new(*name, expected_columns(name)))
        .collect()
}

/// Appends a row to `table`, placing each value under its column.
pub fn push_row(sheets: &mut [SheetTable], table: &str, values: &[(&str, CellValue)]) {
    let sheet = sheets
        .iter_mut()
        .find(|sheet| sheet.sheet_name == table)
        .expect("known table");
    let mut cells = vec![CellValue::Empty; sheet.columns.len()];
    for (column, value) in values {
        let position = sheet
            .columns
            .iter()
            .position(|candidate| candidate == column)
            .expect("known column");
        cells[position] = value.clone();
    }
    sheet.rows.push(cells);
}

/// Overwrites one cell of an existing row.
pub fn set_cell(
    sheets: &mut [SheetTable],
    table: &str,
    row: usize,
    column: &str,
    value: CellValue,
) {
    let sheet = sheets
        .iter_mut()
        .find(|sheet| sheet.sheet_name == table)
        .expect("known table");
    let position = sheet
        .columns
        .iter()
        .position(|candidate| candidate == column)
        .expect("known column");
    sheet.rows[row][position] = value;
}

/// A consistent data set: two organizations, one comparison and one
/// placeholder point.
pub fn valid_sheets() -> Vec<SheetTable> {
    let mut sheets = empty_sheets();

    push_row(&mut sheets, "categories", &[
        ("category_key", t("Finance")),
        ("label", t("Finance")),
        ("icon_id", t("finance")),
        ("color_hex", t("#f6bd60")),
        ("description", t("Revenue and investments.")),
    ]);
    push_row(&mut sheets, "categories", &[
        ("category_key", t("HR")),
        ("label", t("Human Resources")),
        ("icon_id", t("hr")),
        ("color_hex", t("#84a59d")),
    ]);

    push_row(&mut sheets, "continents", &[
        ("continent_name", t("Europa")),
        ("country_iso_list", t("DEU, FRA")),
        ("description", t("Core markets.")),
    ]);
    push_row(&mut sheets, "continents", &[
        ("continent_name", t("Asien")),
        ("country_iso_list", t("JPN")),
    ]);

    push_row(&mut sheets, "countries", &[
        ("country_iso3", t("DEU")),
        ("name", t("Deutschland")),
        ("continent_name", t("Europa")),
        ("active_flag", t("yes")),
        ("overview", t("Headquarters.")),
    ]);
    push_row(&mut sheets, "countries", &[
        ("country_iso3", t("FRA")),
        ("name", t("Frankreich")),
        ("continent_name", t("Europa")),
        ("active_flag", t("no")),
    ]);
    push_row(&mut sheets, "countries", &[
        ("country_iso3", t("JPN")),
        ("name", t("Japan")),
        ("continent_name", t("Asien")),
        ("active_flag", CellValue::Bool(true)),
    ]);

    push_row(&mut sheets, "points", &[
        ("point_id", t("p1")),
        ("country_iso3", t("DEU")),
        ("title", t("Berlin")),
        ("category_key", t("Finance")),
        ("longitude", n(13.4)),
        ("latitude", t("52,52")),
        ("description", t("Head office")),
    ]);
    push_row(&mut sheets, "points", &[
        ("point_id", t("p2")),
        ("country_iso3", t("FRA")),
        ("title", t("Paris")),
        ("category_key", t("HR")),
        ("longitude", n(2.35)),
        ("latitude", n(48.86)),
    ]);
    push_row(&mut sheets, "points", &[
        ("point_id", t("p3")),
        ("country_iso3", t("JPN")),
        ("title", t("Tokyo")),
        ("category_key", t("Finance")),
        ("longitude", n(139.69)),
        ("latitude", n(35.68)),
        ("coming_soon_flag", t("yes")),
    ]);
    push_row(&mut sheets, "points", &[
        ("point_id", t("p4")),
        ("country_iso3", t("DEU")),
        ("title", t("Munich")),
        ("category_key", t("HR")),
        ("longitude", n(11.58)),
        ("latitude", n(48.14)),
    ]);

    push_row(&mut sheets, "org_metrics", &[
        ("point_id", t("p1")),
        ("organization", t("Group")),
        ("summary", t("Strong year")),
        ("metric_label", t("Revenue")),
        ("metric_value", n(12.5)),
        ("metric_trend", t("up")),
    ]);
    push_row(&mut sheets, "org_metrics", &[
        ("point_id", t("p1")),
        ("organization", t("CVS")),
        ("metric_label", t("Headcount")),
        ("metric_value", t("120")),
    ]);
    push_row(&mut sheets, "org_metrics", &[
        ("point_id", t("p2")),
        ("organization", t("Group")),
        ("metric_label", t("Revenue")),
        ("metric_value", t("8")),
    ]);
    push_row(&mut sheets, "org_metrics", &[
        ("point_id", t("p2")),
        ("organization", t("CVS")),
        ("summary", t("Growing")),
    ]);
    push_row(&mut sheets, "org_metrics", &[
        ("point_id", t("p4")),
        ("organization", t("Group")),
        ("summary", t("Stable")),
    ]);
    push_row(&mut sheets, "org_metrics", &[
        ("point_id", t("p4")),
        ("organization", t("CVS")),
        ("summary", t("New site")),
    ]);

    push_row(&mut sheets, "org_progress", &[
        ("point_id", t("p1")),
        ("organization", t("Group")),
        ("summary", t("Strong year")),
        ("progress_label", t("Digitalisation")),
        ("progress_value", n(0.75)),
    ]);
    push_row(&mut sheets, "org_progress", &[
        ("point_id", t("p2")),
        ("organization", t("CVS")),
        ("progress_label", t("Training")),
        ("progress_value", t("60%")),
    ]);

    push_row(&mut sheets, "org_compare", &[
        ("point_id", t("p1")),
        ("left_label", t("CVS")),
        ("right_label", t("RVS")),
        ("summary", t("Side by side")),
        ("metric_label", t("Margin")),
        ("left_value", t("10%")),
        ("right_value", t("12%")),
    ]);
    push_row(&mut sheets, "org_compare", &[
        ("point_id", t("p1")),
        ("left_label", t("CVS")),
        ("right_label", t("RVS")),
        ("metric_label", t("Retention")),
        ("left_value", t("90%")),
        ("right_value", t("85%")),
    ]);

    sheets
}

/// Converts sheets into the in-memory table mapping the pipeline consumes.
pub fn to_source_tables(sheets: &[SheetTable]) -> SourceTables {
    let mut tables = SourceTables::new();
    for sheet in sheets {
        let rows = sheet
            .rows
            .iter()
            .map(|cells| {
                Row::from_pairs(
                    sheet
                        .columns
                        .iter()
                        .cloned()
                        .zip(cells.iter().cloned()),
                )
            })
            .collect();
        tables.insert(sheet.sheet_name.clone(), rows);
    }
    tables
}

/// Writes each sheet to `<directory>/<sheet>.csv`.
pub fn write_csv_dir(directory: &Path, sheets: &[SheetTable]) {
    for sheet in sheets {
        let path = directory.join(format!("{}.csv", sheet.sheet_name));
        let mut writer = csv::Writer::from_path(&path).expect("CSV writer created");
        writer.write_record(&sheet.columns).expect("header written");
        for cells in &sheet.rows {
            let record: Vec<String> = cells.iter().map(cell_text).collect();
            writer.write_record(&record).expect("record written");
        }
        writer.flush().expect("CSV flushed");
    }
}
