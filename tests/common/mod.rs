//! Shared fixtures for integration tests

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;

/// Cell content for [`workbook_bytes`]
pub enum Value {
    Text(&'static str),
    Number(f64),
}

use Value::{Number, Text};

const HEADER: [&str; 10] = [
    "Common Name",
    "Scientific Name",
    "Qty",
    "Buy New",
    "",
    "Move It",
    "",
    "Notes",
    "Display?",
    "Stop?",
];

const SUB_HEADER: [&str; 10] = [
    "",
    "",
    "",
    "Won't Survive/Not Worth Moving",
    "Readily Available",
    "Can be done by Domes staff",
    "Requires consult - might not survive move",
    "",
    "",
    "",
];

/// Writes `(row, cells)` pairs into a single-sheet workbook
pub fn workbook_bytes(sheet_name: &str, rows: &[(u32, Vec<Value>)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).unwrap();

    for (row, cells) in rows {
        for (col, value) in cells.iter().enumerate() {
            let col = col as u16;
            match value {
                Text("") => {}
                Text(s) => {
                    worksheet.write_string(*row, col, *s).unwrap();
                }
                Number(n) => {
                    worksheet.write_number(*row, col, *n).unwrap();
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

fn texts(values: &[&'static str]) -> Vec<Value> {
    values.iter().map(|v| Text(*v)).collect()
}

/// A conservatory inventory laid out like the real sheet
///
/// - title block on rows 1-2
/// - header on row 5, sub-header on row 6
/// - "Tropical Dome" marker on row 8 with four plants (one blank row between)
/// - "Desert Dome" marker on row 20 with four plants, the last on row 30
pub fn inventory_rows() -> Vec<(u32, Vec<Value>)> {
    vec![
        (0, texts(&["Conservatory Plant Inventory"])),
        (1, texts(&["Updated spring 2024"])),
        (4, texts(&HEADER)),
        (5, texts(&SUB_HEADER)),
        (7, texts(&["Tropical Dome"])),
        (
            8,
            vec![
                Text("Boston Fern"),
                Text("Nephrolepis exaltata"),
                Number(4.0),
                Text(""),
                Text("x"),
                Text(""),
                Text(""),
                Text("Needs humidity"),
                Text("x"),
            ],
        ),
        (
            9,
            texts(&[
                "Bird of Paradise",
                "Strelitzia reginae",
                "2",
                "X",
                "",
                "",
                "",
                "",
                "",
                "Too large",
            ]),
        ),
        (
            11,
            texts(&[
                "Staghorn Fern",
                "Platycerium bifurcatum",
                "1",
                "",
                "",
                " x ",
                "",
                "nan",
            ]),
        ),
        (12, vec![Text(""), Text("Monstera deliciosa"), Number(3.0)]),
        (13, texts(&["", "", "", "", "", "", "", "see above"])),
        (19, texts(&["Desert Dome"])),
        (20, vec![Text("Aloe"), Text("Aloe vera"), Number(6.0)]),
        (21, texts(&["Golden Barrel Cactus", "Echinocactus grusonii"])),
        (22, texts(&["Hairy Lip Fern", "Cheilanthes lanosa", "yes"])),
        (29, texts(&["Ocotillo", "Fouquieria splendens"])),
    ]
}

/// [`inventory_rows`] as workbook bytes on a sheet named "Inventory"
pub fn inventory_workbook() -> Vec<u8> {
    workbook_bytes("Inventory", &inventory_rows())
}
