use table_diff::{DiffReader, DiffResult, MemorySource, RowDiff};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut source = MemorySource::new();
    source.insert_table(
        "sumNew",
        vec![
            strings(&["1", "q", "u", "r"]),
            strings(&["2", "a", "s", "f"]),
            strings(&["4", "y", "u", "i"]),
        ],
    );
    source.insert_table(
        "sumOld",
        vec![
            strings(&["1", "q", "w", "e"]),
            strings(&["2", "a", "s", "d"]),
            strings(&["3", "z", "x", "c"]),
        ],
    );

    let diff = DiffResult {
        table_sum: "sumNew".to_string(),
        old_table_sum: "sumOld".to_string(),
        pk: vec![0],
        old_pk: vec![0],
        columns: strings(&["a", "b", "c", "e"]),
        old_columns: strings(&["a", "b", "c", "d"]),
        row_diff: Some(vec![
            RowDiff { off1: Some(0), off2: Some(0) },
            RowDiff { off1: Some(1), off2: Some(1) },
            RowDiff { off1: None, off2: Some(2) },
            RowDiff { off1: Some(2), off2: None },
        ]),
        data_profile: None,
    };

    let reader = DiffReader::new(&source, diff)?;

    println!("columns: {}", reader.columns().join(", "));
    println!("primary key: {}", reader.primary_key().join(", "));
    for name in &reader.column_changes().added {
        println!("column added: {name}");
    }
    for name in &reader.column_changes().removed {
        println!("column removed: {name}");
    }

    if let Some(rows) = reader.added_rows() {
        println!("added rows: {}", rows.len());
        for row in rows {
            println!("  + {}", format_cells(&row?));
        }
    }
    if let Some(rows) = reader.removed_rows() {
        println!("removed rows: {}", rows.len());
        for row in rows {
            println!("  - {}", format_cells(&row?));
        }
    }
    if let Some(rows) = reader.modified_rows() {
        println!("modified rows: {}", rows.len());
        for row in rows {
            let cells: Vec<String> = row?
                .iter()
                .map(|pair| match (&pair.new_value, &pair.old_value) {
                    (Some(new), Some(old)) if new == old => new.clone(),
                    (new, old) => format!("{} -> {}", display(old), display(new)),
                })
                .collect();
            println!("  ~ {}", cells.join(", "));
        }
    }

    Ok(())
}

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

fn format_cells(cells: &[Option<String>]) -> String {
    cells.iter().map(display).collect::<Vec<_>>().join(", ")
}

fn display(cell: &Option<String>) -> String {
    match cell {
        Some(value) => value.clone(),
        None => "-".to_string(),
    }
}
