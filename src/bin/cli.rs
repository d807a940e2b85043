use class_schedule_ics::{
    ColumnLayout, ConversionReport, DOWNLOAD_FILE_NAME, LayoutField, convert_path,
    parse_column_ref,
};
use polars::prelude::{AnyValue, DataFrame};
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::String(s) => s.replace('\n', " / "),
        AnyValue::StringOwned(s) => s.replace('\n', " / "),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        rows.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &rows {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (ci, s) in cells.iter().enumerate() {
            let pad = widths[ci].saturating_sub(s.chars().count());
            line.push(' ');
            line.push_str(s);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load <path>                        Convert a schedule (.xls, .xlsx, .xlsm, .xlsb, .ods, .csv)\n  show                               Show events from the last conversion\n  skipped                            List rows that produced no event\n  preview                            Print the calendar text\n  save [path]                        Write the calendar (default {DOWNLOAD_FILE_NAME})\n  layout show                        Show the column layout\n  layout default                     Reset the column layout\n  layout set <json_path>             Load the column layout from a JSON file\n  layout save <json_path>            Save the column layout to a JSON file\n  layout col <field> <refs>          Set a column (field: start|end|summary|location|description,\n                                     refs: index or letter, comma-separated for description)\n  quit|exit                          Exit"
    );
}

fn print_layout(layout: &ColumnLayout) {
    println!("Column layout      : {}", layout.to_cli_summary());
}

fn print_events(report: &ConversionReport) {
    match report.events_frame() {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Error building event table: {}", e),
    }
}

fn print_skipped(report: &ConversionReport) {
    if report.skipped().is_empty() {
        println!("No rows skipped.");
        return;
    }
    println!("Skipped rows:");
    for skipped in report.skipped() {
        println!("  {}", skipped.to_cli_line());
    }
}

fn parse_column_refs(input: &str) -> Option<Vec<usize>> {
    if input.trim() == "-" {
        return Some(Vec::new());
    }
    input.split(',').map(parse_column_ref).collect()
}

const NOTHING_CONVERTED: &str = "Nothing converted yet. Use 'load <path>' first.";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut layout = ColumnLayout::default();
    let mut report: Option<ConversionReport> = None;

    println!("Class Schedule Converter (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    println!("Usage: load <path>");
                    continue;
                }
                let path = rest.join(" ");
                match convert_path(&path, &layout) {
                    Ok(converted) => {
                        println!(
                            "ICS file generated from {} ({}).",
                            path,
                            converted.to_cli_summary()
                        );
                        print_events(&converted);
                        report = Some(converted);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "show" => match &report {
                Some(report) => print_events(report),
                None => println!("{NOTHING_CONVERTED}"),
            },
            "skipped" => match &report {
                Some(report) => print_skipped(report),
                None => println!("{NOTHING_CONVERTED}"),
            },
            "preview" => match &report {
                Some(report) => println!("{}", report.to_ics()),
                None => println!("{NOTHING_CONVERTED}"),
            },
            "save" => {
                let Some(report) = &report else {
                    println!("{NOTHING_CONVERTED}");
                    continue;
                };
                let rest: Vec<&str> = parts.collect();
                let path = if rest.is_empty() {
                    DOWNLOAD_FILE_NAME.to_string()
                } else {
                    rest.join(" ")
                };
                match fs::write(&path, report.to_ics()) {
                    Ok(_) => println!("Calendar saved to {}.", path),
                    Err(e) => println!("Error writing {}: {}", path, e),
                }
            }
            "layout" => match parts.next() {
                Some("show") | None => print_layout(&layout),
                Some("default") => {
                    layout = ColumnLayout::default();
                    println!("Column layout reset to default.");
                    print_layout(&layout);
                }
                Some("set") => match parts.next() {
                    Some(path) => match ColumnLayout::load_json(path) {
                        Ok(loaded) => {
                            layout = loaded;
                            println!("Column layout updated from {}.", path);
                            print_layout(&layout);
                        }
                        Err(e) => println!("Error loading layout from {}: {}", path, e),
                    },
                    None => println!("Usage: layout set <json_path>"),
                },
                Some("save") => match parts.next() {
                    Some(path) => match layout.save_json(path) {
                        Ok(_) => println!("Column layout saved to {}.", path),
                        Err(e) => println!("Error saving layout to {}: {}", path, e),
                    },
                    None => println!("Usage: layout save <json_path>"),
                },
                Some("col") => {
                    let field = parts.next().and_then(LayoutField::from_str);
                    let refs = parts.next().and_then(parse_column_refs);
                    match (field, refs) {
                        (Some(field), Some(columns)) => {
                            match layout.set_field(field, &columns) {
                                Ok(_) => {
                                    println!("Column for {} updated.", field.as_str());
                                    print_layout(&layout);
                                }
                                Err(e) => println!("Invalid layout: {}", e),
                            }
                        }
                        _ => println!(
                            "Usage: layout col <start|end|summary|location|description> <index|letter[,..]>"
                        ),
                    }
                }
                Some(other) => {
                    println!("Unknown layout command '{}'.", other);
                    println!("Usage: layout show|default|set <json_path>|save <json_path>|col ...");
                }
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
