use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use unicode_width::UnicodeWidthStr;

use max72xx_chain::{Annotation, AnnotationKind, ChainConfig, ChainDecoder, TransferEvent};

/// One decoded write: the write annotation paired with its device annotation.
struct Row {
    start: u64,
    end: u64,
    device: String,
    kind: AnnotationKind,
    text: String,
    raw: String,
}

/// Pad a &str to a target display width (columns) using unicode-width so
/// the segment and bitmap glyphs line up in plain output.
fn pad_to_width(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

fn collect_rows(config: ChainConfig, events: Vec<TransferEvent>) -> Vec<Row> {
    let mut decoder = ChainDecoder::new(config);
    let mut pending: Vec<Annotation> = Vec::new();
    let mut rows = Vec::new();

    for event in events {
        let Some(write) = decoder.decode(event, &mut pending) else {
            continue;
        };
        let mut device = String::new();
        let mut body: Option<Annotation> = None;
        for annotation in pending.drain(..) {
            if annotation.kind == AnnotationKind::Device {
                device = annotation.text().to_string();
            } else {
                body = Some(annotation);
            }
        }
        let Some(body) = body else {
            log::warn!("write at {} produced no annotation", write.start);
            continue;
        };
        rows.push(Row {
            start: body.start,
            end: body.end,
            device,
            kind: body.kind,
            text: body.text().to_string(),
            raw: format!("0x{:X}=0x{:02X}", write.address, write.data),
        });
    }
    rows
}

/// Decode command: print every register write with its chain position.
pub fn print_decode(
    file_path: &Path,
    config: ChainConfig,
    events: Vec<TransferEvent>,
    plain: bool,
) -> Result<()> {
    let event_count = events.len();
    let rows = collect_rows(config, events);

    println!("=== Capture: {} ===", file_path.display());
    println!(
        "Device type: {}  Chain length: {}  Events: {}",
        config.device_type(),
        config.chain_length(),
        event_count
    );
    println!();

    if plain {
        let widths = [12usize, 12, 10, 9, 10];
        println!(
            "{}{}{}{}{}{}",
            pad_to_width("Start", widths[0]),
            pad_to_width("End", widths[1]),
            pad_to_width("Device", widths[2]),
            pad_to_width("Type", widths[3]),
            pad_to_width("Raw", widths[4]),
            "Annotation"
        );
        println!("{}", "-".repeat(80));
        for row in &rows {
            println!(
                "{}{}{}{}{}{}",
                pad_to_width(&row.start.to_string(), widths[0]),
                pad_to_width(&row.end.to_string(), widths[1]),
                pad_to_width(&row.device, widths[2]),
                pad_to_width(row.kind.id(), widths[3]),
                pad_to_width(&row.raw, widths[4]),
                row.text
            );
        }
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Start"),
            Cell::new("End"),
            Cell::new("Device"),
            Cell::new("Type"),
            Cell::new("Raw"),
            Cell::new("Annotation"),
        ]);
        for row in &rows {
            table.add_row(vec![
                Cell::new(row.start),
                Cell::new(row.end),
                Cell::new(&row.device),
                Cell::new(row.kind.id()),
                Cell::new(&row.raw),
                Cell::new(&row.text),
            ]);
        }
        println!("{}", table);
    }

    let invalid = rows
        .iter()
        .filter(|r| r.kind == AnnotationKind::Invalid)
        .count();
    let digits = rows
        .iter()
        .filter(|r| r.kind == AnnotationKind::Digit)
        .count();
    println!();
    println!(
        "writes={} registers={} digits={} invalid={}",
        rows.len(),
        rows.len() - invalid - digits,
        digits,
        invalid
    );

    Ok(())
}
