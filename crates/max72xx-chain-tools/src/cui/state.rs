use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};

use max72xx_chain::chip::register::{Register, render_decode_mode, render_intensity};
use max72xx_chain::chip::state::{ChainState, DeviceState};
use max72xx_chain::{Annotation, ChainConfig, ChainDecoder, FnSink, TransferEvent};

/// State command: replay the capture and print each device's final state.
pub fn print_state(file_path: &Path, config: ChainConfig, events: Vec<TransferEvent>) -> Result<()> {
    let mut decoder = ChainDecoder::new(config);
    let mut state = ChainState::new(config.chain_length());
    // Annotations are not shown here.
    let mut sink = FnSink(|_: Annotation| {});
    let mut writes = 0usize;
    let mut changes = 0usize;

    for event in events {
        let Some(write) = decoder.decode(event, &mut sink) else {
            continue;
        };
        writes += 1;
        if let Some(evs) = state.apply(&write) {
            for ev in &evs {
                log::debug!("{:?}", ev);
            }
            changes += evs.len();
        }
    }

    println!("=== Capture: {} ===", file_path.display());
    println!(
        "Device type: {}  Chain length: {}  Writes: {}  State changes: {}",
        config.device_type(),
        config.chain_length(),
        writes,
        changes
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Device"),
        Cell::new("Power"),
        Cell::new("Test"),
        Cell::new("Decode"),
        Cell::new("Intensity"),
        Cell::new("Scan"),
        Cell::new("Display"),
    ]);
    for device in state.devices() {
        table.add_row(device_row(device, config));
    }
    println!("{}", table);

    Ok(())
}

fn device_row(device: &DeviceState, config: ChainConfig) -> Vec<Cell> {
    let power = if device.is_shutdown() {
        "shutdown"
    } else {
        "normal"
    };
    let test = if device.is_display_test() { "on" } else { "off" };
    let intensity = match device.read_register(Register::Intensity.address()) {
        Some(raw) => render_intensity(raw, config.device_type()),
        None => "-".to_string(),
    };
    let scan = match device.scan_limit() {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    };
    vec![
        Cell::new(device.device()),
        Cell::new(power),
        Cell::new(test),
        Cell::new(render_decode_mode(device.decode_mode())),
        Cell::new(intensity),
        Cell::new(scan),
        Cell::new(device.display_text()),
    ]
}
