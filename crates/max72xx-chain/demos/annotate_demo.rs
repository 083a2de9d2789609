//! Example: annotate a two-chip transfer and track display state
//!
//! Builds a short event stream by hand, feeds it through `ChainDecoder`
//! with a closure sink, and replays the completed writes into `ChainState`.

use max72xx_chain::chip::event::StateEvent;
use max72xx_chain::chip::state::ChainState;
use max72xx_chain::{
    Annotation, AnnotationKind, ChainConfig, ChainDecoder, DeviceType, FnSink, TransferEvent,
};

fn main() {
    println!("MAX7219 chain decode demo\n");

    let config = match ChainConfig::new(DeviceType::Max7219, 2) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    };
    let mut decoder = ChainDecoder::new(config);
    let mut state = ChainState::new(config.chain_length());

    let mut sink = FnSink(|annotation: Annotation| {
        let marker = match annotation.kind {
            AnnotationKind::Device => "  └",
            AnnotationKind::Invalid => "✗",
            _ => "▶",
        };
        println!(
            "{} [{:>4}..{:<4}] {}",
            marker,
            annotation.start,
            annotation.end,
            annotation.text()
        );
    });

    for event in create_sample_events() {
        let Some(write) = decoder.decode(event, &mut sink) else {
            continue;
        };
        if let Some(events) = state.apply(&write) {
            for ev in events {
                match ev {
                    StateEvent::PowerChanged { device, normal } => {
                        println!("    ⏻ Device {} {}", device, if normal { "on" } else { "off" });
                    }
                    StateEvent::DisplayTestChanged { device, on } => {
                        println!("    ◐ Device {} test mode {}", device, if on { "on" } else { "off" });
                    }
                    StateEvent::DecodeModeChanged { device, mode } => {
                        println!("    ⚙ Device {} decode mode 0x{:02X}", device, mode);
                    }
                    StateEvent::DigitChanged { device, digit, raw } => {
                        println!("    ♦ Device {} digit {} = 0x{:02X}", device, digit, raw);
                    }
                }
            }
        }
    }

    println!("\nFinal display content:");
    for device in state.devices() {
        println!("  Device {}: {}", device.device(), device.display_text());
    }
}

/// Two-chip chain: wake both, Code B on the far chip, write a digit to each.
fn create_sample_events() -> Vec<TransferEvent> {
    let transfers: [&[(u8, u8)]; 4] = [
        &[(0x0C, 0x01), (0x0C, 0x01)],
        &[(0x09, 0xFF), (0x09, 0x00)],
        &[(0x0B, 0x00), (0x0B, 0x00)],
        &[(0x01, 0x85), (0x01, 0x7E)],
    ];

    let mut events = Vec::new();
    let mut t = 0u64;
    for pairs in transfers {
        events.push(TransferEvent::select(true, t));
        t += 2;
        for &(address, data) in pairs {
            events.push(TransferEvent::data(address, t, t + 7));
            events.push(TransferEvent::data(data, t + 8, t + 15));
            t += 16;
        }
        events.push(TransferEvent::select(false, t));
        t += 10;
    }
    events
}
