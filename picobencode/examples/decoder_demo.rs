// Example demonstrating the callback decoder on a torrent-like document

use core::ops::ControlFlow;

use picobencode::{Decoder, DecoderOptions, Encoder, ErrorCode, Handler};

/// Prints bencode events as they arrive
struct BencodeEventPrinter {
    indent: usize,
    event_count: usize,
}

impl BencodeEventPrinter {
    fn new() -> Self {
        Self {
            indent: 0,
            event_count: 0,
        }
    }

    fn indent_str(&self) -> String {
        "  ".repeat(self.indent)
    }

    fn print(&mut self, line: core::fmt::Arguments<'_>) -> ControlFlow<()> {
        self.event_count += 1;
        println!("{}{}", self.indent_str(), line);
        ControlFlow::Continue(())
    }
}

/// Shows text payloads as text and everything else as a byte count
fn show(bytes: &[u8]) -> String {
    match core::str::from_utf8(bytes) {
        Ok(s) if !s.chars().any(char::is_control) => format!("'{s}'"),
        _ => format!("<{} bytes>", bytes.len()),
    }
}

impl Handler<'_> for BencodeEventPrinter {
    fn integer(&mut self, value: i64) -> ControlFlow<()> {
        self.print(format_args!("🔢 Integer: {value}"))
    }

    fn string(&mut self, value: &[u8]) -> ControlFlow<()> {
        self.print(format_args!("📝 String: {}", show(value)))
    }

    fn list_start(&mut self) -> ControlFlow<()> {
        let flow = self.print(format_args!("📋 ListStart"));
        self.indent += 1;
        flow
    }

    fn list_end(&mut self) -> ControlFlow<()> {
        self.indent = self.indent.saturating_sub(1);
        self.print(format_args!("📋 ListEnd"))
    }

    fn dict_start(&mut self) -> ControlFlow<()> {
        let flow = self.print(format_args!("🏁 DictStart"));
        self.indent += 1;
        flow
    }

    fn dict_key(&mut self, key: &[u8]) -> ControlFlow<()> {
        self.print(format_args!("🔑 Key: {}", show(key)))
    }

    fn dict_end(&mut self) -> ControlFlow<()> {
        self.indent = self.indent.saturating_sub(1);
        self.print(format_args!("🏁 DictEnd"))
    }
}

/// Stops the parse once it sees the `pieces` key
struct StopAtPieces;

impl Handler<'_> for StopAtPieces {
    fn dict_key(&mut self, key: &[u8]) -> ControlFlow<()> {
        if key == b"pieces" {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("🚀 Bencode Decoder Demo - callback-driven decoding");
    println!("=================================================");
    println!();

    // Build the input with the encoder
    let mut buffer = [0u8; 256];
    let mut encoder: Encoder = Encoder::new(&mut buffer);
    encoder.dict_open()?;
    encoder.string(b"announce")?;
    encoder.string(b"http://tracker.example/announce")?;
    encoder.string(b"info")?;
    encoder.dict_open()?;
    encoder.string(b"files")?;
    encoder.list_open()?;
    encoder.string(b"a.txt")?;
    encoder.string(b"b.bin")?;
    encoder.list_close()?;
    encoder.string(b"length")?;
    encoder.integer(1024)?;
    encoder.string(b"pieces")?;
    encoder.string(&[0x9a, 0x00, 0x17, 0xfe])?;
    encoder.dict_close()?;
    encoder.dict_close()?;
    let input = encoder.finish()?;

    println!("📄 Input: {}", String::from_utf8_lossy(input));
    println!("📏 Total size: {} bytes", input.len());
    println!();

    let mut printer = BencodeEventPrinter::new();
    let consumed = Decoder::new().parse(input, Some(&mut printer))?;
    println!();
    println!(
        "✅ Decoded {} events from {consumed} bytes",
        printer.event_count
    );

    // Same input through the strict decoder
    let strict = Decoder::with_options(DecoderOptions::new().with_strict_keys(true));
    strict.parse(input, Some(&mut ()))?;
    println!("✅ Keys are in canonical order");

    // Handlers can stop the parse early
    let result = Decoder::new().parse(input, Some(&mut StopAtPieces));
    println!("🛑 Early stop: {:?} ({:?})", result, ErrorCode::from(&result));

    // Malformed input reports what went wrong and where
    for bad in [&b"i03e"[..], &b"d3:cowe"[..], &b"l4:spam"[..]] {
        if let Err(err) = picobencode::parse(bad, Some(&mut ())) {
            println!("❌ {:<10} {err}", String::from_utf8_lossy(bad));
        }
    }

    Ok(())
}
