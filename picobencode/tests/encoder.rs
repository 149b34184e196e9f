// SPDX-License-Identifier: Apache-2.0

// Encoder output and its agreement with the decoder

use core::ops::ControlFlow;

use picobencode::{parse, ArrayBitStack, EncodeError, Encoder, Handler};

/// Re-encodes every decoded event, which must reproduce canonical input byte for byte.
struct Reencoder<'e, 'buf> {
    encoder: &'e mut Encoder<'buf>,
    error: Option<EncodeError>,
}

impl Reencoder<'_, '_> {
    fn forward(&mut self, result: Result<(), EncodeError>) -> ControlFlow<()> {
        match result {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }
}

impl Handler<'_> for Reencoder<'_, '_> {
    fn integer(&mut self, value: i64) -> ControlFlow<()> {
        let result = self.encoder.integer(value);
        self.forward(result)
    }
    fn string(&mut self, value: &[u8]) -> ControlFlow<()> {
        let result = self.encoder.string(value);
        self.forward(result)
    }
    fn list_start(&mut self) -> ControlFlow<()> {
        let result = self.encoder.list_open();
        self.forward(result)
    }
    fn list_end(&mut self) -> ControlFlow<()> {
        let result = self.encoder.list_close();
        self.forward(result)
    }
    fn dict_start(&mut self) -> ControlFlow<()> {
        let result = self.encoder.dict_open();
        self.forward(result)
    }
    fn dict_key(&mut self, key: &[u8]) -> ControlFlow<()> {
        let result = self.encoder.string(key);
        self.forward(result)
    }
    fn dict_end(&mut self) -> ControlFlow<()> {
        let result = self.encoder.dict_close();
        self.forward(result)
    }
}

fn reencode(input: &[u8]) -> Vec<u8> {
    let mut buffer = vec![0u8; input.len()];
    let mut encoder: Encoder = Encoder::new(&mut buffer);
    let mut reencoder = Reencoder {
        encoder: &mut encoder,
        error: None,
    };
    parse(input, Some(&mut reencoder)).expect("decode failed");
    assert_eq!(reencoder.error, None);
    encoder.finish().expect("finish failed").to_vec()
}

#[test_log::test]
fn test_canonical_inputs_reencode_identically() {
    let inputs: [&[u8]; 8] = [
        b"i0e",
        b"i-42e",
        b"0:",
        b"4:spam",
        b"le",
        b"de",
        b"l4:spam4:eggse",
        b"d3:cow3:moo4:spamli1ei-2eld1:xdeeeee",
    ];
    for input in inputs {
        assert_eq!(reencode(input), input);
    }
}

#[test]
fn test_exactly_sized_buffer() {
    // reencode() sizes the buffer to the input; one byte less must fail
    let input = b"d4:infoli1eee";
    let mut buffer = vec![0u8; input.len() - 1];
    let mut encoder: Encoder = Encoder::new(&mut buffer);
    let mut reencoder = Reencoder {
        encoder: &mut encoder,
        error: None,
    };
    assert!(parse(input, Some(&mut reencoder)).is_err());
    assert_eq!(reencoder.error, Some(EncodeError::BufferFull));
}

#[test]
fn test_encode_binary_payload() {
    let payload: Vec<u8> = (0..=255).collect();
    let mut buffer = [0u8; 300];
    let mut encoder: Encoder = Encoder::new(&mut buffer);
    encoder.string(&payload).unwrap();
    let out = encoder.finish().unwrap();
    assert_eq!(&out[..4], b"256:");
    assert_eq!(&out[4..], &payload[..]);
}

#[test]
fn test_deep_encoding_with_array_bitstack() {
    let mut buffer = [0u8; 200];
    let mut encoder: Encoder<ArrayBitStack<4, u8>> = Encoder::new(&mut buffer);
    for _ in 0..32 {
        encoder.list_open().unwrap();
    }
    assert_eq!(encoder.list_open(), Err(EncodeError::TooDeep));
    for _ in 0..32 {
        encoder.list_close().unwrap();
    }
    let out = encoder.finish().unwrap();
    assert_eq!(out.len(), 64);
    assert!(parse(out, Some(&mut ())).is_ok());
}
