//! Message framing and dispatch
//!
//! Every message starts with a 24-byte header:
//!
//! ```text
//! magic (4, BE) | command (12, NUL-padded ASCII) | length (4, LE) | checksum (4, BE)
//! ```
//!
//! `FrameDecoder` decodes one complete message: it checks the magic against
//! the accepted networks, looks the command up in the registry and runs the
//! payload decoder on a cursor bounded by the declared length. `Framer`
//! splits a reassembled byte stream into such messages.

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::cursor::Cursor;
use super::emit::{self, record};
use super::registry::DecoderRegistry;
use super::sink::{Field, FieldSink, FieldValue, NullSink};
use super::{DecodeError, DecodeResult};
use crate::config::DecoderConfig;
use crate::types::network::{Network, COMMAND_SIZE, HEADER_SIZE, MAX_MESSAGE_SIZE};

/// Parsed 24-byte message header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub magic: u32,
    /// Command name with trailing NULs removed
    pub command: String,
    pub length: u32,
    pub checksum: u32,
}

impl FrameHeader {
    /// Read the header fields, reporting each to the sink
    pub fn read(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<Self> {
        let start = c.position();
        let magic = c.read_u32_be("magic")?;
        let magic_text = match Network::from_magic(magic) {
            Some(network) => format!("0x{:08x} ({})", magic, network),
            None => format!("0x{:08x} (unknown network)", magic),
        };
        emit::emit(c, s, "magic", start, FieldValue::Text(magic_text));

        let start = c.position();
        let raw = c.read_array::<COMMAND_SIZE>("command")?;
        let command = command_name(raw);
        emit::emit(c, s, "command", start, FieldValue::Text(command.clone()));

        let length = emit::u32_le(c, s, "length")?;

        let start = c.position();
        let checksum = c.read_u32_be("checksum")?;
        emit::emit(
            c,
            s,
            "checksum",
            start,
            FieldValue::Hex {
                value: checksum as u64,
                width: 8,
            },
        );

        Ok(Self {
            magic,
            command,
            length,
            checksum,
        })
    }

    /// Parse a header from the front of `bytes` without emitting anything
    pub fn parse(bytes: &[u8]) -> DecodeResult<Self> {
        Self::read(&mut Cursor::new(bytes), &mut NullSink)
    }

    pub fn network(&self) -> Option<Network> {
        Network::from_magic(self.magic)
    }

    /// Total size of the message this header announces
    pub fn frame_size(&self) -> usize {
        HEADER_SIZE + self.length as usize
    }

    /// Serialise back to the 24-byte wire form
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.magic.to_be_bytes());
        let name = self.command.as_bytes();
        debug_assert!(
            name.len() <= COMMAND_SIZE,
            "command name {:?} longer than {} bytes",
            self.command,
            COMMAND_SIZE
        );
        let n = name.len().min(COMMAND_SIZE);
        out[4..4 + n].copy_from_slice(&name[..n]);
        out[16..20].copy_from_slice(&self.length.to_le_bytes());
        out[20..24].copy_from_slice(&self.checksum.to_be_bytes());
        out
    }
}

/// Command bytes up to the NUL padding, as text
fn command_name(raw: &[u8; COMMAND_SIZE]) -> String {
    let end = raw
        .iter()
        .rposition(|b| *b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// First four bytes of double SHA-256, read big-endian like the header field
pub fn payload_checksum(payload: &[u8]) -> u32 {
    let digest = Sha256::digest(Sha256::digest(payload));
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// What happened to one message after its header was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The payload decoder ran to completion
    Decoded,
    /// Magic is not an accepted network; nothing after the header was read
    UnknownMagic { magic: u32 },
    /// No decoder registered; the payload was not decoded
    UnknownCommand { command: String, length: u32 },
    /// The payload decoder stopped early; fields before `error` were emitted
    Malformed { command: String, error: DecodeError },
}

/// Result of decoding one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub header: FrameHeader,
    pub network: Option<Network>,
    pub outcome: FrameOutcome,
    /// `Some(false)` on checksum mismatch; `None` when not verified
    pub checksum_valid: Option<bool>,
    /// Payload bytes the decoder left unread
    pub unparsed_payload: usize,
    /// Bytes in the buffer after the declared payload
    pub trailing: usize,
}

impl FrameReport {
    pub fn is_decoded(&self) -> bool {
        matches!(self.outcome, FrameOutcome::Decoded)
    }

    pub fn checksum_mismatch(&self) -> bool {
        self.checksum_valid == Some(false)
    }
}

/// States of the stream framer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameState {
    /// Fewer than 24 bytes of the next message are buffered
    AwaitingHeader,
    /// Header read; waiting for `header.length` payload bytes
    AwaitingPayload { header: FrameHeader },
}

/// Decodes complete messages through a command registry
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    registry: DecoderRegistry,
    networks: Vec<Network>,
    verify_checksum: bool,
    max_message_size: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(DecoderRegistry::dash())
    }
}

fn warn_if_empty(registry: &DecoderRegistry) {
    if registry.is_empty() {
        warn!("decoder registry is empty, every command will be reported as unknown");
    }
}

impl FrameDecoder {
    /// Accept every network, no checksum verification
    pub fn new(registry: DecoderRegistry) -> Self {
        warn_if_empty(&registry);
        Self {
            registry,
            networks: Network::ALL.to_vec(),
            verify_checksum: false,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    pub fn from_config(registry: DecoderRegistry, config: &DecoderConfig) -> Self {
        warn_if_empty(&registry);
        Self {
            registry,
            networks: config.networks.clone(),
            verify_checksum: config.verify_checksum,
            max_message_size: config.max_message_size,
        }
    }

    pub fn with_networks(mut self, networks: Vec<Network>) -> Self {
        self.networks = networks;
        self
    }

    pub fn with_checksum_verification(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    pub fn with_max_message_size(mut self, max: usize) -> Self {
        self.max_message_size = max;
        self
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    /// Decode one framed message from the front of `buf`
    ///
    /// Header truncation, a short payload and a declared length beyond the
    /// size limit are returned as `Err`; everything else, including unknown
    /// commands and payload decode failures, comes back in the report.
    pub fn decode_message(&self, buf: &[u8], sink: &mut dyn FieldSink) -> DecodeResult<FrameReport> {
        let mut c = Cursor::new(buf);
        let header = record(&mut c, sink, "header", FrameHeader::read)?;
        let network = header.network();

        let accepted = network.is_some_and(|n| self.networks.contains(&n));
        if !accepted {
            warn!(magic = format_args!("0x{:08x}", header.magic), "unrecognised network magic");
            let magic = header.magic;
            return Ok(FrameReport {
                header,
                network,
                outcome: FrameOutcome::UnknownMagic { magic },
                checksum_valid: None,
                unparsed_payload: 0,
                trailing: c.remaining(),
            });
        }

        if header.length as usize > self.max_message_size {
            return Err(DecodeError::OffsetOverflow {
                field: "payload",
                offset: c.position(),
                declared: header.length as u64,
            });
        }

        let mut payload = c.sub_cursor("payload", header.length as usize)?;
        let trailing = c.remaining();

        let checksum_valid = if self.verify_checksum {
            let computed = payload_checksum(payload.peek_rest());
            let valid = computed == header.checksum;
            if !valid {
                warn!(
                    command = %header.command,
                    expected = format_args!("0x{:08x}", header.checksum),
                    computed = format_args!("0x{:08x}", computed),
                    "checksum mismatch"
                );
            }
            sink.field(Field::new(
                "checksum status",
                HEADER_SIZE - 4,
                4,
                FieldValue::Text(if valid {
                    "valid".to_string()
                } else {
                    format!("mismatch (computed 0x{:08x})", computed)
                }),
            ));
            Some(valid)
        } else {
            None
        };

        let Some(decoder) = self.registry.get(&header.command) else {
            warn!(command = %header.command, length = header.length, "unknown command");
            emit::note(
                sink,
                "unknown command",
                payload.position(),
                payload.remaining(),
                format!(
                    "unknown command '{}' ({} payload bytes not decoded)",
                    header.command, header.length
                ),
            );
            let command = header.command.clone();
            let length = header.length;
            return Ok(FrameReport {
                header,
                network,
                outcome: FrameOutcome::UnknownCommand { command, length },
                checksum_valid,
                unparsed_payload: payload.remaining(),
                trailing,
            });
        };

        debug!(command = %header.command, length = header.length, "decoding payload");
        let result = record(&mut payload, sink, &header.command, |p, s| decoder.decode(p, s));

        let outcome = match result {
            Ok(()) => {
                if !payload.is_empty() {
                    emit::note(
                        sink,
                        "unparsed trailing bytes",
                        payload.position(),
                        payload.remaining(),
                        format!("{} bytes after the {} payload", payload.remaining(), header.command),
                    );
                }
                FrameOutcome::Decoded
            }
            Err(error) => {
                warn!(command = %header.command, %error, "payload decode failed");
                FrameOutcome::Malformed {
                    command: header.command.clone(),
                    error,
                }
            }
        };

        Ok(FrameReport {
            header,
            network,
            outcome,
            checksum_valid,
            unparsed_payload: payload.remaining(),
            trailing,
        })
    }
}

/// Splits a reassembled byte stream into complete messages
#[derive(Debug)]
pub struct Framer {
    buf: Vec<u8>,
    /// Start of the unconsumed bytes in `buf`
    pos: usize,
    state: FrameState,
    max_message_size: usize,
}

impl Default for Framer {
    fn default() -> Self {
        Self::new(MAX_MESSAGE_SIZE)
    }
}

impl Framer {
    pub fn new(max_message_size: usize) -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            state: FrameState::AwaitingHeader,
            max_message_size,
        }
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Bytes buffered but not yet returned as a message
    pub fn buffered(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Drop consumed bytes once they make up at least half of the buffer
    fn compact(&mut self) {
        if self.pos == self.buf.len() {
            self.buf.clear();
            self.pos = 0;
        } else if self.pos * 2 >= self.buf.len() {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }
    }

    /// Next complete message (header and payload), if one is buffered
    ///
    /// A declared length above the size limit leaves the framer stuck in
    /// `AwaitingHeader`: later offsets in the stream cannot be trusted.
    pub fn next_frame(&mut self) -> DecodeResult<Option<Vec<u8>>> {
        loop {
            match &self.state {
                FrameState::AwaitingHeader => {
                    if self.buffered() < HEADER_SIZE {
                        return Ok(None);
                    }
                    let header = FrameHeader::parse(&self.buf[self.pos..self.pos + HEADER_SIZE])?;
                    if header.length as usize > self.max_message_size {
                        return Err(DecodeError::OffsetOverflow {
                            field: "payload",
                            offset: HEADER_SIZE,
                            declared: header.length as u64,
                        });
                    }
                    self.state = FrameState::AwaitingPayload { header };
                }
                FrameState::AwaitingPayload { header } => {
                    let size = header.frame_size();
                    if self.buffered() < size {
                        return Ok(None);
                    }
                    let frame = self.buf[self.pos..self.pos + size].to_vec();
                    self.pos += size;
                    self.compact();
                    self.state = FrameState::AwaitingHeader;
                    return Ok(Some(frame));
                }
            }
        }
    }
}
