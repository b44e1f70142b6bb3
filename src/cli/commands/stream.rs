use std::fs;
use std::path::PathBuf;

use super::{outcome_summary, OutputArgs};
use crate::config::OutputFormat;
use crate::decoder::render::render_text;
use crate::decoder::{DecoderRegistry, FrameDecoder, FrameOutcome, Framer, TreeSink};
use crate::errors::AppResult;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

/// Split a captured byte stream into messages and decode each in order
#[derive(Args)]
pub struct StreamCommand {
    /// File holding concatenated framed messages
    #[arg(long)]
    pub file: PathBuf,

    /// Stop after this many messages
    #[arg(long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Serialize)]
struct MessageRecord {
    index: usize,
    outcome: String,
    fields: crate::decoder::FieldNode,
}

impl StreamCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = self.output.load_config()?;
        let bytes = fs::read(&self.file)?;
        info!("Read {} bytes from {}", bytes.len(), self.file.display());

        let decoder = FrameDecoder::from_config(DecoderRegistry::dash(), &config.decoder);
        let mut framer = Framer::new(decoder.max_message_size());
        framer.push(&bytes);

        let mut records = Vec::new();
        let mut index = 0;
        while self.limit.map_or(true, |limit| index < limit) {
            let Some(frame) = framer.next_frame()? else {
                break;
            };

            let mut sink = TreeSink::new("message");
            let report = decoder.decode_message(&frame, &mut sink)?;
            let outcome = outcome_summary(&report);
            let tree = sink.finish();

            match config.output.format {
                OutputFormat::Text => {
                    println!("#{} {}", index, outcome);
                    print!("{}", render_text(&tree, config.output.show_offsets));
                }
                OutputFormat::Json => records.push(MessageRecord {
                    index,
                    outcome,
                    fields: tree,
                }),
            }
            index += 1;

            // Offsets after a foreign magic cannot be trusted
            if matches!(report.outcome, FrameOutcome::UnknownMagic { .. }) {
                warn!("stopping at message {}: unrecognised network magic", index - 1);
                break;
            }
        }

        if config.output.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        if framer.buffered() > 0 {
            warn!(bytes = framer.buffered(), "incomplete message at end of stream");
        }
        info!("Decoded {} messages", index);
        Ok(())
    }
}
