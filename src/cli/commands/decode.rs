use super::{outcome_summary, render, InputArgs, OutputArgs};
use crate::decoder::{DecoderRegistry, FrameDecoder, TreeSink};
use crate::errors::AppResult;
use clap::Args;
use tracing::info;

/// Decode one framed message (24-byte header plus payload)
#[derive(Args)]
pub struct DecodeCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl DecodeCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = self.output.load_config()?;
        let bytes = self.input.read()?;
        info!("Decoding {} byte message", bytes.len());

        let decoder = FrameDecoder::from_config(DecoderRegistry::dash(), &config.decoder);
        let mut sink = TreeSink::new("message");
        let result = decoder.decode_message(&bytes, &mut sink);
        let tree = sink.finish();

        // Fields decoded before a frame-level failure are still shown
        print!("{}", render(&tree, &config)?);
        let report = result?;
        println!("{}", outcome_summary(&report));
        Ok(())
    }
}
