use super::{render, InputArgs, OutputArgs};
use crate::decoder::{Cursor, DecoderRegistry, TreeSink};
use crate::errors::{AppError, AppResult};
use clap::Args;
use tracing::warn;

/// Decode a bare payload with the decoder registered for COMMAND
#[derive(Args)]
pub struct PayloadCommand {
    /// Command name (e.g. ping, tx, mnlistdiff)
    pub command: String,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl PayloadCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = self.output.load_config()?;
        let bytes = self.input.read()?;

        let registry = DecoderRegistry::dash();
        let decoder = registry
            .get(&self.command)
            .ok_or_else(|| AppError::UnknownCommand(self.command.clone()))?;

        let mut cursor = Cursor::new(&bytes);
        let mut sink = TreeSink::new(&self.command);
        let result = decoder.decode(&mut cursor, &mut sink);
        let tree = sink.finish();

        print!("{}", render(&tree, &config)?);
        result?;

        if !cursor.is_empty() {
            warn!(
                command = %self.command,
                remaining = cursor.remaining(),
                "payload has unparsed trailing bytes"
            );
            println!("{} bytes left unparsed", cursor.remaining());
        }
        Ok(())
    }
}
