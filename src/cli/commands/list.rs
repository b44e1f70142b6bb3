use crate::decoder::registry::PAYLOADLESS_COMMANDS;
use crate::decoder::DecoderRegistry;
use crate::errors::AppResult;
use clap::Args;

/// List the registered command names
#[derive(Args)]
pub struct ListCommand {
    /// Print one name per line without annotations
    #[arg(long)]
    pub plain: bool,
}

impl ListCommand {
    pub fn run(&self) -> AppResult<()> {
        let registry = DecoderRegistry::dash();
        for name in registry.commands() {
            if !self.plain && PAYLOADLESS_COMMANDS.contains(&name) {
                println!("{} (no payload)", name);
            } else {
                println!("{}", name);
            }
        }
        if !self.plain {
            println!("{} commands", registry.len());
        }
        Ok(())
    }
}
