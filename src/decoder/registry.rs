//! Command name → payload decoder registry
//!
//! The command set is open: embedders can register extra commands or replace
//! a built-in decoder without touching the decoders themselves.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::cursor::Cursor;
use super::llmq;
use super::messages::{
    blocks, empty, governance, instantsend, masternode, network, privatesend,
};
use super::sink::FieldSink;
use super::DecodeResult;

/// A payload decoder for one command
pub trait MessageDecoder: Send + Sync {
    fn decode(&self, cursor: &mut Cursor<'_>, sink: &mut dyn FieldSink) -> DecodeResult<()>;
}

impl<F> MessageDecoder for F
where
    F: Fn(&mut Cursor<'_>, &mut dyn FieldSink) -> DecodeResult<()> + Send + Sync,
{
    fn decode(&self, cursor: &mut Cursor<'_>, sink: &mut dyn FieldSink) -> DecodeResult<()> {
        self(cursor, sink)
    }
}

/// Commands that carry no payload
pub const PAYLOADLESS_COMMANDS: [&str; 7] = [
    "verack",
    "getaddr",
    "mempool",
    "filterclear",
    "sendheaders",
    "getsporks",
    "qwatch",
];

#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: HashMap<String, Arc<dyn MessageDecoder>>,
}

impl DecoderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every Dash command decoder
    pub fn dash() -> Self {
        let mut r = Self::new();

        r.register("version", network::version);
        r.register("addr", network::addr);
        r.register("inv", network::inv);
        r.register("getdata", network::inv);
        r.register("notfound", network::inv);
        r.register("getblocks", network::block_locator);
        r.register("getheaders", network::block_locator);
        r.register("ping", network::ping);
        r.register("pong", network::ping);
        r.register("reject", network::reject);
        r.register("filterload", network::filterload);
        r.register("filteradd", network::filteradd);
        r.register("sendcmpct", network::sendcmpct);

        r.register("tx", blocks::tx);
        r.register("block", blocks::block);
        r.register("headers", blocks::headers);
        r.register("merkleblock", blocks::merkleblock);
        r.register("cmpctblock", blocks::cmpctblock);
        r.register("getblocktxn", blocks::getblocktxn);
        r.register("blocktxn", blocks::blocktxn);

        r.register("mnb", masternode::mnb);
        r.register("mnp", masternode::mnp);
        r.register("mnw", masternode::mnw);
        r.register("mnwb", masternode::mnw);
        r.register("mnv", masternode::mnv);
        r.register("dseg", masternode::dseg);
        r.register("ssc", masternode::ssc);
        r.register("mnget", masternode::mnget);
        r.register("spork", masternode::spork);
        r.register("getmnlistd", masternode::getmnlistd);
        r.register("mnlistdiff", masternode::mnlistdiff);
        r.register("mnauth", masternode::mnauth);

        r.register("dstx", privatesend::dstx);
        r.register("dssu", privatesend::dssu);
        r.register("dsq", privatesend::dsq);
        r.register("dsa", privatesend::dsa);
        r.register("dsi", privatesend::dsi);
        r.register("dsf", privatesend::dsf);
        r.register("dss", privatesend::dss);
        r.register("dsc", privatesend::dsc);
        r.register("senddsq", privatesend::senddsq);

        r.register("govobj", governance::govobj);
        r.register("govobjvote", governance::govobjvote);
        r.register("govsync", governance::govsync);

        r.register("ix", instantsend::ix);
        r.register("txlvote", instantsend::txlvote);
        r.register("islock", instantsend::islock);
        r.register("clsig", instantsend::clsig);

        r.register("qcontrib", llmq::qcontrib);
        r.register("qcomplaint", llmq::qcomplaint);
        r.register("qjustify", llmq::qjustify);
        r.register("qpcommit", llmq::qpcommit);
        r.register("qfcommit", llmq::qfcommit);
        r.register("qbsigs", llmq::qbsigs);
        r.register("qgetsigs", llmq::qgetsigs);
        r.register("qsigsinv", llmq::qsigsinv);
        r.register("qsendrecsigs", llmq::qsendrecsigs);
        r.register("qsigrec", llmq::qsigrec);
        r.register("qsigsesann", llmq::qsigsesann);

        for name in PAYLOADLESS_COMMANDS {
            r.register(name, empty);
        }

        r
    }

    /// Register `decoder` for `command`, returning any decoder it replaces
    pub fn register<D>(&mut self, command: &str, decoder: D) -> Option<Arc<dyn MessageDecoder>>
    where
        D: MessageDecoder + 'static,
    {
        self.decoders.insert(command.to_string(), Arc::new(decoder))
    }

    pub fn get(&self, command: &str) -> Option<&dyn MessageDecoder> {
        self.decoders.get(command).map(|d| d.as_ref())
    }

    pub fn contains(&self, command: &str) -> bool {
        self.decoders.contains_key(command)
    }

    /// Registered command names, sorted
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("commands", &self.commands())
            .finish()
    }
}
