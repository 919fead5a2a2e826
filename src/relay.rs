//! Outbound relay seam.
//!
//! The relay primitive lives on the coordinating domain and promises only
//! that each accepted instruction will eventually be attempted exactly once
//! on the named remote domain, preserving per-domain emission order. It
//! returns nothing about remote execution; the only failure it can surface
//! is a local refusal to accept the instruction at all.

use crate::encoder::RemoteCallInstruction;
use crate::error::Result;
use ethers::types::Address;

/// The coordinating domain's outbound message primitive.
#[cfg_attr(test, mockall::automock)]
pub trait OutboundRelay {
    /// Hand one instruction to the relay, addressed to `domain`'s inbound
    /// entry point. A returned error is a coordinating-domain-level refusal
    /// and aborts the whole orchestrator call.
    fn dispatch(&mut self, domain: Address, instruction: &RemoteCallInstruction) -> Result<()>;
}

/// Relay that records every dispatched instruction instead of sending it.
///
/// Used by tests and by dry-run callers that hand the captured batch to an
/// external replay harness before committing to a real relay.
#[derive(Debug, Default)]
pub struct RecordingRelay {
    pub dispatched: Vec<(Address, RemoteCallInstruction)>,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions recorded for one domain, in emission order.
    pub fn for_domain(&self, domain: Address) -> Vec<&RemoteCallInstruction> {
        self.dispatched
            .iter()
            .filter(|(d, _)| *d == domain)
            .map(|(_, i)| i)
            .collect()
    }
}

impl OutboundRelay for RecordingRelay {
    fn dispatch(&mut self, domain: Address, instruction: &RemoteCallInstruction) -> Result<()> {
        self.dispatched.push((domain, instruction.clone()));
        Ok(())
    }
}
