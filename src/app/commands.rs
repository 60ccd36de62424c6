//! Inbound commands to the application service.
//!
//! Remote payloads are matched exactly against the configured
//! [`CommandTokens`]; anything else is not a command.

use crate::config::CommandTokens;

/// Actions the remote controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinCommand {
    OpenLid,
    CloseLid,
    LightOn,
    LightOff,
}

impl BinCommand {
    /// Exact-match `raw` against the dispatch table.  No trimming, no case
    /// folding: the tokens are a wire contract.
    pub fn parse(raw: &str, tokens: &CommandTokens) -> Option<Self> {
        if raw == tokens.open_lid {
            Some(Self::OpenLid)
        } else if raw == tokens.close_lid {
            Some(Self::CloseLid)
        } else if raw == tokens.light_on {
            Some(Self::LightOn)
        } else if raw == tokens.light_off {
            Some(Self::LightOff)
        } else {
            None
        }
    }
}
