use serde_derive::{Deserialize, Serialize};
use std::fmt;

/* Target network; selects the default explorer */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    RskMainnet,
    #[default]
    RskTestnet,
}

impl Network {
    pub fn explorer_base_url(self) -> &'static str {
        match self {
            Network::RskMainnet => "https://rootstock.blockscout.com",
            Network::RskTestnet => "https://rootstock-testnet.blockscout.com",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::RskMainnet => "rsk-mainnet",
            Network::RskTestnet => "rsk-testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
