use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Wallet {
    pub id: i64,
    pub name: String,
    pub credit: f64,
    pub giftcard: f64,
    pub user: WalletOwner,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WalletOwner {
    pub id: i64,
    pub login: String,
}

/// Gift cards share the wallet schema upstream; which card a container
/// holds is decided by the endpoint it is bound to.
pub type GiftCard = Wallet;
