pub mod poller;
pub mod rest;
pub mod state;
pub mod types;

pub use poller::{spawn_poller, PollerHandle};
pub use rest::MarketDataClient;
pub use state::{Applied, MarketState};
pub use types::{decode_payload, Payload, RawRecord};
