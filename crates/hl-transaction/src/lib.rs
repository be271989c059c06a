pub mod amount;
pub mod digest;
pub mod time;
pub mod transaction;

pub use amount::Amount;
pub use digest::{is_hex_digest, sha256_hex, HEX_DIGEST_LEN};
pub use time::{Clock, FixedClock, SystemClock, Timestamp};
pub use transaction::Transaction;
