pub mod cost;
pub mod fitness;
pub mod probability;

pub use self::cost::path_time;
pub use self::fitness::{sanitize, transfer_time, Evaluator};
pub use self::probability::{psi, psi_packets, qnorm};
