pub mod evaluate;
pub mod exact;
pub mod plan;
