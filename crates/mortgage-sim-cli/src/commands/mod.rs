pub mod simulation;
pub mod stored;
