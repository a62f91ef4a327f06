/// Patch copying into the target region
pub mod compositor;
/// Best-matching source patch search
pub mod exemplar;
/// Fill loop orchestration and the one-shot entry point
pub mod executor;
/// Fill front detection
pub mod front;
/// Confidence, data and priority terms
pub mod priority;
