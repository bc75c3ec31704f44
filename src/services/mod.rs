pub mod deliveries;

pub use deliveries::{DeliveryLifecycleManager, LifecycleSettings, ReviewOutcome};
