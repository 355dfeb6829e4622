pub mod background;
pub mod pipeline;
pub mod scheduler;

pub use background::{resolve_background, BackgroundProbe};
pub use pipeline::RecolorPipeline;
pub use scheduler::{Debouncer, Registration, Scheduler, VisibilityEvent, VisibilityTracker};
