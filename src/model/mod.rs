pub mod bounds;
pub mod dataset;
pub mod date_token;
pub mod document;
pub mod grouping;
pub mod interaction;
pub mod layout;
pub mod milestone;
pub mod overrides;
pub mod scroll;
pub mod ticks;
pub mod timeline;
pub mod viewport;

pub use bounds::{compute_bounds, TimelineBounds};
pub use dataset::Dataset;
pub use document::PointerDocument;
pub use grouping::{group_by_project, sort_by_start, ProjectGroup};
pub use interaction::{InteractionController, PointerTarget, Propagation};
pub use layout::{layout_bar, today_position, BarLayout};
pub use milestone::TimelineItem;
pub use overrides::OverrideMap;
pub use ticks::{generate_ticks, Tick};
pub use timeline::Timeline;
pub use viewport::ViewportState;
