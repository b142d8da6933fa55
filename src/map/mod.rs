//! Map rendering glue.
//!
//! # Data Flow
//! ```text
//! AppConfig + StreetClassifier
//!     → builder.rs (ColorfulStreetsMap: view, background, street layer)
//!     → surface.rs (MapSurface capability calls)
//!     → page.rs (OpenLayersPage records a MapDocument + style functions)
//!     → HTML page / JSON document served to the browser
//!
//! In the browser:
//!     OpenLayers loads tiles and the OSM XML file
//!     → asks the server for the stroke of each street name
//!     → style.rs (street_style: classify(name) → Stroke)
//! ```
//!
//! # Design Decisions
//! - The crate never parses OSM XML or fetches tiles; OpenLayers does
//! - Style functions are plain closures over the classifier
//! - Features without a name are hidden

pub mod builder;
pub mod page;
pub mod style;
pub mod surface;

pub use builder::ColorfulStreetsMap;
pub use page::{MapDocument, OpenLayersPage};
pub use style::{street_style, Stroke, Style, StyleFn, DEFAULT_STROKE_WIDTH};
pub use surface::{LayerId, LonLat, MapSurface, VectorFormat, VectorSource};
