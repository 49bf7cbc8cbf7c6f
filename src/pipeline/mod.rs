//! Pipeline domain types
//!
//! The object graph produced by the parser: stage variants arranged in an
//! owned forest, the pipeline's messenger, the registries that construct
//! both, and the field tables that bind their options.

pub mod errors;
pub mod fields;
pub mod messenger;
pub mod pipeline_def;
pub mod registry;
pub mod stage;
pub mod summary;

pub use errors::{ConfigError, Result, VariantKind};
pub use fields::{Configurable, FieldSlot, FieldTable, FieldValue, bind};
pub use messenger::Messenger;
pub use pipeline_def::Pipeline;
pub use registry::{FAKE_MESSENGER, MessengerFactory, Registry, StageFactory, VariantTable};
pub use stage::{Descendants, Stage, StageNode};
pub use summary::{PipelineSummary, StageSummary, VariantSummary};
