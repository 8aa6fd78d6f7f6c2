//====================================================================

pub mod shape_pipeline;
pub mod sprite_pipeline;
pub mod text_pipeline;

pub use self::shape_pipeline::{ShapeBatch, ShapePipeline};
pub use self::sprite_pipeline::SpritePipeline;
pub use self::text_pipeline::{TextLabel, TextLabelDescriptor, TextPipeline};

//====================================================================
