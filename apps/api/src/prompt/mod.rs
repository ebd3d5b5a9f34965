// Prompt construction for the external image-editing model.
// `builder` is the canonical constraint-bearing template family; `scene` is
// the descriptive photorealistic family used by the alternate path.

pub mod builder;
pub mod handlers;
pub mod scene;
