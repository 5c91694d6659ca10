// Job-title classification engine.
// Pipeline: normalize → exclusion → department → subdivision → hierarchy → role.
// The engine is pure; handlers own the HTTP concerns and the catalogue snapshot.

pub mod department;
pub mod engine;
pub mod exclusion;
pub mod handlers;
pub mod hierarchy;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod role;
