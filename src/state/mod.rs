//! State snapshot reading: JSON file -> flat `{id -> resource}` table.

pub mod parse;
pub mod resource;

pub use parse::{
    NameStrategy, StateFile, build_resources, parse_state_file, parse_state_json, parse_state_str,
};
pub use resource::{Resource, Resources, last_segment};
