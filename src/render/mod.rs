pub mod compositor;
pub mod layout;
pub mod plan;
pub mod source;
