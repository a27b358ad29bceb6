pub mod hostname;

pub use hostname::resolve_hostname;
