pub mod fixtures;
pub mod test_router;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use test_router::*;
