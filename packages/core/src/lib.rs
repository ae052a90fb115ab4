//! ISPConfig Core: fault values, parameter bags, response normalization, and DNS record types.

pub mod fault;
pub mod params;
pub mod record;
pub mod response;

pub use fault::Fault;
pub use params::ParamBag;
pub use record::{RecordType, RecordTypeError};
pub use response::NormalizedResult;

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
