mod lib_name_policy;

pub use lib_name_policy::LibNamePolicy;
