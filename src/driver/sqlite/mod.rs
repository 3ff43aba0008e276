pub(in crate::driver) mod driver;
pub(in crate::driver) mod rows;
pub(in crate::driver) mod statement;

pub use driver::ConnectionOptions;
pub use driver::Driver;
pub use statement::Statement;
