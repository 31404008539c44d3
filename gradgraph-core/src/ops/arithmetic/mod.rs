// Export foundational arithmetic operations directly
pub mod add;
pub mod mul;
pub mod pow;

pub use add::AddOp;
pub use mul::MulOp;
pub use pow::PowOp;

#[cfg(test)]
mod add_test;
#[cfg(test)]
mod mul_test;
