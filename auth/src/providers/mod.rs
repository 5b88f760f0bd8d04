//! Provider traits.
//!
//! All external collaborators are abstracted behind traits so reducers stay
//! pure and testable at memory speed.

pub mod identity;
pub mod navigator;

pub use identity::IdentityProvider;
pub use navigator::Navigator;
