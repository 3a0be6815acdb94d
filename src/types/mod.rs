pub mod env;
pub mod error;
pub mod infer;
pub mod scheme;
pub mod ty;
pub mod unify;

pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::Infer;
pub use ty::Type;
