//! Cart view assembly: joins a user's cart lines, the catalog slice they
//! reference, and per-item size rows into flat response rows.

pub mod assembler;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
pub mod index;
pub mod model;
pub mod promotion;
#[cfg(any(test, feature = "reference"))]
pub mod reference;
pub mod types;

pub use assembler::{assemble, Assembler, Assembly, AssemblyDiagnostics};
pub use config::{AssemblyConfig, MissingMatchPolicy, SizeJoin};
pub use model::{CartLine, CatalogItem, JoinStatus, ResponseRow, SizeRow};
pub use promotion::{PromoTier, PromotionStatus, PromotionTier};
