//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `supabase` - HS256 access tokens issued by Supabase Auth
//! - `mock` - fixed token table for tests and local runs

mod mock;
mod supabase;

pub use mock::MockSessionValidator;
pub use supabase::{SupabaseJwtConfig, SupabaseJwtValidator};
