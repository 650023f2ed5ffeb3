pub mod identity;

pub use identity::InMemoryIdentityRegistry;
