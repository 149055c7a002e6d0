mod arity_lookup;
pub use arity_lookup::ArityLookup;
