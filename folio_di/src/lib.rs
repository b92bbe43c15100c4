//! Compile time dependency injection.
//!
//! A provider (declared with [`provider!`]) owns the leaf values, usually
//! configuration. Services derive [`Build`] and are assembled recursively
//! from their fields. Each service type is built at most once per provider.

#[cfg(test)]
extern crate self as folio_di;

pub use folio_di_derive::Build;
pub use cache::BuildCache;

mod cache;
mod macros;

pub trait Provider: Sized {
    fn cache(&mut self) -> &mut BuildCache;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}
