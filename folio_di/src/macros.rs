/// Declares a provider holding the given leaf values.
///
/// Generates the struct, a `new` constructor taking the leaf values in order
/// and a `Build` impl per leaf type which hands out clones.
#[macro_export]
macro_rules! provider {
    ($(#[$meta:meta])* $vis:vis $ident:ident { $( $field:ident: $ty:ty ),* $(,)? }) => {
        $(#[$meta])*
        $vis struct $ident {
            cache: $crate::BuildCache,
            $( $field: $ty, )*
        }

        impl $ident {
            #[allow(clippy::too_many_arguments, reason = "one argument per leaf value")]
            $vis fn new($( $field: $ty ),*) -> Self {
                Self {
                    cache: ::core::default::Default::default(),
                    $( $field, )*
                }
            }
        }

        impl $crate::Provider for $ident {
            fn cache(&mut self) -> &mut $crate::BuildCache {
                &mut self.cache
            }
        }

        $(
            impl $crate::Build<$ident> for $ty {
                fn build(provider: &mut $ident) -> Self {
                    ::core::clone::Clone::clone(&provider.$field)
                }
            }
        )*
    };
}
