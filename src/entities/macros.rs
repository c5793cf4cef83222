//! Macros for reducing boilerplate when defining entities
//!
//! Every content type stores its numeric id in an `id: u64` field; these
//! macros generate the repetitive trait implementations around it.

/// Implement [`Entity`](crate::core::entity::Entity) for a struct with an
/// `id: u64` field
///
/// Extra trait items (slug, visibility, validation...) go in the optional
/// trailing block.
///
/// # Example
///
/// ```rust,ignore
/// impl_entity!(Slider, "sliders", "slider", {
///     fn is_public(&self) -> bool {
///         self.is_active
///     }
/// });
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $plural:expr, $singular:expr $(, { $($extra:tt)* })? $(,)?) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> u64 {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = id;
            }

            $($($extra)*)?
        }
    };
}

/// Implement [`Visibility`](crate::core::entity::Visibility) over a bool field
#[macro_export]
macro_rules! impl_visibility {
    ($type:ident, $field:ident) => {
        impl $crate::core::entity::Visibility for $type {
            fn is_listed(&self) -> bool {
                self.$field
            }

            fn set_listed(&mut self, listed: bool) {
                self.$field = listed;
            }
        }
    };
}

/// Implement [`Orderable`](crate::core::entity::Orderable) over a
/// `sort_order: u32` field
#[macro_export]
macro_rules! impl_orderable {
    ($type:ident) => {
        impl $crate::core::entity::Orderable for $type {
            fn sort_order(&self) -> u32 {
                self.sort_order
            }

            fn set_sort_order(&mut self, order: u32) {
                self.sort_order = order;
            }
        }
    };
}
