//! Content types of the agency website
//!
//! Each type is a plain serde struct plus its [`Listable`] accessors and
//! [`Entity`] implementation. Visibility flags default to `true` when
//! absent from stored or posted JSON.
//!
//! [`Listable`]: crate::core::listing::Listable
//! [`Entity`]: crate::core::entity::Entity

#[macro_use]
pub mod macros;

pub mod activity;
pub mod contact_info;
pub mod destination;
pub mod enquiry;
pub mod gallery;
pub mod post;
pub mod slider;
pub mod team_member;
pub mod testimonial;
pub mod tour;

pub use activity::Activity;
pub use contact_info::ContactInfo;
pub use destination::Destination;
pub use enquiry::Enquiry;
pub use gallery::GalleryImage;
pub use post::BlogPost;
pub use slider::Slider;
pub use team_member::TeamMember;
pub use testimonial::Testimonial;
pub use tour::{DestinationIndex, DestinationNames, Tour};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default (blank numeric form inputs)
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize `null` as `true` for flags where absence means "shown"
pub(crate) fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// Text value of an active/inactive flag for `status` filters
pub(crate) fn active_status(active: bool) -> String {
    if active { "active" } else { "inactive" }.to_string()
}
