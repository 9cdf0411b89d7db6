//! Reading payloads back out of generated textures.

pub mod inspect;
